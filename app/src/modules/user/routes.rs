use super::dto::{CreateUserDto, UpdateUserDto, UserDto};
use crate::{
    database::{error::DbError, helpers::set_if_some},
    modules::{
        auth,
        common::{
            extractors::{DbConnection, ValidatedJson},
            responses::{internal_error_res, SimpleError},
        },
    },
    server::controller::AppState,
};
use axum::{
    extract::Path,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use entity::enums::{OperatorStatus, RecordState};
use entity::{role, user};
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

/// Name of the role assigned to truck drivers
pub const OPERATOR_ROLE: &str = "Operario";

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_users))
        .route("/all/operators", get(list_operators))
        .route("/all/available/operators", get(list_available_operators))
        .route("/getById/:user_id", get(user_by_id))
        .route("/create", post(create_user))
        .route("/update/:user_id", put(update_user))
        .route("/delete/:user_id", delete(delete_user))
        .route("/activate/:user_id", delete(activate_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

fn with_roles(users: Vec<(user::Model, Option<role::Model>)>) -> Vec<UserDto> {
    users
        .into_iter()
        .map(|(user, role)| UserDto { user, role })
        .collect()
}

/// List the active users with their roles
#[utoipa::path(
    get,
    tag = "user",
    path = "/usuarios/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<UserDto>)),
)]
pub async fn list_users(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<UserDto>>, (StatusCode, SimpleError)> {
    let users = user::Entity::find()
        .filter(user::Column::State.eq(RecordState::Activo))
        .find_also_related(role::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(with_roles(users)))
}

/// List the users holding the operator role
#[utoipa::path(
    get,
    tag = "user",
    path = "/usuarios/all/operators",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<UserDto>)),
)]
pub async fn list_operators(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<UserDto>>, (StatusCode, SimpleError)> {
    let operators = user::Entity::find()
        .filter(user::Column::State.eq(RecordState::Activo))
        .find_also_related(role::Entity)
        .filter(role::Column::Name.eq(OPERATOR_ROLE))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(with_roles(operators)))
}

/// List the operators that are not currently driving a route
#[utoipa::path(
    get,
    tag = "user",
    path = "/usuarios/all/available/operators",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<UserDto>)),
)]
pub async fn list_available_operators(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<UserDto>>, (StatusCode, SimpleError)> {
    let operators = user::Entity::find()
        .filter(user::Column::State.eq(RecordState::Activo))
        .filter(user::Column::Status.eq(OperatorStatus::Disponible))
        .find_also_related(role::Entity)
        .filter(role::Column::Name.eq(OPERATOR_ROLE))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(with_roles(operators)))
}

/// Get a user by id
#[utoipa::path(
    get,
    tag = "user",
    path = "/usuarios/getById/{user_id}",
    security(("jwt" = [])),
    params(("user_id" = Uuid, Path, description = "id of the user to get")),
    responses(
        (status = OK, body = UserDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn user_by_id(
    Path(user_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<UserDto>, (StatusCode, SimpleError)> {
    let (user, role) = user::Entity::find_by_id(user_id)
        .find_also_related(role::Entity)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(UserDto { user, role }))
}

/// Create a user
#[utoipa::path(
    post,
    tag = "user",
    path = "/usuarios/create",
    security(("jwt" = [])),
    request_body(content = CreateUserDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::user::Model),
        (status = BAD_REQUEST, description = "email or id number in use", body = SimpleError),
    ),
)]
pub async fn create_user(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Json<user::Model>, (StatusCode, SimpleError)> {
    let role = role::Entity::find_by_id(dto.role_id)
        .one(&db)
        .await
        .map_err(DbError::from)?;

    if role.is_none() {
        return Err((StatusCode::BAD_REQUEST, SimpleError::from("unknown role")));
    }

    let password_hash =
        bcrypt::hash(dto.password, bcrypt::DEFAULT_COST).or(Err(internal_error_res()))?;

    let now = Utc::now();

    let user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        status: Set(OperatorStatus::Disponible),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email),
        id_number: Set(dto.id_number),
        password: Set(password_hash),
        role_id: Set(dto.role_id),
    };

    Ok(Json(user.insert(&db).await.map_err(DbError::from)?))
}

/// Update a user, re-hashing the password if a new one is sent
#[utoipa::path(
    put,
    tag = "user",
    path = "/usuarios/update/{user_id}",
    security(("jwt" = [])),
    params(("user_id" = Uuid, Path, description = "id of the user to update")),
    request_body(content = UpdateUserDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::user::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_user(
    Path(user_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<user::Model>, (StatusCode, SimpleError)> {
    let user = user::Entity::find_by_id(user_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut user = user.into_active_model();

    set_if_some(&mut user.first_name, dto.first_name);
    set_if_some(&mut user.last_name, dto.last_name);
    set_if_some(&mut user.email, dto.email);
    set_if_some(&mut user.id_number, dto.id_number);
    set_if_some(&mut user.status, dto.status);
    set_if_some(&mut user.role_id, dto.role_id);

    if let Some(password) = dto.password {
        let password_hash =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).or(Err(internal_error_res()))?;

        user.password = Set(password_hash);
    }

    user.updated_at = Set(Utc::now());

    Ok(Json(user.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a user
#[utoipa::path(
    delete,
    tag = "user",
    path = "/usuarios/delete/{user_id}",
    security(("jwt" = [])),
    params(("user_id" = Uuid, Path, description = "id of the user to delete")),
    responses(
        (status = OK, body = entity::user::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_user(
    Path(user_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<user::Model>, (StatusCode, SimpleError)> {
    set_user_state(user_id, RecordState::Inactivo, &db).await
}

/// Reactivate a soft deleted user
#[utoipa::path(
    delete,
    tag = "user",
    path = "/usuarios/activate/{user_id}",
    security(("jwt" = [])),
    params(("user_id" = Uuid, Path, description = "id of the user to reactivate")),
    responses(
        (status = OK, body = entity::user::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn activate_user(
    Path(user_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<user::Model>, (StatusCode, SimpleError)> {
    set_user_state(user_id, RecordState::Activo, &db).await
}

async fn set_user_state(
    user_id: Uuid,
    state: RecordState,
    db: &sea_orm::DatabaseConnection,
) -> Result<Json<user::Model>, (StatusCode, SimpleError)> {
    let user = user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut user = user.into_active_model();

    user.state = Set(state);
    user.updated_at = Set(Utc::now());

    Ok(Json(user.update(db).await.map_err(DbError::from)?))
}
