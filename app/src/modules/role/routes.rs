use super::dto::{CreateRoleDto, RoleDto, UpdateRoleDto};
use crate::{
    database::{error::DbError, helpers::set_if_some},
    modules::{
        auth,
        common::{
            extractors::{DbConnection, ValidatedJson},
            responses::SimpleError,
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
use entity::enums::RecordState;
use entity::{permission, role, role_permission};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_roles))
        .route("/getById/:role_id", get(role_by_id))
        .route("/create", post(create_role))
        .route("/update/:role_id", put(update_role))
        .route("/:role_id", delete(delete_role))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active roles with their permissions
#[utoipa::path(
    get,
    tag = "role",
    path = "/roles/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<RoleDto>)),
)]
pub async fn list_roles(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<RoleDto>>, (StatusCode, SimpleError)> {
    let roles = role::Entity::find()
        .filter(role::Column::State.eq(RecordState::Activo))
        .find_with_related(permission::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(role, permissions)| RoleDto { role, permissions })
        .collect();

    Ok(Json(roles))
}

/// Get a role by id
#[utoipa::path(
    get,
    tag = "role",
    path = "/roles/getById/{role_id}",
    security(("jwt" = [])),
    params(("role_id" = Uuid, Path, description = "id of the role to get")),
    responses(
        (status = OK, body = RoleDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn role_by_id(
    Path(role_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<RoleDto>, (StatusCode, SimpleError)> {
    let (role, permissions) = role::Entity::find_by_id(role_id)
        .find_with_related(permission::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .next()
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(RoleDto { role, permissions }))
}

/// Create a role
#[utoipa::path(
    post,
    tag = "role",
    path = "/roles/create",
    security(("jwt" = [])),
    request_body(content = CreateRoleDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::role::Model),
        (status = BAD_REQUEST, description = "NAME_IN_USE", body = SimpleError),
    ),
)]
pub async fn create_role(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<Json<role::Model>, (StatusCode, SimpleError)> {
    let created = db
        .transaction::<_, role::Model, DbErr>(|tx| {
            Box::pin(async move {
                let now = Utc::now();

                let role = role::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    state: Set(RecordState::Activo),
                    name: Set(dto.name),
                }
                .insert(tx)
                .await?;

                for permission_id in dto.permission_ids {
                    role_permission::ActiveModel {
                        role_id: Set(role.id),
                        permission_id: Set(permission_id),
                    }
                    .insert(tx)
                    .await?;
                }

                Ok(role)
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(created))
}

/// Update a role, replacing its permissions when a new list is sent
#[utoipa::path(
    put,
    tag = "role",
    path = "/roles/update/{role_id}",
    security(("jwt" = [])),
    params(("role_id" = Uuid, Path, description = "id of the role to update")),
    request_body(content = UpdateRoleDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::role::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_role(
    Path(role_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<role::Model>, (StatusCode, SimpleError)> {
    let role = role::Entity::find_by_id(role_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let updated = db
        .transaction::<_, role::Model, DbErr>(|tx| {
            Box::pin(async move {
                if let Some(permission_ids) = dto.permission_ids {
                    role_permission::Entity::delete_many()
                        .filter(role_permission::Column::RoleId.eq(role_id))
                        .exec(tx)
                        .await?;

                    for permission_id in permission_ids {
                        role_permission::ActiveModel {
                            role_id: Set(role_id),
                            permission_id: Set(permission_id),
                        }
                        .insert(tx)
                        .await?;
                    }
                }

                let mut role = role.into_active_model();

                set_if_some(&mut role.name, dto.name);
                role.updated_at = Set(Utc::now());

                role.update(tx).await
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(updated))
}

/// Soft delete a role
#[utoipa::path(
    delete,
    tag = "role",
    path = "/roles/{role_id}",
    security(("jwt" = [])),
    params(("role_id" = Uuid, Path, description = "id of the role to delete")),
    responses(
        (status = OK, body = entity::role::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_role(
    Path(role_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<role::Model>, (StatusCode, SimpleError)> {
    let role = role::Entity::find_by_id(role_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut role = role.into_active_model();

    role.state = Set(RecordState::Inactivo);
    role.updated_at = Set(Utc::now());

    Ok(Json(role.update(&db).await.map_err(DbError::from)?))
}
