use super::dto::{CreateOccupationDto, UpdateOccupationDto};
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
use entity::occupation;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_occupations))
        .route("/getById/:occupation_id", get(occupation_by_id))
        .route("/create", post(create_occupation))
        .route("/update/:occupation_id", put(update_occupation))
        .route("/:occupation_id", delete(delete_occupation))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active occupations
#[utoipa::path(
    get,
    tag = "occupation",
    path = "/occupation/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::occupation::Model>)),
)]
pub async fn list_occupations(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<occupation::Model>>, (StatusCode, SimpleError)> {
    let occupations = occupation::Entity::find()
        .filter(occupation::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(occupations))
}

/// Get a occupation by id
#[utoipa::path(
    get,
    tag = "occupation",
    path = "/occupation/getById/{occupation_id}",
    security(("jwt" = [])),
    params(("occupation_id" = Uuid, Path, description = "id of the occupation to get")),
    responses(
        (status = OK, body = entity::occupation::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn occupation_by_id(
    Path(occupation_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<occupation::Model>, (StatusCode, SimpleError)> {
    let occupation = occupation::Entity::find_by_id(occupation_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(occupation))
}

/// Create a occupation
#[utoipa::path(
    post,
    tag = "occupation",
    path = "/occupation/create",
    security(("jwt" = [])),
    request_body(content = CreateOccupationDto, content_type = "application/json"),
    responses((status = OK, body = entity::occupation::Model)),
)]
pub async fn create_occupation(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateOccupationDto>,
) -> Result<Json<occupation::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let occupation = occupation::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
    };

    Ok(Json(occupation.insert(&db).await.map_err(DbError::from)?))
}

/// Update a occupation
#[utoipa::path(
    put,
    tag = "occupation",
    path = "/occupation/update/{occupation_id}",
    security(("jwt" = [])),
    params(("occupation_id" = Uuid, Path, description = "id of the occupation to update")),
    request_body(content = UpdateOccupationDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::occupation::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_occupation(
    Path(occupation_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateOccupationDto>,
) -> Result<Json<occupation::Model>, (StatusCode, SimpleError)> {
    let occupation = occupation::Entity::find_by_id(occupation_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut occupation = occupation.into_active_model();

    set_if_some(&mut occupation.name, dto.name);
    occupation.updated_at = Set(Utc::now());

    Ok(Json(occupation.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a occupation
#[utoipa::path(
    delete,
    tag = "occupation",
    path = "/occupation/{occupation_id}",
    security(("jwt" = [])),
    params(("occupation_id" = Uuid, Path, description = "id of the occupation to delete")),
    responses(
        (status = OK, body = entity::occupation::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_occupation(
    Path(occupation_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<occupation::Model>, (StatusCode, SimpleError)> {
    let occupation = occupation::Entity::find_by_id(occupation_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut occupation = occupation.into_active_model();

    occupation.state = Set(RecordState::Inactivo);
    occupation.updated_at = Set(Utc::now());

    Ok(Json(occupation.update(&db).await.map_err(DbError::from)?))
}
