use super::dto::{CreateFactorDto, UpdateFactorDto};
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
use entity::factor;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_factors))
        .route("/getById/:factor_id", get(factor_by_id))
        .route("/create", post(create_factor))
        .route("/update/:factor_id", put(update_factor))
        .route("/:factor_id", delete(delete_factor))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active correction factors
#[utoipa::path(
    get,
    tag = "factor",
    path = "/factor/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::factor::Model>)),
)]
pub async fn list_factors(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<factor::Model>>, (StatusCode, SimpleError)> {
    let factors = factor::Entity::find()
        .filter(factor::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(factors))
}

/// Get a factor by id
#[utoipa::path(
    get,
    tag = "factor",
    path = "/factor/getById/{factor_id}",
    security(("jwt" = [])),
    params(("factor_id" = Uuid, Path, description = "id of the factor to get")),
    responses(
        (status = OK, body = entity::factor::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn factor_by_id(
    Path(factor_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<factor::Model>, (StatusCode, SimpleError)> {
    let factor = factor::Entity::find_by_id(factor_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(factor))
}

/// Create a factor
#[utoipa::path(
    post,
    tag = "factor",
    path = "/factor/create",
    security(("jwt" = [])),
    request_body(content = CreateFactorDto, content_type = "application/json"),
    responses((status = OK, body = entity::factor::Model)),
)]
pub async fn create_factor(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateFactorDto>,
) -> Result<Json<factor::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let factor = factor::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
        value: Set(dto.value),
    };

    Ok(Json(factor.insert(&db).await.map_err(DbError::from)?))
}

/// Update a factor
#[utoipa::path(
    put,
    tag = "factor",
    path = "/factor/update/{factor_id}",
    security(("jwt" = [])),
    params(("factor_id" = Uuid, Path, description = "id of the factor to update")),
    request_body(content = UpdateFactorDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::factor::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_factor(
    Path(factor_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateFactorDto>,
) -> Result<Json<factor::Model>, (StatusCode, SimpleError)> {
    let factor = factor::Entity::find_by_id(factor_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut factor = factor.into_active_model();

    set_if_some(&mut factor.name, dto.name);
    set_if_some(&mut factor.value, dto.value);
    factor.updated_at = Set(Utc::now());

    Ok(Json(factor.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a factor
#[utoipa::path(
    delete,
    tag = "factor",
    path = "/factor/{factor_id}",
    security(("jwt" = [])),
    params(("factor_id" = Uuid, Path, description = "id of the factor to delete")),
    responses(
        (status = OK, body = entity::factor::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_factor(
    Path(factor_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<factor::Model>, (StatusCode, SimpleError)> {
    let factor = factor::Entity::find_by_id(factor_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut factor = factor.into_active_model();

    factor.state = Set(RecordState::Inactivo);
    factor.updated_at = Set(Utc::now());

    Ok(Json(factor.update(&db).await.map_err(DbError::from)?))
}
