use super::dto::{CreateZoneDto, UpdateZoneDto};
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
use entity::zone;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_zones))
        .route("/getById/:zone_id", get(zone_by_id))
        .route("/create", post(create_zone))
        .route("/update/:zone_id", put(update_zone))
        .route("/:zone_id", delete(delete_zone))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active zones
#[utoipa::path(
    get,
    tag = "zone",
    path = "/zone/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::zone::Model>)),
)]
pub async fn list_zones(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<zone::Model>>, (StatusCode, SimpleError)> {
    let zones = zone::Entity::find()
        .filter(zone::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(zones))
}

/// Get a zone by id
#[utoipa::path(
    get,
    tag = "zone",
    path = "/zone/getById/{zone_id}",
    security(("jwt" = [])),
    params(("zone_id" = Uuid, Path, description = "id of the zone to get")),
    responses(
        (status = OK, body = entity::zone::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn zone_by_id(
    Path(zone_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<zone::Model>, (StatusCode, SimpleError)> {
    let zone = zone::Entity::find_by_id(zone_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(zone))
}

/// Create a zone
#[utoipa::path(
    post,
    tag = "zone",
    path = "/zone/create",
    security(("jwt" = [])),
    request_body(content = CreateZoneDto, content_type = "application/json"),
    responses((status = OK, body = entity::zone::Model)),
)]
pub async fn create_zone(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateZoneDto>,
) -> Result<Json<zone::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let zone = zone::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
    };

    Ok(Json(zone.insert(&db).await.map_err(DbError::from)?))
}

/// Update a zone
#[utoipa::path(
    put,
    tag = "zone",
    path = "/zone/update/{zone_id}",
    security(("jwt" = [])),
    params(("zone_id" = Uuid, Path, description = "id of the zone to update")),
    request_body(content = UpdateZoneDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::zone::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_zone(
    Path(zone_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateZoneDto>,
) -> Result<Json<zone::Model>, (StatusCode, SimpleError)> {
    let zone = zone::Entity::find_by_id(zone_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut zone = zone.into_active_model();

    set_if_some(&mut zone.name, dto.name);
    zone.updated_at = Set(Utc::now());

    Ok(Json(zone.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a zone
#[utoipa::path(
    delete,
    tag = "zone",
    path = "/zone/{zone_id}",
    security(("jwt" = [])),
    params(("zone_id" = Uuid, Path, description = "id of the zone to delete")),
    responses(
        (status = OK, body = entity::zone::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_zone(
    Path(zone_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<zone::Model>, (StatusCode, SimpleError)> {
    let zone = zone::Entity::find_by_id(zone_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut zone = zone.into_active_model();

    zone.state = Set(RecordState::Inactivo);
    zone.updated_at = Set(Utc::now());

    Ok(Json(zone.update(&db).await.map_err(DbError::from)?))
}
