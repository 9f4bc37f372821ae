use super::dto::{CreateLocationDto, LocationDto, UpdateLocationDto};
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
use entity::{branch_office, location, location_branch_office};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_locations))
        .route("/getById/:location_id", get(location_by_id))
        .route("/create", post(create_location))
        .route("/update/:location_id", put(update_location))
        .route("/:location_id", delete(delete_location))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active locations with their branch offices
#[utoipa::path(
    get,
    tag = "location",
    path = "/location/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<LocationDto>)),
)]
pub async fn list_locations(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<LocationDto>>, (StatusCode, SimpleError)> {
    let locations = location::Entity::find()
        .filter(location::Column::State.eq(RecordState::Activo))
        .find_with_related(branch_office::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .map(|(location, branch_offices)| LocationDto {
            location,
            branch_offices,
        })
        .collect();

    Ok(Json(locations))
}

/// Get a location by id
#[utoipa::path(
    get,
    tag = "location",
    path = "/location/getById/{location_id}",
    security(("jwt" = [])),
    params(("location_id" = Uuid, Path, description = "id of the location to get")),
    responses(
        (status = OK, body = LocationDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn location_by_id(
    Path(location_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<LocationDto>, (StatusCode, SimpleError)> {
    let (location, branch_offices) = location::Entity::find_by_id(location_id)
        .find_with_related(branch_office::Entity)
        .all(&db)
        .await
        .map_err(DbError::from)?
        .into_iter()
        .next()
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(LocationDto {
        location,
        branch_offices,
    }))
}

/// Create a location
#[utoipa::path(
    post,
    tag = "location",
    path = "/location/create",
    security(("jwt" = [])),
    request_body(content = CreateLocationDto, content_type = "application/json"),
    responses((status = OK, body = entity::location::Model)),
)]
pub async fn create_location(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateLocationDto>,
) -> Result<Json<location::Model>, (StatusCode, SimpleError)> {
    let created = db
        .transaction::<_, location::Model, DbErr>(|tx| {
            Box::pin(async move {
                let now = Utc::now();

                let location = location::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    state: Set(RecordState::Activo),
                    name: Set(dto.name),
                }
                .insert(tx)
                .await?;

                for branch_office_id in dto.branch_office_ids {
                    location_branch_office::ActiveModel {
                        location_id: Set(location.id),
                        branch_office_id: Set(branch_office_id),
                    }
                    .insert(tx)
                    .await?;
                }

                Ok(location)
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(created))
}

/// Update a location, replacing its branch offices when a new list is sent
#[utoipa::path(
    put,
    tag = "location",
    path = "/location/update/{location_id}",
    security(("jwt" = [])),
    params(("location_id" = Uuid, Path, description = "id of the location to update")),
    request_body(content = UpdateLocationDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::location::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_location(
    Path(location_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateLocationDto>,
) -> Result<Json<location::Model>, (StatusCode, SimpleError)> {
    let location = location::Entity::find_by_id(location_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let updated = db
        .transaction::<_, location::Model, DbErr>(|tx| {
            Box::pin(async move {
                if let Some(branch_office_ids) = dto.branch_office_ids {
                    location_branch_office::Entity::delete_many()
                        .filter(location_branch_office::Column::LocationId.eq(location_id))
                        .exec(tx)
                        .await?;

                    for branch_office_id in branch_office_ids {
                        location_branch_office::ActiveModel {
                            location_id: Set(location_id),
                            branch_office_id: Set(branch_office_id),
                        }
                        .insert(tx)
                        .await?;
                    }
                }

                let mut location = location.into_active_model();

                set_if_some(&mut location.name, dto.name);
                location.updated_at = Set(Utc::now());

                location.update(tx).await
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(updated))
}

/// Soft delete a location
#[utoipa::path(
    delete,
    tag = "location",
    path = "/location/{location_id}",
    security(("jwt" = [])),
    params(("location_id" = Uuid, Path, description = "id of the location to delete")),
    responses(
        (status = OK, body = entity::location::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_location(
    Path(location_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<location::Model>, (StatusCode, SimpleError)> {
    let location = location::Entity::find_by_id(location_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut location = location.into_active_model();

    location.state = Set(RecordState::Inactivo);
    location.updated_at = Set(Utc::now());

    Ok(Json(location.update(&db).await.map_err(DbError::from)?))
}
