use super::dto::{CreatePropaneTruckDto, UpdatePropaneTruckDto};
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
use entity::propane_truck;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_propane_trucks))
        .route("/getById/:truck_id", get(propane_truck_by_id))
        .route("/getByOperator/:operator_id", get(propane_trucks_by_operator))
        .route("/create", post(create_propane_truck))
        .route("/update/:truck_id", put(update_propane_truck))
        .route("/:truck_id", delete(delete_propane_truck))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active propane trucks
#[utoipa::path(
    get,
    tag = "propane-truck",
    path = "/propane-truck/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::propane_truck::Model>)),
)]
pub async fn list_propane_trucks(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<propane_truck::Model>>, (StatusCode, SimpleError)> {
    let trucks = propane_truck::Entity::find()
        .filter(propane_truck::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(trucks))
}

/// Get a propane truck by id
#[utoipa::path(
    get,
    tag = "propane-truck",
    path = "/propane-truck/getById/{truck_id}",
    security(("jwt" = [])),
    params(("truck_id" = Uuid, Path, description = "id of the truck to get")),
    responses(
        (status = OK, body = entity::propane_truck::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn propane_truck_by_id(
    Path(truck_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<propane_truck::Model>, (StatusCode, SimpleError)> {
    let truck = propane_truck::Entity::find_by_id(truck_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(truck))
}

/// List the trucks assigned to an operator
#[utoipa::path(
    get,
    tag = "propane-truck",
    path = "/propane-truck/getByOperator/{operator_id}",
    security(("jwt" = [])),
    params(("operator_id" = Uuid, Path, description = "id of the operator")),
    responses((status = OK, body = Vec<entity::propane_truck::Model>)),
)]
pub async fn propane_trucks_by_operator(
    Path(operator_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<propane_truck::Model>>, (StatusCode, SimpleError)> {
    let trucks = propane_truck::Entity::find()
        .filter(propane_truck::Column::State.eq(RecordState::Activo))
        .filter(propane_truck::Column::OperatorId.eq(operator_id))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(trucks))
}

/// Create a propane truck
#[utoipa::path(
    post,
    tag = "propane-truck",
    path = "/propane-truck/create",
    security(("jwt" = [])),
    request_body(content = CreatePropaneTruckDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::propane_truck::Model),
        (status = BAD_REQUEST, description = "plate in use", body = SimpleError),
    ),
)]
pub async fn create_propane_truck(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreatePropaneTruckDto>,
) -> Result<Json<propane_truck::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let truck = propane_truck::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        plate: Set(dto.plate.to_uppercase()),
        capacity: Set(dto.capacity),
        operator_id: Set(dto.operator_id),
    };

    Ok(Json(truck.insert(&db).await.map_err(DbError::from)?))
}

/// Update a propane truck
#[utoipa::path(
    put,
    tag = "propane-truck",
    path = "/propane-truck/update/{truck_id}",
    security(("jwt" = [])),
    params(("truck_id" = Uuid, Path, description = "id of the truck to update")),
    request_body(content = UpdatePropaneTruckDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::propane_truck::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_propane_truck(
    Path(truck_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdatePropaneTruckDto>,
) -> Result<Json<propane_truck::Model>, (StatusCode, SimpleError)> {
    let truck = propane_truck::Entity::find_by_id(truck_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut truck = truck.into_active_model();

    set_if_some(&mut truck.plate, dto.plate.map(|p| p.to_uppercase()));
    set_if_some(&mut truck.capacity, dto.capacity);

    if dto.operator_id.is_some() {
        truck.operator_id = Set(dto.operator_id);
    }

    truck.updated_at = Set(Utc::now());

    Ok(Json(truck.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a propane truck
#[utoipa::path(
    delete,
    tag = "propane-truck",
    path = "/propane-truck/{truck_id}",
    security(("jwt" = [])),
    params(("truck_id" = Uuid, Path, description = "id of the truck to delete")),
    responses(
        (status = OK, body = entity::propane_truck::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_propane_truck(
    Path(truck_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<propane_truck::Model>, (StatusCode, SimpleError)> {
    let truck = propane_truck::Entity::find_by_id(truck_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut truck = truck.into_active_model();

    truck.state = Set(RecordState::Inactivo);
    truck.updated_at = Set(Utc::now());

    Ok(Json(truck.update(&db).await.map_err(DbError::from)?))
}
