use super::dto::{CreateStationaryTankDto, ReleaseStationaryTanksDto, UpdateStationaryTankDto};
use crate::{
    database::{error::DbError, helpers::set_if_some},
    modules::{
        auth,
        common::{
            error_codes::TANK_ASSIGNED,
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
use entity::enums::{RecordState, TankStatus};
use entity::stationary_tank;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

/// Pause between rows when inserting tanks in bulk, keeps large imports
/// from starving the connection pool
const BULK_INSERT_DELAY: Duration = Duration::from_millis(500);

/// Pause between rows when releasing tanks in bulk
const BULK_RELEASE_DELAY: Duration = Duration::from_millis(150);

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_stationary_tanks))
        .route("/available", get(list_available_stationary_tanks))
        .route("/getById/:tank_id", get(stationary_tank_by_id))
        .route("/create", post(create_stationary_tank))
        .route("/createMultiple", post(create_multiple_stationary_tanks))
        .route("/update/:tank_id", put(update_stationary_tank))
        .route("/updateMultiple", put(release_stationary_tanks))
        .route("/:tank_id", delete(delete_stationary_tank))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active stationary tanks
#[utoipa::path(
    get,
    tag = "stationary-tank",
    path = "/stationary-tank/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::stationary_tank::Model>)),
)]
pub async fn list_stationary_tanks(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<stationary_tank::Model>>, (StatusCode, SimpleError)> {
    let tanks = stationary_tank::Entity::find()
        .filter(stationary_tank::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(tanks))
}

/// List the tanks not allocated to any branch office
#[utoipa::path(
    get,
    tag = "stationary-tank",
    path = "/stationary-tank/available",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::stationary_tank::Model>)),
)]
pub async fn list_available_stationary_tanks(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<stationary_tank::Model>>, (StatusCode, SimpleError)> {
    let tanks = stationary_tank::Entity::find()
        .filter(stationary_tank::Column::State.eq(RecordState::Activo))
        .filter(stationary_tank::Column::Status.eq(TankStatus::NoAsignado))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(tanks))
}

/// Get a stationary tank by id
#[utoipa::path(
    get,
    tag = "stationary-tank",
    path = "/stationary-tank/getById/{tank_id}",
    security(("jwt" = [])),
    params(("tank_id" = Uuid, Path, description = "id of the tank to get")),
    responses(
        (status = OK, body = entity::stationary_tank::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn stationary_tank_by_id(
    Path(tank_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<stationary_tank::Model>, (StatusCode, SimpleError)> {
    let tank = stationary_tank::Entity::find_by_id(tank_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(tank))
}

/// Create a stationary tank
#[utoipa::path(
    post,
    tag = "stationary-tank",
    path = "/stationary-tank/create",
    security(("jwt" = [])),
    request_body(content = CreateStationaryTankDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::stationary_tank::Model),
        (status = BAD_REQUEST, description = "serial in use", body = SimpleError),
    ),
)]
pub async fn create_stationary_tank(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateStationaryTankDto>,
) -> Result<Json<stationary_tank::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let tank = stationary_tank::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        status: Set(TankStatus::NoAsignado),
        serial: Set(dto.serial),
        capacity: Set(dto.capacity),
    };

    Ok(Json(tank.insert(&db).await.map_err(DbError::from)?))
}

/// Bulk insert stationary tanks, skipping the rows that fail
///
/// returns the ids of the tanks that were created
#[utoipa::path(
    post,
    tag = "stationary-tank",
    path = "/stationary-tank/createMultiple",
    security(("jwt" = [])),
    request_body(content = Vec<CreateStationaryTankDto>, content_type = "application/json"),
    responses((status = OK, body = Vec<Uuid>)),
)]
pub async fn create_multiple_stationary_tanks(
    DbConnection(db): DbConnection,
    Json(dtos): Json<Vec<CreateStationaryTankDto>>,
) -> Result<Json<Vec<Uuid>>, (StatusCode, SimpleError)> {
    let mut created_ids = vec![];

    for dto in dtos {
        tokio::time::sleep(BULK_INSERT_DELAY).await;

        if let Err(err) = dto.validate() {
            warn!("skipping invalid tank row: {}", err);
            continue;
        }

        let now = Utc::now();
        let serial = dto.serial.clone();

        let tank = stationary_tank::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            state: Set(RecordState::Activo),
            status: Set(TankStatus::NoAsignado),
            serial: Set(dto.serial),
            capacity: Set(dto.capacity),
        };

        match tank.insert(&db).await {
            Ok(tank) => created_ids.push(tank.id),
            Err(err) => warn!("failed to insert tank with serial {}: {}", serial, err),
        }
    }

    Ok(Json(created_ids))
}

/// Update a stationary tank
#[utoipa::path(
    put,
    tag = "stationary-tank",
    path = "/stationary-tank/update/{tank_id}",
    security(("jwt" = [])),
    params(("tank_id" = Uuid, Path, description = "id of the tank to update")),
    request_body(content = UpdateStationaryTankDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::stationary_tank::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_stationary_tank(
    Path(tank_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateStationaryTankDto>,
) -> Result<Json<stationary_tank::Model>, (StatusCode, SimpleError)> {
    let tank = stationary_tank::Entity::find_by_id(tank_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut tank = tank.into_active_model();

    set_if_some(&mut tank.serial, dto.serial);
    set_if_some(&mut tank.capacity, dto.capacity);
    tank.updated_at = Set(Utc::now());

    Ok(Json(tank.update(&db).await.map_err(DbError::from)?))
}

/// Release a batch of tanks back to the unassigned pool
#[utoipa::path(
    put,
    tag = "stationary-tank",
    path = "/stationary-tank/updateMultiple",
    security(("jwt" = [])),
    request_body(content = ReleaseStationaryTanksDto, content_type = "application/json"),
    responses((status = OK, body = Vec<entity::stationary_tank::Model>)),
)]
pub async fn release_stationary_tanks(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<ReleaseStationaryTanksDto>,
) -> Result<Json<Vec<stationary_tank::Model>>, (StatusCode, SimpleError)> {
    let mut released = vec![];

    for tank_id in dto.tank_ids {
        tokio::time::sleep(BULK_RELEASE_DELAY).await;

        let tank = stationary_tank::Entity::find_by_id(tank_id)
            .one(&db)
            .await
            .map_err(DbError::from)?;

        let Some(tank) = tank else {
            warn!("cannot release unknown tank {}", tank_id);
            continue;
        };

        let mut tank = tank.into_active_model();

        tank.status = Set(TankStatus::NoAsignado);
        tank.updated_at = Set(Utc::now());

        released.push(tank.update(&db).await.map_err(DbError::from)?);
    }

    Ok(Json(released))
}

/// Soft delete a stationary tank, refused while the tank is allocated
/// to a branch office
#[utoipa::path(
    delete,
    tag = "stationary-tank",
    path = "/stationary-tank/{tank_id}",
    security(("jwt" = [])),
    params(("tank_id" = Uuid, Path, description = "id of the tank to delete")),
    responses(
        (status = OK, body = entity::stationary_tank::Model),
        (status = NOT_FOUND, body = SimpleError),
        (status = CONFLICT, description = "tank is allocated to a branch office", body = SimpleError),
    ),
)]
pub async fn delete_stationary_tank(
    Path(tank_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<stationary_tank::Model>, (StatusCode, SimpleError)> {
    let tank = stationary_tank::Entity::find_by_id(tank_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    if tank.status == TankStatus::Asignado {
        return Err((StatusCode::CONFLICT, SimpleError::from(TANK_ASSIGNED)));
    }

    let mut tank = tank.into_active_model();

    tank.state = Set(RecordState::Inactivo);
    tank.updated_at = Set(Utc::now());

    Ok(Json(tank.update(&db).await.map_err(DbError::from)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    /// a second handle to the same mock connection, sharing its transaction log;
    /// this is what `Clone` would do, but sea-orm's `mock` feature removes it
    fn mock_handle(db: &DatabaseConnection) -> DatabaseConnection {
        match db {
            DatabaseConnection::MockDatabaseConnection(conn) => {
                DatabaseConnection::MockDatabaseConnection(conn.clone())
            }
            _ => unreachable!("tests only use mock connections"),
        }
    }

    #[tokio::test]
    async fn allocated_tanks_cannot_be_deleted() {
        let now = Utc::now();

        let tank = stationary_tank::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            status: TankStatus::Asignado,
            serial: String::from("GLP-0001"),
            capacity: 500,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tank.clone()]])
            .into_connection();

        let (status, error) = delete_stationary_tank(Path(tank.id), DbConnection(mock_handle(&db)))
            .await
            .expect_err("deleting an allocated tank must be refused");

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(serde_json::to_value(error).unwrap()["error"], TANK_ASSIGNED);

        // only the lookup ran, the tank was not soft deleted
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
