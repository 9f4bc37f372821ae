use super::dto::{
    BranchOfficeDto, BranchOfficeWithBillsDto, CreateBranchOfficeDto, UpdateBranchOfficeDto,
    UpdateBranchOfficeStatusDto,
};
use super::repository;
use crate::{
    database::{error::DbError, helpers::set_if_some},
    modules::{
        auth,
        common::{
            error_codes::BRANCH_OFFICE_ON_ROUTE,
            extractors::{DbConnection, ValidatedJson},
            responses::SimpleError,
        },
        course,
    },
    server::controller::AppState,
};
use axum::{
    extract::Path,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use entity::enums::{BranchOfficeStatus, RecordState, TankStatus};
use entity::{bill, branch_office};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, IntoActiveModel, LoaderTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

/// Pause between rows when inserting offices in bulk
const BULK_INSERT_DELAY: Duration = Duration::from_millis(500);

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_branch_offices))
        .route("/all/pending", get(list_pending_branch_offices))
        .route("/getById/:id_or_code", get(branch_office_by_id_or_code))
        .route("/getWithBills", get(list_branch_offices_with_bills))
        .route("/getAvailableBranchOffices", get(list_available_branch_offices))
        .route("/create", post(create_branch_office))
        .route("/createForOperator", post(create_branch_office_for_operator))
        .route("/createMultiple", post(create_multiple_branch_offices))
        .route("/update/:branch_office_id", put(update_branch_office))
        .route("/approve/:branch_office_id", put(approve_branch_office))
        .route("/updateStatus/:branch_office_id", put(update_branch_office_status))
        .route("/:branch_office_id", delete(delete_branch_office))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active branch offices with their relations
#[utoipa::path(
    get,
    tag = "branch-office",
    path = "/branch-offices/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<BranchOfficeDto>)),
)]
pub async fn list_branch_offices(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<BranchOfficeDto>>, (StatusCode, SimpleError)> {
    let offices = branch_office::Entity::find()
        .filter(branch_office::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(repository::with_relations(&db, offices).await?))
}

/// List the offices created by operators and awaiting approval
#[utoipa::path(
    get,
    tag = "branch-office",
    path = "/branch-offices/all/pending",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<BranchOfficeDto>)),
)]
pub async fn list_pending_branch_offices(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<BranchOfficeDto>>, (StatusCode, SimpleError)> {
    let offices = branch_office::Entity::find()
        .filter(branch_office::Column::State.eq(RecordState::Pendiente))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(repository::with_relations(&db, offices).await?))
}

/// Get a branch office by its uuid or its public numeric code
#[utoipa::path(
    get,
    tag = "branch-office",
    path = "/branch-offices/getById/{id_or_code}",
    security(("jwt" = [])),
    params(("id_or_code" = String, Path, description = "uuid or public code of the office")),
    responses(
        (status = OK, body = BranchOfficeDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn branch_office_by_id_or_code(
    Path(id_or_code): Path<String>,
    DbConnection(db): DbConnection,
) -> Result<Json<BranchOfficeDto>, (StatusCode, SimpleError)> {
    let id = Uuid::parse_str(&id_or_code).ok();
    let code = id_or_code.parse::<i32>().ok();

    if id.is_none() && code.is_none() {
        return Err(SimpleError::entity_not_found());
    }

    let filter = Condition::any()
        .add_option(id.map(|id| branch_office::Column::Id.eq(id)))
        .add_option(code.map(|code| branch_office::Column::BranchOfficeCode.eq(code)));

    let office = branch_office::Entity::find()
        .filter(filter)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let dto = repository::with_relations(&db, vec![office])
        .await?
        .into_iter()
        .next()
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(dto))
}

/// List the active branch offices with their billing history
#[utoipa::path(
    get,
    tag = "branch-office",
    path = "/branch-offices/getWithBills",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<BranchOfficeWithBillsDto>)),
)]
pub async fn list_branch_offices_with_bills(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<BranchOfficeWithBillsDto>>, (StatusCode, SimpleError)> {
    let offices = branch_office::Entity::find()
        .filter(branch_office::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    let bills = offices
        .load_many(bill::Entity, &db)
        .await
        .map_err(DbError::from)?;

    let dtos = offices
        .into_iter()
        .zip(bills)
        .map(|(branch_office, bills)| BranchOfficeWithBillsDto {
            branch_office,
            bills,
        })
        .collect();

    Ok(Json(dtos))
}

/// List the offices ready to be assigned to a delivery route
#[utoipa::path(
    get,
    tag = "branch-office",
    path = "/branch-offices/getAvailableBranchOffices",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::branch_office::Model>)),
)]
pub async fn list_available_branch_offices(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<branch_office::Model>>, (StatusCode, SimpleError)> {
    let offices = branch_office::Entity::find()
        .filter(branch_office::Column::State.eq(RecordState::Activo))
        .filter(branch_office::Column::Status.eq(BranchOfficeStatus::Efectivo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(offices))
}

async fn insert_branch_office(
    db: &sea_orm::DatabaseConnection,
    dto: CreateBranchOfficeDto,
    state: RecordState,
    status: BranchOfficeStatus,
) -> Result<branch_office::Model, DbError> {
    let created = db
        .transaction::<_, branch_office::Model, DbErr>(|tx| {
            Box::pin(async move {
                let code = repository::generate_unique_code(tx).await?;
                let now = Utc::now();

                let office = branch_office::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    state: Set(state),
                    status: Set(status),
                    name: Set(dto.name),
                    nit: Set(dto.nit),
                    branch_office_code: Set(code),
                    address: Set(dto.address),
                    latitude: Set(dto.latitude),
                    longitude: Set(dto.longitude),
                    phone: Set(dto.phone),
                    email: Set(dto.email),
                    kilogram_value: Set(dto.kilogram_value),
                    tank_stock: Set(dto.tank_stock),
                    general_ticket: Set(dto.general_ticket),
                    geofence: Set(dto.geofence),
                }
                .insert(tx)
                .await?;

                repository::replace_catalog_relations(
                    tx,
                    office.id,
                    &dto.city_ids,
                    &dto.zone_ids,
                    &dto.factor_ids,
                    &dto.client_ids,
                )
                .await?;

                repository::replace_tank_relations(tx, office.id, &dto.stationary_tank_ids)
                    .await?;

                Ok(office)
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(created)
}

/// Create a branch office
///
/// the office gets a randomly drawn unique public code and starts as
/// EFECTIVO, the allocated tanks are switched to ASIGNADO
#[utoipa::path(
    post,
    tag = "branch-office",
    path = "/branch-offices/create",
    security(("jwt" = [])),
    request_body(content = CreateBranchOfficeDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::branch_office::Model),
        (status = BAD_REQUEST, description = "nit in use", body = SimpleError),
    ),
)]
pub async fn create_branch_office(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateBranchOfficeDto>,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    let office =
        insert_branch_office(&db, dto, RecordState::Activo, BranchOfficeStatus::Efectivo).await?;

    Ok(Json(office))
}

/// Create a branch office on behalf of an operator in the field
///
/// the office stays PENDIENTE until approved from the back office and
/// no tanks are allocated to it
#[utoipa::path(
    post,
    tag = "branch-office",
    path = "/branch-offices/createForOperator",
    security(("jwt" = [])),
    request_body(content = CreateBranchOfficeDto, content_type = "application/json"),
    responses((status = OK, body = entity::branch_office::Model)),
)]
pub async fn create_branch_office_for_operator(
    DbConnection(db): DbConnection,
    ValidatedJson(mut dto): ValidatedJson<CreateBranchOfficeDto>,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    dto.stationary_tank_ids = vec![];

    let office = insert_branch_office(
        &db,
        dto,
        RecordState::Pendiente,
        BranchOfficeStatus::Pendiente,
    )
    .await?;

    Ok(Json(office))
}

/// Bulk insert branch offices, skipping the rows that fail
#[utoipa::path(
    post,
    tag = "branch-office",
    path = "/branch-offices/createMultiple",
    security(("jwt" = [])),
    request_body(content = Vec<CreateBranchOfficeDto>, content_type = "application/json"),
    responses((status = OK, body = Vec<Uuid>)),
)]
pub async fn create_multiple_branch_offices(
    DbConnection(db): DbConnection,
    Json(dtos): Json<Vec<CreateBranchOfficeDto>>,
) -> Result<Json<Vec<Uuid>>, (StatusCode, SimpleError)> {
    let mut created_ids = vec![];

    for dto in dtos {
        tokio::time::sleep(BULK_INSERT_DELAY).await;

        if let Err(err) = dto.validate() {
            warn!("skipping invalid branch office row: {}", err);
            continue;
        }

        let nit = dto.nit.clone();

        match insert_branch_office(&db, dto, RecordState::Activo, BranchOfficeStatus::Efectivo)
            .await
        {
            Ok(office) => created_ids.push(office.id),
            Err(_) => warn!("failed to insert branch office with nit {}", nit),
        }
    }

    Ok(Json(created_ids))
}

/// Update a branch office, replacing its relations when new id lists
/// are sent
#[utoipa::path(
    put,
    tag = "branch-office",
    path = "/branch-offices/update/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the office to update")),
    request_body(content = UpdateBranchOfficeDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::branch_office::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_branch_office(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateBranchOfficeDto>,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    let office = branch_office::Entity::find_by_id(branch_office_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let updated = db
        .transaction::<_, branch_office::Model, DbErr>(|tx| {
            Box::pin(async move {
                if dto.city_ids.is_some()
                    || dto.zone_ids.is_some()
                    || dto.factor_ids.is_some()
                    || dto.client_ids.is_some()
                {
                    let current = repository::with_relations(tx, vec![office.clone()])
                        .await
                        .map_err(|e| e.0)?
                        .into_iter()
                        .next()
                        .ok_or(DbErr::Custom(String::from("office relations missing")))?;

                    let city_ids = dto
                        .city_ids
                        .unwrap_or_else(|| current.cities.iter().map(|c| c.id).collect());
                    let zone_ids = dto
                        .zone_ids
                        .unwrap_or_else(|| current.zones.iter().map(|z| z.id).collect());
                    let factor_ids = dto
                        .factor_ids
                        .unwrap_or_else(|| current.factors.iter().map(|f| f.id).collect());
                    let client_ids = dto
                        .client_ids
                        .unwrap_or_else(|| current.clients.iter().map(|c| c.id).collect());

                    repository::replace_catalog_relations(
                        tx,
                        branch_office_id,
                        &city_ids,
                        &zone_ids,
                        &factor_ids,
                        &client_ids,
                    )
                    .await?;
                }

                if let Some(tank_ids) = &dto.stationary_tank_ids {
                    repository::replace_tank_relations(tx, branch_office_id, tank_ids).await?;
                }

                let mut office = office.into_active_model();

                set_if_some(&mut office.name, dto.name);
                set_if_some(&mut office.nit, dto.nit);
                set_if_some(&mut office.address, dto.address);
                set_if_some(&mut office.latitude, dto.latitude);
                set_if_some(&mut office.longitude, dto.longitude);
                set_if_some(&mut office.phone, dto.phone);
                set_if_some(&mut office.email, dto.email);
                set_if_some(&mut office.kilogram_value, dto.kilogram_value);
                set_if_some(&mut office.tank_stock, dto.tank_stock);
                set_if_some(&mut office.general_ticket, dto.general_ticket);
                set_if_some(&mut office.geofence, dto.geofence);
                office.updated_at = Set(Utc::now());

                office.update(tx).await
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(updated))
}

/// Approve a branch office created by an operator
#[utoipa::path(
    put,
    tag = "branch-office",
    path = "/branch-offices/approve/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the office to approve")),
    responses(
        (status = OK, body = entity::branch_office::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn approve_branch_office(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    let office = branch_office::Entity::find_by_id(branch_office_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut office = office.into_active_model();

    office.state = Set(RecordState::Activo);
    office.status = Set(BranchOfficeStatus::Efectivo);
    office.updated_at = Set(Utc::now());

    Ok(Json(office.update(&db).await.map_err(DbError::from)?))
}

/// Set the operational status of a branch office
///
/// after the change every active route is re-checked for completion
/// since a CARGADO office may have been the last one pending
#[utoipa::path(
    put,
    tag = "branch-office",
    path = "/branch-offices/updateStatus/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the office to update")),
    request_body(content = UpdateBranchOfficeStatusDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::branch_office::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_branch_office_status(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateBranchOfficeStatusDto>,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    let office = branch_office::Entity::find_by_id(branch_office_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut office = office.into_active_model();

    office.status = Set(dto.status);
    office.updated_at = Set(Utc::now());

    let office = office.update(&db).await.map_err(DbError::from)?;

    course::repository::settle_completed_courses(&db).await?;

    // settlement may have flipped the office to EFECTIVO, return the row as
    // it stands after the re-check
    let office = branch_office::Entity::find_by_id(office.id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .unwrap_or(office);

    Ok(Json(office))
}

/// Soft delete a branch office
///
/// refused while the office belongs to an ongoing route, released
/// tanks go back to NO ASIGNADO
#[utoipa::path(
    delete,
    tag = "branch-office",
    path = "/branch-offices/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the office to delete")),
    responses(
        (status = OK, body = entity::branch_office::Model),
        (status = NOT_FOUND, body = SimpleError),
        (status = CONFLICT, description = "office is on an ongoing route", body = SimpleError),
    ),
)]
pub async fn delete_branch_office(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<branch_office::Model>, (StatusCode, SimpleError)> {
    let office = branch_office::Entity::find_by_id(branch_office_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    if office.status == BranchOfficeStatus::EnCurso || office.status == BranchOfficeStatus::Cargado
    {
        return Err((
            StatusCode::CONFLICT,
            SimpleError::from(BRANCH_OFFICE_ON_ROUTE),
        ));
    }

    let deleted = db
        .transaction::<_, branch_office::Model, DbErr>(|tx| {
            Box::pin(async move {
                let tank_ids: Vec<Uuid> = entity::branch_office_stationary_tank::Entity::find()
                    .filter(
                        entity::branch_office_stationary_tank::Column::BranchOfficeId
                            .eq(branch_office_id),
                    )
                    .all(tx)
                    .await?
                    .into_iter()
                    .map(|row| row.stationary_tank_id)
                    .collect();

                repository::set_tanks_status(tx, &tank_ids, TankStatus::NoAsignado).await?;

                let mut office = office.into_active_model();

                office.state = Set(RecordState::Inactivo);
                office.updated_at = Set(Utc::now());

                office.update(tx).await
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(deleted))
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

    fn office_with_status(status: BranchOfficeStatus) -> branch_office::Model {
        let now = Utc::now();

        branch_office::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            status,
            name: String::from("Sucursal Norte"),
            nit: String::from("900123456-7"),
            branch_office_code: 12345,
            address: String::from("Calle 10 # 4-20"),
            latitude: String::from("4.60971"),
            longitude: String::from("-74.08175"),
            phone: String::from("3001234567"),
            email: String::from("norte@example.com"),
            kilogram_value: 2500.0,
            tank_stock: 3,
            general_ticket: false,
            geofence: String::from("[]"),
        }
    }

    #[tokio::test]
    async fn offices_on_an_ongoing_route_cannot_be_deleted() {
        let office = office_with_status(BranchOfficeStatus::Cargado);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![office.clone()]])
            .into_connection();

        let (status, error) = delete_branch_office(Path(office.id), DbConnection(mock_handle(&db)))
            .await
            .expect_err("deleting a billed office must be refused");

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            serde_json::to_value(error).unwrap()["error"],
            BRANCH_OFFICE_ON_ROUTE
        );

        // only the lookup ran, neither the office nor its tanks were touched
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn status_updates_return_the_office_as_left_by_the_route_check() {
        let office = office_with_status(BranchOfficeStatus::EnCurso);

        let mut billed = office.clone();
        billed.status = BranchOfficeStatus::Cargado;

        // the office after its route was settled
        let mut settled = office.clone();
        settled.status = BranchOfficeStatus::Efectivo;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![office.clone()]])
            .append_query_results([vec![billed]])
            .append_query_results([Vec::<entity::course::Model>::new()])
            .append_query_results([vec![settled]])
            .into_connection();

        let Json(returned) = update_branch_office_status(
            Path(office.id),
            DbConnection(db),
            ValidatedJson(UpdateBranchOfficeStatusDto {
                status: BranchOfficeStatus::Cargado,
            }),
        )
        .await
        .unwrap();

        assert_eq!(returned.status, BranchOfficeStatus::Efectivo);
    }
}
