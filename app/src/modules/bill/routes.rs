use super::dto::{BillsByDateDto, CreateBillDto, UpdateBillDto};
use super::repository::{compute_total, month_window, transform_date};
use crate::{
    database::{error::DbError, helpers::set_if_some},
    modules::{
        auth,
        common::{
            error_codes::DUPLICATED_BILL,
            extractors::{DbConnection, ValidatedJson},
            responses::SimpleError,
        },
        course,
        notification::repository as notifications,
    },
    server::controller::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use entity::enums::{BranchOfficeStatus, NotificationKind, RecordState};
use entity::{bill, branch_office, client, user};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use std::time::Duration;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

/// Pause between rows when inserting bills in bulk
const BULK_INSERT_DELAY: Duration = Duration::from_millis(500);

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_bills))
        .route("/getById/:bill_id", get(bill_by_id))
        .route("/getByBranchOfficeCode/:code", get(bills_by_branch_office_code))
        .route("/getByDate/:code", post(bills_by_date))
        .route("/getByOperatorId/:operator_id", get(bills_by_operator))
        .route("/create", post(create_bill))
        .route("/createMultiple", post(create_multiple_bills))
        .route("/update/:bill_id", put(update_bill))
        .route("/:bill_id", delete(delete_bill))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active bills
#[utoipa::path(
    get,
    tag = "bill",
    path = "/bill/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::bill::Model>)),
)]
pub async fn list_bills(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<bill::Model>>, (StatusCode, SimpleError)> {
    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(bills))
}

/// Get a bill by id
#[utoipa::path(
    get,
    tag = "bill",
    path = "/bill/getById/{bill_id}",
    security(("jwt" = [])),
    params(("bill_id" = Uuid, Path, description = "id of the bill to get")),
    responses(
        (status = OK, body = entity::bill::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn bill_by_id(
    Path(bill_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<bill::Model>, (StatusCode, SimpleError)> {
    let bill = bill::Entity::find_by_id(bill_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(bill))
}

/// List the bills of a branch office by its public code
#[utoipa::path(
    get,
    tag = "bill",
    path = "/bill/getByBranchOfficeCode/{code}",
    security(("jwt" = [])),
    params(("code" = i32, Path, description = "public code of the branch office")),
    responses((status = OK, body = Vec<entity::bill::Model>)),
)]
pub async fn bills_by_branch_office_code(
    Path(code): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<bill::Model>>, (StatusCode, SimpleError)> {
    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::BranchOfficeCode.eq(code))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(bills))
}

/// List the bills of a branch office within a month
#[utoipa::path(
    post,
    tag = "bill",
    path = "/bill/getByDate/{code}",
    security(("jwt" = [])),
    params(("code" = i32, Path, description = "public code of the branch office")),
    request_body(content = BillsByDateDto, content_type = "application/json"),
    responses(
        (status = OK, body = Vec<entity::bill::Model>),
        (status = BAD_REQUEST, description = "malformed month selector", body = SimpleError),
    ),
)]
pub async fn bills_by_date(
    Path(code): Path<i32>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<BillsByDateDto>,
) -> Result<Json<Vec<bill::Model>>, (StatusCode, SimpleError)> {
    let (start, end) = month_window(&dto.date).ok_or((
        StatusCode::BAD_REQUEST,
        SimpleError::from("malformed month selector"),
    ))?;

    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::BranchOfficeCode.eq(code))
        .filter(bill::Column::FechaInicial.between(start, end))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(bills))
}

/// List the bills registered by an operator
#[utoipa::path(
    get,
    tag = "bill",
    path = "/bill/getByOperatorId/{operator_id}",
    security(("jwt" = [])),
    params(("operator_id" = Uuid, Path, description = "id of the operator")),
    responses((status = OK, body = Vec<entity::bill::Model>)),
)]
pub async fn bills_by_operator(
    Path(operator_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<bill::Model>>, (StatusCode, SimpleError)> {
    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::OperatorId.eq(operator_id))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(bills))
}

async fn insert_bill(
    state: &AppState,
    dto: CreateBillDto,
) -> Result<bill::Model, (StatusCode, SimpleError)> {
    let db = &state.db;

    let fecha_inicial = transform_date(&dto.fecha_inicial).ok_or((
        StatusCode::BAD_REQUEST,
        SimpleError::from("malformed start date"),
    ))?;
    let fecha_final = transform_date(&dto.fecha_final).ok_or((
        StatusCode::BAD_REQUEST,
        SimpleError::from("malformed end date"),
    ))?;

    let operator = user::Entity::find_by_id(dto.operator_id)
        .filter(user::Column::State.ne(RecordState::Inactivo))
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((
            StatusCode::BAD_REQUEST,
            SimpleError::from("unknown operator"),
        ))?;

    let duplicate = bill::Entity::find()
        .filter(bill::Column::FechaInicial.eq(fecha_inicial))
        .filter(bill::Column::HoraInicial.eq(dto.hora_inicial.clone()))
        .one(db)
        .await
        .map_err(DbError::from)?;

    if duplicate.is_some() {
        return Err((StatusCode::BAD_REQUEST, SimpleError::from(DUPLICATED_BILL)));
    }

    let office = branch_office::Entity::find_by_id(dto.branch_office_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((
            StatusCode::BAD_REQUEST,
            SimpleError::from("unknown branch office"),
        ))?;

    let client = client::Entity::find_by_id(dto.client_id)
        .one(db)
        .await
        .map_err(DbError::from)?
        .ok_or((
            StatusCode::BAD_REQUEST,
            SimpleError::from("unknown client"),
        ))?;

    let total = compute_total(office.kilogram_value, dto.masa_total);

    let office_for_tx = office.clone();

    let bill = db
        .transaction::<_, bill::Model, DbErr>(|tx| {
            Box::pin(async move {
                let now = Utc::now();

                let bill = bill::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    state: Set(RecordState::Activo),
                    branch_office_id: Set(office_for_tx.id),
                    operator_id: Set(operator.id),
                    client_id: Set(client.id),
                    branch_office_name: Set(office_for_tx.name.clone()),
                    branch_office_nit: Set(office_for_tx.nit.clone()),
                    branch_office_address: Set(office_for_tx.address.clone()),
                    branch_office_code: Set(office_for_tx.branch_office_code),
                    client_first_name: Set(client.first_name.clone()),
                    client_last_name: Set(client.last_name.clone()),
                    client_cc: Set(client.cc.clone()),
                    operator_first_name: Set(operator.first_name.clone()),
                    operator_last_name: Set(operator.last_name.clone()),
                    densidad: Set(dto.densidad),
                    temperatura: Set(dto.temperatura),
                    masa_total: Set(dto.masa_total),
                    volumen_total: Set(dto.volumen_total),
                    fecha_inicial: Set(fecha_inicial),
                    fecha_final: Set(fecha_final),
                    hora_inicial: Set(dto.hora_inicial),
                    hora_final: Set(dto.hora_final),
                    total: Set(total),
                }
                .insert(tx)
                .await?;

                let mut office = office_for_tx.into_active_model();

                office.status = Set(BranchOfficeStatus::Cargado);
                office.updated_at = Set(Utc::now());

                office.update(tx).await?;

                Ok(bill)
            })
        })
        .await
        .map_err(DbError::from)?;

    // receipt rendering, mailing and route settlement happen in the
    // background, a failure there never fails the charge itself
    let state = state.clone();
    let created = bill.clone();
    let client_email = client.email;

    tokio::spawn(async move {
        if let Err(err) = state.documents_service.render_bill_pdf(&created).await {
            error!("failed to request the bill pdf: {}", err);
        }

        if let Err(err) = state
            .mailer_service
            .send_bill_email(&created, client_email)
            .await
        {
            error!("failed to request the bill email: {}", err);
        }

        let message = format!(
            "Se ha realizado un cargue en la sucursal {} con código {}",
            created.branch_office_name, created.branch_office_code
        );

        if let Err(_err) = notifications::create_deduplicated(
            &state.db,
            NotificationKind::Cargue,
            "Cargue realizado",
            &message,
            &created.branch_office_code.to_string(),
        )
        .await
        {
            error!("failed to create the charge notification");
        }

        if let Err(_err) = course::repository::settle_completed_courses(&state.db).await {
            error!("failed to re-check route completion");
        }
    });

    Ok(bill)
}

/// Register a charge ("remisión")
///
/// snapshots the branch office, client and operator, marks the office
/// CARGADO and kicks off the receipt pdf, the client email, a CARGUE
/// notification and a route completion check
#[utoipa::path(
    post,
    tag = "bill",
    path = "/bill/create",
    security(("jwt" = [])),
    request_body(content = CreateBillDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::bill::Model),
        (status = BAD_REQUEST, description = "duplicated bill or unknown references", body = SimpleError),
    ),
)]
pub async fn create_bill(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateBillDto>,
) -> Result<Json<bill::Model>, (StatusCode, SimpleError)> {
    Ok(Json(insert_bill(&state, dto).await?))
}

/// Bulk insert bills, skipping the rows that fail
#[utoipa::path(
    post,
    tag = "bill",
    path = "/bill/createMultiple",
    security(("jwt" = [])),
    request_body(content = Vec<CreateBillDto>, content_type = "application/json"),
    responses((status = OK, body = Vec<Uuid>)),
)]
pub async fn create_multiple_bills(
    State(state): State<AppState>,
    Json(dtos): Json<Vec<CreateBillDto>>,
) -> Result<Json<Vec<Uuid>>, (StatusCode, SimpleError)> {
    let mut created_ids = vec![];

    for dto in dtos {
        tokio::time::sleep(BULK_INSERT_DELAY).await;

        if let Err(err) = dto.validate() {
            warn!("skipping invalid bill row: {}", err);
            continue;
        }

        match insert_bill(&state, dto).await {
            Ok(bill) => created_ids.push(bill.id),
            Err(_) => warn!("failed to insert a bill row"),
        }
    }

    Ok(Json(created_ids))
}

/// Update the metrics of a bill, recomputing the total when the
/// delivered mass changes
#[utoipa::path(
    put,
    tag = "bill",
    path = "/bill/update/{bill_id}",
    security(("jwt" = [])),
    params(("bill_id" = Uuid, Path, description = "id of the bill to update")),
    request_body(content = UpdateBillDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::bill::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_bill(
    Path(bill_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateBillDto>,
) -> Result<Json<bill::Model>, (StatusCode, SimpleError)> {
    let bill = bill::Entity::find_by_id(bill_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let new_total = match dto.masa_total {
        Some(masa_total) => {
            let office = branch_office::Entity::find_by_id(bill.branch_office_id)
                .one(&db)
                .await
                .map_err(DbError::from)?
                .ok_or(SimpleError::entity_not_found())?;

            Some(compute_total(office.kilogram_value, masa_total))
        }
        None => None,
    };

    let mut bill = bill.into_active_model();

    set_if_some(&mut bill.densidad, dto.densidad);
    set_if_some(&mut bill.temperatura, dto.temperatura);
    set_if_some(&mut bill.masa_total, dto.masa_total);
    set_if_some(&mut bill.volumen_total, dto.volumen_total);
    set_if_some(&mut bill.hora_inicial, dto.hora_inicial);
    set_if_some(&mut bill.hora_final, dto.hora_final);
    set_if_some(&mut bill.total, new_total);
    bill.updated_at = Set(Utc::now());

    Ok(Json(bill.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a bill
#[utoipa::path(
    delete,
    tag = "bill",
    path = "/bill/{bill_id}",
    security(("jwt" = [])),
    params(("bill_id" = Uuid, Path, description = "id of the bill to delete")),
    responses(
        (status = OK, body = entity::bill::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_bill(
    Path(bill_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<bill::Model>, (StatusCode, SimpleError)> {
    let bill = bill::Entity::find_by_id(bill_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut bill = bill.into_active_model();

    bill.state = Set(RecordState::Inactivo);
    bill.updated_at = Set(Utc::now());

    Ok(Json(bill.update(&db).await.map_err(DbError::from)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::rabbitmq::get_connection_pool;
    use crate::services::documents::service::DocumentsService;
    use crate::services::mailer::service::MailerService;
    use chrono::NaiveDate;
    use entity::enums::OperatorStatus;
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

    // the pool connects lazily so no broker is needed, the paths under
    // test never publish anything
    fn test_state(db: DatabaseConnection) -> AppState {
        let pool = get_connection_pool("amqp://localhost:5672");

        AppState {
            db,
            mailer_service: MailerService::new(pool.clone()),
            documents_service: DocumentsService::new(pool),
        }
    }

    fn operator() -> user::Model {
        let now = Utc::now();

        user::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            status: OperatorStatus::EnRuta,
            first_name: String::from("Pedro"),
            last_name: String::from("Rojas"),
            email: String::from("pedro@example.com"),
            id_number: String::from("79123456"),
            password: String::from("$2b$04$unused"),
            role_id: Uuid::new_v4(),
        }
    }

    fn charge_dto(operator_id: Uuid) -> CreateBillDto {
        CreateBillDto {
            branch_office_id: Uuid::new_v4(),
            operator_id,
            client_id: Uuid::new_v4(),
            densidad: 0.52,
            temperatura: 24.0,
            masa_total: 120.0,
            volumen_total: 230.0,
            fecha_inicial: String::from("01/06/24"),
            fecha_final: String::from("01/06/24"),
            hora_inicial: String::from("08:30"),
            hora_final: String::from("09:10"),
        }
    }

    fn existing_bill(dto: &CreateBillDto) -> bill::Model {
        let now = Utc::now();

        bill::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: RecordState::Activo,
            branch_office_id: dto.branch_office_id,
            operator_id: dto.operator_id,
            client_id: dto.client_id,
            branch_office_name: String::from("Sucursal Norte"),
            branch_office_nit: String::from("900123456-7"),
            branch_office_address: String::from("Calle 10 # 4-20"),
            branch_office_code: 12345,
            client_first_name: String::from("Laura"),
            client_last_name: String::from("Santos"),
            client_cc: String::from("1020304050"),
            operator_first_name: String::from("Pedro"),
            operator_last_name: String::from("Rojas"),
            densidad: dto.densidad,
            temperatura: dto.temperatura,
            masa_total: dto.masa_total,
            volumen_total: dto.volumen_total,
            fecha_inicial: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            fecha_final: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            hora_inicial: dto.hora_inicial.clone(),
            hora_final: dto.hora_final.clone(),
            total: 300_000.0,
        }
    }

    #[tokio::test]
    async fn charges_repeating_start_date_and_hour_are_rejected() {
        let operator = operator();
        let dto = charge_dto(operator.id);
        let duplicate = existing_bill(&dto);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![operator]])
            .append_query_results([vec![duplicate]])
            .into_connection();

        let state = test_state(mock_handle(&db));

        let (status, error) = insert_bill(&state, dto)
            .await
            .expect_err("a repeated charge must be refused");

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(error).unwrap()["error"],
            DUPLICATED_BILL
        );

        // operator and duplicate lookups only, nothing was inserted
        assert_eq!(db.into_transaction_log().len(), 2);
    }
}
