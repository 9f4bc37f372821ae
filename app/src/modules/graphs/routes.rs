use super::dto::{DailyPurchaseDto, DailyPurchasePoint, MonthDto};
use crate::{
    database::error::DbError,
    modules::{
        auth,
        bill::repository::month_window,
        common::{
            extractors::{DbConnection, ValidatedJson},
            responses::SimpleError,
        },
    },
    server::controller::AppState,
};
use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use entity::enums::RecordState;
use entity::bill;
use http::{header, StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeMap;
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/generateCsv/:branch_office_id", get(bills_csv))
        .route("/generateCsvbyDate/:code", post(bills_csv_by_date))
        .route("/daily-purchase", post(daily_purchase))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        String::from(value)
    }
}

fn bills_to_csv(bills: &[bill::Model]) -> String {
    let mut csv = String::from(
        "fechaInicial,horaInicial,sucursal,codigo,cliente,operario,densidad,temperatura,masaTotal,volumenTotal,total\n",
    );

    for bill in bills {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{}\n",
            bill.fecha_inicial,
            csv_field(&bill.hora_inicial),
            csv_field(&bill.branch_office_name),
            bill.branch_office_code,
            csv_field(&format!("{} {}", bill.client_first_name, bill.client_last_name)),
            csv_field(&format!(
                "{} {}",
                bill.operator_first_name, bill.operator_last_name
            )),
            bill.densidad,
            bill.temperatura,
            bill.masa_total,
            bill.volumen_total,
            bill.total,
        ));
    }

    csv
}

type CsvResponse = ([(header::HeaderName, &'static str); 1], String);

/// Export the billing history of a branch office as CSV
#[utoipa::path(
    get,
    tag = "graphs",
    path = "/graphs/generateCsv/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the branch office")),
    responses((status = OK, content_type = "text/csv", body = String)),
)]
pub async fn bills_csv(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<CsvResponse, (StatusCode, SimpleError)> {
    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::BranchOfficeId.eq(branch_office_id))
        .order_by_asc(bill::Column::FechaInicial)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok((
        [(header::CONTENT_TYPE, "text/csv")],
        bills_to_csv(&bills),
    ))
}

/// Export the bills of a branch office within a month as CSV
#[utoipa::path(
    post,
    tag = "graphs",
    path = "/graphs/generateCsvbyDate/{code}",
    security(("jwt" = [])),
    params(("code" = i32, Path, description = "public code of the branch office")),
    request_body(content = MonthDto, content_type = "application/json"),
    responses(
        (status = OK, content_type = "text/csv", body = String),
        (status = BAD_REQUEST, description = "malformed month selector", body = SimpleError),
    ),
)]
pub async fn bills_csv_by_date(
    Path(code): Path<i32>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<MonthDto>,
) -> Result<CsvResponse, (StatusCode, SimpleError)> {
    let (start, end) = month_window(&dto.date).ok_or((
        StatusCode::BAD_REQUEST,
        SimpleError::from("malformed month selector"),
    ))?;

    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::BranchOfficeCode.eq(code))
        .filter(bill::Column::FechaInicial.between(start, end))
        .order_by_asc(bill::Column::FechaInicial)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok((
        [(header::CONTENT_TYPE, "text/csv")],
        bills_to_csv(&bills),
    ))
}

/// Aggregate the delivered mass and billed total per day of a month
#[utoipa::path(
    post,
    tag = "graphs",
    path = "/graphs/daily-purchase",
    security(("jwt" = [])),
    request_body(content = DailyPurchaseDto, content_type = "application/json"),
    responses(
        (status = OK, body = Vec<DailyPurchasePoint>),
        (status = BAD_REQUEST, description = "malformed month selector", body = SimpleError),
    ),
)]
pub async fn daily_purchase(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<DailyPurchaseDto>,
) -> Result<Json<Vec<DailyPurchasePoint>>, (StatusCode, SimpleError)> {
    let (start, end) = month_window(&dto.date).ok_or((
        StatusCode::BAD_REQUEST,
        SimpleError::from("malformed month selector"),
    ))?;

    let bills = bill::Entity::find()
        .filter(bill::Column::State.eq(RecordState::Activo))
        .filter(bill::Column::BranchOfficeCode.eq(dto.branch_office_code))
        .filter(bill::Column::FechaInicial.between(start, end))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    let mut per_day = BTreeMap::new();

    for bill in bills {
        let point = per_day
            .entry(bill.fecha_inicial)
            .or_insert((0.0_f64, 0.0_f64));

        point.0 += bill.masa_total;
        point.1 += bill.total;
    }

    let points = per_day
        .into_iter()
        .map(|(date, (masa_total, total))| DailyPurchasePoint {
            date,
            masa_total,
            total,
        })
        .collect();

    Ok(Json(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
