use super::dto::{CreateTabletDto, UpdateTabletDto};
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
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use entity::enums::RecordState;
use entity::tablet;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_tablets))
        .route("/getById/:tablet_id", get(tablet_by_id))
        .route("/getByBranchOfficeCode/:code", get(tablet_by_branch_office_code))
        .route("/create", post(create_tablet))
        .route("/update/:tablet_id", post(update_tablet))
        .route("/:tablet_id", delete(delete_tablet))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active tablets
#[utoipa::path(
    get,
    tag = "tablet",
    path = "/tablet/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::tablet::Model>)),
)]
pub async fn list_tablets(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<tablet::Model>>, (StatusCode, SimpleError)> {
    let tablets = tablet::Entity::find()
        .filter(tablet::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(tablets))
}

/// Get a tablet by id
#[utoipa::path(
    get,
    tag = "tablet",
    path = "/tablet/getById/{tablet_id}",
    security(("jwt" = [])),
    params(("tablet_id" = Uuid, Path, description = "id of the tablet to get")),
    responses(
        (status = OK, body = entity::tablet::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn tablet_by_id(
    Path(tablet_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<tablet::Model>, (StatusCode, SimpleError)> {
    let tablet = tablet::Entity::find_by_id(tablet_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(tablet))
}

/// Get the tablet bound to a branch office by its public code
#[utoipa::path(
    get,
    tag = "tablet",
    path = "/tablet/getByBranchOfficeCode/{code}",
    security(("jwt" = [])),
    params(("code" = i32, Path, description = "public code of the branch office")),
    responses(
        (status = OK, body = entity::tablet::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn tablet_by_branch_office_code(
    Path(code): Path<i32>,
    DbConnection(db): DbConnection,
) -> Result<Json<tablet::Model>, (StatusCode, SimpleError)> {
    let tablet = tablet::Entity::find()
        .filter(tablet::Column::State.eq(RecordState::Activo))
        .filter(tablet::Column::BranchOfficeCode.eq(code))
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(tablet))
}

/// Register a tablet
#[utoipa::path(
    post,
    tag = "tablet",
    path = "/tablet/create",
    security(("jwt" = [])),
    request_body(content = CreateTabletDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::tablet::Model),
        (status = BAD_REQUEST, description = "IMEI_IN_USE", body = SimpleError),
    ),
)]
pub async fn create_tablet(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateTabletDto>,
) -> Result<Json<tablet::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let tablet = tablet::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        imei: Set(dto.imei),
        branch_office_code: Set(dto.branch_office_code),
    };

    Ok(Json(tablet.insert(&db).await.map_err(DbError::from)?))
}

/// Update a tablet
#[utoipa::path(
    post,
    tag = "tablet",
    path = "/tablet/update/{tablet_id}",
    security(("jwt" = [])),
    params(("tablet_id" = Uuid, Path, description = "id of the tablet to update")),
    request_body(content = UpdateTabletDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::tablet::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_tablet(
    Path(tablet_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateTabletDto>,
) -> Result<Json<tablet::Model>, (StatusCode, SimpleError)> {
    let tablet = tablet::Entity::find_by_id(tablet_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut tablet = tablet.into_active_model();

    set_if_some(&mut tablet.imei, dto.imei);
    set_if_some(&mut tablet.branch_office_code, dto.branch_office_code);
    tablet.updated_at = Set(Utc::now());

    Ok(Json(tablet.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a tablet
#[utoipa::path(
    delete,
    tag = "tablet",
    path = "/tablet/{tablet_id}",
    security(("jwt" = [])),
    params(("tablet_id" = Uuid, Path, description = "id of the tablet to delete")),
    responses(
        (status = OK, body = entity::tablet::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_tablet(
    Path(tablet_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<tablet::Model>, (StatusCode, SimpleError)> {
    let tablet = tablet::Entity::find_by_id(tablet_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut tablet = tablet.into_active_model();

    tablet.state = Set(RecordState::Inactivo);
    tablet.updated_at = Set(Utc::now());

    Ok(Json(tablet.update(&db).await.map_err(DbError::from)?))
}
