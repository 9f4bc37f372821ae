use super::dto::{CreateDepartmentDto, UpdateDepartmentDto};
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
use entity::department;
use entity::enums::RecordState;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_departments))
        .route("/getById/:department_id", get(department_by_id))
        .route("/create", post(create_department))
        .route("/update/:department_id", put(update_department))
        .route("/:department_id", delete(delete_department))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active departments
#[utoipa::path(
    get,
    tag = "department",
    path = "/department/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::department::Model>)),
)]
pub async fn list_departments(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<department::Model>>, (StatusCode, SimpleError)> {
    let departments = department::Entity::find()
        .filter(department::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(departments))
}

/// Get a department by id
#[utoipa::path(
    get,
    tag = "department",
    path = "/department/getById/{department_id}",
    security(("jwt" = [])),
    params(("department_id" = Uuid, Path, description = "id of the department to get")),
    responses(
        (status = OK, body = entity::department::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn department_by_id(
    Path(department_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<department::Model>, (StatusCode, SimpleError)> {
    let department = department::Entity::find_by_id(department_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(department))
}

/// Create a department
#[utoipa::path(
    post,
    tag = "department",
    path = "/department/create",
    security(("jwt" = [])),
    request_body(content = CreateDepartmentDto, content_type = "application/json"),
    responses((status = OK, body = entity::department::Model)),
)]
pub async fn create_department(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<Json<department::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let department = department::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
    };

    Ok(Json(department.insert(&db).await.map_err(DbError::from)?))
}

/// Update a department
#[utoipa::path(
    put,
    tag = "department",
    path = "/department/update/{department_id}",
    security(("jwt" = [])),
    params(("department_id" = Uuid, Path, description = "id of the department to update")),
    request_body(content = UpdateDepartmentDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::department::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_department(
    Path(department_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<department::Model>, (StatusCode, SimpleError)> {
    let department = department::Entity::find_by_id(department_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut department = department.into_active_model();

    set_if_some(&mut department.name, dto.name);
    department.updated_at = Set(Utc::now());

    Ok(Json(department.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a department
#[utoipa::path(
    delete,
    tag = "department",
    path = "/department/{department_id}",
    security(("jwt" = [])),
    params(("department_id" = Uuid, Path, description = "id of the department to delete")),
    responses(
        (status = OK, body = entity::department::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_department(
    Path(department_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<department::Model>, (StatusCode, SimpleError)> {
    let department = department::Entity::find_by_id(department_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut department = department.into_active_model();

    department.state = Set(RecordState::Inactivo);
    department.updated_at = Set(Utc::now());

    Ok(Json(department.update(&db).await.map_err(DbError::from)?))
}
