use super::dto::{CreatePermissionDto, UpdatePermissionDto};
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
use entity::permission;
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_permissions))
        .route("/getById/:permission_id", get(permission_by_id))
        .route("/create", post(create_permission))
        .route("/update/:permission_id", put(update_permission))
        .route("/:permission_id", delete(delete_permission))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active permissions
#[utoipa::path(
    get,
    tag = "permission",
    path = "/permissions/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::permission::Model>)),
)]
pub async fn list_permissions(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<permission::Model>>, (StatusCode, SimpleError)> {
    let permissions = permission::Entity::find()
        .filter(permission::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(permissions))
}

/// Get a permission by id
#[utoipa::path(
    get,
    tag = "permission",
    path = "/permissions/getById/{permission_id}",
    security(("jwt" = [])),
    params(("permission_id" = Uuid, Path, description = "id of the permission to get")),
    responses(
        (status = OK, body = entity::permission::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn permission_by_id(
    Path(permission_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<permission::Model>, (StatusCode, SimpleError)> {
    let permission = permission::Entity::find_by_id(permission_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(permission))
}

/// Create a permission
#[utoipa::path(
    post,
    tag = "permission",
    path = "/permissions/create",
    security(("jwt" = [])),
    request_body(content = CreatePermissionDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::permission::Model),
        (status = BAD_REQUEST, description = "NAME_IN_USE", body = SimpleError),
    ),
)]
pub async fn create_permission(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreatePermissionDto>,
) -> Result<Json<permission::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let permission = permission::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
        access_code: Set(dto.access_code),
        description: Set(dto.description),
    };

    Ok(Json(permission.insert(&db).await.map_err(DbError::from)?))
}

/// Update a permission
#[utoipa::path(
    put,
    tag = "permission",
    path = "/permissions/update/{permission_id}",
    security(("jwt" = [])),
    params(("permission_id" = Uuid, Path, description = "id of the permission to update")),
    request_body(content = UpdatePermissionDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::permission::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_permission(
    Path(permission_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdatePermissionDto>,
) -> Result<Json<permission::Model>, (StatusCode, SimpleError)> {
    let permission = permission::Entity::find_by_id(permission_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut permission = permission.into_active_model();

    set_if_some(&mut permission.name, dto.name);
    set_if_some(&mut permission.access_code, dto.access_code);
    set_if_some(&mut permission.description, dto.description);
    permission.updated_at = Set(Utc::now());

    Ok(Json(permission.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a permission
#[utoipa::path(
    delete,
    tag = "permission",
    path = "/permissions/{permission_id}",
    security(("jwt" = [])),
    params(("permission_id" = Uuid, Path, description = "id of the permission to delete")),
    responses(
        (status = OK, body = entity::permission::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_permission(
    Path(permission_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<permission::Model>, (StatusCode, SimpleError)> {
    let permission = permission::Entity::find_by_id(permission_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut permission = permission.into_active_model();

    permission.state = Set(RecordState::Inactivo);
    permission.updated_at = Set(Utc::now());

    Ok(Json(permission.update(&db).await.map_err(DbError::from)?))
}
