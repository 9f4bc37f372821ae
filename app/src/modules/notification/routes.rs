use super::dto::CreateNotificationDto;
use super::repository;
use crate::{
    database::error::DbError,
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
use entity::enums::{NotificationStatus, RecordState};
use entity::notification;
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_notifications))
        .route("/unread", get(list_unread_notifications))
        .route("/getById/:notification_id", get(notification_by_id))
        .route("/create", post(create_notification))
        .route("/update/:notification_id", put(mark_notification_read))
        .route("/:notification_id", delete(delete_notification))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active notifications, newest first
#[utoipa::path(
    get,
    tag = "notification",
    path = "/notifications/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::notification::Model>)),
)]
pub async fn list_notifications(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<notification::Model>>, (StatusCode, SimpleError)> {
    let notifications = notification::Entity::find()
        .filter(notification::Column::State.eq(RecordState::Activo))
        .order_by_desc(notification::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(notifications))
}

/// List the unread notifications, newest first
#[utoipa::path(
    get,
    tag = "notification",
    path = "/notifications/unread",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::notification::Model>)),
)]
pub async fn list_unread_notifications(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<notification::Model>>, (StatusCode, SimpleError)> {
    let notifications = notification::Entity::find()
        .filter(notification::Column::State.eq(RecordState::Activo))
        .filter(notification::Column::Status.eq(NotificationStatus::NoLeido))
        .order_by_desc(notification::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(notifications))
}

/// Get a notification by id
#[utoipa::path(
    get,
    tag = "notification",
    path = "/notifications/getById/{notification_id}",
    security(("jwt" = [])),
    params(("notification_id" = Uuid, Path, description = "id of the notification to get")),
    responses(
        (status = OK, body = entity::notification::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn notification_by_id(
    Path(notification_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<notification::Model>, (StatusCode, SimpleError)> {
    let notification = notification::Entity::find_by_id(notification_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(notification))
}

/// Create a notification unless an unread duplicate exists
///
/// returns the existing unread notification when the new one would
/// repeat its kind and message
#[utoipa::path(
    post,
    tag = "notification",
    path = "/notifications/create",
    security(("jwt" = [])),
    request_body(content = CreateNotificationDto, content_type = "application/json"),
    responses((status = OK, body = entity::notification::Model)),
)]
pub async fn create_notification(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateNotificationDto>,
) -> Result<Json<notification::Model>, (StatusCode, SimpleError)> {
    let notification = repository::create_deduplicated(
        &db,
        dto.kind,
        &dto.title,
        &dto.message,
        &dto.subject_id,
    )
    .await?;

    Ok(Json(notification))
}

/// Mark a notification as read
#[utoipa::path(
    put,
    tag = "notification",
    path = "/notifications/update/{notification_id}",
    security(("jwt" = [])),
    params(("notification_id" = Uuid, Path, description = "id of the notification to mark as read")),
    responses(
        (status = OK, body = entity::notification::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn mark_notification_read(
    Path(notification_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<notification::Model>, (StatusCode, SimpleError)> {
    let notification = notification::Entity::find_by_id(notification_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut notification = notification.into_active_model();

    notification.status = Set(NotificationStatus::Leido);
    notification.updated_at = Set(Utc::now());

    Ok(Json(notification.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a notification
#[utoipa::path(
    delete,
    tag = "notification",
    path = "/notifications/{notification_id}",
    security(("jwt" = [])),
    params(("notification_id" = Uuid, Path, description = "id of the notification to delete")),
    responses(
        (status = OK, body = entity::notification::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_notification(
    Path(notification_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<notification::Model>, (StatusCode, SimpleError)> {
    let notification = notification::Entity::find_by_id(notification_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut notification = notification.into_active_model();

    notification.state = Set(RecordState::Inactivo);
    notification.updated_at = Set(Utc::now());

    Ok(Json(notification.update(&db).await.map_err(DbError::from)?))
}
