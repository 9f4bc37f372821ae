use super::dto::{CourseDto, CreateCourseDto, UpdateCourseDto};
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
use entity::enums::{OperatorStatus, RecordState};
use entity::{course, course_location, user};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_courses))
        .route("/getById/:course_id", get(course_by_id))
        .route("/getByOperatorId/:operator_id", get(course_by_operator))
        .route("/create", post(create_course))
        .route("/update/:course_id", put(update_course))
        .route("/:course_id", delete(soft_delete_course))
        .route("/delete/:course_id", delete(hard_delete_course))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active delivery routes with their operators and stops
#[utoipa::path(
    get,
    tag = "course",
    path = "/courses/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<CourseDto>)),
)]
pub async fn list_courses(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<CourseDto>>, (StatusCode, SimpleError)> {
    let courses = course::Entity::find()
        .filter(course::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(repository::with_relations(&db, courses).await?))
}

/// Get a delivery route by id
#[utoipa::path(
    get,
    tag = "course",
    path = "/courses/getById/{course_id}",
    security(("jwt" = [])),
    params(("course_id" = Uuid, Path, description = "id of the route to get")),
    responses(
        (status = OK, body = CourseDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn course_by_id(
    Path(course_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<CourseDto>, (StatusCode, SimpleError)> {
    let course = course::Entity::find_by_id(course_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let dto = repository::with_relations(&db, vec![course])
        .await?
        .into_iter()
        .next()
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(dto))
}

/// Get the active route assigned to an operator
#[utoipa::path(
    get,
    tag = "course",
    path = "/courses/getByOperatorId/{operator_id}",
    security(("jwt" = [])),
    params(("operator_id" = Uuid, Path, description = "id of the operator")),
    responses(
        (status = OK, body = CourseDto),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn course_by_operator(
    Path(operator_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<CourseDto>, (StatusCode, SimpleError)> {
    let course = course::Entity::find()
        .filter(course::Column::State.eq(RecordState::Activo))
        .filter(course::Column::OperatorId.eq(operator_id))
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let dto = repository::with_relations(&db, vec![course])
        .await?
        .into_iter()
        .next()
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(dto))
}

/// Create a delivery route, putting its operator EN RUTA
#[utoipa::path(
    post,
    tag = "course",
    path = "/courses/create",
    security(("jwt" = [])),
    request_body(content = CreateCourseDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::course::Model),
        (status = BAD_REQUEST, description = "unknown operator", body = SimpleError),
    ),
)]
pub async fn create_course(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<course::Model>, (StatusCode, SimpleError)> {
    let operator = user::Entity::find_by_id(dto.operator_id)
        .filter(user::Column::State.ne(RecordState::Inactivo))
        .one(&db)
        .await
        .map_err(DbError::from)?;

    let Some(operator) = operator else {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("unknown operator"),
        ));
    };

    let created = db
        .transaction::<_, course::Model, DbErr>(|tx| {
            Box::pin(async move {
                let now = Utc::now();

                let course = course::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    state: Set(RecordState::Activo),
                    operator_id: Set(operator.id),
                }
                .insert(tx)
                .await?;

                for location_id in dto.location_ids {
                    course_location::ActiveModel {
                        course_id: Set(course.id),
                        location_id: Set(location_id),
                    }
                    .insert(tx)
                    .await?;
                }

                let mut operator = operator.into_active_model();

                operator.status = Set(OperatorStatus::EnRuta);
                operator.updated_at = Set(Utc::now());

                operator.update(tx).await?;

                Ok(course)
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(created))
}

/// Update a delivery route, replacing its stops when a new list is sent
#[utoipa::path(
    put,
    tag = "course",
    path = "/courses/update/{course_id}",
    security(("jwt" = [])),
    params(("course_id" = Uuid, Path, description = "id of the route to update")),
    request_body(content = UpdateCourseDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::course::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_course(
    Path(course_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<course::Model>, (StatusCode, SimpleError)> {
    let course = course::Entity::find_by_id(course_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let updated = db
        .transaction::<_, course::Model, DbErr>(|tx| {
            Box::pin(async move {
                if let Some(location_ids) = dto.location_ids {
                    course_location::Entity::delete_many()
                        .filter(course_location::Column::CourseId.eq(course_id))
                        .exec(tx)
                        .await?;

                    for location_id in location_ids {
                        course_location::ActiveModel {
                            course_id: Set(course_id),
                            location_id: Set(location_id),
                        }
                        .insert(tx)
                        .await?;
                    }
                }

                let mut course = course.into_active_model();

                if let Some(operator_id) = dto.operator_id {
                    course.operator_id = Set(operator_id);
                }

                course.updated_at = Set(Utc::now());

                course.update(tx).await
            })
        })
        .await
        .map_err(DbError::from)?;

    Ok(Json(updated))
}

/// Soft delete a delivery route
#[utoipa::path(
    delete,
    tag = "course",
    path = "/courses/{course_id}",
    security(("jwt" = [])),
    params(("course_id" = Uuid, Path, description = "id of the route to delete")),
    responses(
        (status = OK, body = entity::course::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn soft_delete_course(
    Path(course_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<course::Model>, (StatusCode, SimpleError)> {
    let course = course::Entity::find_by_id(course_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut course = course.into_active_model();

    course.state = Set(RecordState::Inactivo);
    course.updated_at = Set(Utc::now());

    Ok(Json(course.update(&db).await.map_err(DbError::from)?))
}

/// Hard delete a delivery route, freeing its operator
#[utoipa::path(
    delete,
    tag = "course",
    path = "/courses/delete/{course_id}",
    security(("jwt" = [])),
    params(("course_id" = Uuid, Path, description = "id of the route to delete")),
    responses(
        (status = OK),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn hard_delete_course(
    Path(course_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<String>, (StatusCode, SimpleError)> {
    let course = course::Entity::find_by_id(course_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    db.transaction::<_, (), DbErr>(|tx| {
        Box::pin(async move { repository::remove_course(tx, course).await })
    })
    .await
    .map_err(DbError::from)?;

    Ok(Json(String::from("course deleted")))
}
