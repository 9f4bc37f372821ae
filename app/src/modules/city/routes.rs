use super::dto::{CreateCityDto, UpdateCityDto};
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
use entity::{city, department};
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_cities))
        .route("/getById/:city_id", get(city_by_id))
        .route("/create", post(create_city))
        .route("/update/:city_id", put(update_city))
        .route("/:city_id", delete(delete_city))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active cities
#[utoipa::path(
    get,
    tag = "city",
    path = "/city/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::city::Model>)),
)]
pub async fn list_cities(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<city::Model>>, (StatusCode, SimpleError)> {
    let cities = city::Entity::find()
        .filter(city::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(cities))
}

/// Get a city by id
#[utoipa::path(
    get,
    tag = "city",
    path = "/city/getById/{city_id}",
    security(("jwt" = [])),
    params(("city_id" = Uuid, Path, description = "id of the city to get")),
    responses(
        (status = OK, body = entity::city::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn city_by_id(
    Path(city_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<city::Model>, (StatusCode, SimpleError)> {
    let city = city::Entity::find_by_id(city_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(city))
}

/// Create a city
#[utoipa::path(
    post,
    tag = "city",
    path = "/city/create",
    security(("jwt" = [])),
    request_body(content = CreateCityDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::city::Model),
        (status = BAD_REQUEST, description = "unknown department", body = SimpleError),
    ),
)]
pub async fn create_city(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateCityDto>,
) -> Result<Json<city::Model>, (StatusCode, SimpleError)> {
    let department = department::Entity::find_by_id(dto.department_id)
        .one(&db)
        .await
        .map_err(DbError::from)?;

    if department.is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from("unknown department"),
        ));
    }

    let now = Utc::now();

    let city = city::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        name: Set(dto.name),
        department_id: Set(dto.department_id),
    };

    Ok(Json(city.insert(&db).await.map_err(DbError::from)?))
}

/// Update a city
#[utoipa::path(
    put,
    tag = "city",
    path = "/city/update/{city_id}",
    security(("jwt" = [])),
    params(("city_id" = Uuid, Path, description = "id of the city to update")),
    request_body(content = UpdateCityDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::city::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_city(
    Path(city_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateCityDto>,
) -> Result<Json<city::Model>, (StatusCode, SimpleError)> {
    let city = city::Entity::find_by_id(city_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut city = city.into_active_model();

    set_if_some(&mut city.name, dto.name);
    set_if_some(&mut city.department_id, dto.department_id);
    city.updated_at = Set(Utc::now());

    Ok(Json(city.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a city
#[utoipa::path(
    delete,
    tag = "city",
    path = "/city/{city_id}",
    security(("jwt" = [])),
    params(("city_id" = Uuid, Path, description = "id of the city to delete")),
    responses(
        (status = OK, body = entity::city::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_city(
    Path(city_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<city::Model>, (StatusCode, SimpleError)> {
    let city = city::Entity::find_by_id(city_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut city = city.into_active_model();

    city.state = Set(RecordState::Inactivo);
    city.updated_at = Set(Utc::now());

    Ok(Json(city.update(&db).await.map_err(DbError::from)?))
}
