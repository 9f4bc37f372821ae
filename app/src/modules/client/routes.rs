use super::dto::{CreateClientDto, UpdateClientDto};
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
use entity::{branch_office, client};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[cfg(not(test))]
pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(list_clients))
        .route("/getById/:client_id", get(client_by_id))
        .route("/getByBranchOfficeId/:branch_office_id", get(clients_by_branch_office))
        .route("/create", post(create_client))
        .route("/update/:client_id", put(update_client))
        .route("/:client_id", delete(delete_client))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            auth::middleware::require_user,
        ))
}

/// List the active clients
#[utoipa::path(
    get,
    tag = "client",
    path = "/client/all",
    security(("jwt" = [])),
    responses((status = OK, body = Vec<entity::client::Model>)),
)]
pub async fn list_clients(
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<client::Model>>, (StatusCode, SimpleError)> {
    let clients = client::Entity::find()
        .filter(client::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(clients))
}

/// Get a client by id
#[utoipa::path(
    get,
    tag = "client",
    path = "/client/getById/{client_id}",
    security(("jwt" = [])),
    params(("client_id" = Uuid, Path, description = "id of the client to get")),
    responses(
        (status = OK, body = entity::client::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn client_by_id(
    Path(client_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<client::Model>, (StatusCode, SimpleError)> {
    let client = client::Entity::find_by_id(client_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    Ok(Json(client))
}

/// List the clients served by a branch office
#[utoipa::path(
    get,
    tag = "client",
    path = "/client/getByBranchOfficeId/{branch_office_id}",
    security(("jwt" = [])),
    params(("branch_office_id" = Uuid, Path, description = "id of the branch office")),
    responses(
        (status = OK, body = Vec<entity::client::Model>),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn clients_by_branch_office(
    Path(branch_office_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<Vec<client::Model>>, (StatusCode, SimpleError)> {
    let branch_office = branch_office::Entity::find_by_id(branch_office_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let clients = branch_office
        .find_related(client::Entity)
        .filter(client::Column::State.eq(RecordState::Activo))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    Ok(Json(clients))
}

/// Create a client
#[utoipa::path(
    post,
    tag = "client",
    path = "/client/create",
    security(("jwt" = [])),
    request_body(content = CreateClientDto, content_type = "application/json"),
    responses((status = OK, body = entity::client::Model)),
)]
pub async fn create_client(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateClientDto>,
) -> Result<Json<client::Model>, (StatusCode, SimpleError)> {
    let now = Utc::now();

    let client = client::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        state: Set(RecordState::Activo),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        cc: Set(dto.cc),
        phone: Set(dto.phone),
        email: Set(dto.email),
        occupation_id: Set(dto.occupation_id),
    };

    Ok(Json(client.insert(&db).await.map_err(DbError::from)?))
}

/// Update a client
#[utoipa::path(
    put,
    tag = "client",
    path = "/client/update/{client_id}",
    security(("jwt" = [])),
    params(("client_id" = Uuid, Path, description = "id of the client to update")),
    request_body(content = UpdateClientDto, content_type = "application/json"),
    responses(
        (status = OK, body = entity::client::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn update_client(
    Path(client_id): Path<Uuid>,
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<UpdateClientDto>,
) -> Result<Json<client::Model>, (StatusCode, SimpleError)> {
    let client = client::Entity::find_by_id(client_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut client = client.into_active_model();

    set_if_some(&mut client.first_name, dto.first_name);
    set_if_some(&mut client.last_name, dto.last_name);
    set_if_some(&mut client.cc, dto.cc);
    set_if_some(&mut client.phone, dto.phone);
    set_if_some(&mut client.email, dto.email);

    if dto.occupation_id.is_some() {
        client.occupation_id = Set(dto.occupation_id);
    }

    client.updated_at = Set(Utc::now());

    Ok(Json(client.update(&db).await.map_err(DbError::from)?))
}

/// Soft delete a client
#[utoipa::path(
    delete,
    tag = "client",
    path = "/client/{client_id}",
    security(("jwt" = [])),
    params(("client_id" = Uuid, Path, description = "id of the client to delete")),
    responses(
        (status = OK, body = entity::client::Model),
        (status = NOT_FOUND, body = SimpleError),
    ),
)]
pub async fn delete_client(
    Path(client_id): Path<Uuid>,
    DbConnection(db): DbConnection,
) -> Result<Json<client::Model>, (StatusCode, SimpleError)> {
    let client = client::Entity::find_by_id(client_id)
        .one(&db)
        .await
        .map_err(DbError::from)?
        .ok_or(SimpleError::entity_not_found())?;

    let mut client = client.into_active_model();

    client.state = Set(RecordState::Inactivo);
    client.updated_at = Set(Utc::now());

    Ok(Json(client.update(&db).await.map_err(DbError::from)?))
}
