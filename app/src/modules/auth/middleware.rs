use super::jwt;
use crate::{
    database::error::DbError,
    modules::common::{
        error_codes::{INVALID_TOKEN, NO_BEARER_TOKEN},
        responses::SimpleError,
    },
    server::controller::AppState,
};
use axum::{
    extract::State,
    middleware::Next,
    response::Response,
};
use entity::enums::RecordState;
use entity::user;
use http::{header, StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

/// The user that owns the bearer token of the request, exposed
/// as a request extension by the `require_user` middleware
#[derive(Clone)]
pub struct RequestUser(pub user::Model);

fn get_bearer_token(req: &http::Request<axum::body::Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// middleware for routes that require a logged in user, decodes the JWT on the
/// authorization header and loads its user from the DB, adding the `RequestUser`
/// extension to the request
pub async fn require_user(
    State(state): State<AppState>,
    mut req: http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, (StatusCode, SimpleError)> {
    let unauthorized = |code: &str| (StatusCode::UNAUTHORIZED, SimpleError::from(code));

    let token = get_bearer_token(&req).ok_or(unauthorized(NO_BEARER_TOKEN))?;

    let token_data = jwt::decode(token).or(Err(unauthorized(INVALID_TOKEN)))?;

    let user_id =
        Uuid::parse_str(&token_data.claims.sub).or(Err(unauthorized(INVALID_TOKEN)))?;

    let user = user::Entity::find_by_id(user_id)
        .filter(user::Column::State.ne(RecordState::Inactivo))
        .one(&state.db)
        .await
        .map_err(DbError::from)?
        .ok_or(unauthorized(INVALID_TOKEN))?;

    req.extensions_mut().insert(RequestUser(user));

    Ok(next.run(req).await)
}
