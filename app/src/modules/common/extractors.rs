use crate::{modules::common::responses::SimpleError, server::controller::AppState};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    Json,
};
use http::{request::Parts, StatusCode};
use sea_orm::DatabaseConnection;
use validator::Validate;

/// Wrapper struct that extracts the request body as json exactly as `axum::Json<T>`
/// but also requires T to impl `Validate`, if validation fails a bad request code
/// and simple error is returned
#[derive(Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Validate,
    S: Send + Sync,
{
    type Rejection = (http::StatusCode, SimpleError);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(payload) => match payload.validate() {
                Ok(_) => Ok(ValidatedJson(payload.0)),
                Err(e) => Err((StatusCode::BAD_REQUEST, SimpleError::from(e))),
            },
            Err(rejection) => Err((rejection.status(), SimpleError::from(rejection.to_string()))),
        }
    }
}

/// Helper to get a DB connection from the state
pub struct DbConnection(pub DatabaseConnection);

// not compiled into the test harness: cloning the state's `DatabaseConnection`
// is impossible there because sea-orm's `mock` feature removes its `Clone` impl;
// tests construct `DbConnection` directly instead of extracting it
#[cfg(not(test))]
#[async_trait]
impl FromRequestParts<AppState> for DbConnection {
    type Rejection = (http::StatusCode, SimpleError);

    async fn from_request_parts(
        _: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(DbConnection(state.db.clone()))
    }
}
