use super::open_api;
use crate::{
    config::app_config,
    modules::{
        auth, bill, branch_office, city, client, course, department, factor, graphs, location,
        notification, occupation, permission, propane_truck, role, stationary_tank, tablet, user,
        zone,
    },
    services::{documents::service::DocumentsService, mailer::service::MailerService},
};
use axum::{body::Body, routing::get, Router};
use deadpool_lapin::Pool as RmqPool;
use http::{header, HeaderValue, Method, Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP request
/// and thus its fields should contain types that are cheap to clone.
///
/// not `Clone` in the test harness: sea-orm's `mock` feature (enabled by the
/// dev-dependencies) removes `Clone` from `DatabaseConnection`
#[cfg_attr(not(test), derive(Clone))]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer_service: MailerService,
    pub documents_service: DocumentsService,
}

/// Creates the main axum router/controller to be served over http
#[cfg(not(test))]
pub fn new(db: DatabaseConnection, rmq_conn_pool: RmqPool) -> Router {
    let state = AppState {
        db,
        mailer_service: MailerService::new(rmq_conn_pool.clone()),
        documents_service: DocumentsService::new(rmq_conn_pool),
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(
            app_config()
                .frontend_origin
                .parse::<HeaderValue>()
                .expect("failed to parse CORS allowed origins"),
        )
        .allow_credentials(true)
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new().layer(tracing_layer).layer(cors);

    Router::new()
        .merge(open_api::create_openapi_router())
        .route("/healthcheck", get(healthcheck))
        .nest("/auth", auth::routes::create_router(state.clone()))
        .nest("/usuarios", user::routes::create_router(state.clone()))
        .nest("/roles", role::routes::create_router(state.clone()))
        .nest(
            "/permissions",
            permission::routes::create_router(state.clone()),
        )
        .nest("/client", client::routes::create_router(state.clone()))
        .nest(
            "/occupation",
            occupation::routes::create_router(state.clone()),
        )
        .nest(
            "/branch-offices",
            branch_office::routes::create_router(state.clone()),
        )
        .nest(
            "/stationary-tank",
            stationary_tank::routes::create_router(state.clone()),
        )
        .nest(
            "/propane-truck",
            propane_truck::routes::create_router(state.clone()),
        )
        .nest("/courses", course::routes::create_router(state.clone()))
        .nest("/location", location::routes::create_router(state.clone()))
        .nest("/bill", bill::routes::create_router(state.clone()))
        .nest(
            "/notifications",
            notification::routes::create_router(state.clone()),
        )
        .nest("/city", city::routes::create_router(state.clone()))
        .nest(
            "/department",
            department::routes::create_router(state.clone()),
        )
        .nest("/zone", zone::routes::create_router(state.clone()))
        .nest("/factor", factor::routes::create_router(state.clone()))
        .nest("/tablet", tablet::routes::create_router(state.clone()))
        .nest("/graphs", graphs::routes::create_router(state.clone()))
        .layer(global_middlewares)
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses((status = OK)),
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
