mod bootstrap;
mod config;
mod database;
mod modules;
mod rabbitmq;
mod server;
mod services;

use config::app_config;
use sea_orm::DatabaseConnection;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing_subscriber::EnvFilter;

// not compiled into the test harness: sea-orm's `mock` feature (enabled by the
// dev-dependencies) removes `Clone` from `DatabaseConnection`, which this fn needs
#[cfg(not(test))]
#[tokio::main]
pub async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cfg = app_config();

    let db = database::db::connect(&cfg.db_url).await;

    database::db::run_migrations(&db).await;

    bootstrap::run(&db)
        .await
        .expect("[APP] failed to run bootstrap routine");

    let rmq_conn_pool = rabbitmq::get_connection_pool(&cfg.rmq_uri);

    listen_to_shutdown_signals(!cfg.is_development, db.clone());

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), cfg.http_port);
    println!("[WEB] soon listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to get address {}", addr));

    let server = server::controller::new(db, rmq_conn_pool);

    axum::serve(listener, server)
        .await
        .unwrap_or_else(|_| panic!("[WEB] failed to serve app on address {}", addr));
}

/// Listen to shutdown signals `SIGINT` and `SIGTERM`, on a signal gracefully shutdowns down the application
#[cfg(not(test))]
#[allow(clippy::never_loop)]
fn listen_to_shutdown_signals(gracefully_shutdown: bool, db: DatabaseConnection) {
    let mut signals = Signals::new([SIGINT, SIGTERM]).expect("failed to setup signals hook");

    tokio::spawn(async move {
        for sig in signals.forever() {
            if gracefully_shutdown {
                println!("[APP] received signal: {}, shutting down", sig);

                println!("[APP] closing postgres connections");
                if let Err(e) = db.close().await {
                    println!("[DB] failed to close db connection: {e}")
                }
            }

            std::process::exit(sig)
        }
    });
}
