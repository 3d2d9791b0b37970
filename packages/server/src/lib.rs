#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the club network directory.
//!
//! Serves the REST API for browsing clubs: paginated list, filter options,
//! map configuration, per-club detail, and the client bootstrap config.
//! Bundled images and icons are served as static files under `/assets`.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use club_network_settings::NetworkSettings;
use club_network_store::sql::SqlContentStore;
use club_network_store::{ContentStore, db, run_migrations};

/// Shared application state.
pub struct AppState {
    /// Content store handle.
    pub store: Arc<dyn ContentStore>,
    /// Site settings captured at startup.
    pub settings: NetworkSettings,
}

/// Registers the API routes under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/clubs", web::get().to(handlers::clubs))
            .route("/clubs/{id}", web::get().to(handlers::club_details))
            .route("/filters", web::get().to(handlers::filters))
            .route("/map", web::get().to(handlers::map_config))
            .route("/config", web::get().to(handlers::client_config)),
    );
}

/// Starts the club network API server.
///
/// Loads settings, connects to the content database, runs migrations, and
/// starts the Actix-Web HTTP server. This is a regular async function; the
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if settings cannot be loaded, the database connection fails, or
/// migrations fail.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    // Ignore the error if a logger was already set (e.g., by the
    // toolchain CLI)
    pretty_env_logger::try_init_custom_env("RUST_LOG").ok();

    let settings = NetworkSettings::load_from_env().expect("Failed to load settings");

    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to database");

    log::info!("Running migrations...");
    run_migrations(db_conn.as_ref())
        .await
        .expect("Failed to run migrations");

    let store = SqlContentStore::new(Arc::from(db_conn), settings.site_url.clone());

    let state = web::Data::new(AppState {
        store: Arc::new(store),
        settings,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let assets_dir = std::env::var("ASSETS_DIR").unwrap_or_else(|_| "public".to_string());

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve bundled images and icons
            .service(Files::new("/assets", assets_dir.clone()))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
