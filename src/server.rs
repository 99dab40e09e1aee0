//! # Server Configuration
//!
//! This module contains the router and server setup for the site telemetry API.

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
///
/// Built once in `main` and cloned into every handler; there is no global
/// database handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route(
            "/api/sites",
            get(handlers::sites::list_sites).post(handlers::sites::create_site),
        )
        .route(
            "/api/configurations",
            get(handlers::configurations::list_configurations)
                .post(handlers::configurations::create_configuration),
        )
        .route(
            "/api/live_data",
            get(handlers::live_data::list_live_data).post(handlers::live_data::create_live_data),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server and serves until Ctrl-C
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_addr()?;
    let profile = state.config.profile.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::readyz,
        crate::handlers::sites::list_sites,
        crate::handlers::sites::create_site,
        crate::handlers::configurations::list_configurations,
        crate::handlers::configurations::create_configuration,
        crate::handlers::live_data::list_live_data,
        crate::handlers::live_data::create_live_data,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::types::HealthStatus,
            crate::handlers::types::SiteResponse,
            crate::handlers::types::ConfigurationResponse,
            crate::handlers::types::BatteryResponse,
            crate::handlers::types::ProductionUnitResponse,
            crate::handlers::types::LiveDataResponse,
            crate::handlers::sites::CreateSiteRequest,
            crate::handlers::configurations::CreateConfigurationRequest,
            crate::handlers::configurations::BatteryInput,
            crate::handlers::configurations::ProductionUnitInput,
            crate::handlers::live_data::CreateLiveDataRequest,
        )
    ),
    tags(
        (name = "sites", description = "Site registration"),
        (name = "configurations", description = "Equipment configurations"),
        (name = "live_data", description = "Telemetry ingestion"),
    ),
    info(
        title = "Site Telemetry API",
        description = "Collects site registrations, equipment configurations and live telemetry",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
