//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the site
//! telemetry API.

use axum::{extract::State, response::Json};

use crate::db;
use crate::error::{ApiError, ErrorType};
use crate::handlers::types::HealthStatus;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod configurations;
pub mod live_data;
pub mod payload;
pub mod sites;
pub mod types;

/// Root handler that returns basic service information
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Process is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Readiness probe; verifies the database answers
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Database reachable", body = HealthStatus),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "health"
)]
pub async fn readyz(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::warn!(error = ?err, "Readiness check failed");
        ApiError::from(ErrorType::ServiceUnavailable)
    })?;
    Ok(Json(HealthStatus::ok()))
}

#[cfg(test)]
mod tests;
