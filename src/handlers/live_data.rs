//! # Live Data API Handlers
//!
//! Ingestion and listing of telemetry samples.

use axum::{
    extract::State,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::handlers::payload::JsonPayload;
use crate::handlers::types::LiveDataResponse;
use crate::repositories::{LiveDataRepository, NewLiveData};
use crate::server::AppState;
use crate::validation::{ValidationErrors, check_non_negative, check_range, check_text};

/// Request payload for a telemetry sample. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLiveDataRequest {
    #[schema(example = 1)]
    pub site_id: i32,
    /// Client timestamp, stored as sent
    #[schema(example = "2026-10-19T12:00:00.000000")]
    pub dt_stamp: String,
    /// State of charge in percent
    #[schema(example = 55.5, minimum = 0.0, maximum = 100.0)]
    pub soc: f64,
    #[schema(example = 120.0, minimum = 0.0)]
    pub load_kwh: f64,
    #[schema(example = 80.0, minimum = 0.0)]
    pub net_load_kwh: f64,
    pub pv_notification: bool,
    pub bio_notification: bool,
    pub cro_notification: bool,
}

impl CreateLiveDataRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "dt_stamp", &self.dt_stamp, 100);
        check_range(&mut errors, "soc", self.soc, 0.0, 100.0);
        check_non_negative(&mut errors, "load_kwh", self.load_kwh);
        check_non_negative(&mut errors, "net_load_kwh", self.net_load_kwh);
        errors.into_result()
    }
}

impl From<CreateLiveDataRequest> for NewLiveData {
    fn from(request: CreateLiveDataRequest) -> Self {
        Self {
            site_id: request.site_id,
            dt_stamp: request.dt_stamp,
            soc: request.soc,
            load_kwh: request.load_kwh,
            net_load_kwh: request.net_load_kwh,
            pv_notification: request.pv_notification,
            bio_notification: request.bio_notification,
            cro_notification: request.cro_notification,
        }
    }
}

/// List every telemetry sample
#[utoipa::path(
    get,
    path = "/api/live_data",
    responses(
        (status = 200, description = "All live data samples", body = Vec<LiveDataResponse>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "live_data"
)]
pub async fn list_live_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<LiveDataResponse>>, ApiError> {
    let samples = LiveDataRepository::new(&state.db).list_live_data().await?;
    tracing::info!(count = samples.len(), "Live data fetched");
    Ok(Json(samples.into_iter().map(LiveDataResponse::from).collect()))
}

/// Ingest one telemetry sample
#[utoipa::path(
    post,
    path = "/api/live_data",
    request_body = CreateLiveDataRequest,
    responses(
        (status = 200, description = "Sample stored", body = LiveDataResponse),
        (status = 400, description = "Validation failed or unknown site", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "live_data"
)]
pub async fn create_live_data(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<CreateLiveDataRequest>,
) -> Result<Json<LiveDataResponse>, ApiError> {
    request.validate()?;

    let sample = LiveDataRepository::new(&state.db)
        .create_live_data(request.into())
        .await?;

    tracing::info!(
        live_data_id = sample.id,
        site_id = sample.site_id,
        "New live data stored"
    );

    Ok(Json(sample.into()))
}
