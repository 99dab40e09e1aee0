//! # Sites API Handlers
//!
//! Registration and listing of sites.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::handlers::payload::JsonPayload;
use crate::handlers::types::SiteResponse;
use crate::repositories::{NewSite, SiteRepository, SiteWithChildren};
use crate::server::AppState;
use crate::validation::{ValidationErrors, check_text};

/// Request payload for registering a site
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSiteRequest {
    /// Display name (required, max 100 characters)
    #[schema(example = "Willo Woods")]
    pub name: String,
    /// Location description (required, max 100 characters)
    #[schema(example = "north")]
    pub location: String,
}

impl CreateSiteRequest {
    /// Strip surrounding whitespace so validation sees what gets stored.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", &self.name, 100);
        check_text(&mut errors, "location", &self.location, 100);
        errors.into_result()
    }
}

/// List all sites with their configurations and live data
#[utoipa::path(
    get,
    path = "/api/sites",
    responses(
        (status = 200, description = "All sites", body = Vec<SiteResponse>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "sites"
)]
pub async fn list_sites(State(state): State<AppState>) -> Result<Json<Vec<SiteResponse>>, ApiError> {
    let sites = SiteRepository::new(&state.db).list_sites().await?;
    tracing::debug!(count = sites.len(), "Sites fetched");
    Ok(Json(sites.into_iter().map(SiteResponse::from).collect()))
}

/// Register a new site
#[utoipa::path(
    post,
    path = "/api/sites",
    request_body = CreateSiteRequest,
    responses(
        (status = 201, description = "Site created", body = SiteResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "sites"
)]
pub async fn create_site(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<CreateSiteRequest>,
) -> Result<(StatusCode, Json<SiteResponse>), ApiError> {
    let request = request.trimmed();
    request.validate()?;

    let site = SiteRepository::new(&state.db)
        .create_site(NewSite {
            name: request.name,
            location: request.location,
        })
        .await?;

    tracing::info!(site_id = site.id, "New site created");

    let response = SiteResponse::from(SiteWithChildren {
        site,
        configurations: Vec::new(),
        live_data: Vec::new(),
    });
    Ok((StatusCode::CREATED, Json(response)))
}
