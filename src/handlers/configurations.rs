//! # Configurations API Handlers
//!
//! Equipment configurations: an optional battery plus production units,
//! attached to a site.

use axum::{
    extract::State,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::handlers::payload::JsonPayload;
use crate::handlers::types::ConfigurationResponse;
use crate::repositories::{
    ConfigurationRepository, NewBattery, NewConfiguration, NewProductionUnit,
};
use crate::server::AppState;
use crate::validation::{ValidationErrors, check_non_negative, check_text, check_vendor};

/// Battery section of a configuration request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatteryInput {
    /// One of "Tesla" or "KATL"
    #[schema(example = "Tesla")]
    pub vendor: String,
    #[schema(example = 100.0, minimum = 0.0)]
    pub capacity_kwh: f64,
    #[schema(example = 10.0, minimum = 0.0)]
    pub max_power_kw: f64,
}

impl BatteryInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "vendor", &self.vendor, 50);
        if !errors.has_field("vendor") {
            check_vendor(&mut errors, "vendor", &self.vendor);
        }
        check_non_negative(&mut errors, "capacity_kwh", self.capacity_kwh);
        check_non_negative(&mut errors, "max_power_kw", self.max_power_kw);
        errors.into_result()
    }
}

/// Production unit section of a configuration request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductionUnitInput {
    #[schema(example = "Solar")]
    pub unit_type: String,
    #[schema(example = 5, minimum = 0)]
    pub units: i32,
    /// Rated capacity in kWp, optional
    #[serde(default)]
    #[schema(example = 10.0)]
    pub kwp: Option<f64>,
}

impl ProductionUnitInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "unit_type", &self.unit_type, 50);
        if self.units < 0 {
            errors.add("units", "Must be greater than or equal to 0.");
        }
        if let Some(kwp) = self.kwp
            && !kwp.is_finite()
        {
            errors.add("kwp", "Not a valid number.");
        }
        errors.into_result()
    }
}

/// Request payload for creating a configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConfigurationRequest {
    #[schema(example = 1)]
    pub site_id: i32,
    #[serde(default)]
    pub battery: Option<BatteryInput>,
    #[serde(default)]
    pub production_units: Vec<ProductionUnitInput>,
}

impl CreateConfigurationRequest {
    /// Strip surrounding whitespace from unit types so validation sees what
    /// gets stored. Vendors are compared exactly and left alone.
    pub fn trimmed(mut self) -> Self {
        for unit in &mut self.production_units {
            unit.unit_type = unit.unit_type.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(battery) = &self.battery
            && let Err(nested) = battery.validate()
        {
            errors.merge_nested("battery", nested);
        }
        for (index, unit) in self.production_units.iter().enumerate() {
            if let Err(nested) = unit.validate() {
                errors.merge_nested(&format!("production_units[{index}]"), nested);
            }
        }
        errors.into_result()
    }
}

impl From<CreateConfigurationRequest> for NewConfiguration {
    fn from(request: CreateConfigurationRequest) -> Self {
        Self {
            site_id: request.site_id,
            battery: request.battery.map(|battery| NewBattery {
                vendor: battery.vendor,
                capacity_kwh: battery.capacity_kwh,
                max_power_kw: battery.max_power_kw,
            }),
            production_units: request
                .production_units
                .into_iter()
                .map(|unit| NewProductionUnit {
                    unit_type: unit.unit_type,
                    units: unit.units,
                    kwp: unit.kwp,
                })
                .collect(),
        }
    }
}

/// List all configurations with battery and production units
#[utoipa::path(
    get,
    path = "/api/configurations",
    responses(
        (status = 200, description = "All configurations", body = Vec<ConfigurationResponse>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "configurations"
)]
pub async fn list_configurations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConfigurationResponse>>, ApiError> {
    let configurations = ConfigurationRepository::new(&state.db)
        .list_configurations()
        .await?;
    Ok(Json(
        configurations
            .into_iter()
            .map(ConfigurationResponse::from)
            .collect(),
    ))
}

/// Create a configuration for a site
///
/// A new battery row is written for every request that carries one; the
/// battery, configuration and production units commit together or not at all.
#[utoipa::path(
    post,
    path = "/api/configurations",
    request_body = CreateConfigurationRequest,
    responses(
        (status = 200, description = "Configuration created", body = ConfigurationResponse),
        (status = 400, description = "Validation failed or unknown site", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "configurations"
)]
pub async fn create_configuration(
    State(state): State<AppState>,
    JsonPayload(request): JsonPayload<CreateConfigurationRequest>,
) -> Result<Json<ConfigurationResponse>, ApiError> {
    let request = request.trimmed();
    request.validate()?;

    let created = ConfigurationRepository::new(&state.db)
        .create_configuration(request.into())
        .await?;

    tracing::info!(
        configuration_id = created.configuration.id,
        site_id = created.configuration.site_id,
        production_units = created.production_units.len(),
        "New configuration created"
    );

    Ok(Json(created.into()))
}
