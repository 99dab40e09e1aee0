//! # Common API Types
//!
//! Response payloads shared across handlers. These are written by hand and
//! kept apart from the SeaORM models so a schema change never silently
//! alters the wire contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{battery, live_data, production_unit};
use crate::repositories::{ConfigurationWithEquipment, SiteWithChildren};

/// Battery as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatteryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Tesla")]
    pub vendor: String,
    #[schema(example = 100.0)]
    pub capacity_kwh: f64,
    #[schema(example = 10.0)]
    pub max_power_kw: f64,
}

/// Production unit as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductionUnitResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub configuration_id: i32,
    #[schema(example = "Solar")]
    pub unit_type: String,
    #[schema(example = 5)]
    pub units: i32,
    /// Rated capacity in kWp; null when unknown
    #[schema(example = 10.0)]
    pub kwp: Option<f64>,
}

/// Configuration with its equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConfigurationResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub site_id: i32,
    pub battery_id: Option<i32>,
    pub battery: Option<BatteryResponse>,
    pub production_units: Vec<ProductionUnitResponse>,
}

/// Telemetry sample as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LiveDataResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub site_id: i32,
    #[schema(example = "2026-10-19T12:00:00.000000")]
    pub dt_stamp: String,
    #[schema(example = 55.5)]
    pub soc: f64,
    #[schema(example = 120.0)]
    pub load_kwh: f64,
    #[schema(example = 80.0)]
    pub net_load_kwh: f64,
    pub pv_notification: bool,
    pub bio_notification: bool,
    pub cro_notification: bool,
}

/// Site with its configurations and telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Willo Woods")]
    pub name: String,
    #[schema(example = "north")]
    pub location: String,
    pub configurations: Vec<ConfigurationResponse>,
    pub live_data: Vec<LiveDataResponse>,
}

/// Liveness / readiness payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

impl From<battery::Model> for BatteryResponse {
    fn from(model: battery::Model) -> Self {
        Self {
            id: model.id,
            vendor: model.vendor,
            capacity_kwh: model.capacity_kwh,
            max_power_kw: model.max_power_kw,
        }
    }
}

impl From<production_unit::Model> for ProductionUnitResponse {
    fn from(model: production_unit::Model) -> Self {
        Self {
            id: model.id,
            configuration_id: model.configuration_id,
            unit_type: model.unit_type,
            units: model.units,
            kwp: model.kwp,
        }
    }
}

impl From<ConfigurationWithEquipment> for ConfigurationResponse {
    fn from(record: ConfigurationWithEquipment) -> Self {
        Self {
            id: record.configuration.id,
            site_id: record.configuration.site_id,
            battery_id: record.configuration.battery_id,
            battery: record.battery.map(BatteryResponse::from),
            production_units: record
                .production_units
                .into_iter()
                .map(ProductionUnitResponse::from)
                .collect(),
        }
    }
}

impl From<live_data::Model> for LiveDataResponse {
    fn from(model: live_data::Model) -> Self {
        Self {
            id: model.id,
            site_id: model.site_id,
            dt_stamp: model.dt_stamp,
            soc: model.soc,
            load_kwh: model.load_kwh,
            net_load_kwh: model.net_load_kwh,
            pv_notification: model.pv_notification,
            bio_notification: model.bio_notification,
            cro_notification: model.cro_notification,
        }
    }
}

impl From<SiteWithChildren> for SiteResponse {
    fn from(record: SiteWithChildren) -> Self {
        Self {
            id: record.site.id,
            name: record.site.name,
            location: record.site.location,
            configurations: record
                .configurations
                .into_iter()
                .map(ConfigurationResponse::from)
                .collect(),
            live_data: record
                .live_data
                .into_iter()
                .map(LiveDataResponse::from)
                .collect(),
        }
    }
}
