//! # Data Models
//!
//! SeaORM entity models for the site telemetry schema, plus the service
//! info payload returned from the root endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod battery;
pub mod configuration;
pub mod live_data;
pub mod production_unit;
pub mod site;

pub use battery::Entity as Battery;
pub use configuration::Entity as Configuration;
pub use live_data::Entity as LiveData;
pub use production_unit::Entity as ProductionUnit;
pub use site::Entity as Site;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "sitedata".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
