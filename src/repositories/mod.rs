//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations and hand back fully materialized records to the handlers.

pub mod configuration;
pub mod live_data;
pub mod site;

pub use configuration::{
    ConfigurationRepository, ConfigurationWithEquipment, NewBattery, NewConfiguration,
    NewProductionUnit,
};
pub use live_data::{LiveDataRepository, NewLiveData};
pub use site::{NewSite, SiteRepository, SiteWithChildren};
