//! # Configuration Repository
//!
//! Creates configurations together with their battery and production units
//! in one transaction, and loads them back fully materialized.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::{battery, configuration, production_unit};
use crate::models::{Battery, Configuration, ProductionUnit};
use crate::repositories::site::site_reference_error;

/// Battery fields for a new configuration
#[derive(Debug, Clone)]
pub struct NewBattery {
    pub vendor: String,
    pub capacity_kwh: f64,
    pub max_power_kw: f64,
}

/// Production unit fields for a new configuration
#[derive(Debug, Clone)]
pub struct NewProductionUnit {
    pub unit_type: String,
    pub units: i32,
    pub kwp: Option<f64>,
}

/// Request data for creating a configuration
#[derive(Debug, Clone)]
pub struct NewConfiguration {
    pub site_id: i32,
    pub battery: Option<NewBattery>,
    pub production_units: Vec<NewProductionUnit>,
}

/// A configuration with its battery and production units loaded
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationWithEquipment {
    pub configuration: configuration::Model,
    pub battery: Option<battery::Model>,
    pub production_units: Vec<production_unit::Model>,
}

/// Repository for Configuration database operations
pub struct ConfigurationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConfigurationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a configuration, always inserting a fresh battery row when one
    /// is supplied. Everything is rolled back if any insert fails, including
    /// when the `site_id` foreign key rejects an unknown site.
    pub async fn create_configuration(
        &self,
        request: NewConfiguration,
    ) -> Result<ConfigurationWithEquipment, RepositoryError> {
        let txn = self.db.begin().await?;

        match insert_configuration(&txn, request).await {
            Ok(created) => {
                txn.commit().await?;
                Ok(created)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Configuration rollback failed");
                }
                Err(err)
            }
        }
    }

    /// List every configuration ordered by id
    pub async fn list_configurations(
        &self,
    ) -> Result<Vec<ConfigurationWithEquipment>, RepositoryError> {
        let configurations = Configuration::find()
            .order_by_asc(configuration::Column::Id)
            .all(self.db)
            .await?;

        load_equipment(self.db, configurations).await
    }
}

async fn insert_configuration<C: ConnectionTrait>(
    conn: &C,
    request: NewConfiguration,
) -> Result<ConfigurationWithEquipment, RepositoryError> {
    let battery = match request.battery {
        Some(new_battery) => Some(
            battery::ActiveModel {
                vendor: Set(new_battery.vendor),
                capacity_kwh: Set(new_battery.capacity_kwh),
                max_power_kw: Set(new_battery.max_power_kw),
                ..Default::default()
            }
            .insert(conn)
            .await?,
        ),
        None => None,
    };

    let configuration = configuration::ActiveModel {
        site_id: Set(request.site_id),
        battery_id: Set(battery.as_ref().map(|b| b.id)),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|err| site_reference_error(err, request.site_id))?;

    let mut production_units = Vec::with_capacity(request.production_units.len());
    for unit in request.production_units {
        let created = production_unit::ActiveModel {
            configuration_id: Set(configuration.id),
            unit_type: Set(unit.unit_type),
            units: Set(unit.units),
            kwp: Set(unit.kwp),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        production_units.push(created);
    }

    Ok(ConfigurationWithEquipment {
        configuration,
        battery,
        production_units,
    })
}

/// Attach batteries and production units to `configurations` with one query
/// per child table, preserving the input order.
pub(crate) async fn load_equipment<C: ConnectionTrait>(
    conn: &C,
    configurations: Vec<configuration::Model>,
) -> Result<Vec<ConfigurationWithEquipment>, RepositoryError> {
    if configurations.is_empty() {
        return Ok(Vec::new());
    }

    let configuration_ids: Vec<i32> = configurations.iter().map(|c| c.id).collect();
    let battery_ids: Vec<i32> = configurations.iter().filter_map(|c| c.battery_id).collect();

    let batteries: HashMap<i32, battery::Model> = if battery_ids.is_empty() {
        HashMap::new()
    } else {
        Battery::find()
            .filter(battery::Column::Id.is_in(battery_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect()
    };

    let mut units_by_configuration: HashMap<i32, Vec<production_unit::Model>> = HashMap::new();
    for unit in ProductionUnit::find()
        .filter(production_unit::Column::ConfigurationId.is_in(configuration_ids))
        .order_by_asc(production_unit::Column::Id)
        .all(conn)
        .await?
    {
        units_by_configuration
            .entry(unit.configuration_id)
            .or_default()
            .push(unit);
    }

    Ok(configurations
        .into_iter()
        .map(|configuration| {
            // Batteries may be shared between configurations.
            let battery = configuration
                .battery_id
                .and_then(|id| batteries.get(&id).cloned());
            let production_units = units_by_configuration
                .remove(&configuration.id)
                .unwrap_or_default();
            ConfigurationWithEquipment {
                configuration,
                battery,
                production_units,
            }
        })
        .collect())
}
