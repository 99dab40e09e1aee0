//! Database migrations for the site telemetry service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_10_01_000001_create_sites;
mod m2026_10_01_000002_create_batteries;
mod m2026_10_01_000003_create_configurations;
mod m2026_10_01_000004_create_production_units;
mod m2026_10_01_000005_create_live_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_10_01_000001_create_sites::Migration),
            Box::new(m2026_10_01_000002_create_batteries::Migration),
            Box::new(m2026_10_01_000003_create_configurations::Migration),
            Box::new(m2026_10_01_000004_create_production_units::Migration),
            Box::new(m2026_10_01_000005_create_live_data::Migration),
        ]
    }
}
