//! Site entity model
//!
//! This module contains the SeaORM entity model for the sites table,
//! the root of every configuration and telemetry sample.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Physical installation owning equipment configurations and telemetry
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sites")]
pub struct Model {
    /// Auto-incremented identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name of the site
    pub name: String,

    /// Free-form location description
    pub location: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::configuration::Entity")]
    Configurations,
    #[sea_orm(has_many = "super::live_data::Entity")]
    LiveData,
}

impl Related<super::configuration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Configurations.def()
    }
}

impl Related<super::live_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
