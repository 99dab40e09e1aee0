//! Production unit entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Generation asset (solar, wind, ...) belonging to one configuration
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "production_units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub configuration_id: i32,

    /// Free-text asset kind, e.g. "Solar"
    pub unit_type: String,

    /// Number of installed units
    pub units: i32,

    /// Rated peak capacity in kWp, when known
    pub kwp: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::configuration::Entity",
        from = "Column::ConfigurationId",
        to = "super::configuration::Column::Id"
    )]
    Configuration,
}

impl Related<super::configuration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Configuration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
