//! Battery entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Storage battery; may be referenced by several configurations
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "batteries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Vendor name, restricted to the accepted vendor set at the API boundary
    pub vendor: String,

    pub capacity_kwh: f64,

    pub max_power_kw: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::configuration::Entity")]
    Configurations,
}

impl Related<super::configuration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Configurations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
