//! Configuration entity model
//!
//! A configuration is a snapshot of the equipment installed at a site: an
//! optional battery plus any number of production units.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configurations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning site
    pub site_id: i32,

    /// Battery installed with this configuration, if any
    pub battery_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::battery::Entity",
        from = "Column::BatteryId",
        to = "super::battery::Column::Id"
    )]
    Battery,
    #[sea_orm(has_many = "super::production_unit::Entity")]
    ProductionUnits,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::battery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Battery.def()
    }
}

impl Related<super::production_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionUnits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
