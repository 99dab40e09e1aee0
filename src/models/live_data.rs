//! Live data entity model
//!
//! This module contains the SeaORM entity model for the live_data table,
//! which stores the telemetry samples posted by field clients.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// One timestamped telemetry sample for a site
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "live_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub site_id: i32,

    /// Client-supplied timestamp, stored verbatim
    pub dt_stamp: String,

    /// Battery state of charge in percent (0-100)
    pub soc: f64,

    pub load_kwh: f64,

    pub net_load_kwh: f64,

    pub pv_notification: bool,

    pub bio_notification: bool,

    pub cro_notification: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id"
    )]
    Site,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
