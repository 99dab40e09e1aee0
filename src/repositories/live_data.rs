//! # Live Data Repository
//!
//! Append-only storage of telemetry samples.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::LiveData;
use crate::models::live_data;
use crate::repositories::site::site_reference_error;

/// Request data for a new telemetry sample
#[derive(Debug, Clone)]
pub struct NewLiveData {
    pub site_id: i32,
    pub dt_stamp: String,
    pub soc: f64,
    pub load_kwh: f64,
    pub net_load_kwh: f64,
    pub pv_notification: bool,
    pub bio_notification: bool,
    pub cro_notification: bool,
}

/// Repository for LiveData database operations
pub struct LiveDataRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LiveDataRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a sample for an existing site. Every call creates a new row.
    ///
    /// The insert must stay the first statement of the transaction: after a
    /// read, SQLite fails a contended write lock with `SQLITE_BUSY` instead of
    /// waiting out the busy timeout.
    pub async fn create_live_data(
        &self,
        request: NewLiveData,
    ) -> Result<live_data::Model, RepositoryError> {
        let site_id = request.site_id;
        let txn = self.db.begin().await?;

        let sample = live_data::ActiveModel {
            site_id: Set(request.site_id),
            dt_stamp: Set(request.dt_stamp),
            soc: Set(request.soc),
            load_kwh: Set(request.load_kwh),
            net_load_kwh: Set(request.net_load_kwh),
            pv_notification: Set(request.pv_notification),
            bio_notification: Set(request.bio_notification),
            cro_notification: Set(request.cro_notification),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| site_reference_error(err, site_id))?;

        txn.commit().await?;
        Ok(sample)
    }

    /// List every sample ordered by id
    pub async fn list_live_data(&self) -> Result<Vec<live_data::Model>, RepositoryError> {
        let samples = LiveData::find()
            .order_by_asc(live_data::Column::Id)
            .all(self.db)
            .await?;
        Ok(samples)
    }
}
