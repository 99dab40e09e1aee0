//! # Site Repository
//!
//! This module contains the repository implementation for Site entities,
//! including the fully materialized site listing used by `GET /api/sites`.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use crate::error::RepositoryError;
use crate::models::{Configuration, LiveData, Site};
use crate::models::{configuration, live_data, site};
use crate::repositories::configuration::{ConfigurationWithEquipment, load_equipment};

/// Request data for creating a new site
#[derive(Debug, Clone)]
pub struct NewSite {
    pub name: String,
    pub location: String,
}

/// A site with every configuration and telemetry sample attached
#[derive(Debug, Clone, PartialEq)]
pub struct SiteWithChildren {
    pub site: site::Model,
    pub configurations: Vec<ConfigurationWithEquipment>,
    pub live_data: Vec<live_data::Model>,
}

/// Repository for Site database operations
pub struct SiteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SiteRepository<'a> {
    /// Create a new SiteRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a site and return it with its assigned id
    pub async fn create_site(&self, request: NewSite) -> Result<site::Model, RepositoryError> {
        let site = site::ActiveModel {
            name: Set(request.name),
            location: Set(request.location),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(site)
    }

    /// List all sites with nested configurations and live data, ordered by id.
    ///
    /// Children are fetched with one query per table and grouped in memory.
    pub async fn list_sites(&self) -> Result<Vec<SiteWithChildren>, RepositoryError> {
        let sites = Site::find().order_by_asc(site::Column::Id).all(self.db).await?;
        if sites.is_empty() {
            return Ok(Vec::new());
        }

        let site_ids: Vec<i32> = sites.iter().map(|s| s.id).collect();

        let configurations = Configuration::find()
            .filter(configuration::Column::SiteId.is_in(site_ids.clone()))
            .order_by_asc(configuration::Column::Id)
            .all(self.db)
            .await?;
        let mut configurations_by_site: HashMap<i32, Vec<ConfigurationWithEquipment>> =
            HashMap::new();
        for configuration in load_equipment(self.db, configurations).await? {
            configurations_by_site
                .entry(configuration.configuration.site_id)
                .or_default()
                .push(configuration);
        }

        let mut live_data_by_site: HashMap<i32, Vec<live_data::Model>> = HashMap::new();
        for sample in LiveData::find()
            .filter(live_data::Column::SiteId.is_in(site_ids))
            .order_by_asc(live_data::Column::Id)
            .all(self.db)
            .await?
        {
            live_data_by_site
                .entry(sample.site_id)
                .or_default()
                .push(sample);
        }

        Ok(sites
            .into_iter()
            .map(|site| SiteWithChildren {
                configurations: configurations_by_site.remove(&site.id).unwrap_or_default(),
                live_data: live_data_by_site.remove(&site.id).unwrap_or_default(),
                site,
            })
            .collect())
    }
}

/// Map a failed insert of a row referencing `site_id`.
///
/// The `site_id` foreign key is the existence check: a violation becomes
/// [`RepositoryError::UnknownSite`], anything else stays a database error.
pub(crate) fn site_reference_error(err: DbErr, site_id: i32) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepositoryError::UnknownSite { site_id },
        _ => RepositoryError::Database(err),
    }
}
