//! # Field Client Simulator
//!
//! Plays the part of an on-site gateway: registers one site and one
//! configuration, then posts a randomized telemetry sample on a fixed
//! interval. Failed posts are logged and the loop carries on; there are no
//! retries.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use rand::{Rng, SeedableRng, rngs::StdRng};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::time::MissedTickBehavior;

use crate::handlers::configurations::{
    BatteryInput, CreateConfigurationRequest, ProductionUnitInput,
};
use crate::handlers::live_data::CreateLiveDataRequest;
use crate::handlers::sites::CreateSiteRequest;
use crate::handlers::types::{ConfigurationResponse, LiveDataResponse, SiteResponse};

/// Settings for one simulator run
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub base_url: String,
    pub interval: Duration,
    pub site_name: String,
    pub site_location: String,
    pub battery_vendor: String,
    /// Stop after this many samples; `None` runs until shutdown.
    pub max_samples: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            interval: Duration::from_secs(10),
            site_name: "Willo Woods".to_string(),
            site_location: "north".to_string(),
            battery_vendor: "Tesla".to_string(),
            max_samples: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{operation} returned {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// Thin typed client over the service's JSON API
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelemetryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register a site; the service answers 201.
    pub async fn create_site(
        &self,
        request: &CreateSiteRequest,
    ) -> Result<SiteResponse, SimulatorError> {
        self.post("create site", "/api/sites", request, StatusCode::CREATED)
            .await
    }

    pub async fn create_configuration(
        &self,
        request: &CreateConfigurationRequest,
    ) -> Result<ConfigurationResponse, SimulatorError> {
        self.post(
            "create configuration",
            "/api/configurations",
            request,
            StatusCode::OK,
        )
        .await
    }

    pub async fn post_live_data(
        &self,
        request: &CreateLiveDataRequest,
    ) -> Result<LiveDataResponse, SimulatorError> {
        self.post("post live data", "/api/live_data", request, StatusCode::OK)
            .await
    }

    async fn post<B, T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> Result<T, SimulatorError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            return Err(SimulatorError::UnexpectedStatus {
                operation,
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// The equipment the simulated site reports: one battery, a solar array and
/// a couple of wind turbines without a rated capacity.
pub fn demo_configuration(site_id: i32, vendor: &str) -> CreateConfigurationRequest {
    CreateConfigurationRequest {
        site_id,
        battery: Some(BatteryInput {
            vendor: vendor.to_string(),
            capacity_kwh: 100.0,
            max_power_kw: 10.0,
        }),
        production_units: vec![
            ProductionUnitInput {
                unit_type: "Solar".to_string(),
                units: 5,
                kwp: Some(10.0),
            },
            ProductionUnitInput {
                unit_type: "Wind".to_string(),
                units: 2,
                kwp: None,
            },
        ],
    }
}

/// A random but valid sample stamped with the local time.
pub fn random_live_data<R: Rng + ?Sized>(rng: &mut R, site_id: i32) -> CreateLiveDataRequest {
    CreateLiveDataRequest {
        site_id,
        dt_stamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        soc: rng.gen_range(0.0..=100.0),
        load_kwh: rng.gen_range(0.0..=500.0),
        net_load_kwh: rng.gen_range(0.0..=500.0),
        pv_notification: rng.gen_bool(0.5),
        bio_notification: rng.gen_bool(0.5),
        cro_notification: rng.gen_bool(0.5),
    }
}

/// Register the site and configuration, then stream samples until
/// `shutdown` resolves or `max_samples` have been attempted.
///
/// Setup failures end the run; sample failures are only logged.
pub async fn run<F>(config: SimulatorConfig, shutdown: F) -> Result<u64, SimulatorError>
where
    F: Future<Output = ()>,
{
    let client = TelemetryClient::new(&config.base_url);

    let site = client
        .create_site(&CreateSiteRequest {
            name: config.site_name.clone(),
            location: config.site_location.clone(),
        })
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Error creating site"))?;
    tracing::info!(site_id = site.id, "New site created");

    let configuration = client
        .create_configuration(&demo_configuration(site.id, &config.battery_vendor))
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Error creating configuration"))?;
    tracing::info!(configuration_id = configuration.id, "New configuration created");

    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut attempted = 0u64;
    while config.max_samples.is_none_or(|max| attempted < max) {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(attempted, "Simulator stopping");
                break;
            }
            _ = ticker.tick() => {}
        }

        let sample = random_live_data(&mut rng, site.id);
        attempted += 1;
        match client.post_live_data(&sample).await {
            Ok(stored) => tracing::info!(live_data_id = stored.id, "LiveData sent successfully"),
            Err(err) => tracing::warn!(error = %err, "Error sending LiveData"),
        }
    }

    Ok(attempted)
}
