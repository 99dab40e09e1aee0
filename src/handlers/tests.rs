//! # Tests for Handlers
//!
//! Requests are driven through the full router against an in-memory SQLite
//! database, so validation, persistence and the error contract are exercised
//! together.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::db::memory_db;
use crate::models::{Battery, Configuration};
use crate::server::{AppState, create_app};
use crate::telemetry::TRACE_ID_HEADER;

async fn test_app() -> Router {
    test_app_with_db().await.0
}

async fn test_app_with_db() -> (Router, DatabaseConnection) {
    let db = memory_db().await;
    let app = create_app(AppState::new(AppConfig::default(), db.clone()));
    (app, db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_site(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/sites",
        Some(json!({"name": "Willo Woods", "location": "north"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn live_data(site_id: i64, soc: f64, load_kwh: f64) -> Value {
    json!({
        "site_id": site_id,
        "dt_stamp": "2026-10-19T12:00:00.000000",
        "soc": soc,
        "load_kwh": load_kwh,
        "net_load_kwh": 3.5,
        "pv_notification": true,
        "bio_notification": false,
        "cro_notification": false
    })
}

#[tokio::test]
async fn test_root_returns_service_info() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "sitedata");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_probes() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_site_returns_created_with_id() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/sites",
        Some(json!({"name": "Willo Woods", "location": "north"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Willo Woods");
    assert_eq!(body["location"], "north");
    assert_eq!(body["configurations"], json!([]));
    assert_eq!(body["live_data"], json!([]));

    let (status, sites) = send(&app, "GET", "/api/sites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sites.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_site_missing_name_is_rejected() {
    let app = test_app().await;
    let (status, body) = send(&app, "POST", "/api/sites", Some(json!({"location": "north"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(
        body["details"]["fields"]["name"][0],
        "Missing data for required field."
    );
}

#[tokio::test]
async fn test_mistyped_live_data_field_is_itemized() {
    let app = test_app().await;
    let site_id = create_site(&app).await;
    let mut payload = live_data(site_id, 50.0, 1.0);
    payload["soc"] = json!("x");

    let (status, body) = send(&app, "POST", "/api/live_data", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["fields"].get("soc").is_some());
}

#[tokio::test]
async fn test_create_site_stores_trimmed_values() {
    let app = test_app().await;
    let name = "n".repeat(100);
    let (status, body) = send(
        &app,
        "POST",
        "/api/sites",
        Some(json!({"name": format!("  {name}  "), "location": " north "})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], name);
    assert_eq!(body["location"], "north");
}

#[tokio::test]
async fn test_create_site_blank_fields_are_itemized() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/sites",
        Some(json!({"name": "  ", "location": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = &body["details"]["fields"];
    assert!(fields.get("name").is_some());
    assert!(fields.get("location").is_some());

    let (_, sites) = send(&app, "GET", "/api/sites", None).await;
    assert!(sites.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/live_data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"site_id\": 1,"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_live_data_soc_bounds() {
    let app = test_app().await;
    let site_id = create_site(&app).await;

    let (status, body) = send(&app, "POST", "/api/live_data", Some(live_data(site_id, 101.0, 1.0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["fields"].get("soc").is_some());

    let (status, _) = send(&app, "POST", "/api/live_data", Some(live_data(site_id, -1.0, 1.0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/api/live_data", Some(live_data(site_id, 100.0, 1.0))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["soc"], 100.0);
    assert_eq!(body["site_id"], site_id);

    let (_, samples) = send(&app, "GET", "/api/live_data", None).await;
    assert_eq!(samples.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_live_data_negative_load_is_rejected() {
    let app = test_app().await;
    let site_id = create_site(&app).await;

    let (status, body) = send(&app, "POST", "/api/live_data", Some(live_data(site_id, 50.0, -5.0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["fields"].get("load_kwh").is_some());

    let (status, _) = send(&app, "POST", "/api/live_data", Some(live_data(site_id, 50.0, 0.0))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_live_data_is_stored_twice() {
    let app = test_app().await;
    let site_id = create_site(&app).await;
    let payload = live_data(site_id, 42.0, 7.0);

    let (_, first) = send(&app, "POST", "/api/live_data", Some(payload.clone())).await;
    let (_, second) = send(&app, "POST", "/api/live_data", Some(payload)).await;
    assert_ne!(first["id"], second["id"]);

    let (_, sites) = send(&app, "GET", "/api/sites", None).await;
    assert_eq!(sites[0]["live_data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_live_data_for_unknown_site_is_rejected() {
    let app = test_app().await;
    let (status, body) = send(&app, "POST", "/api/live_data", Some(live_data(999, 50.0, 1.0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["fields"].get("site_id").is_some());
}

#[tokio::test]
async fn test_configuration_round_trip() {
    let app = test_app().await;
    let site_id = create_site(&app).await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/configurations",
        Some(json!({
            "site_id": site_id,
            "battery": {"vendor": "Tesla", "capacity_kwh": 100.0, "max_power_kw": 10.0},
            "production_units": [
                {"unit_type": "Solar", "units": 5, "kwp": 10.0},
                {"unit_type": "Wind", "units": 2}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["battery"]["vendor"], "Tesla");
    assert_eq!(created["battery_id"], created["battery"]["id"]);
    let units = created["production_units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["kwp"], 10.0);
    assert!(units[1]["kwp"].is_null());

    let (status, listed) = send(&app, "GET", "/api/configurations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    let (_, sites) = send(&app, "GET", "/api/sites", None).await;
    assert_eq!(sites[0]["configurations"][0]["id"], created["id"]);
}

#[tokio::test]
async fn test_configuration_with_unknown_vendor_is_rejected() {
    let app = test_app().await;
    let site_id = create_site(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/configurations",
        Some(json!({
            "site_id": site_id,
            "battery": {"vendor": "Acme", "capacity_kwh": 100.0, "max_power_kw": 10.0},
            "production_units": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["fields"]["battery.vendor"][0],
        "Vendor must be either \"Tesla\" or \"KATL\"."
    );

    let (_, listed) = send(&app, "GET", "/api/configurations", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_configuration_for_unknown_site_is_rejected() {
    let (app, db) = test_app_with_db().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/configurations",
        Some(json!({
            "site_id": 4242,
            "battery": {"vendor": "KATL", "capacity_kwh": 20.0, "max_power_kw": 2.0},
            "production_units": [{"unit_type": "Solar", "units": 1, "kwp": 2.0}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["fields"]["site_id"][0],
        "Site 4242 does not exist."
    );
    assert_eq!(Battery::find().count(&db).await.unwrap(), 0);
    assert_eq!(Configuration::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_configuration_negative_units_are_rejected() {
    let app = test_app().await;
    let site_id = create_site(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/configurations",
        Some(json!({
            "site_id": site_id,
            "production_units": [{"unit_type": "Solar", "units": -1, "kwp": 1.0}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["details"]["fields"]
            .get("production_units[0].units")
            .is_some()
    );
}

#[tokio::test]
async fn test_trace_id_is_echoed_on_success_and_error() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/healthz")
        .header(TRACE_ID_HEADER, "trace-abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[TRACE_ID_HEADER], "trace-abc");

    let request = Request::builder()
        .method("POST")
        .uri("/api/sites")
        .header(header::CONTENT_TYPE, "application/json")
        .header(TRACE_ID_HEADER, "trace-def")
        .body(Body::from(json!({"name": "", "location": "north"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[TRACE_ID_HEADER], "trace-def");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["trace_id"], "trace-def");
}

#[tokio::test]
async fn test_openapi_document_lists_api_paths() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    for path in ["/api/sites", "/api/configurations", "/api/live_data"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}
