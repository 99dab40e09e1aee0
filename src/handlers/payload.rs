//! JSON body extraction with per-field error reporting.
//!
//! Bodies are parsed as JSON first and then deserialized into the request
//! type while tracking the path, so missing and mistyped fields come back in
//! the same `details.fields` shape as every other validation failure.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::ValidationErrors;

/// Key used for errors that belong to the body as a whole.
const SCHEMA_FIELD: &str = "_schema";

/// JSON request body deserialized into `T`
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        serde_path_to_error::deserialize(value)
            .map(JsonPayload)
            .map_err(|err| field_errors(&err).into())
    }
}

fn field_errors(err: &serde_path_to_error::Error<serde_json::Error>) -> ValidationErrors {
    let path = err.path().to_string();
    let message = err.inner().to_string();
    let mut errors = ValidationErrors::new();

    // A missing field is reported against its parent, so append the name.
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field);

    match missing {
        Some(field) if path == "." => errors.add(field, "Missing data for required field."),
        Some(field) => errors.add(format!("{path}.{field}"), "Missing data for required field."),
        None if path == "." => errors.add(SCHEMA_FIELD, message),
        None => errors.add(path, message),
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::configurations::CreateConfigurationRequest;
    use crate::handlers::live_data::CreateLiveDataRequest;
    use crate::handlers::sites::CreateSiteRequest;
    use serde_json::json;

    fn errors_for<T: DeserializeOwned + std::fmt::Debug>(value: Value) -> ValidationErrors {
        let err = serde_path_to_error::deserialize::<_, T>(value).unwrap_err();
        field_errors(&err)
    }

    #[test]
    fn missing_top_level_field_is_named() {
        let errors = errors_for::<CreateSiteRequest>(json!({"location": "north"}));
        assert_eq!(
            errors.fields()["name"],
            vec!["Missing data for required field.".to_string()]
        );
    }

    #[test]
    fn mistyped_field_is_reported_at_its_path() {
        let errors = errors_for::<CreateLiveDataRequest>(json!({
            "site_id": 1, "dt_stamp": "t", "soc": "x", "load_kwh": 1.0,
            "net_load_kwh": 1.0, "pv_notification": true,
            "bio_notification": false, "cro_notification": false
        }));
        assert!(errors.has_field("soc"));
        assert_eq!(errors.fields().len(), 1);
    }

    #[test]
    fn nested_paths_match_validation_naming() {
        let errors = errors_for::<CreateConfigurationRequest>(json!({
            "site_id": 1,
            "battery": {"capacity_kwh": 1.0, "max_power_kw": 1.0},
        }));
        assert!(errors.has_field("battery.vendor"));

        let errors = errors_for::<CreateConfigurationRequest>(json!({
            "site_id": 1,
            "production_units": [{"unit_type": "Solar", "units": 1}, {"unit_type": "Wind", "units": "two"}],
        }));
        assert!(errors.has_field("production_units[1].units"));
    }

    #[test]
    fn non_object_body_is_a_schema_error() {
        let errors = errors_for::<CreateSiteRequest>(json!([1, 2]));
        assert!(errors.has_field(SCHEMA_FIELD));
    }
}
