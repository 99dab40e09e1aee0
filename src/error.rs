//! # Error Handling
//!
//! This module provides unified error handling for the site telemetry API.
//! Every failure leaves the service as a JSON body of the form
//! `{"error": message, "code": CODE, ...}` with a trace ID for correlation.
//! Internal causes are logged here and never echoed to the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::telemetry;
use crate::validation::ValidationErrors;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip)]
    pub status: StatusCode,
    /// Human-readable error message
    #[serde(rename = "error")]
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Error code for programmatic handling
    #[schema(example = "VALIDATION_FAILED")]
    pub code: String,
    /// Additional error details, e.g. per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Correlation trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            code: code.to_string(),
            details: None,
            trace_id: telemetry::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(details.into());
        self
    }

    /// 500 with a generic message; the cause stays in the server log.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::InternalServerError.error_code(),
            "An internal error occurred",
        )
    }
}

/// Standard error types with predefined status codes
#[derive(Debug, Error)]
pub enum ErrorType {
    #[error("Bad Request")]
    BadRequest,
    #[error("Not Found")]
    NotFound,
    #[error("Internal Server Error")]
    InternalServerError,
    #[error("Service Unavailable")]
    ServiceUnavailable,
}

impl ErrorType {
    /// Get the appropriate HTTP status code for this error type
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorType::BadRequest => StatusCode::BAD_REQUEST,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code string for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorType::BadRequest => "VALIDATION_FAILED",
            ErrorType::NotFound => "NOT_FOUND",
            ErrorType::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorType::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), code = %self.code, message = %self.message, "Request failed");
        } else {
            tracing::warn!(status = self.status.as_u16(), code = %self.code, message = %self.message, "Request rejected");
        }

        (self.status, axum::Json(self)).into_response()
    }
}

/// Errors raised by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A referenced site does not exist.
    #[error("site {site_id} does not exist")]
    UnknownSite { site_id: i32 },
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Error mappers for common sources

impl From<ErrorType> for ApiError {
    fn from(error_type: ErrorType) -> Self {
        Self::new(
            error_type.status_code(),
            error_type.error_code(),
            &error_type.to_string(),
        )
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        validation_error(&errors.summary(), json!({ "fields": errors.fields() }))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UnknownSite { site_id } => {
                let mut errors = ValidationErrors::new();
                errors.add("site_id", format!("Site {site_id} does not exist."));
                errors.into()
            }
            RepositoryError::Database(err) => err.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", error);
        Self::internal()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        match error {
            sea_orm::DbErr::RecordNotFound(record) => {
                tracing::debug!(%record, "Record not found");
                ErrorType::NotFound.into()
            }
            sea_orm::DbErr::Conn(connection_err) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Database service unavailable",
                )
            }
            _ => {
                tracing::error!("Database error: {:?}", error);
                Self::internal()
            }
        }
    }
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_basic() {
        let error = ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Test error message",
        );

        assert_eq!(error.code, "VALIDATION_FAILED");
        assert_eq!(error.message, "Test error message");
        assert_eq!(error.details, None);
    }

    #[test]
    fn serializes_message_under_error_key() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "bad soc");
        let value = serde_json::to_value(&error).unwrap();

        assert_eq!(value["error"], "bad soc");
        assert_eq!(value["code"], "VALIDATION_FAILED");
        assert!(value.get("status").is_none());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_error_type_mapping() {
        let not_found_error: ApiError = ErrorType::NotFound.into();
        assert_eq!(not_found_error.code, "NOT_FOUND");
        assert_eq!(not_found_error.message, "Not Found");
        assert_eq!(not_found_error.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_anyhow_hides_cause() {
        let anyhow_error = anyhow::anyhow!("disk I/O error at /var/lib/data.db");
        let api_error: ApiError = anyhow_error.into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(api_error.message, "An internal error occurred");
    }

    #[test]
    fn validation_errors_become_itemized_bad_request() {
        let mut errors = ValidationErrors::new();
        errors.add("soc", "Must be greater than or equal to 0 and less than or equal to 100.");
        errors.add("load_kwh", "Must be greater than or equal to 0.");

        let api_error: ApiError = errors.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.code, "VALIDATION_FAILED");

        let details = api_error.details.expect("field details");
        assert_eq!(
            details["fields"]["load_kwh"][0],
            "Must be greater than or equal to 0."
        );
        assert!(details["fields"]["soc"].is_array());
    }

    #[test]
    fn unknown_site_maps_to_site_id_field_error() {
        let api_error: ApiError = RepositoryError::UnknownSite { site_id: 42 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api_error.details.unwrap()["fields"]["site_id"][0],
            "Site 42 does not exist."
        );
    }

    #[test]
    fn database_errors_are_sanitized() {
        let api_error: ApiError =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: sites.id".to_string()).into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_error.message.contains("sites.id"));
    }

    #[test]
    fn connection_errors_map_to_service_unavailable() {
        let api_error: ApiError =
            sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal("pool timed out".to_string()))
                .into();
        assert_eq!(api_error.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
