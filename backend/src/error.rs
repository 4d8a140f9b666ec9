//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal and analytics errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calorietracker_shared::AnalyticsError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A precondition for computing analytics is not met
    #[error("Unprocessable: {message}")]
    Unprocessable {
        code: &'static str,
        message: String,
        field: Option<String>,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn unprocessable(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Unprocessable {
            code,
            message: message.into(),
            field: None,
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        let code = match &err {
            AnalyticsError::NoLogs => "NO_LOGS",
            AnalyticsError::InvalidSettings(_) => "INVALID_SETTINGS",
            AnalyticsError::InvalidLogSeries(_) => "INVALID_LOG_SERIES",
            AnalyticsError::InsufficientData { .. } => "INSUFFICIENT_DATA",
        };
        let message = match err {
            // user-facing messages already carry their own wording
            AnalyticsError::InvalidSettings(message) | AnalyticsError::InvalidLogSeries(message) => message,
            other => other.to_string(),
        };
        ApiError::unprocessable(code, message)
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Unprocessable {
                code,
                message,
                field,
            } => {
                warn!(code, %message, "Analytics precondition failed");
                (StatusCode::UNPROCESSABLE_ENTITY, code, message, field)
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("User not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_no_logs_is_unprocessable() {
        let error: ApiError = AnalyticsError::NoLogs.into();
        match &error {
            ApiError::Unprocessable { code, message, .. } => {
                assert_eq!(*code, "NO_LOGS");
                assert_eq!(message, "You need to have made at least one log entry");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_invalid_settings_keeps_message() {
        let error: ApiError =
            AnalyticsError::InvalidSettings("Please fill out your settings. Missing: Age".to_string()).into();
        assert!(matches!(
            error,
            ApiError::Unprocessable { ref message, .. } if message == "Please fill out your settings. Missing: Age"
        ));
    }

    #[test]
    fn test_database_error_is_internal() {
        let error = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
