//! Error types for the cache manager
//!
//! Cache operations themselves never fail; errors only arise from
//! configuration and from the admin HTTP glue.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Config Error ==
/// Invalid configuration detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

// == API Error ==
/// Failure of an admin request, rendered as a JSON error body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A cache operation panicked while serving the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for admin handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidValue {
            name: "QUERY_TTL",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for QUERY_TTL: must be greater than zero"
        );
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let err = tokio::spawn(async {
            if true {
                panic!("cleanup exploded");
            }
        })
        .await
        .unwrap_err();

        let api_err = ApiError::from(err);
        assert!(matches!(api_err, ApiError::Internal(_)));
    }
}
