//! API error taxonomy
//!
//! Validation failures carry field-level detail back to the caller. Store
//! and unexpected failures are logged server-side and answered with a
//! generic message so internals never reach the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed field validation
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The record store could not complete an operation
    #[error("store failure: {0}")]
    Store(anyhow::Error),

    /// Anything else that went wrong while handling the request
    #[error("unexpected failure: {0}")]
    Unexpected(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation_error",
                    "message": "request failed validation",
                    "details": details,
                }),
            ),
            ApiError::Store(err) => {
                error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "store_error",
                        "message": "Database operation failed",
                    }),
                )
            }
            ApiError::Unexpected(err) => {
                error!("Unexpected error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "Internal server error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::Validation(vec![]);
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_store_and_unexpected_map_to_500() {
        let store = ApiError::Store(anyhow::anyhow!("disk full"));
        assert_eq!(
            store.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let other = ApiError::Unexpected(anyhow::anyhow!("boom"));
        assert_eq!(
            other.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
