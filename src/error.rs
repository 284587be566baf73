//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Unified error type for the catalog server.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// CMS or gold price API failed (transport, status or payload)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Upstream(format!("request timed out: {}", err))
        } else {
            CatalogError::Upstream(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CatalogError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CatalogError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CatalogError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CatalogError::Internal(msg) => {
                // Details stay in the logs
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong!".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog server.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = CatalogError::NotFound("Product not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_status() {
        let response = CatalogError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_status() {
        let response = CatalogError::Upstream("cms down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_display_is_bare_message() {
        let err = CatalogError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Product not found");
    }
}
