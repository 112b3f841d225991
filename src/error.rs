//! Error taxonomy shared by the registry, index, sync and search layers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: empty names, negative prices, out-of-range pagination.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    /// A change event that cannot be applied as delivered (e.g. missing payload).
    #[error("malformed event for product '{product_id}': {reason}")]
    MalformedEvent { product_id: String, reason: String },

    /// The backing store is unavailable. Transient; safe to retry.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn malformed(product_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            product_id: product_id.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Only storage failures are worth redelivering; everything else fails the same way twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MalformedEvent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StorageFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Body returned by every HTTP handler that fails.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_storage_failures_are_retryable() {
        assert!(Error::storage("disk gone").is_retryable());
        assert!(!Error::invalid("page must be >= 1").is_retryable());
        assert!(!Error::not_found("service", "cart").is_retryable());
        assert!(!Error::malformed("p-1", "missing payload").is_retryable());
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(Error::invalid("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::not_found("service", "cart").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::malformed("p-1", "x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::storage("x").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::not_found("service", "checkout");
        assert_eq!(err.to_string(), "not found: service 'checkout'");
    }
}
