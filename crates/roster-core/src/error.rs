//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Roster.
///
/// Store and cache failures are kept apart so the service layer can decide
/// to degrade around a broken cache while still failing hard on a broken
/// store.
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// The record store could not be reached or rejected the query
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The cache server could not be reached or rejected the command
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RosterError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) | Self::Timeout(_) => 503,
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a store error.
    #[must_use]
    pub fn store<T: Into<String>>(message: T) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error came from the cache backend.
    #[must_use]
    pub const fn is_cache_failure(&self) -> bool {
        matches!(self, Self::CacheUnavailable(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL check constraint / data truncation
                if let Some(code) = db_err.code() {
                    if code == "3819" || code == "1264" || code == "1406" {
                        return Self::Validation(db_err.message().to_string());
                    }
                }
                Self::StoreUnavailable(err.to_string())
            }
            _ => Self::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `RosterError`.
    #[must_use]
    pub fn from_error(error: &RosterError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&RosterError> for ErrorResponse {
    fn from(error: &RosterError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(RosterError::not_found("User", 1).status_code(), 404);
        assert_eq!(RosterError::validation("invalid email").status_code(), 400);
        assert_eq!(RosterError::store("connection refused").status_code(), 503);
        assert_eq!(RosterError::cache("connection refused").status_code(), 503);
        assert_eq!(RosterError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(RosterError::internal("oops").status_code(), 500);
        assert_eq!(RosterError::Configuration("bad".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RosterError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(RosterError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(RosterError::store("down").error_code(), "STORE_UNAVAILABLE");
        assert_eq!(RosterError::cache("down").error_code(), "CACHE_UNAVAILABLE");
        assert_eq!(RosterError::Timeout("t".to_string()).error_code(), "TIMEOUT");
        assert_eq!(RosterError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            RosterError::Other(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_cache_failure_detection() {
        assert!(RosterError::cache("redis down").is_cache_failure());
        assert!(!RosterError::store("mysql down").is_cache_failure());
        assert!(!RosterError::internal("bad json").is_cache_failure());
    }

    #[test]
    fn test_error_constructors() {
        let not_found = RosterError::not_found("User", "123");
        assert!(not_found.to_string().contains("User"));
        assert!(not_found.to_string().contains("123"));

        let validation = RosterError::validation("invalid field");
        assert!(validation.to_string().contains("invalid field"));

        let store = RosterError::store("pool timed out");
        assert!(store.to_string().contains("pool timed out"));
    }

    #[test]
    fn test_json_error_is_internal() {
        let err: RosterError = serde_json::from_str::<Vec<u32>>("not json").unwrap_err().into();
        assert!(matches!(err, RosterError::Internal(_)));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_errors() {
        let not_found: RosterError = sqlx::Error::RowNotFound.into();
        assert_eq!(not_found.status_code(), 404);

        let timed_out: RosterError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(timed_out, RosterError::StoreUnavailable(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = RosterError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = RosterError::validation("bad input");
        let details = vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }];
        let response = ErrorResponse::from(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
