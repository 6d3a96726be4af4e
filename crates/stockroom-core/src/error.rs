//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Stockroom.
///
/// Covers domain, application, infrastructure, and presentation layer
/// failures with a direct mapping to HTTP status codes.
#[derive(Error, Debug)]
pub enum StockroomError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error with field-level messages
    #[error("Validation error: {}", fmt_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Conflict error (e.g., duplicate name)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

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

fn fmt_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl StockroomError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::Conflict(_) => 400,
            Self::Unauthorized(_)
            | Self::InvalidToken(_)
            | Self::TokenExpired
            | Self::InvalidCredentials => 401,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
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

    /// Creates a validation error for a single field.
    #[must_use]
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        let message = message.into();
        Self::Validation(vec![FieldError {
            field: field.into(),
            message: message.clone(),
            code: "invalid".to_string(),
        }])
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StockroomError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // Unique constraint violation (MySQL 1062, PostgreSQL 23505)
                if let Some(code) = db_err.code() {
                    if code == "1062" || code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StockroomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(StockroomError::not_found("Item", 1).status_code(), 404);
        assert_eq!(
            StockroomError::validation("quantity", "must be numeric").status_code(),
            400
        );
        assert_eq!(
            StockroomError::conflict("Item already exists.").status_code(),
            400
        );
        assert_eq!(
            StockroomError::unauthorized("missing token").status_code(),
            401
        );
        assert_eq!(StockroomError::TokenExpired.status_code(), 401);
        assert_eq!(StockroomError::InvalidCredentials.status_code(), 401);
        assert_eq!(
            StockroomError::Database("db error".to_string()).status_code(),
            500
        );
        assert_eq!(
            StockroomError::Cache("down".to_string()).status_code(),
            500
        );
        assert_eq!(StockroomError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(StockroomError::not_found("Item", 1).error_code(), "NOT_FOUND");
        assert_eq!(
            StockroomError::validation("name", "required").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            StockroomError::conflict("duplicate").error_code(),
            "CONFLICT"
        );
        assert_eq!(StockroomError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            StockroomError::InvalidCredentials.error_code(),
            "INVALID_CREDENTIALS"
        );
        assert_eq!(StockroomError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_display() {
        let err = StockroomError::not_found("Item", 42);
        assert_eq!(err.to_string(), "Item not found: 42");
    }

    #[test]
    fn test_validation_display_joins_fields() {
        let err = StockroomError::Validation(vec![
            FieldError {
                field: "name".to_string(),
                message: "This field is required.".to_string(),
                code: "required".to_string(),
            },
            FieldError {
                field: "quantity".to_string(),
                message: "A valid number is required.".to_string(),
                code: "invalid".to_string(),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("name: This field is required."));
        assert!(msg.contains("quantity: A valid number is required."));
    }

    #[test]
    fn test_conflict_display() {
        let err = StockroomError::conflict("Item already exists.");
        assert!(err.to_string().contains("Item already exists."));
    }
}
