//! Validation utilities.

use crate::{FieldError, StockroomError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `StockroomError` on failure.
    fn validate_request(&self) -> Result<(), StockroomError> {
        self.validate()
            .map_err(|e| StockroomError::Validation(validation_errors_to_field_errors(&e)))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to field-level errors.
#[must_use]
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestRequest {
        #[validate(length(min = 1, message = "This field may not be blank."))]
        name: String,
    }

    #[test]
    fn test_validate_request_ok() {
        let request = TestRequest {
            name: "Widget".to_string(),
        };
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_validate_request_collects_field_errors() {
        let request = TestRequest {
            name: String::new(),
        };
        let err = request.validate_request().unwrap_err();
        match err {
            StockroomError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "name");
                assert_eq!(fields[0].message, "This field may not be blank.");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
