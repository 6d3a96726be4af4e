//! API response types.
//!
//! Error bodies follow a small fixed shape: `{"error": "..."}` for single
//! failures, a per-field message map for validation failures, and
//! `{"success": "..."}` for bare confirmations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use stockroom_core::{FieldError, StockroomError};

/// Body for bare confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: String,
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub StockroomError);

impl From<StockroomError> for AppError {
    fn from(err: StockroomError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            StockroomError::NotFound { resource_type, .. } => {
                json!({ "error": format!("{} not found.", resource_type) })
            }
            StockroomError::Conflict(message) => json!({ "error": message }),
            StockroomError::Validation(field_errors) => field_error_map(field_errors),
            StockroomError::Unauthorized(_)
            | StockroomError::InvalidToken(_)
            | StockroomError::TokenExpired
            | StockroomError::InvalidCredentials => {
                json!({ "error": self.0.to_string() })
            }
            _ => json!({ "error": "Internal server error." }),
        };

        (status, Json(body)).into_response()
    }
}

/// Groups field errors into a `{field: [messages]}` map.
fn field_error_map(field_errors: &[FieldError]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for err in field_errors {
        if let Some(messages) = map
            .entry(err.field.clone())
            .or_insert_with(|| serde_json::Value::Array(Vec::new()))
            .as_array_mut()
        {
            messages.push(json!(err.message));
        }
    }
    serde_json::Value::Object(map)
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a 200 response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a 201 response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body() {
        let response = AppError(StockroomError::not_found("Item", 7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_body() {
        let response =
            AppError(StockroomError::Conflict("Item already exists.".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_field_error_map_groups_by_field() {
        let errors = vec![
            FieldError {
                field: "name".to_string(),
                message: "too long".to_string(),
                code: "length".to_string(),
            },
            FieldError {
                field: "name".to_string(),
                message: "bad chars".to_string(),
                code: "pattern".to_string(),
            },
        ];
        let map = field_error_map(&errors);
        assert_eq!(map["name"].as_array().unwrap().len(), 2);
    }
}
