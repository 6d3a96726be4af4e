//! Item-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stockroom_core::{FieldError, Item, ItemId, StockroomError};
use validator::Validate;

/// Lenient wire payload for item create/update bodies.
///
/// Deserializes from any JSON object so that missing or mistyped fields
/// surface as per-field validation errors rather than a bare
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl ItemPayload {
    fn into_fields(self) -> Result<(String, String, f64), StockroomError> {
        let mut errors = Vec::new();

        let name = take_string("name", self.name, &mut errors);
        let description = take_string("description", self.description, &mut errors);
        let quantity = take_number("quantity", self.quantity, &mut errors);

        match (name, description, quantity) {
            (Some(name), Some(description), Some(quantity)) => Ok((name, description, quantity)),
            _ => Err(StockroomError::Validation(errors)),
        }
    }
}

fn field_error(field: &str, message: &str, code: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
        code: code.to_string(),
    }
}

fn take_string(field: &str, value: Option<Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => {
            errors.push(field_error(field, "This field is required.", "required"));
            None
        }
        Some(_) => {
            errors.push(field_error(field, "Not a valid string.", "invalid"));
            None
        }
    }
}

fn take_number(field: &str, value: Option<Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    let parsed = match &value {
        Some(Value::Number(n)) => n.as_f64(),
        // Numeric strings are accepted, matching common form encodings.
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|q| q.is_finite()),
        _ => None,
    };

    match (value, parsed) {
        (_, Some(quantity)) => Some(quantity),
        (Some(Value::Null) | None, _) => {
            errors.push(field_error(field, "This field is required.", "required"));
            None
        }
        (Some(_), None) => {
            errors.push(field_error(field, "A valid number is required.", "invalid"));
            None
        }
    }
}

impl TryFrom<ItemPayload> for CreateItemRequest {
    type Error = StockroomError;

    fn try_from(payload: ItemPayload) -> Result<Self, Self::Error> {
        let (name, description, quantity) = payload.into_fields()?;
        Ok(Self {
            name,
            description,
            quantity,
        })
    }
}

impl TryFrom<ItemPayload> for UpdateItemRequest {
    type Error = StockroomError;

    fn try_from(payload: ItemPayload) -> Result<Self, Self::Error> {
        let (name, description, quantity) = payload.into_fields()?;
        Ok(Self {
            name,
            description,
            quantity,
        })
    }
}

/// Request to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters."))]
    pub name: String,

    pub description: String,

    pub quantity: f64,
}

/// Request to replace an item's fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters."))]
    pub name: String,

    pub description: String,

    pub quantity: f64,
}

/// Item representation returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    fn payload(body: Value) -> ItemPayload {
        serde_json::from_value(body).unwrap()
    }

    fn validation_fields(err: StockroomError) -> Vec<FieldError> {
        match err {
            StockroomError::Validation(fields) => fields,
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_with_all_fields_converts() {
        let request = CreateItemRequest::try_from(payload(json!({
            "name": "Widget",
            "description": "A widget",
            "quantity": 10.5,
        })))
        .unwrap();

        assert_eq!(request.name, "Widget");
        assert_eq!(request.quantity, 10.5);
    }

    #[test]
    fn test_payload_missing_field_is_required_error() {
        let err = CreateItemRequest::try_from(payload(json!({
            "name": "Widget",
            "description": "A widget",
        })))
        .unwrap_err();

        let fields = validation_fields(err);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "quantity");
        assert_eq!(fields[0].message, "This field is required.");
    }

    #[test]
    fn test_payload_non_numeric_quantity_is_field_error() {
        let err = UpdateItemRequest::try_from(payload(json!({
            "name": "Widget",
            "description": "A widget",
            "quantity": "lots",
        })))
        .unwrap_err();

        let fields = validation_fields(err);
        assert_eq!(fields[0].field, "quantity");
        assert_eq!(fields[0].message, "A valid number is required.");
    }

    #[test]
    fn test_payload_numeric_string_quantity_is_accepted() {
        let request = CreateItemRequest::try_from(payload(json!({
            "name": "Widget",
            "description": "A widget",
            "quantity": "20.5",
        })))
        .unwrap();

        assert_eq!(request.quantity, 20.5);
    }

    #[test]
    fn test_payload_mistyped_name_is_field_error() {
        let err = CreateItemRequest::try_from(payload(json!({
            "name": 7,
            "description": "A widget",
            "quantity": 1.0,
        })))
        .unwrap_err();

        let fields = validation_fields(err);
        assert_eq!(fields[0].field, "name");
        assert_eq!(fields[0].message, "Not a valid string.");
    }

    #[test]
    fn test_payload_collects_every_bad_field() {
        let err = CreateItemRequest::try_from(payload(json!({}))).unwrap_err();

        let fields = validation_fields(err);
        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["name", "description", "quantity"]);
    }

    #[test]
    fn test_create_request_rejects_blank_name() {
        let request = CreateItemRequest {
            name: String::new(),
            description: "desc".to_string(),
            quantity: 1.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_overlong_name() {
        let request = CreateItemRequest {
            name: "x".repeat(256),
            description: "desc".to_string(),
            quantity: 1.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_valid_input() {
        let request = CreateItemRequest {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            quantity: 10.5,
        };
        assert!(request.validate().is_ok());
    }
}
