//! Error response DTOs.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ValidationFieldError;

/// Standard error response format.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new("NOT_FOUND", &format!("{} not found", entity))
            .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn duplicate_error(entity: &str, field: &str, value: &str) -> Self {
        Self::new(
            "DUPLICATE",
            &format!("{} with this {} already exists", entity, field),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value }))
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new("VALIDATION_ERROR", reason).with_details(json!({ "field": field }))
    }

    pub fn validation_errors(errors: &[ValidationFieldError]) -> Self {
        let fields: Vec<Value> = errors
            .iter()
            .map(|e| json!({ "field": e.field, "message": e.message }))
            .collect();
        Self::new("VALIDATION_ERROR", "Request validation failed")
            .with_details(json!({ "errors": fields }))
    }
}
