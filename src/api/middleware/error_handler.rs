//! Error handler for converting AppError to HTTP responses.
//!
//! Every error kind maps to exactly one status code. Server-side failures
//! are logged with their source chain and reported to clients without it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Status code for an error kind.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_to_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        } => ErrorResponse::not_found_error(entity, field, value),
        AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::duplicate_error(entity, field, value),
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => ErrorResponse::validation_errors(errors),
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Connection { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "User store is unavailable")
        }
        AppError::Database { operation, .. } => ErrorResponse::new(
            "DATABASE_ERROR",
            &format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => ErrorResponse::new(
            "CONFIGURATION_ERROR",
            &format!("Configuration error: {}", key),
        )
        .with_details(json!({ "key": key })),
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = %error_chain(&self), "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(error_to_body(&self))).into_response()
    }
}

/// Message plus source chain, for logs only.
fn error_chain(error: &AppError) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain.join(": ")
}
