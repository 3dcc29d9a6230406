//! Error types for the Biblio server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// Uniqueness violation on a single field (e.g. isbn).
    /// Surfaced in the same field-level shape as [`AppError::Validation`].
    #[error("Duplicate value for {field}")]
    Duplicate { field: &'static str, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InsufficientInventory(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response envelope.
///
/// Every error path returns this shape with `success: false`; `error`
/// carries field-level detail for validation failures and the raw cause
/// for unexpected ones.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Reshape validator output into a per-field error map:
/// `{name: "ValidationError", errors: {field: {message, kind, path}}}`.
fn validation_detail(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for (field, errs) in errors.field_errors() {
        if let Some(e) = errs.first() {
            fields.insert(
                field.to_string(),
                json!({
                    "message": e.message.as_deref().unwrap_or("Invalid value"),
                    "kind": e.code.as_ref(),
                    "path": field,
                }),
            );
        }
    }
    json!({ "name": "ValidationError", "errors": fields })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(validation_detail(errors)),
            ),
            AppError::Duplicate { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(
                    field.to_string(),
                    json!({ "message": message, "kind": "unique", "path": field }),
                );
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(json!({ "name": "ValidationError", "errors": errors })),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::InsufficientInventory(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    Some(json!(e.to_string())),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    Some(json!(msg)),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: detail,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
