use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    /// User-correctable input problem, reported with the offending field names.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        missing_fields: Vec<&'static str>,
        invalid_fields: Vec<&'static str>,
    },

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        AppError::Validation {
            message: format!("Missing required fields: {}", fields.join(", ")),
            missing_fields: fields,
            invalid_fields: Vec::new(),
        }
    }

    pub fn invalid_fields(fields: Vec<&'static str>, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            missing_fields: Vec::new(),
            invalid_fields: fields,
        }
    }
}

/// Body rejections from the JSON extractor are input problems, reported in
/// the same shape as field validation.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::invalid_fields(Vec::new(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.to_string() }),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, json!({ "error": self.to_string() })),
            AppError::Validation {
                message,
                missing_fields,
                invalid_fields,
            } => {
                let mut body = json!({
                    "error": message,
                    "missingFields": missing_fields,
                });
                if !invalid_fields.is_empty() {
                    body["invalidFields"] = json!(invalid_fields);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": "Entry is too large, try a smaller image" }),
            ),
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to access journal entries" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
