use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// What the caller sees for every server-side fault.
const OPAQUE_SERVER_ERROR: &str = "Server error while processing submission";

#[derive(Debug)]
pub enum AppError {
    /// Request body decoded to a payload with no fields.
    EmptyPayload,
    /// Request body could not be decoded at all.
    MalformedBody(String),
    /// Discriminator named no supported form type.
    UnknownFormType,
    /// Required canonical fields were missing, in declaration order.
    MissingFields(Vec<String>),
    Persistence(String),
    Render(String),
    Notification(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::EmptyPayload => write!(f, "No form data received"),
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {msg}"),
            AppError::UnknownFormType => write!(f, "Unknown form type"),
            AppError::MissingFields(fields) => {
                write!(f, "Missing fields: {}", fields.join(", "))
            }
            AppError::Persistence(msg) => write!(f, "Persistence error: {msg}"),
            AppError::Render(msg) => write!(f, "Render error: {msg}"),
            AppError::Notification(msg) => write!(f, "Notification error: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::EmptyPayload => (StatusCode::BAD_REQUEST, "No form data received".to_string()),
            AppError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnknownFormType => (StatusCode::BAD_REQUEST, "Unknown form type".to_string()),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                format!("Missing fields: {}", fields.join(", ")),
            ),
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, OPAQUE_SERVER_ERROR.to_string())
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, OPAQUE_SERVER_ERROR.to_string())
            }
            AppError::Notification(msg) => {
                tracing::error!("Notification error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, OPAQUE_SERVER_ERROR.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, OPAQUE_SERVER_ERROR.to_string())
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
