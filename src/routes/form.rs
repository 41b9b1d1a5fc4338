use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    // An empty body never reaches the parsers; it is a client error.
    if body.is_empty() {
        return Err(AppError::EmptyPayload);
    }

    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let payload = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
        parser::parse_multipart(&headers, body)
            .await
            .map_err(AppError::MalformedBody)?
    } else {
        parser::parse_body(content_type, &body).map_err(AppError::MalformedBody)?
    };

    let submission = pipeline::run(&state, payload).await?;

    tracing::info!("Stored {} submission {}", submission.form_type, submission.id);

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Form submitted successfully",
        })),
    ))
}
