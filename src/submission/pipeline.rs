use chrono::Utc;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{FormType, Submission};
use crate::render;
use crate::state::SharedState;

use super::record;
use super::schema;
use super::validate;

/// Full enquiry flow for one decoded payload: canonicalize, validate,
/// persist, render the PDF, send the notification mail. Persistence happens
/// before rendering, so a render or mail failure still leaves the record
/// behind.
pub async fn run(state: &SharedState, payload: Value) -> Result<Submission, AppError> {
    let raw = match payload.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(AppError::EmptyPayload),
    };

    let discriminator = raw
        .get("formType")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown-form");
    let form_type = FormType::parse(discriminator).ok_or(AppError::UnknownFormType)?;

    let form = schema::canonicalize(form_type, raw);

    let missing = validate::missing_fields(&form);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let submission = record::build(&form, Utc::now());
    tracing::debug!(
        "Canonicalized {} enquiry with {} fields",
        form_type,
        submission.form_data.len()
    );

    let stored = state
        .store
        .insert(&submission)
        .await
        .map_err(AppError::Persistence)?;

    let html = render::html::enquiry_document(&submission);

    let pdf = state
        .renderer
        .render_pdf(&html)
        .await
        .map_err(AppError::Render)?;

    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::Internal("mail transport not configured".to_string()))?;

    mailer
        .send_enquiry(
            &format!("New {}", form_type.enquiry_kind()),
            &html,
            &form_type.attachment_name(),
            pdf,
        )
        .await
        .map_err(AppError::Notification)?;

    Ok(stored)
}
