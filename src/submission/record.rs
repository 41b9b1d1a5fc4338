use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{FieldEntry, NewSubmission};

use super::schema::CanonicalForm;

/// Lay out the stored record: canonical fields in declaration order with
/// `formType` appended as the trailing entry, stamped with the time the
/// request was accepted.
pub fn build(form: &CanonicalForm, received_at: DateTime<Utc>) -> NewSubmission {
    let mut form_data = form.fields.clone();
    form_data.push(FieldEntry::new(
        "formType",
        Value::String(form.form_type.as_str().to_string()),
    ));

    NewSubmission {
        received_at,
        form_type: form.form_type,
        form_data,
    }
}
