use crate::models::FormType;

use super::schema::{CanonicalForm, is_truthy};

const SAFARI_REQUIRED: &[&str] = &["name", "phone", "date", "safari", "zone", "timing"];
const CUSTOMIZED_TOUR_REQUIRED: &[&str] = &["fullName", "mobileNumber", "agree"];

pub fn required_fields(form_type: FormType) -> &'static [&'static str] {
    match form_type {
        FormType::SafariForm => SAFARI_REQUIRED,
        FormType::CustomizedTourForm => CUSTOMIZED_TOUR_REQUIRED,
    }
}

/// Canonical names of required fields whose resolved value is still absent,
/// in the order the required table lists them.
pub fn missing_fields(form: &CanonicalForm) -> Vec<String> {
    required_fields(form.form_type)
        .iter()
        .filter(|key| !form.get(key).is_some_and(is_truthy))
        .map(|key| (*key).to_string())
        .collect()
}
