use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

use crate::models::NewSubmission;

/// UTC+05:30. Enquiry timestamps are shown in Indian local time.
static IST: LazyLock<FixedOffset> =
    LazyLock::new(|| FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset is in range"));

/// Render the enquiry document used as the mail body and printed to PDF:
/// one heading, the submission time, then one paragraph per stored field.
pub fn enquiry_document(submission: &NewSubmission) -> String {
    let kind = submission.form_type.enquiry_kind();
    let submitted_at = format_ist(submission.received_at);

    let fields: String = submission
        .form_data
        .iter()
        .map(|entry| {
            format!(
                "    <p><strong>{}:</strong> {}</p>\n",
                escape(&label(&entry.key)),
                escape(&render_value(&entry.value)),
            )
        })
        .collect();

    format!(
        r#"<html>
  <body style="font-family: Arial; padding: 20px;">
    <h2>New {kind}</h2>
    <p><strong>Submitted At:</strong> {submitted_at}</p>
    <hr />
{fields}  </body>
</html>"#
    )
}

fn format_ist(received_at: DateTime<Utc>) -> String {
    received_at
        .with_timezone(&*IST)
        .format("%-d/%-m/%Y, %-I:%M:%S %P")
        .to_string()
}

/// Human label for a camelCase key: a space goes in before each uppercase
/// letter ("numberOfPersons" becomes "number Of Persons").
fn label(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Scalars render as-is; objects, arrays and null as pretty-printed JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
