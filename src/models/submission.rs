use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The two enquiry forms the site submits. The discriminator arrives in the
/// payload as `formType` and everything downstream keys off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    SafariForm,
    CustomizedTourForm,
}

impl FormType {
    /// Maps the raw discriminator to a known form type. Anything else is
    /// rejected upstream as an unknown form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "safari-form" => Some(Self::SafariForm),
            "customized-tour-form" => Some(Self::CustomizedTourForm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SafariForm => "safari-form",
            Self::CustomizedTourForm => "customized-tour-form",
        }
    }

    /// Human-readable enquiry kind, used in the mail subject and the
    /// document heading ("New Safari Enquiry" etc).
    pub fn enquiry_kind(&self) -> &'static str {
        match self {
            Self::SafariForm => "Safari Enquiry",
            Self::CustomizedTourForm => "Customized Tour Enquiry",
        }
    }

    /// File name for the PDF attached to the enquiry mail.
    pub fn attachment_name(&self) -> String {
        format!("{}-Enquiry.pdf", self.as_str())
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key/value pair of a normalized form. Submissions store these as an
/// ordered array so the enquiry renders in a stable field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub key: String,
    pub value: Value,
}

impl FieldEntry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A normalized submission ready to be persisted.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubmission {
    pub received_at: DateTime<Utc>,
    pub form_type: FormType,
    pub form_data: Vec<FieldEntry>,
}

/// A stored submission row.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub form_type: String,
    pub form_data: Value,
}
