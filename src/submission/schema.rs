use serde_json::{Map, Value};

use crate::models::{FieldEntry, FormType};

/// Where a canonical field takes its value from.
enum Source {
    /// Walk the listed payload keys left to right; the first truthy value
    /// wins.
    FirstTruthy(&'static [&'static str]),
    /// Copy the value of one payload key as-is; absent and null fall
    /// through to the placeholder.
    Verbatim(&'static str),
}

/// Value used when no source key yields one.
enum Placeholder {
    EmptyText,
    One,
    False,
    Label(&'static str),
    Nothing,
}

impl Placeholder {
    fn value(&self) -> Value {
        match self {
            Placeholder::EmptyText => Value::String(String::new()),
            Placeholder::One => Value::from(1),
            Placeholder::False => Value::Bool(false),
            Placeholder::Label(text) => Value::String((*text).to_string()),
            Placeholder::Nothing => Value::Null,
        }
    }
}

struct FieldRule {
    key: &'static str,
    source: Source,
    placeholder: Placeholder,
    trim: bool,
}

impl FieldRule {
    fn resolve(&self, raw: &Map<String, Value>) -> Value {
        let picked = match self.source {
            Source::FirstTruthy(keys) => keys
                .iter()
                .filter_map(|k| raw.get(*k))
                .find(|v| is_truthy(v))
                .cloned(),
            Source::Verbatim(key) => raw.get(key).filter(|v| !v.is_null()).cloned(),
        };

        let value = picked.unwrap_or_else(|| self.placeholder.value());
        if self.trim { trim_text(value) } else { value }
    }
}

/// Canonical field order for a safari enquiry. The stored sequence and the
/// rendered document both follow this order.
const SAFARI_RULES: &[FieldRule] = &[
    FieldRule {
        key: "name",
        source: Source::FirstTruthy(&["name", "fullName"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "phone",
        source: Source::FirstTruthy(&["phone", "mobileNumber"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "email",
        source: Source::FirstTruthy(&["email"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "safari",
        source: Source::FirstTruthy(&["safari", "tourTitle"]),
        placeholder: Placeholder::Label("Customized Tour"),
        trim: true,
    },
    FieldRule {
        key: "zone",
        source: Source::FirstTruthy(&["zone", "location"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "date",
        source: Source::Verbatim("date"),
        placeholder: Placeholder::Nothing,
        trim: false,
    },
    FieldRule {
        key: "timing",
        source: Source::FirstTruthy(&["timing", "numberOfDays"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "persons",
        source: Source::FirstTruthy(&["persons", "numberOfPersons"]),
        placeholder: Placeholder::One,
        trim: false,
    },
    FieldRule {
        key: "message",
        source: Source::FirstTruthy(&["message", "textarea"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "agree",
        source: Source::Verbatim("agree"),
        placeholder: Placeholder::False,
        trim: false,
    },
];

/// Canonical field order for a customized tour enquiry. `tourTitle` keeps
/// its value untrimmed, matching the upstream site contract.
const CUSTOMIZED_TOUR_RULES: &[FieldRule] = &[
    FieldRule {
        key: "fullName",
        source: Source::FirstTruthy(&["fullName"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "mobileNumber",
        source: Source::FirstTruthy(&["mobileNumber"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "email",
        source: Source::FirstTruthy(&["email"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "departureCity",
        source: Source::FirstTruthy(&["departureCity"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "location",
        source: Source::FirstTruthy(&["location"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "numberOfPersons",
        source: Source::FirstTruthy(&["numberOfPersons"]),
        placeholder: Placeholder::One,
        trim: false,
    },
    FieldRule {
        key: "date",
        source: Source::Verbatim("date"),
        placeholder: Placeholder::Nothing,
        trim: false,
    },
    FieldRule {
        key: "numberOfDays",
        source: Source::FirstTruthy(&["numberOfDays"]),
        placeholder: Placeholder::One,
        trim: false,
    },
    FieldRule {
        key: "textarea",
        source: Source::FirstTruthy(&["textarea"]),
        placeholder: Placeholder::EmptyText,
        trim: true,
    },
    FieldRule {
        key: "agree",
        source: Source::Verbatim("agree"),
        placeholder: Placeholder::False,
        trim: false,
    },
    FieldRule {
        key: "tourTitle",
        source: Source::FirstTruthy(&["tourTitle"]),
        placeholder: Placeholder::Label("Customized Tour"),
        trim: false,
    },
];

/// A payload mapped onto the fixed field set of one form type, in canonical
/// order. `formType` itself is appended later, when the stored record is
/// built.
#[derive(Debug, Clone)]
pub struct CanonicalForm {
    pub form_type: FormType,
    pub fields: Vec<FieldEntry>,
}

impl CanonicalForm {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|e| e.key == key).map(|e| &e.value)
    }
}

/// One truthiness rule shared by fallback resolution and required-field
/// validation: null, false and the empty string are missing; every number
/// (zero included), non-empty string, array and object counts as present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
    }
}

fn trim_text(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

/// Map a raw payload onto the canonical field set for `form_type`. Total
/// for every known form type; unknown discriminators are rejected before
/// this point.
pub fn canonicalize(form_type: FormType, raw: &Map<String, Value>) -> CanonicalForm {
    let rules = match form_type {
        FormType::SafariForm => SAFARI_RULES,
        FormType::CustomizedTourForm => CUSTOMIZED_TOUR_RULES,
    };

    let fields = rules
        .iter()
        .map(|rule| FieldEntry::new(rule.key, rule.resolve(raw)))
        .collect();

    CanonicalForm { form_type, fields }
}
