//! Schema validation for contact requests.
//!
//! Validation runs in two passes over untrusted JSON. The shape pass checks
//! JSON types and rejects unknown keys; the content pass runs the `validator`
//! derive rules (required, non-empty, email, length caps) on a typed form.
//! Both passes collect every problem instead of stopping at the first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::contact::{ContactUs, Requester};

/// Field paths in document order; also the order errors are reported in.
const FIELD_ORDER: &[&str] = &[
    "talkAbout",
    "timeFrame",
    "projectType",
    "budget",
    "description",
    "requester",
    "requester.name",
    "requester.companyName",
    "requester.email",
    "requester.phoneNumber",
];

/// Top-level text fields: (rust field name, json key).
const TEXT_FIELDS: &[(&str, &str)] = &[
    ("talk_about", "talkAbout"),
    ("time_frame", "timeFrame"),
    ("project_type", "projectType"),
    ("budget", "budget"),
    ("description", "description"),
];

/// Requester fields: (rust field name, json key).
const REQUESTER_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("company_name", "companyName"),
    ("email", "email"),
    ("phone_number", "phoneNumber"),
];

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted JSON path, e.g. `requester.email`.
    pub path: String,
    pub message: String,
    /// Machine-readable rule name (`required`, `string`, `email`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }
}

/// Every field problem found in one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationFailure(Vec<FieldError>);

impl ValidationFailure {
    pub fn single(path: &str, kind: &str, message: &str) -> Self {
        Self(vec![FieldError::new(path, kind, message)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when some error is reported for `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    fn sort(&mut self) {
        let rank = |path: &str| {
            FIELD_ORDER
                .iter()
                .position(|p| *p == path)
                .unwrap_or(FIELD_ORDER.len())
        };
        self.0.sort_by_key(|e| rank(&e.path));
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}\"{}\" {}", sep, err.path, err.message)?;
        }
        Ok(())
    }
}

/// Typed form for the content pass. Fields are optional so missing values
/// surface as `required` errors rather than deserialization failures.
#[derive(Debug, Default, Validate)]
struct ContactForm {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters")
    )]
    talk_about: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters")
    )]
    time_frame: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters")
    )]
    project_type: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters")
    )]
    budget: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters")
    )]
    description: Option<String>,
    #[validate(required(message = "is required"), nested)]
    requester: Option<RequesterForm>,
}

/// Serializable because nested validation attaches the value to errors.
#[derive(Debug, Default, Serialize, Validate)]
struct RequesterForm {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 200, message = "must be between 1 and 200 characters")
    )]
    name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    company_name: Option<String>,
    #[validate(
        required(message = "is required"),
        email(message = "must be a valid email"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    phone_number: Option<String>,
}

impl ContactForm {
    fn set_text(&mut self, field: &str, value: String) {
        match field {
            "talk_about" => self.talk_about = Some(value),
            "time_frame" => self.time_frame = Some(value),
            "project_type" => self.project_type = Some(value),
            "budget" => self.budget = Some(value),
            "description" => self.description = Some(value),
            _ => {}
        }
    }

    fn into_contact(self) -> Option<ContactUs> {
        let requester = self.requester?;
        Some(ContactUs {
            talk_about: self.talk_about?,
            time_frame: self.time_frame?,
            project_type: self.project_type?,
            budget: self.budget?,
            description: self.description?,
            requester: Requester {
                name: requester.name?,
                company_name: requester.company_name,
                email: requester.email?,
                phone_number: requester.phone_number,
            },
        })
    }
}

impl RequesterForm {
    fn set_text(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = Some(value),
            "company_name" => self.company_name = Some(value),
            "email" => self.email = Some(value),
            "phone_number" => self.phone_number = Some(value),
            _ => {}
        }
    }
}

/// Validates an untrusted contact request body.
///
/// Returns the typed record on success, or every field problem on failure.
pub fn validate_contact(input: &Value) -> Result<ContactUs, ValidationFailure> {
    let Some(obj) = input.as_object() else {
        return Err(ValidationFailure::single("value", "object", "must be an object"));
    };

    let mut failure = ValidationFailure::default();
    // Paths with a shape error; content errors on these are redundant.
    let mut shaped: HashSet<String> = HashSet::new();
    let mut form = ContactForm::default();

    reject_unknown_keys(obj, "", TEXT_FIELDS.iter().map(|(_, k)| *k).chain(["requester"]), &mut failure);

    for (field, key) in TEXT_FIELDS {
        if let Some(value) = read_string(obj, key, key, &mut failure, &mut shaped) {
            form.set_text(field, value);
        }
    }

    match obj.get("requester") {
        None | Some(Value::Null) => {}
        Some(Value::Object(inner)) => {
            let mut requester = RequesterForm::default();
            reject_unknown_keys(
                inner,
                "requester.",
                REQUESTER_FIELDS.iter().map(|(_, k)| *k),
                &mut failure,
            );
            for (field, key) in REQUESTER_FIELDS {
                let path = format!("requester.{}", key);
                if let Some(value) = read_string(inner, key, &path, &mut failure, &mut shaped) {
                    requester.set_text(field, value);
                }
            }
            form.requester = Some(requester);
        }
        Some(_) => {
            failure.push(FieldError::new("requester", "object", "must be an object"));
            shaped.insert("requester".to_string());
        }
    }

    if let Err(errors) = form.validate() {
        let top: Vec<(&str, &str)> = TEXT_FIELDS
            .iter()
            .copied()
            .chain([("requester", "requester")])
            .collect();
        collect_content_errors(&errors, &top, "", &shaped, &mut failure);
    }

    if !failure.is_empty() {
        failure.sort();
        return Err(failure);
    }

    form.into_contact()
        .ok_or_else(|| ValidationFailure::single("value", "required", "is incomplete"))
}

/// Applies a partial update to a stored document and validates the result.
///
/// Keys in `patch` replace the stored top-level values wholesale, so a
/// `requester` in the patch replaces the whole requester object.
pub fn validate_update(current: &ContactUs, patch: &Value) -> Result<ContactUs, ValidationFailure> {
    let Some(changes) = patch.as_object() else {
        return Err(ValidationFailure::single("value", "object", "must be an object"));
    };

    let mut document = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        _ => return Err(ValidationFailure::single("value", "object", "stored document is not an object")),
    };

    for (key, value) in changes {
        document.insert(key.clone(), value.clone());
    }

    validate_contact(&Value::Object(document))
}

fn reject_unknown_keys<'a>(
    obj: &Map<String, Value>,
    prefix: &str,
    allowed: impl Iterator<Item = &'a str>,
    failure: &mut ValidationFailure,
) {
    let allowed: HashSet<&str> = allowed.collect();
    for key in obj.keys() {
        if !allowed.contains(key.as_str()) {
            failure.push(FieldError::new(
                format!("{}{}", prefix, key),
                "unknown",
                "is not allowed",
            ));
        }
    }
}

fn read_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    failure: &mut ValidationFailure,
    shaped: &mut HashSet<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            failure.push(FieldError::new(path, "string", "must be a string"));
            shaped.insert(path.to_string());
            None
        }
    }
}

fn collect_content_errors(
    errors: &ValidationErrors,
    fields: &[(&str, &str)],
    prefix: &str,
    shaped: &HashSet<String>,
    failure: &mut ValidationFailure,
) {
    let all = errors.errors();

    for (field, key) in fields {
        let path = format!("{}{}", prefix, key);
        match all.get(*field) {
            Some(ValidationErrorsKind::Field(errs)) => {
                if shaped.contains(&path) {
                    continue;
                }
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {}", err.code));
                    failure.push(FieldError::new(path.clone(), err.code.to_string(), message));
                }
            }
            Some(ValidationErrorsKind::Struct(nested)) => {
                collect_content_errors(nested, REQUESTER_FIELDS, "requester.", shaped, failure);
            }
            _ => {}
        }
    }
}
