//! Field-level and store-backed validation rules.
//!
//! Field rules coerce a raw JSON value into a typed value or return the
//! message to report against that field. Uniqueness rules consult a
//! repository and record failures into a [`ValidationErrors`] map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::db::{ContactRepository, DbResult, Id, TodoRepository};

/// Key used for errors that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

pub const TASK_TAKEN: &str = "todo with this task already exists.";
pub const PHONE_NUMBER_TAKEN: &str = "Phone number already entered";
pub const EMAIL_TAKEN: &str = "Email is already used";
pub const NAME_AND_PHONE_NUMBER_TAKEN: &str = "No Phone number can have 2 different names";
pub const RECORD_TAKEN: &str = "A record with these values already exists.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Per-field validation messages, rendered as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// One-line summary such as `details: This field is required.`.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Python-style type name used in the non-object body message.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Require the request body to be a JSON object.
pub fn expect_object(data: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    data.as_object().ok_or_else(|| {
        ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(data)
            ),
        )
    })
}

/// Constraints for a text field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharRule {
    pub max_length: Option<usize>,
    pub allow_null: bool,
}

impl CharRule {
    pub const fn max(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            allow_null: false,
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            allow_null: true,
            ..self
        }
    }
}

/// Coerce a value into trimmed text.
///
/// Numbers are accepted and rendered as text. Returns `Ok(None)` only for
/// `null` on a nullable rule.
pub fn clean_char(value: &Value, rule: CharRule) -> Result<Option<String>, String> {
    let text = match value {
        Value::Null if rule.allow_null => return Ok(None),
        Value::Null => return Err(NOT_NULL.to_string()),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(INVALID_STRING.to_string()),
    };

    if text.is_empty() {
        return Err(NOT_BLANK.to_string());
    }

    if let Some(max) = rule.max_length {
        if text.chars().count() > max {
            return Err(format!(
                "Ensure this field has no more than {} characters.",
                max
            ));
        }
    }

    Ok(Some(text))
}

/// Coerce a value into a boolean, accepting the usual textual forms and
/// numbers equal to 0 or 1.
pub fn clean_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Null => Err(NOT_NULL.to_string()),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Ok(true),
            Some(v) if v == 0.0 => Ok(false),
            _ => Err(INVALID_BOOLEAN.to_string()),
        },
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "1" | "y"
            | "Y" | "t" | "T" => Ok(true),
            "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "0"
            | "n" | "N" | "f" | "F" => Ok(false),
            _ => Err(INVALID_BOOLEAN.to_string()),
        },
        _ => Err(INVALID_BOOLEAN.to_string()),
    }
}

/// Coerce a value into an email address.
pub fn clean_email(value: &Value, rule: CharRule) -> Result<String, String> {
    let text = clean_char(value, rule)?.ok_or_else(|| NOT_NULL.to_string())?;
    if EMAIL_RE.is_match(&text) {
        Ok(text)
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}

/// Reject a task name already held by another todo.
pub async fn check_unique_task<R: TodoRepository>(
    repo: &R,
    task: &str,
    instance: Option<Id>,
    errors: &mut ValidationErrors,
) -> DbResult<()> {
    let existing = repo.find_by_task(task).await?;
    if existing.is_some_and(|todo| todo.id != instance) {
        errors.add("task", TASK_TAKEN);
    }
    Ok(())
}

/// Reject a phone number already on file.
pub async fn check_unique_phone_number<R: ContactRepository>(
    repo: &R,
    phone_number: &str,
    errors: &mut ValidationErrors,
) -> DbResult<()> {
    if repo.find_by_phone_number(phone_number).await?.is_some() {
        errors.add("phone_number", PHONE_NUMBER_TAKEN);
    }
    Ok(())
}

/// Reject an email already on file.
pub async fn check_unique_email<R: ContactRepository>(
    repo: &R,
    email: &str,
    errors: &mut ValidationErrors,
) -> DbResult<()> {
    if repo.find_by_email(email).await?.is_some() {
        errors.add("email", EMAIL_TAKEN);
    }
    Ok(())
}

/// Reject a (name, phone number) pair already on file.
pub async fn check_unique_name_and_phone_number<R: ContactRepository>(
    repo: &R,
    name: &str,
    phone_number: &str,
    errors: &mut ValidationErrors,
) -> DbResult<()> {
    if repo
        .find_by_name_and_phone_number(name, phone_number)
        .await?
        .is_some()
    {
        errors.add(NON_FIELD_ERRORS, NAME_AND_PHONE_NUMBER_TAKEN);
    }
    Ok(())
}

/// Translate a store unique-constraint message into the matching field error.
///
/// Covers requests that pass the uniqueness checks above and then lose the
/// insert to a concurrent writer. Unknown constraints fall back to a generic
/// non-field message so engine text never reaches the client.
pub fn unique_violation(message: &str) -> ValidationErrors {
    let columns = message
        .strip_prefix("UNIQUE constraint failed: ")
        .unwrap_or(message);

    match columns {
        "todo.task" => ValidationErrors::single("task", TASK_TAKEN),
        "contact.phone_number" => ValidationErrors::single("phone_number", PHONE_NUMBER_TAKEN),
        "contact.email" => ValidationErrors::single("email", EMAIL_TAKEN),
        "contact.name, contact.phone_number" => {
            ValidationErrors::single(NON_FIELD_ERRORS, NAME_AND_PHONE_NUMBER_TAKEN)
        }
        _ => ValidationErrors::single(NON_FIELD_ERRORS, RECORD_TAKEN),
    }
}
