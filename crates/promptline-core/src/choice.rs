//! Choice normalization for select and checkbox prompts.
//!
//! Callers describe choices loosely (plain text, numbers, records, or raw
//! JSON); [`normalize_choices`] turns them into canonical [`Choice`]s in
//! input order. Order matters: it is the navigation order and the tie-break
//! for default selection.

use serde_json::Value;

use crate::PromptError;

/// One selectable option after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    /// Display text.
    pub text: String,
    /// Value returned when this choice is picked. Defaults to the text.
    pub value: Value,
    /// Checkbox selection flag.
    pub selected: bool,
}

/// A choice as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceInput {
    /// Missing element (e.g. `None` in an optional list).
    Absent,
    /// Plain text. Value is the same text.
    Text(String),
    /// Bare number. Text is the number's display form, value the number.
    Number(serde_json::Number),
    /// Structured choice.
    Record {
        /// Display text.
        text: String,
        /// Returned value. `None` falls back to the text.
        value: Option<Value>,
        /// Initially checked (checkbox only).
        selected: bool,
    },
    /// Raw JSON element from a dynamic config.
    Json(Value),
}

impl ChoiceInput {
    /// Structured choice with an explicit value.
    pub fn with_value(text: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Record { text: text.into(), value: Some(value.into()), selected: false }
    }

    /// Structured choice that starts checked.
    pub fn checked(text: impl Into<String>) -> Self {
        Self::Record { text: text.into(), value: None, selected: true }
    }
}

impl From<&str> for ChoiceInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ChoiceInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for ChoiceInput {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for ChoiceInput {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for ChoiceInput {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for ChoiceInput {
    fn from(n: f64) -> Self {
        // NaN and infinities have no JSON form and cannot be chosen.
        serde_json::Number::from_f64(n).map_or(Self::Absent, Self::Number)
    }
}

impl<T: Into<ChoiceInput>> From<Option<T>> for ChoiceInput {
    fn from(choice: Option<T>) -> Self {
        choice.map_or(Self::Absent, Into::into)
    }
}

impl From<Value> for ChoiceInput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Normalize a choice list into canonical `{text, value, selected}` triples.
///
/// # Errors
///
/// [`PromptError::InvalidChoices`] if the list is empty, an element is
/// absent/null, or a structured element has no usable `text`.
pub fn normalize_choices(inputs: &[ChoiceInput]) -> Result<Vec<Choice>, PromptError> {
    if inputs.is_empty() {
        return Err(PromptError::InvalidChoices("choice list is empty".into()));
    }

    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| normalize_one(input).map_err(|reason| invalid(index, &reason)))
        .collect()
}

fn invalid(index: usize, reason: &str) -> PromptError {
    PromptError::InvalidChoices(format!("choice {index}: {reason}"))
}

fn normalize_one(input: &ChoiceInput) -> Result<Choice, String> {
    match input {
        ChoiceInput::Absent => Err("missing choice".into()),
        ChoiceInput::Text(text) => Ok(plain(text.clone())),
        ChoiceInput::Number(n) => {
            Ok(Choice { text: n.to_string(), value: Value::Number(n.clone()), selected: false })
        },
        ChoiceInput::Record { text, value, selected } => Ok(Choice {
            text: text.clone(),
            value: value.clone().unwrap_or_else(|| Value::String(text.clone())),
            selected: *selected,
        }),
        ChoiceInput::Json(value) => from_json(value),
    }
}

fn plain(text: String) -> Choice {
    Choice { value: Value::String(text.clone()), text, selected: false }
}

fn from_json(value: &Value) -> Result<Choice, String> {
    match value {
        Value::Null => Err("null is not a choice".into()),
        Value::String(text) => Ok(plain(text.clone())),
        Value::Number(n) => {
            Ok(Choice { text: n.to_string(), value: value.clone(), selected: false })
        },
        Value::Object(record) => {
            let text = match record.get("text") {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(other) => return Err(format!("text must be a string, got {other}")),
                None => return Err("text property missing".into()),
            };
            let value = match record.get("value") {
                Some(v) => v.clone(),
                None => Value::String(text.clone()),
            };
            let selected = match record.get("selected") {
                None | Some(Value::Null) => false,
                Some(Value::Bool(flag)) => *flag,
                Some(other) => return Err(format!("selected must be a boolean, got {other}")),
            };
            Ok(Choice { text, value, selected })
        },
        other => Err(format!("{other} is not a choice")),
    }
}
