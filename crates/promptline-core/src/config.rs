//! Canonical prompt configuration.
//!
//! [`PromptConfig`] is a closed enum with one variant per prompt kind, so
//! adding a kind forces every dispatch site to handle it. A config is
//! immutable once a prompt has been built from it.

use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::ChoiceInput;

/// Outcome of a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Value accepted.
    Valid,
    /// Value rejected, with a human-readable reason.
    Invalid(String),
}

impl Validation {
    /// Whether the value was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<bool> for Validation {
    fn from(ok: bool) -> Self {
        if ok { Self::Valid } else { Self::Invalid("rejected by validator".into()) }
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(reason) => Self::Invalid(reason),
        }
    }
}

impl From<&str> for Validation {
    /// A bare message is a rejection reason.
    fn from(reason: &str) -> Self {
        Self::Invalid(reason.to_owned())
    }
}

type ValidateFn<T> = dyn Fn(&T) -> Validation + Send + Sync;

/// Shared validator callback.
///
/// Two validators compare equal only if one is a clone of the other.
pub struct Validator<T: ?Sized>(Arc<ValidateFn<T>>);

impl<T: ?Sized + 'static> Validator<T> {
    /// Wrap a callback returning `bool`, [`Validation`], `Result<(), String>`
    /// or an error message.
    pub fn new<F, R>(check: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Validation> + 'static,
    {
        Self(Arc::new(move |value: &T| -> Validation { check(value).into() }))
    }

    /// Run the validator.
    pub fn check(&self, value: &T) -> Validation {
        (self.0)(value)
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Validator<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

fn passes<T: ?Sized + 'static>(validator: Option<&Validator<T>>, value: &T) -> Validation {
    validator.map_or(Validation::Valid, |v| v.check(value))
}

/// Config for text and password prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    /// Question shown before the input.
    pub question: String,
    /// Initial buffer contents.
    pub default: Option<String>,
    /// Checked on confirmation and against the default.
    pub validate: Option<Validator<str>>,
}

impl TextConfig {
    /// Text config with no default and no validator.
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into(), default: None, validate: None }
    }

    /// Pre-fill the buffer.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach a validator.
    #[must_use]
    pub fn with_validator<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> R + Send + Sync + 'static,
        R: Into<Validation> + 'static,
    {
        self.validate = Some(Validator::new(check));
        self
    }

    pub(crate) fn check(&self, value: &str) -> Validation {
        passes(self.validate.as_ref(), value)
    }
}

/// Config for numeric prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberConfig {
    /// Question shown before the input.
    pub question: String,
    /// Initial value.
    pub default: Option<f64>,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Reject `.` while typing.
    pub integer: bool,
    /// Unit shown after the number (e.g. `cm`).
    pub suffix: Option<String>,
    /// Checked on confirmation and against the default.
    pub validate: Option<Validator<f64>>,
}

impl NumberConfig {
    /// Unbounded numeric config.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            default: None,
            min: None,
            max: None,
            integer: false,
            suffix: None,
            validate: None,
        }
    }

    /// Pre-fill the buffer.
    #[must_use]
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Integer-only input.
    #[must_use]
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Display unit.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Attach a validator.
    #[must_use]
    pub fn with_validator<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&f64) -> R + Send + Sync + 'static,
        R: Into<Validation> + 'static,
    {
        self.validate = Some(Validator::new(check));
        self
    }

    pub(crate) fn check(&self, value: f64) -> Validation {
        passes(self.validate.as_ref(), &value)
    }

    /// Whether `value` lies within the configured bounds.
    pub fn in_range(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Config for single-select prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    /// Question shown above the choices.
    pub question: String,
    /// Choices in navigation order.
    pub choices: Vec<ChoiceInput>,
    /// Initially highlighted index, clamped into range.
    pub default: Option<usize>,
    /// Checked against the highlighted value on confirmation.
    pub validate: Option<Validator<Value>>,
}

impl SelectConfig {
    /// Select config highlighting the first choice.
    pub fn new<I, C>(question: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ChoiceInput>,
    {
        Self {
            question: question.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            default: None,
            validate: None,
        }
    }

    /// Initially highlighted index.
    #[must_use]
    pub fn with_default(mut self, index: usize) -> Self {
        self.default = Some(index);
        self
    }

    /// Attach a validator.
    #[must_use]
    pub fn with_validator<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Validation> + 'static,
    {
        self.validate = Some(Validator::new(check));
        self
    }

    pub(crate) fn check(&self, value: &Value) -> Validation {
        passes(self.validate.as_ref(), value)
    }
}

/// Config for multi-select prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxConfig {
    /// Question shown above the choices.
    pub question: String,
    /// Choices in navigation order.
    pub choices: Vec<ChoiceInput>,
    /// Values to pre-check.
    pub default: Vec<Value>,
    /// Checked against the selected values on confirmation.
    pub validate: Option<Validator<[Value]>>,
}

impl CheckboxConfig {
    /// Checkbox config with nothing pre-checked.
    pub fn new<I, C>(question: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ChoiceInput>,
    {
        Self {
            question: question.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            default: Vec::new(),
            validate: None,
        }
    }

    /// Pre-check choices whose value is in `values`.
    #[must_use]
    pub fn with_default<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.default = values.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a validator.
    #[must_use]
    pub fn with_validator<F, R>(mut self, check: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Validation> + 'static,
    {
        self.validate = Some(Validator::new(check));
        self
    }

    pub(crate) fn check(&self, values: &[Value]) -> Validation {
        passes(self.validate.as_ref(), values)
    }
}

/// Prompt kind, used for logging and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Free text, echoed.
    Text,
    /// Free text, masked.
    Password,
    /// Number with optional bounds.
    Number,
    /// One of a list.
    Select,
    /// Any subset of a list.
    Checkbox,
}

impl PromptKind {
    /// Resolve a type tag. Tags are trimmed and lower-cased; `list` is an
    /// alias for `select`, `integer`/`int` are integer-only numbers.
    ///
    /// Returns the kind and whether the tag forces integer-only input.
    pub fn from_tag(tag: &str) -> Option<(Self, bool)> {
        match tag.trim().to_lowercase().as_str() {
            "input" => Some((Self::Text, false)),
            "password" => Some((Self::Password, false)),
            "number" => Some((Self::Number, false)),
            "integer" | "int" => Some((Self::Number, true)),
            "select" | "list" => Some((Self::Select, false)),
            "checkbox" => Some((Self::Checkbox, false)),
            _ => None,
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Text => "input",
            Self::Password => "password",
            Self::Number => "number",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        };
        f.write_str(tag)
    }
}

/// Canonical prompt configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptConfig {
    /// Echoed text input.
    Text(TextConfig),
    /// Masked text input.
    Password(TextConfig),
    /// Numeric input.
    Number(NumberConfig),
    /// Single choice.
    Select(SelectConfig),
    /// Multiple choices.
    Checkbox(CheckboxConfig),
}

impl PromptConfig {
    /// Text prompt.
    pub fn text(question: impl Into<String>) -> Self {
        Self::Text(TextConfig::new(question))
    }

    /// Password prompt.
    pub fn password(question: impl Into<String>) -> Self {
        Self::Password(TextConfig::new(question))
    }

    /// Kind of this config.
    pub fn kind(&self) -> PromptKind {
        match self {
            Self::Text(_) => PromptKind::Text,
            Self::Password(_) => PromptKind::Password,
            Self::Number(_) => PromptKind::Number,
            Self::Select(_) => PromptKind::Select,
            Self::Checkbox(_) => PromptKind::Checkbox,
        }
    }

    /// Question text.
    pub fn question(&self) -> &str {
        match self {
            Self::Text(c) | Self::Password(c) => &c.question,
            Self::Number(c) => &c.question,
            Self::Select(c) => &c.question,
            Self::Checkbox(c) => &c.question,
        }
    }
}

impl From<TextConfig> for PromptConfig {
    fn from(config: TextConfig) -> Self {
        Self::Text(config)
    }
}

impl From<NumberConfig> for PromptConfig {
    fn from(config: NumberConfig) -> Self {
        Self::Number(config)
    }
}

impl From<SelectConfig> for PromptConfig {
    fn from(config: SelectConfig) -> Self {
        Self::Select(config)
    }
}

impl From<CheckboxConfig> for PromptConfig {
    fn from(config: CheckboxConfig) -> Self {
        Self::Checkbox(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_normalized() {
        assert_eq!(PromptKind::from_tag("  Input "), Some((PromptKind::Text, false)));
        assert_eq!(PromptKind::from_tag("LIST"), Some((PromptKind::Select, false)));
        assert_eq!(PromptKind::from_tag("int"), Some((PromptKind::Number, true)));
        assert_eq!(PromptKind::from_tag("integer"), Some((PromptKind::Number, true)));
        assert_eq!(PromptKind::from_tag("radio"), None);
    }

    #[test]
    fn validator_accepts_bool_result_and_message() {
        let by_bool = Validator::<str>::new(|v: &str| !v.is_empty());
        let by_result = Validator::<str>::new(|v: &str| {
            if v.contains('@') { Ok(()) } else { Err("needs @".to_string()) }
        });

        assert!(by_bool.check("x").is_valid());
        assert!(!by_bool.check("").is_valid());
        assert_eq!(by_result.check("a"), Validation::Invalid("needs @".into()));
    }

    #[test]
    fn validators_compare_by_identity() {
        let a = Validator::<f64>::new(|v: &f64| *v > 0.0);
        let b = Validator::<f64>::new(|v: &f64| *v > 0.0);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn number_range_is_inclusive() {
        let config = NumberConfig::new("pct").min(0.0).max(100.0);

        assert!(config.in_range(0.0));
        assert!(config.in_range(100.0));
        assert!(!config.in_range(100.5));
        assert!(!config.in_range(-1.0));
        assert!(NumberConfig::new("any").in_range(f64::MAX));
    }
}
