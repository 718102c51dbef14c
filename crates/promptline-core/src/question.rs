//! Question inputs and the config normalizer.
//!
//! Callers may ask with shorthand (a bare string or number), a typed
//! [`PromptConfig`], a dynamic JSON config, or a list of any of these.
//! [`normalize`] resolves aliases and shorthands into canonical configs
//! before anything touches the terminal.

use serde_json::{Map, Value};

use crate::{
    CheckboxConfig, ChoiceInput, NumberConfig, PromptConfig, PromptError, PromptKind,
    SelectConfig, TextConfig,
};

/// A question as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    /// No input. Becomes a text prompt with the placeholder question.
    Empty,
    /// Shorthand text prompt.
    Text(String),
    /// Shorthand text prompt whose question is the stringified number.
    Number(f64),
    /// Typed config.
    Config(PromptConfig),
    /// Dynamic config (object), or a JSON shorthand (string, number, null,
    /// array).
    Json(Value),
    /// Several questions, asked in order.
    Batch(Vec<Question>),
}

impl From<&str> for Question {
    fn from(question: &str) -> Self {
        Self::Text(question.to_owned())
    }
}

impl From<String> for Question {
    fn from(question: String) -> Self {
        Self::Text(question)
    }
}

impl From<f64> for Question {
    fn from(question: f64) -> Self {
        Self::Number(question)
    }
}

impl From<i32> for Question {
    fn from(question: i32) -> Self {
        Self::Number(f64::from(question))
    }
}

impl From<i64> for Question {
    fn from(question: i64) -> Self {
        Self::Number(question as f64)
    }
}

impl From<PromptConfig> for Question {
    fn from(config: PromptConfig) -> Self {
        Self::Config(config)
    }
}

impl From<TextConfig> for Question {
    fn from(config: TextConfig) -> Self {
        Self::Config(config.into())
    }
}

impl From<NumberConfig> for Question {
    fn from(config: NumberConfig) -> Self {
        Self::Config(config.into())
    }
}

impl From<SelectConfig> for Question {
    fn from(config: SelectConfig) -> Self {
        Self::Config(config.into())
    }
}

impl From<CheckboxConfig> for Question {
    fn from(config: CheckboxConfig) -> Self {
        Self::Config(config.into())
    }
}

impl From<Value> for Question {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Question>> From<Vec<T>> for Question {
    fn from(questions: Vec<T>) -> Self {
        Self::Batch(questions.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Question>> From<Option<T>> for Question {
    fn from(question: Option<T>) -> Self {
        question.map_or(Self::Empty, Into::into)
    }
}

/// Result of normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// One prompt.
    Single(PromptConfig),
    /// Several prompts; the caller runs each through the queue and collects
    /// answers positionally.
    Batch(Vec<PromptConfig>),
}

/// Normalize a question into canonical config(s).
///
/// `placeholder` is the question text used for absent or empty input.
///
/// # Errors
///
/// [`PromptError::InvalidConfig`] for a structured config without a
/// recognized type tag, wrongly-typed fields, nested lists, or JSON that is
/// neither a config nor a shorthand. [`PromptError::InvalidChoices`] when
/// `choices` is present but not a list.
pub fn normalize(question: Question, placeholder: &str) -> Result<Normalized, PromptError> {
    match question {
        Question::Batch(questions) => questions
            .into_iter()
            .map(|q| normalize_single(q, placeholder))
            .collect::<Result<Vec<_>, _>>()
            .map(Normalized::Batch),
        Question::Json(Value::Array(values)) => values
            .into_iter()
            .map(|v| normalize_single(Question::Json(v), placeholder))
            .collect::<Result<Vec<_>, _>>()
            .map(Normalized::Batch),
        single => normalize_single(single, placeholder).map(Normalized::Single),
    }
}

fn normalize_single(question: Question, placeholder: &str) -> Result<PromptConfig, PromptError> {
    match question {
        Question::Empty => Ok(PromptConfig::text(placeholder)),
        Question::Text(text) if text.is_empty() => Ok(PromptConfig::text(placeholder)),
        Question::Text(text) => Ok(PromptConfig::text(text)),
        Question::Number(n) => Ok(PromptConfig::text(n.to_string())),
        Question::Config(config) => Ok(config),
        Question::Json(value) => from_json(value, placeholder),
        Question::Batch(_) => {
            Err(PromptError::InvalidConfig("nested question lists are not supported".into()))
        },
    }
}

fn from_json(value: Value, placeholder: &str) -> Result<PromptConfig, PromptError> {
    match value {
        Value::Null => normalize_single(Question::Empty, placeholder),
        Value::String(text) => normalize_single(Question::Text(text), placeholder),
        Value::Number(n) => Ok(PromptConfig::text(n.to_string())),
        Value::Object(fields) => from_object(&fields, placeholder),
        Value::Array(_) => {
            Err(PromptError::InvalidConfig("nested question lists are not supported".into()))
        },
        Value::Bool(flag) => Err(PromptError::InvalidConfig(format!("{flag} is not a question"))),
    }
}

fn from_object(fields: &Map<String, Value>, placeholder: &str) -> Result<PromptConfig, PromptError> {
    let tag = match fields.get("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(PromptError::InvalidConfig(format!("type must be a string, got {other}")));
        },
        None => return Err(PromptError::InvalidConfig("missing type for question".into())),
    };
    let (kind, force_integer) = PromptKind::from_tag(tag)
        .ok_or_else(|| PromptError::InvalidConfig(format!("{} is not a valid type", tag.trim())))?;

    // `message` is the inquirer-style spelling and wins when both are set.
    let question = match string_field(fields, "message")? {
        Some(message) => message,
        None => string_field(fields, "question")?.unwrap_or_else(|| placeholder.to_owned()),
    };

    let config = match kind {
        PromptKind::Text | PromptKind::Password => {
            let config = TextConfig { question, default: text_default(fields)?, validate: None };
            if kind == PromptKind::Password {
                PromptConfig::Password(config)
            } else {
                PromptConfig::Text(config)
            }
        },
        PromptKind::Number => PromptConfig::Number(NumberConfig {
            question,
            default: number_field(fields, "default")?,
            min: number_field(fields, "min")?,
            max: number_field(fields, "max")?,
            integer: force_integer || bool_field(fields, "integer")?.unwrap_or(false),
            suffix: string_field(fields, "suffix")?,
            validate: None,
        }),
        PromptKind::Select => PromptConfig::Select(SelectConfig {
            question,
            choices: choices_field(fields)?,
            default: index_field(fields, "default")?,
            validate: None,
        }),
        PromptKind::Checkbox => PromptConfig::Checkbox(CheckboxConfig {
            question,
            choices: choices_field(fields)?,
            default: values_field(fields, "default")?,
            validate: None,
        }),
    };
    Ok(config)
}

fn wrong_type(key: &str, expected: &str, got: &Value) -> PromptError {
    PromptError::InvalidConfig(format!("{key} must be {expected}, got {got}"))
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, PromptError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(key, "a string", other)),
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Result<Option<f64>, PromptError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(wrong_type(key, "a number", other)),
    }
}

fn bool_field(fields: &Map<String, Value>, key: &str) -> Result<Option<bool>, PromptError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => Err(wrong_type(key, "a boolean", other)),
    }
}

fn index_field(fields: &Map<String, Value>, key: &str) -> Result<Option<usize>, PromptError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Number(n)) => n
            .as_u64()
            .map(|i| Some(usize::try_from(i).unwrap_or(usize::MAX)))
            .ok_or_else(|| wrong_type(key, "a choice index", value)),
        Some(other) => Err(wrong_type(key, "a choice index", other)),
    }
}

fn values_field(fields: &Map<String, Value>, key: &str) -> Result<Vec<Value>, PromptError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(other) => Err(wrong_type(key, "a list of values", other)),
    }
}

/// Text defaults accept numbers and keep their display form.
fn text_default(fields: &Map<String, Value>) -> Result<Option<String>, PromptError> {
    match fields.get("default") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(wrong_type("default", "a string", other)),
    }
}

fn choices_field(fields: &Map<String, Value>) -> Result<Vec<ChoiceInput>, PromptError> {
    match fields.get("choices") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values.iter().cloned().map(ChoiceInput::Json).collect()),
        Some(other) => Err(PromptError::InvalidChoices(format!("choices must be a list, got {other}"))),
    }
}

/// A question with the name its answer is stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuestion {
    /// Key in the resulting [`crate::Answers`].
    pub name: String,
    /// The question itself.
    pub question: Question,
}

impl NamedQuestion {
    /// Name a question.
    pub fn new(name: impl Into<String>, question: impl Into<Question>) -> Self {
        Self { name: name.into(), question: question.into() }
    }

    /// Parse an inquirer-style JSON object carrying a `name` next to the
    /// config fields.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidConfig`] if the value is not an object or has no
    /// string `name`.
    pub fn from_json(value: Value) -> Result<Self, PromptError> {
        let Value::Object(mut fields) = value else {
            return Err(PromptError::InvalidConfig("named question must be an object".into()));
        };
        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            Some(other) => return Err(wrong_type("name", "a string", &other)),
            None => return Err(PromptError::InvalidConfig("missing name for question".into())),
        };
        Ok(Self { name, question: Question::Json(Value::Object(fields)) })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn single(question: impl Into<Question>) -> PromptConfig {
        match normalize(question.into(), ":").unwrap() {
            Normalized::Single(config) => config,
            Normalized::Batch(_) => panic!("expected a single config"),
        }
    }

    #[test]
    fn bare_string_is_text_prompt() {
        assert_eq!(single("name"), PromptConfig::text("name"));
    }

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(single("x"), single("x"));
    }

    #[test]
    fn bare_number_is_stringified() {
        assert_eq!(single(42), PromptConfig::text("42"));
        assert_eq!(single(2.5), PromptConfig::text("2.5"));
        assert_eq!(single(json!(7)), PromptConfig::text("7"));
    }

    #[test]
    fn absent_or_empty_uses_placeholder() {
        assert_eq!(single(Question::Empty), PromptConfig::text(":"));
        assert_eq!(single(""), PromptConfig::text(":"));
        assert_eq!(single(None::<&str>), PromptConfig::text(":"));
        assert_eq!(single(Value::Null), PromptConfig::text(":"));
    }

    #[test]
    fn structured_config_requires_type() {
        let err = normalize(json!({"question": "age"}).into(), ":").unwrap_err();
        assert_eq!(err, PromptError::InvalidConfig("missing type for question".into()));

        let err = normalize(json!({"type": "radio"}).into(), ":").unwrap_err();
        assert_eq!(err, PromptError::InvalidConfig("radio is not a valid type".into()));
    }

    #[test]
    fn message_is_alias_for_question() {
        let config = single(json!({"type": "input", "message": "skills"}));
        assert_eq!(config.question(), "skills");
    }

    #[test]
    fn type_tag_is_case_and_whitespace_insensitive() {
        let config = single(json!({"type": " Password ", "question": "pw"}));
        assert_eq!(config, PromptConfig::password("pw"));
    }

    #[test]
    fn list_tag_is_select() {
        let config = single(json!({"type": "list", "question": "q", "choices": ["a"]}));
        assert!(matches!(config, PromptConfig::Select(_)));
    }

    #[test]
    fn integer_tags_force_integer_numbers() {
        let PromptConfig::Number(config) = single(json!({"type": "integer", "question": "age"}))
        else {
            panic!("expected number config");
        };
        assert!(config.integer);

        let PromptConfig::Number(config) = single(json!({
            "type": "number", "question": "h", "min": 0, "max": 300, "suffix": "cm"
        })) else {
            panic!("expected number config");
        };
        assert!(!config.integer);
        assert_eq!(config.min, Some(0.0));
        assert_eq!(config.max, Some(300.0));
        assert_eq!(config.suffix.as_deref(), Some("cm"));
    }

    #[test]
    fn checkbox_fields() {
        let PromptConfig::Checkbox(config) = single(json!({
            "type": "checkbox", "question": "letters", "choices": ["a", "b", "c"], "default": ["b"]
        })) else {
            panic!("expected checkbox config");
        };
        assert_eq!(config.choices.len(), 3);
        assert_eq!(config.default, vec![json!("b")]);
    }

    #[test]
    fn wrongly_typed_fields_are_rejected() {
        let err = normalize(json!({"type": "number", "min": "zero"}).into(), ":").unwrap_err();
        assert!(matches!(err, PromptError::InvalidConfig(_)));

        let err = normalize(json!({"type": "select", "choices": "abc"}).into(), ":").unwrap_err();
        assert!(matches!(err, PromptError::InvalidChoices(_)));
    }

    #[test]
    fn lists_normalize_element_wise() {
        let normalized = normalize(Question::from(vec!["a", "b"]), ":").unwrap();
        assert_eq!(
            normalized,
            Normalized::Batch(vec![PromptConfig::text("a"), PromptConfig::text("b")])
        );

        let normalized = normalize(json!(["a", {"type": "int", "question": "n"}]).into(), ":");
        assert!(matches!(normalized, Ok(Normalized::Batch(configs)) if configs.len() == 2));
    }

    #[test]
    fn nested_lists_are_rejected() {
        let nested = Question::Batch(vec![Question::Batch(vec!["a".into()])]);
        assert!(matches!(normalize(nested, ":"), Err(PromptError::InvalidConfig(_))));
    }

    #[test]
    fn named_question_from_json() {
        let named =
            NamedQuestion::from_json(json!({"name": "user", "type": "input", "question": "Username:"}))
                .unwrap();
        assert_eq!(named.name, "user");
        assert_eq!(single(named.question), PromptConfig::text("Username:"));

        let err = NamedQuestion::from_json(json!({"type": "input"})).unwrap_err();
        assert_eq!(err, PromptError::InvalidConfig("missing name for question".into()));
    }
}
