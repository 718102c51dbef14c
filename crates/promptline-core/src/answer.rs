//! Typed prompt answers.

use serde::Serialize;
use serde_json::{Map, Value};

/// The value a prompt resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Text and password prompts.
    Text(String),
    /// Numeric prompts.
    Number(f64),
    /// Single-select: the highlighted choice's value.
    Choice(Value),
    /// Multi-select: selected values in choice order.
    Choices(Vec<Value>),
    /// Answers to a batch of questions, in question order.
    Batch(Vec<Answer>),
}

impl Answer {
    /// Text answer, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric answer, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Single-select value, if this is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Choice(value) => Some(value),
            _ => None,
        }
    }

    /// Multi-select values, if this is one.
    pub fn as_values(&self) -> Option<&[Value]> {
        match self {
            Self::Choices(values) => Some(values),
            _ => None,
        }
    }

    /// Batch answers; a single answer becomes a batch of one.
    pub fn into_batch(self) -> Vec<Answer> {
        match self {
            Self::Batch(answers) => answers,
            single => vec![single],
        }
    }
}

impl From<Answer> for Value {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Text(text) => Value::String(text),
            Answer::Number(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
            Answer::Choice(value) => value,
            Answer::Choices(values) => Value::Array(values),
            Answer::Batch(answers) => Value::Array(answers.into_iter().map(Value::from).collect()),
        }
    }
}

/// Answers to named questions, in the order they were asked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    entries: Vec<(String, Answer)>,
}

impl Answers {
    /// Empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. A repeated name replaces the earlier answer in
    /// place.
    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((name, answer)),
        }
    }

    /// Answer stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Number of answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no answers were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in question order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

impl From<Answers> for Value {
    fn from(answers: Answers) -> Self {
        let map: Map<String, Value> =
            answers.entries.into_iter().map(|(name, answer)| (name, answer.into())).collect();
        Value::Object(map)
    }
}

impl Serialize for Answers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, answer) in &self.entries {
            map.serialize_entry(name, answer)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn answers_serialize_untagged() {
        let batch = Answer::Batch(vec![
            Answer::Text("ada".into()),
            Answer::Number(30.0),
            Answer::Choice(json!("blue")),
            Answer::Choices(vec![json!("a"), json!(2)]),
        ]);

        assert_eq!(serde_json::to_value(&batch).unwrap(), json!(["ada", 30.0, "blue", ["a", 2]]));
        assert_eq!(Value::from(batch), json!(["ada", 30.0, "blue", ["a", 2]]));
    }

    #[test]
    fn named_answers_keep_question_order() {
        let mut answers = Answers::new();
        answers.insert("zeta", Answer::Text("z".into()));
        answers.insert("alpha", Answer::Number(1.0));
        answers.insert("zeta", Answer::Text("again".into()));

        let names: Vec<_> = answers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(answers.get("zeta").and_then(Answer::as_str), Some("again"));
        assert_eq!(serde_json::to_string(&answers).unwrap(), r#"{"zeta":"again","alpha":1.0}"#);
    }

    #[test]
    fn accessors() {
        assert_eq!(Answer::Number(3.0).as_f64(), Some(3.0));
        assert_eq!(Answer::Number(3.0).as_str(), None);
        assert_eq!(Answer::Text("x".into()).into_batch(), vec![Answer::Text("x".into())]);
    }
}
