//! Numeric prompt.
//!
//! The buffer only ever holds something that looks like a number being
//! typed: digits, at most one `.` (never in integer mode) and a leading `-`.
//! Whether it actually parses is decided on confirmation.

use super::{PromptAction, View};
use crate::{Answer, KeyInput, NumberConfig, PromptError, Validation};

/// Number input with optional bounds, validator and display unit.
#[derive(Debug, Clone)]
pub struct NumberPrompt {
    config: NumberConfig,
    buffer: String,
}

impl NumberPrompt {
    /// Build a numeric prompt, pre-filling the buffer with the default.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidDefault`] if the default fails the validator,
    /// or has a fractional part in integer mode.
    pub fn new(config: NumberConfig) -> Result<Self, PromptError> {
        let buffer = match config.default {
            Some(default) => {
                if config.integer && default.fract() != 0.0 {
                    return Err(PromptError::InvalidDefault(format!(
                        "default value {default} is not an integer"
                    )));
                }
                if let Validation::Invalid(reason) = config.check(default) {
                    return Err(PromptError::InvalidDefault(format!(
                        "default value {default} is invalid: {reason}"
                    )));
                }
                default.to_string()
            },
            None => String::new(),
        };

        Ok(Self { config, buffer })
    }

    /// Current buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub(super) fn question(&self) -> &str {
        &self.config.question
    }

    fn accepts(&self, c: char) -> bool {
        match c {
            '0'..='9' => true,
            '.' => !self.config.integer && !self.buffer.contains('.'),
            '-' => self.buffer.is_empty(),
            _ => false,
        }
    }

    /// Parsed buffer if it may be confirmed: a number, accepted by the
    /// validator and within bounds.
    fn confirmable(&self) -> Option<f64> {
        let value = self.buffer.parse::<f64>().ok().filter(|v| !v.is_nan())?;
        if let Validation::Invalid(reason) = self.config.check(value) {
            tracing::trace!(%reason, "number confirmation refused");
            return None;
        }
        self.config.in_range(value).then_some(value)
    }

    pub(super) fn handle(&mut self, key: KeyInput) -> Vec<PromptAction> {
        match key {
            KeyInput::Char(c) if self.accepts(c) => {
                self.buffer.push(c);
                vec![PromptAction::Render]
            },
            KeyInput::Backspace => match self.buffer.pop() {
                Some(_) => vec![PromptAction::Render],
                None => vec![],
            },
            KeyInput::Enter | KeyInput::Tab => match self.confirmable() {
                Some(value) => vec![PromptAction::Resolve(Answer::Number(value))],
                None => vec![],
            },
            KeyInput::Char(_)
            | KeyInput::Up
            | KeyInput::Down
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Interrupt => vec![],
        }
    }

    pub(super) fn view(&self) -> View<'_> {
        View::Line {
            question: &self.config.question,
            input: &self.buffer,
            suffix: self.config.suffix.as_deref(),
        }
    }

    pub(super) fn confirmed_display(&self) -> String {
        match &self.config.suffix {
            Some(suffix) => format!("{} {suffix}", self.buffer),
            None => self.buffer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(config: NumberConfig, text: &str) -> NumberPrompt {
        let mut prompt = NumberPrompt::new(config).unwrap();
        for c in text.chars() {
            prompt.handle(KeyInput::Char(c));
        }
        prompt
    }

    #[test]
    fn integer_prompt_resolves_typed_digits() {
        let mut prompt = typed(NumberConfig::new("age").integer(), "30");
        assert_eq!(prompt.handle(KeyInput::Enter), vec![PromptAction::Resolve(Answer::Number(
            30.0
        ))]);
    }

    #[test]
    fn integer_mode_rejects_fractional_default() {
        let err = NumberPrompt::new(NumberConfig::new("n").integer().with_default(1.5)).unwrap_err();
        assert!(matches!(err, PromptError::InvalidDefault(_)));

        let prompt = NumberPrompt::new(NumberConfig::new("n").integer().with_default(2.0)).unwrap();
        assert_eq!(prompt.buffer(), "2");
    }

    #[test]
    fn non_numeric_chars_are_ignored() {
        let prompt = typed(NumberConfig::new("n"), "1a2 b");
        assert_eq!(prompt.buffer(), "12");
    }

    #[test]
    fn single_decimal_point() {
        let prompt = typed(NumberConfig::new("n"), "1.2.3");
        assert_eq!(prompt.buffer(), "1.23");
    }

    #[test]
    fn integer_mode_rejects_decimal_point() {
        let prompt = typed(NumberConfig::new("n").integer(), "1.5");
        assert_eq!(prompt.buffer(), "15");
    }

    #[test]
    fn minus_only_as_first_char() {
        assert_eq!(typed(NumberConfig::new("n"), "-5").buffer(), "-5");
        assert_eq!(typed(NumberConfig::new("n"), "5-").buffer(), "5");
        assert_eq!(typed(NumberConfig::new("n"), "--5").buffer(), "-5");
    }

    #[test]
    fn out_of_range_is_refused_and_buffer_kept() {
        let config = NumberConfig::new("pct").min(0.0).max(100.0);

        let mut prompt = typed(config.clone(), "101");
        assert!(prompt.handle(KeyInput::Enter).is_empty());
        assert_eq!(prompt.buffer(), "101");

        let mut prompt = typed(config, "-1");
        assert!(prompt.handle(KeyInput::Enter).is_empty());
        assert_eq!(prompt.buffer(), "-1");
    }

    #[test]
    fn unparsable_buffer_is_refused() {
        for text in ["", "-", "."] {
            let mut prompt = typed(NumberConfig::new("n"), text);
            assert!(prompt.handle(KeyInput::Enter).is_empty(), "buffer {text:?}");
        }
    }

    #[test]
    fn validator_refuses_confirmation() {
        let config = NumberConfig::new("even").with_validator(|v: &f64| v % 2.0 == 0.0);

        let mut prompt = typed(config, "3");
        assert!(prompt.handle(KeyInput::Enter).is_empty());
        prompt.handle(KeyInput::Backspace);
        prompt.handle(KeyInput::Char('4'));
        assert_eq!(prompt.handle(KeyInput::Tab), vec![PromptAction::Resolve(Answer::Number(4.0))]);
    }

    #[test]
    fn default_fills_buffer() {
        let prompt = NumberPrompt::new(NumberConfig::new("h").with_default(180.0)).unwrap();
        assert_eq!(prompt.buffer(), "180");

        let prompt = NumberPrompt::new(NumberConfig::new("h").with_default(1.5)).unwrap();
        assert_eq!(prompt.buffer(), "1.5");
    }

    #[test]
    fn invalid_default_is_rejected_at_construction() {
        let config = NumberConfig::new("age").with_default(0.0).with_validator(|v: &f64| *v > 0.0);
        assert!(matches!(NumberPrompt::new(config), Err(PromptError::InvalidDefault(_))));
    }

    #[test]
    fn suffix_is_shown_and_kept_on_confirmation() {
        let prompt = typed(NumberConfig::new("height").suffix("cm"), "180");

        assert_eq!(prompt.view(), View::Line {
            question: "height",
            input: "180",
            suffix: Some("cm")
        });
        assert_eq!(prompt.confirmed_display(), "180 cm");
    }
}
