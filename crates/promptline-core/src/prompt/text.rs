//! Text and password prompts.

use super::{PASSWORD_MASK, PromptAction, View};
use crate::{Answer, KeyInput, PromptError, TextConfig, Validation};

/// Free-text input. Password mode hides the buffer while typing and shows a
/// fixed-length mask once confirmed.
#[derive(Debug, Clone)]
pub struct TextPrompt {
    config: TextConfig,
    buffer: String,
    masked: bool,
}

impl TextPrompt {
    /// Build a text prompt, pre-filling the buffer with the default.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidDefault`] if the default fails the validator.
    pub fn new(config: TextConfig, masked: bool) -> Result<Self, PromptError> {
        let buffer = config.default.clone().unwrap_or_default();
        if config.default.is_some()
            && let Validation::Invalid(reason) = config.check(&buffer)
        {
            let shown = if masked { PASSWORD_MASK } else { buffer.as_str() };
            return Err(PromptError::InvalidDefault(format!(
                "default value {shown} is invalid: {reason}"
            )));
        }

        Ok(Self { config, buffer, masked })
    }

    /// Current buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether this is a password prompt.
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub(super) fn question(&self) -> &str {
        &self.config.question
    }

    pub(super) fn handle(&mut self, key: KeyInput) -> Vec<PromptAction> {
        match key {
            KeyInput::Char(c) => {
                self.buffer.push(c);
                vec![PromptAction::Render]
            },
            KeyInput::Backspace => match self.buffer.pop() {
                Some(_) => vec![PromptAction::Render],
                None => vec![],
            },
            KeyInput::Enter | KeyInput::Tab => match self.config.check(&self.buffer) {
                Validation::Valid => vec![PromptAction::Resolve(Answer::Text(self.buffer.clone()))],
                Validation::Invalid(reason) => {
                    tracing::trace!(%reason, "text confirmation refused");
                    vec![]
                },
            },
            KeyInput::Up
            | KeyInput::Down
            | KeyInput::Left
            | KeyInput::Right
            | KeyInput::Interrupt => vec![],
        }
    }

    pub(super) fn view(&self) -> View<'_> {
        let input = if self.masked { "" } else { self.buffer.as_str() };
        View::Line { question: &self.config.question, input, suffix: None }
    }

    pub(super) fn confirmed_display(&self) -> String {
        if self.masked { PASSWORD_MASK.to_owned() } else { self.buffer.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(prompt: &mut TextPrompt, text: &str) {
        for c in text.chars() {
            prompt.handle(KeyInput::Char(c));
        }
    }

    #[test]
    fn char_input_appends_and_backspace_drops() {
        let mut prompt = TextPrompt::new(TextConfig::new("name"), false).unwrap();

        type_str(&mut prompt, "ab");
        assert_eq!(prompt.buffer(), "ab");

        assert_eq!(prompt.handle(KeyInput::Backspace), vec![PromptAction::Render]);
        assert_eq!(prompt.buffer(), "a");
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_no_op() {
        let mut prompt = TextPrompt::new(TextConfig::new("name"), false).unwrap();
        assert!(prompt.handle(KeyInput::Backspace).is_empty());
        assert_eq!(prompt.buffer(), "");
    }

    #[test]
    fn navigation_keys_are_ignored() {
        let mut prompt = TextPrompt::new(TextConfig::new("name").with_default("x"), false).unwrap();

        for key in [KeyInput::Up, KeyInput::Down, KeyInput::Left, KeyInput::Right] {
            assert!(prompt.handle(key).is_empty());
        }
        assert_eq!(prompt.buffer(), "x");
    }

    #[test]
    fn enter_and_tab_resolve_with_buffer() {
        let mut prompt = TextPrompt::new(TextConfig::new("name"), false).unwrap();
        type_str(&mut prompt, "ada");
        assert_eq!(prompt.handle(KeyInput::Enter), vec![PromptAction::Resolve(Answer::Text(
            "ada".into()
        ))]);

        let mut prompt = TextPrompt::new(TextConfig::new("name").with_default("bob"), false).unwrap();
        assert_eq!(prompt.handle(KeyInput::Tab), vec![PromptAction::Resolve(Answer::Text(
            "bob".into()
        ))]);
    }

    #[test]
    fn invalid_confirmation_keeps_editing() {
        let config = TextConfig::new("mail").with_validator(|v: &str| v.contains('@'));
        let mut prompt = TextPrompt::new(config, false).unwrap();

        type_str(&mut prompt, "ada");
        assert!(prompt.handle(KeyInput::Enter).is_empty());
        assert_eq!(prompt.buffer(), "ada");

        type_str(&mut prompt, "@x");
        assert!(matches!(prompt.handle(KeyInput::Enter).as_slice(), [PromptAction::Resolve(_)]));
    }

    #[test]
    fn invalid_default_is_rejected_at_construction() {
        let config =
            TextConfig::new("mail").with_default("nope").with_validator(|v: &str| v.contains('@'));

        let err = TextPrompt::new(config, false).unwrap_err();
        assert!(matches!(err, PromptError::InvalidDefault(_)));
    }

    #[test]
    fn validator_is_not_run_without_default() {
        let config = TextConfig::new("mail").with_validator(|v: &str| !v.is_empty());
        assert!(TextPrompt::new(config, false).is_ok());
    }

    #[test]
    fn password_hides_input_and_masks_confirmation() {
        let mut prompt = TextPrompt::new(TextConfig::new("pw"), true).unwrap();
        type_str(&mut prompt, "correct horse battery staple");

        assert_eq!(prompt.view(), View::Line { question: "pw", input: "", suffix: None });
        assert_eq!(prompt.confirmed_display(), "********");
        assert_eq!(prompt.handle(KeyInput::Enter), vec![PromptAction::Resolve(Answer::Text(
            "correct horse battery staple".into()
        ))]);
    }

    #[test]
    fn short_password_mask_has_fixed_length() {
        let mut prompt = TextPrompt::new(TextConfig::new("pw"), true).unwrap();
        type_str(&mut prompt, "a");

        assert_eq!(prompt.confirmed_display().chars().count(), 8);
    }
}
