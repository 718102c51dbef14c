//! Single-select prompt.

use super::{ListItem, PromptAction, View, navigate};
use crate::{Answer, Choice, KeyInput, PromptError, SelectConfig, Validation, normalize_choices};

/// Pick one choice with up/down, confirm with enter/tab.
#[derive(Debug, Clone)]
pub struct SelectPrompt {
    config: SelectConfig,
    choices: Vec<Choice>,
    index: usize,
}

impl SelectPrompt {
    /// Build a select prompt highlighting the default index (clamped into
    /// range) or the first choice.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidChoices`] for an empty or malformed choice list.
    pub fn new(config: SelectConfig) -> Result<Self, PromptError> {
        let choices = normalize_choices(&config.choices)?;
        let last = choices.len() - 1;
        let index = config.default.unwrap_or(0).min(last);

        Ok(Self { config, choices, index })
    }

    /// Highlighted index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Normalized choices.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn highlighted(&self) -> &Choice {
        // `index` is clamped into a non-empty list on every move.
        &self.choices[self.index]
    }

    pub(super) fn question(&self) -> &str {
        &self.config.question
    }

    pub(super) fn handle(&mut self, key: KeyInput) -> Vec<PromptAction> {
        if key.is_confirm() {
            let value = self.highlighted().value.clone();
            return match self.config.check(&value) {
                Validation::Valid => vec![PromptAction::Resolve(Answer::Choice(value))],
                Validation::Invalid(reason) => {
                    tracing::trace!(%reason, "select confirmation refused");
                    vec![]
                },
            };
        }

        match navigate(self.index, self.choices.len(), key) {
            Some(next) => {
                self.index = next;
                vec![PromptAction::Render]
            },
            None => vec![],
        }
    }

    pub(super) fn view(&self) -> View<'_> {
        let items = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| ListItem {
                text: &choice.text,
                highlighted: i == self.index,
                checked: None,
            })
            .collect();

        View::List {
            question: &self.config.question,
            summary: self.highlighted().text.clone(),
            items,
        }
    }

    pub(super) fn confirmed_display(&self) -> String {
        self.highlighted().text.clone()
    }
}
