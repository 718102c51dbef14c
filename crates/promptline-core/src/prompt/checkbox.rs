//! Multi-select prompt.

use serde_json::Value;

use super::{ListItem, PromptAction, View, navigate};
use crate::{Answer, CheckboxConfig, Choice, KeyInput, PromptError, Validation, normalize_choices};

/// Toggle any number of choices with space, confirm with enter/tab.
#[derive(Debug, Clone)]
pub struct CheckboxPrompt {
    config: CheckboxConfig,
    choices: Vec<Choice>,
    index: usize,
}

impl CheckboxPrompt {
    /// Build a checkbox prompt. Choices whose value is in the configured
    /// default set start checked, as do choices marked `selected`.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidChoices`] for an empty or malformed choice list.
    pub fn new(config: CheckboxConfig) -> Result<Self, PromptError> {
        let mut choices = normalize_choices(&config.choices)?;
        for choice in &mut choices {
            if config.default.contains(&choice.value) {
                choice.selected = true;
            }
        }

        Ok(Self { config, choices, index: 0 })
    }

    /// Highlighted index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Choices with their current selection flags.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Values of the checked choices, in choice order.
    pub fn selected_values(&self) -> Vec<Value> {
        self.choices.iter().filter(|c| c.selected).map(|c| c.value.clone()).collect()
    }

    fn selection_summary(&self) -> String {
        self.choices
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(super) fn question(&self) -> &str {
        &self.config.question
    }

    pub(super) fn handle(&mut self, key: KeyInput) -> Vec<PromptAction> {
        match key {
            KeyInput::Enter | KeyInput::Tab => {
                let values = self.selected_values();
                match self.config.check(&values) {
                    Validation::Valid => vec![PromptAction::Resolve(Answer::Choices(values))],
                    Validation::Invalid(reason) => {
                        tracing::trace!(%reason, "checkbox confirmation refused");
                        vec![]
                    },
                }
            },
            KeyInput::Char(' ') => match self.choices.get_mut(self.index) {
                Some(choice) => {
                    choice.selected = !choice.selected;
                    vec![PromptAction::Render]
                },
                None => vec![],
            },
            _ => match navigate(self.index, self.choices.len(), key) {
                Some(next) => {
                    self.index = next;
                    vec![PromptAction::Render]
                },
                None => vec![],
            },
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
                checked: Some(choice.selected),
            })
            .collect();

        View::List { question: &self.config.question, summary: self.selection_summary(), items }
    }

    pub(super) fn confirmed_display(&self) -> String {
        self.selection_summary()
    }
}
