//! Prompt state machines.
//!
//! Each prompt kind owns its edit state and reacts to [`KeyInput`]s. Like
//! every state machine in this crate they are pure: [`Prompt::handle`]
//! consumes a key and returns [`PromptAction`]s for the session to execute,
//! and [`Prompt::view`] describes what the renderer should draw. No I/O
//! happens here.
//!
//! All kinds share the same shape: `editing` until a confirming key is
//! accepted, then `confirmed`. A confirmation that fails validation keeps the
//! prompt editing without any feedback.

mod checkbox;
mod number;
mod select;
mod text;

pub use checkbox::CheckboxPrompt;
pub use number::NumberPrompt;
pub use select::SelectPrompt;
pub use text::TextPrompt;

use crate::{Answer, KeyInput, PromptConfig, PromptError, PromptKind};

/// Shown in place of a confirmed password, whatever its length.
pub const PASSWORD_MASK: &str = "********";

/// Actions produced by a prompt for the session to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptAction {
    /// Edit state changed; redraw.
    Render,
    /// Confirmed with a valid value.
    Resolve(Answer),
    /// Control-C.
    Interrupt,
}

/// What the renderer should draw for the current edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    /// Single-line prompt: `question input suffix`, cursor after `input`.
    Line {
        /// Question text.
        question: &'a str,
        /// Echoed input. Empty for passwords.
        input: &'a str,
        /// Unit shown after the cursor.
        suffix: Option<&'a str>,
    },
    /// Question line followed by one line per choice.
    List {
        /// Question text.
        question: &'a str,
        /// Shown after the question (highlighted text or selection summary).
        summary: String,
        /// Choice lines in navigation order.
        items: Vec<ListItem<'a>>,
    },
}

/// One choice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem<'a> {
    /// Choice text.
    pub text: &'a str,
    /// Whether this is the highlighted choice.
    pub highlighted: bool,
    /// Checkbox state; `None` for single-select.
    pub checked: Option<bool>,
}

/// A running prompt of any kind.
#[derive(Debug, Clone)]
pub enum Prompt {
    /// Text or password.
    Text(TextPrompt),
    /// Number.
    Number(NumberPrompt),
    /// Single-select.
    Select(SelectPrompt),
    /// Multi-select.
    Checkbox(CheckboxPrompt),
}

impl Prompt {
    /// Build the prompt for `config`.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidDefault`] if a default fails its validator,
    /// [`PromptError::InvalidChoices`] for an unusable choice list.
    pub fn new(config: PromptConfig) -> Result<Self, PromptError> {
        let prompt = match config {
            PromptConfig::Text(config) => Self::Text(TextPrompt::new(config, false)?),
            PromptConfig::Password(config) => Self::Text(TextPrompt::new(config, true)?),
            PromptConfig::Number(config) => Self::Number(NumberPrompt::new(config)?),
            PromptConfig::Select(config) => Self::Select(SelectPrompt::new(config)?),
            PromptConfig::Checkbox(config) => Self::Checkbox(CheckboxPrompt::new(config)?),
        };
        Ok(prompt)
    }

    /// Process a key and return actions.
    pub fn handle(&mut self, key: KeyInput) -> Vec<PromptAction> {
        if key == KeyInput::Interrupt {
            return vec![PromptAction::Interrupt];
        }

        match self {
            Self::Text(p) => p.handle(key),
            Self::Number(p) => p.handle(key),
            Self::Select(p) => p.handle(key),
            Self::Checkbox(p) => p.handle(key),
        }
    }

    /// Current edit state, for the renderer.
    pub fn view(&self) -> View<'_> {
        match self {
            Self::Text(p) => p.view(),
            Self::Number(p) => p.view(),
            Self::Select(p) => p.view(),
            Self::Checkbox(p) => p.view(),
        }
    }

    /// Text left on the finalized line after confirmation.
    pub fn confirmed_display(&self) -> String {
        match self {
            Self::Text(p) => p.confirmed_display(),
            Self::Number(p) => p.confirmed_display(),
            Self::Select(p) => p.confirmed_display(),
            Self::Checkbox(p) => p.confirmed_display(),
        }
    }

    /// Question text.
    pub fn question(&self) -> &str {
        match self {
            Self::Text(p) => p.question(),
            Self::Number(p) => p.question(),
            Self::Select(p) => p.question(),
            Self::Checkbox(p) => p.question(),
        }
    }

    /// Prompt kind.
    pub fn kind(&self) -> PromptKind {
        match self {
            Self::Text(p) if p.is_masked() => PromptKind::Password,
            Self::Text(_) => PromptKind::Text,
            Self::Number(_) => PromptKind::Number,
            Self::Select(_) => PromptKind::Select,
            Self::Checkbox(_) => PromptKind::Checkbox,
        }
    }
}

/// Move `index` one step for `Up`/`Down`, clamped to `[0, len - 1]`.
///
/// Returns `None` when the key is not a navigation key or the index would
/// not change.
pub(crate) fn navigate(index: usize, len: usize, key: KeyInput) -> Option<usize> {
    let next = match key {
        KeyInput::Up => index.checked_sub(1)?,
        KeyInput::Down if index + 1 < len => index + 1,
        _ => return None,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_wins_for_every_kind() {
        let configs = vec![
            PromptConfig::text("t"),
            PromptConfig::password("p"),
            crate::NumberConfig::new("n").into(),
            crate::SelectConfig::new("s", ["a"]).into(),
            crate::CheckboxConfig::new("c", ["a"]).into(),
        ];

        for config in configs {
            let mut prompt = Prompt::new(config).unwrap();
            prompt.handle(KeyInput::Char('1'));
            assert_eq!(prompt.handle(KeyInput::Interrupt), vec![PromptAction::Interrupt]);
        }
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        assert_eq!(navigate(0, 3, KeyInput::Up), None);
        assert_eq!(navigate(0, 3, KeyInput::Down), Some(1));
        assert_eq!(navigate(2, 3, KeyInput::Down), None);
        assert_eq!(navigate(2, 3, KeyInput::Up), Some(1));
        assert_eq!(navigate(1, 3, KeyInput::Left), None);
    }

    #[test]
    fn kind_reports_password() {
        let prompt = Prompt::new(PromptConfig::password("pw")).unwrap();
        assert_eq!(prompt.kind(), PromptKind::Password);
    }
}
