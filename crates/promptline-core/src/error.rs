//! Error types for prompt construction and execution.
//!
//! Construction errors ([`PromptError::InvalidConfig`],
//! [`PromptError::InvalidDefault`], [`PromptError::InvalidChoices`]) are
//! raised while a request is being built, before it is admitted to the queue,
//! so they never leave the terminal in raw mode. A confirmation that fails
//! validation is not an error at all: the prompt simply keeps editing.

use thiserror::Error;

/// Errors surfaced to callers of [`crate::Session`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// Missing or unrecognized type tag, or a malformed structured config.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A supplied default value fails its own validator.
    #[error("invalid default: {0}")]
    InvalidDefault(String),

    /// Empty or malformed choice list.
    #[error("invalid choices: {0}")]
    InvalidChoices(String),

    /// Control-C while the session is configured to report it instead of
    /// exiting the process.
    #[error("prompt interrupted")]
    Interrupted,

    /// The key source ended before the prompt was confirmed.
    #[error("input closed before the prompt was answered")]
    InputClosed,

    /// The terminal driver failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A submitted prompt task panicked or was cancelled by its runtime.
    #[error("prompt task aborted: {0}")]
    Aborted(String),
}

impl PromptError {
    /// Returns true if this error was raised while building the prompt,
    /// before any terminal state was touched.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::InvalidDefault(_) | Self::InvalidChoices(_))
    }

    pub(crate) fn terminal(err: impl std::error::Error) -> Self {
        Self::Terminal(err.to_string())
    }

    pub(crate) fn aborted(err: tokio::task::JoinError) -> Self {
        Self::Aborted(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_errors_are_classified() {
        assert!(PromptError::InvalidConfig("x".into()).is_construction());
        assert!(PromptError::InvalidDefault("x".into()).is_construction());
        assert!(PromptError::InvalidChoices("x".into()).is_construction());
        assert!(!PromptError::Interrupted.is_construction());
        assert!(!PromptError::Terminal("io".into()).is_construction());
        assert!(!PromptError::Aborted("panic".into()).is_construction());
    }
}
