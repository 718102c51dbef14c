//! Interactive terminal prompts.
//!
//! A thin shell over [`promptline_core`] that provides the real terminal.
//! All prompt logic, rendering and scheduling live in the core crate; this
//! crate supplies the crossterm [`TerminalDriver`] and a process-wide
//! session so prompts can be asked from anywhere:
//!
//! ```no_run
//! # async fn demo() -> Result<(), promptline::PromptError> {
//! let name = promptline::prompt("Enter your name:").await?;
//! let color = promptline::prompt(serde_json::json!({
//!     "type": "select",
//!     "question": "Favorite color:",
//!     "choices": ["Red", "Green", "Blue"],
//! }))
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Prompts issued without awaiting still run one after another, in the order
//! they were requested, whichever order they are awaited in.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{future::Future, sync::OnceLock};

pub mod terminal;

pub use promptline_core::{
    Answer, Answers, CheckboxConfig, ChoiceInput, InterruptPolicy, KeyInput, NamedQuestion,
    NumberConfig, PromptConfig, PromptError, Question, SelectConfig, Session, SessionConfig,
    TextConfig, Validation,
};
pub use terminal::{TerminalDriver, TerminalError};

static SESSION: OnceLock<Session<TerminalDriver>> = OnceLock::new();

/// Configure the process-wide session.
///
/// Only takes effect before the first prompt; returns `false` if the session
/// already exists.
pub fn configure(config: SessionConfig) -> bool {
    let mut fresh = false;
    SESSION.get_or_init(|| {
        fresh = true;
        Session::with_config(TerminalDriver::new(), config)
    });
    fresh
}

/// The process-wide session on stdin/stdout.
pub fn session() -> &'static Session<TerminalDriver> {
    SESSION.get_or_init(|| Session::new(TerminalDriver::new()))
}

/// Ask a question on the terminal.
///
/// Runs on its own task, so requests can be awaited in any order. See
/// [`Session::submit`]. Must be called within a tokio runtime.
pub fn prompt(
    question: impl Into<Question>,
) -> impl Future<Output = Result<Answer, PromptError>> + Send + 'static {
    session().submit(question)
}

/// Ask named questions on the terminal. See [`Session::submit_named`].
pub fn ask_named(
    questions: Vec<NamedQuestion>,
) -> impl Future<Output = Result<Answers, PromptError>> + Send + 'static {
    session().submit_named(questions)
}
