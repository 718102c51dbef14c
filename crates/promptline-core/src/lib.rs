//! Core of the promptline interactive prompts.
//!
//! Pure prompt state machines, an incremental renderer and a FIFO scheduler,
//! generic over the terminal so the same code runs against a real tty and a
//! scripted test driver.
//!
//! # Components
//!
//! - [`Question`] / [`normalize`]: every accepted question shape reduced to
//!   [`PromptConfig`]s
//! - [`Prompt`]: per-kind edit state driven by [`KeyInput`]s
//! - [`Renderer`]: in-place redraw escape sequences for a [`View`]
//! - [`Driver`]: trait for raw mode, key input and output
//! - [`Session`]: runs prompts one at a time, in call order

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod answer;
mod choice;
mod config;
mod driver;
mod error;
mod key;
mod prompt;
mod question;
mod queue;
mod render;
mod session;

pub use answer::{Answer, Answers};
pub use choice::{Choice, ChoiceInput, normalize_choices};
pub use config::{
    CheckboxConfig, NumberConfig, PromptConfig, PromptKind, SelectConfig, TextConfig, Validation,
    Validator,
};
pub use driver::{Driver, RawMode};
pub use error::PromptError;
pub use key::{KeyDecoder, KeyInput};
pub use prompt::{
    CheckboxPrompt, ListItem, NumberPrompt, PASSWORD_MASK, Prompt, PromptAction, SelectPrompt,
    TextPrompt, View,
};
pub use question::{NamedQuestion, Normalized, Question, normalize};
pub use queue::{Admission, PromptQueue};
pub use render::Renderer;
pub use session::{
    DEFAULT_PLACEHOLDER, INTERRUPT_EXIT_CODE, InterruptPolicy, Session, SessionConfig,
};
