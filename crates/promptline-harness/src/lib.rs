//! Deterministic test harness for promptline sessions.
//!
//! [`ScriptedDriver`] implements [`promptline_core::Driver`] over a key
//! script and an in-memory screen, so whole sessions (queueing, raw-mode
//! handling, rendering and answers) can be exercised without a terminal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scripted_driver;

pub use scripted_driver::{DEFAULT_COLUMNS, RawTransition, ScriptError, ScriptedDriver};
