//! Scripted driver implementing the Driver trait.
//!
//! `ScriptedDriver` provides the same interface as the crossterm terminal
//! driver but reads keys from a prepared script and records everything the
//! session does to the terminal, so the same [`promptline_core::Session`]
//! code runs in production and in deterministic tests.
//!
//! Clones share state: move one clone into the session and keep another to
//! inspect output and raw-mode transitions afterwards.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use promptline_core::{Driver, KeyDecoder, KeyInput};
use thiserror::Error;

/// Columns reported unless overridden.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Injected failures and misuse detected by the scripted driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Raw mode entry was scripted to fail.
    #[error("raw mode unavailable")]
    RawModeUnavailable,

    /// A write was scripted to fail.
    #[error("write failed")]
    WriteFailed,

    /// Keys were requested while raw mode was off.
    #[error("key requested outside raw mode")]
    NotRaw,

    /// Raw mode was entered twice without leaving.
    #[error("raw mode entered twice")]
    AlreadyRaw,
}

/// A raw-mode change, in the order the session made them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTransition {
    /// Raw mode entered.
    Enter,
    /// Raw mode left.
    Leave,
}

#[derive(Debug)]
struct ScriptState {
    keys: VecDeque<KeyInput>,
    decoder: KeyDecoder,
    output: Vec<u8>,
    transitions: Vec<RawTransition>,
    raw: bool,
    columns: u16,
    fail_raw_entry: bool,
    fail_writes_after: Option<usize>,
}

impl Default for ScriptState {
    fn default() -> Self {
        Self {
            keys: VecDeque::new(),
            decoder: KeyDecoder::new(),
            output: Vec::new(),
            transitions: Vec::new(),
            raw: false,
            columns: DEFAULT_COLUMNS,
            fail_raw_entry: false,
            fail_writes_after: None,
        }
    }
}

/// Driver fed from a key script. Input closes once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriver {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedDriver {
    /// Empty script, 80 columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a different terminal width.
    #[must_use]
    pub fn with_columns(self, columns: u16) -> Self {
        self.state().columns = columns;
        self
    }

    /// Append keys to the script.
    pub fn push_keys(&self, keys: impl IntoIterator<Item = KeyInput>) {
        self.state().keys.extend(keys);
    }

    /// Append one key per character of `text`.
    pub fn type_text(&self, text: &str) {
        self.push_keys(text.chars().map(KeyInput::Char));
    }

    /// Append `text` followed by enter.
    pub fn answer(&self, text: &str) {
        self.type_text(text);
        self.push_keys([KeyInput::Enter]);
    }

    /// Append keys decoded from raw terminal bytes, as a tty would deliver
    /// them. Incomplete sequences wait for the next call.
    pub fn push_bytes(&self, bytes: &[u8]) {
        let mut state = self.state();
        let keys = state.decoder.feed(bytes);
        state.keys.extend(keys);
    }

    /// Make the next raw mode entry fail.
    pub fn fail_raw_mode_entry(&self) {
        self.state().fail_raw_entry = true;
    }

    /// Let `count` more writes succeed, then fail every write after that.
    pub fn fail_writes_after(&self, count: usize) {
        self.state().fail_writes_after = Some(count);
    }

    /// Everything written so far.
    pub fn output(&self) -> Vec<u8> {
        self.state().output.clone()
    }

    /// Output as text with escape sequences made visible: `ESC` becomes `␛`
    /// and each `\r\n` ends a line.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.state().output).replace('\x1b', "␛").replace("\r\n", "⏎\n")
    }

    /// Raw-mode changes in order.
    pub fn transitions(&self) -> Vec<RawTransition> {
        self.state().transitions.clone()
    }

    /// Whether raw mode is currently on.
    pub fn is_raw(&self) -> bool {
        self.state().raw
    }

    /// Keys not yet consumed.
    pub fn keys_remaining(&self) -> usize {
        self.state().keys.len()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Driver for ScriptedDriver {
    type Error = ScriptError;

    fn enter_raw_mode(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state();
        if std::mem::take(&mut state.fail_raw_entry) {
            return Err(ScriptError::RawModeUnavailable);
        }
        if state.raw {
            return Err(ScriptError::AlreadyRaw);
        }

        state.raw = true;
        state.transitions.push(RawTransition::Enter);
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state();
        state.raw = false;
        state.transitions.push(RawTransition::Leave);
        Ok(())
    }

    async fn next_key(&mut self) -> Result<Option<KeyInput>, ScriptError> {
        let mut state = self.state();
        if !state.raw {
            return Err(ScriptError::NotRaw);
        }

        let key = state.keys.pop_front();
        if key.is_none() {
            tracing::debug!("key script exhausted");
        }
        Ok(key)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ScriptError> {
        let mut state = self.state();
        match state.fail_writes_after {
            Some(0) => return Err(ScriptError::WriteFailed),
            Some(ref mut remaining) => *remaining -= 1,
            None => {},
        }

        state.output.extend_from_slice(bytes);
        Ok(())
    }

    fn columns(&self) -> u16 {
        self.state().columns
    }
}
