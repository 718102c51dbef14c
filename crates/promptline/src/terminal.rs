//! Terminal driver for interactive prompts.
//!
//! Implements the [`Driver`] trait over the process's own terminal using
//! crossterm for raw mode and keyboard events. Output goes to stdout inline,
//! without an alternate screen, so answered prompts stay in the scrollback.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use promptline_core::{Driver, KeyInput};
use thiserror::Error;

/// Width assumed when the terminal size cannot be read.
const FALLBACK_COLUMNS: u16 = 80;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// The key subscription exists only while raw mode is on: the event stream
/// is created on entry and dropped on release.
pub struct TerminalDriver {
    out: Stdout,
    events: Option<EventStream>,
}

impl Default for TerminalDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver {
    /// Driver over stdin/stdout. Nothing changes until a prompt starts.
    pub fn new() -> Self {
        Self { out: stdout(), events: None }
    }

    /// Convert a crossterm key event to `KeyInput`.
    fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let control = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('c' | 'C') if control => Some(KeyInput::Interrupt),
            KeyCode::Char(_) if control => None,
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn enter_raw_mode(&mut self) -> Result<(), Self::Error> {
        enable_raw_mode()?;
        self.events = Some(EventStream::new());
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<(), Self::Error> {
        self.events = None;
        disable_raw_mode()?;
        Ok(())
    }

    async fn next_key(&mut self) -> Result<Option<KeyInput>, Self::Error> {
        let Some(events) = self.events.as_mut() else {
            return Ok(None);
        };

        loop {
            match events.next().await {
                Some(Ok(Event::Key(key_event))) => {
                    if let Some(key) = Self::convert_key(key_event) {
                        return Ok(Some(key));
                    }
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => return Err(TerminalError::Io(e)),
                None => return Ok(None),
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.out.write_all(bytes)?;
        self.out.flush()?;
        Ok(())
    }

    fn columns(&self) -> u16 {
        match terminal::size() {
            Ok((columns, _)) => columns,
            Err(e) => {
                tracing::debug!("Failed to read terminal size: {e}");
                FALLBACK_COLUMNS
            },
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        if self.events.take().is_some() {
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyInput> {
        TerminalDriver::convert_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn control_c_interrupts() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(KeyInput::Interrupt));
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(KeyInput::Interrupt)
        );
    }

    #[test]
    fn other_control_chords_are_dropped() {
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn plain_and_shifted_chars_pass_through() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::NONE), Some(KeyInput::Char('c')));
        assert_eq!(press(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(KeyInput::Char('A')));
        assert_eq!(press(KeyCode::Char(' '), KeyModifiers::NONE), Some(KeyInput::Char(' ')));
    }

    #[test]
    fn editing_and_navigation_keys() {
        let cases = [
            (KeyCode::Enter, KeyInput::Enter),
            (KeyCode::Tab, KeyInput::Tab),
            (KeyCode::Backspace, KeyInput::Backspace),
            (KeyCode::Up, KeyInput::Up),
            (KeyCode::Down, KeyInput::Down),
            (KeyCode::Left, KeyInput::Left),
            (KeyCode::Right, KeyInput::Right),
        ];
        for (code, expected) in cases {
            assert_eq!(press(code, KeyModifiers::NONE), Some(expected));
        }
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), None);
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = KeyEvent::new_with_kind_and_state(
                KeyCode::Enter,
                KeyModifiers::NONE,
                kind,
                KeyEventState::NONE,
            );
            assert_eq!(TerminalDriver::convert_key(event), None);
        }
    }

    #[tokio::test]
    async fn no_keys_outside_raw_mode() {
        let mut driver = TerminalDriver::new();
        assert_eq!(driver.next_key().await.unwrap(), None);
    }
}
