//! Driver trait for abstracting terminal I/O.
//!
//! The [`Driver`] trait decouples the prompt engine from a specific terminal
//! implementation. Each frontend implements the trait to provide raw-mode
//! control, key input and output, while the generic [`crate::Session`]
//! handles scheduling and the prompt state machines.
//!
//! # Implementations
//!
//! - **Terminal**: crossterm raw mode and event stream
//! - **Harness**: scripted keys and recorded writes for deterministic tests

use std::{
    future::Future,
    ops::{Deref, DerefMut},
};

use crate::KeyInput;

/// Abstracts the terminal for the prompt engine.
///
/// Raw mode and the key subscription are one exclusive resource: the session
/// only calls [`Driver::next_key`] between [`Driver::enter_raw_mode`] and
/// [`Driver::leave_raw_mode`], and never for two prompts at once.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Switch to raw input and start delivering keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn enter_raw_mode(&mut self) -> Result<(), Self::Error>;

    /// Restore cooked input and stop delivering keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be changed.
    fn leave_raw_mode(&mut self) -> Result<(), Self::Error>;

    /// Wait for the next key.
    ///
    /// Returns `None` once input is closed.
    fn next_key(&mut self) -> impl Future<Output = Result<Option<KeyInput>, Self::Error>> + Send;

    /// Write escape sequences and text to the terminal, flushed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Terminal width in columns.
    fn columns(&self) -> u16;
}

/// Raw mode held for the lifetime of the guard.
///
/// Dropping the guard restores cooked mode on every exit path: resolution,
/// driver errors, interrupts and cancelled futures alike.
pub struct RawMode<'a, D: Driver> {
    driver: &'a mut D,
}

impl<'a, D: Driver> RawMode<'a, D> {
    /// Enter raw mode.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if raw mode cannot be entered; nothing needs
    /// releasing in that case.
    pub fn acquire(driver: &'a mut D) -> Result<Self, D::Error> {
        driver.enter_raw_mode()?;
        Ok(Self { driver })
    }
}

impl<D: Driver> Deref for RawMode<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.driver
    }
}

impl<D: Driver> DerefMut for RawMode<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.driver
    }
}

impl<D: Driver> Drop for RawMode<'_, D> {
    fn drop(&mut self) {
        if let Err(e) = self.driver.leave_raw_mode() {
            tracing::warn!("Failed to leave raw mode: {e}");
        }
    }
}
