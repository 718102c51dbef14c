//! Incremental in-place redraw.
//!
//! The renderer turns a [`View`] into the escape sequences needed to update
//! what is already on screen, without an alternate screen and without
//! scrolling:
//!
//! - Single-line views move the cursor back over the previously written input
//!   and rewrite it.
//! - List views erase exactly the rows written last time (wrap-aware) and
//!   re-emit the question line and one line per choice.
//!
//! On confirmation a single `question answer` line is left behind.
//!
//! Output always ends lines with `\r\n`, since raw mode disables the
//! terminal's own newline translation.

use std::{fmt::Display, io};

use crossterm::{
    cursor::{MoveLeft, MoveToPreviousLine},
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::prompt::{ListItem, View};

const SELECTED_BOX: &str = "[x]";
const UNSELECTED_BOX: &str = "[ ]";

/// What is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Nothing drawn yet.
    Blank,
    /// A single-line prompt; cursor sits after `input_width` columns of
    /// input.
    Line { input_width: usize },
    /// A list prompt occupying `rows` terminal rows; cursor at the start of
    /// the row below.
    List { rows: usize },
}

/// Per-prompt redraw state.
#[derive(Debug, Clone)]
pub struct Renderer {
    columns: u16,
    styled: bool,
    screen: Screen,
}

impl Renderer {
    /// Renderer for a terminal `columns` wide. `styled` enables bold/colour.
    pub fn new(columns: u16, styled: bool) -> Self {
        Self { columns, styled, screen: Screen::Blank }
    }

    /// Terminal rows written by the last list render (0 for line prompts).
    pub fn lines_written(&self) -> usize {
        match self.screen {
            Screen::List { rows } => rows,
            Screen::Blank | Screen::Line { .. } => 0,
        }
    }

    /// Escape sequences bringing the screen up to date with `view`.
    pub fn draw(&mut self, view: &View<'_>) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        match view {
            View::Line { question, input, suffix } => {
                self.draw_line(&mut out, question, input, *suffix)?;
            },
            View::List { question, summary, items } => {
                self.erase(&mut out)?;
                self.draw_list(&mut out, question, summary, items)?;
            },
        }
        Ok(out)
    }

    /// Replace the prompt with its finalized `question display` line.
    pub fn finish(&mut self, question: &str, display: &str) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        match self.screen {
            Screen::Line { input_width } => {
                move_left(&mut out, input_width)?;
                queue!(out, Clear(ClearType::UntilNewLine))?;
            },
            Screen::List { .. } => {
                self.erase(&mut out)?;
                self.question(&mut out, question)?;
                queue!(out, Print(" "))?;
            },
            Screen::Blank => {
                self.question(&mut out, question)?;
                queue!(out, Print(" "))?;
            },
        }
        self.answer(&mut out, display)?;
        queue!(out, Print("\r\n"))?;

        self.screen = Screen::Blank;
        Ok(out)
    }

    fn draw_line(
        &mut self,
        out: &mut Vec<u8>,
        question: &str,
        input: &str,
        suffix: Option<&str>,
    ) -> io::Result<()> {
        match self.screen {
            Screen::Line { input_width } => {
                move_left(out, input_width)?;
                queue!(out, Clear(ClearType::UntilNewLine))?;
            },
            Screen::Blank | Screen::List { .. } => {
                self.question(out, question)?;
                queue!(out, Print(" "))?;
            },
        }

        queue!(out, Print(input))?;
        if let Some(suffix) = suffix {
            let trailer = format!(" {suffix}");
            self.dim(out, &trailer)?;
            move_left(out, trailer.width())?;
        }

        self.screen = Screen::Line { input_width: input.width() };
        Ok(())
    }

    fn draw_list(
        &mut self,
        out: &mut Vec<u8>,
        question: &str,
        summary: &str,
        items: &[ListItem<'_>],
    ) -> io::Result<()> {
        self.question(out, question)?;
        queue!(out, Print(" "), Print(summary), Print("\r\n"))?;
        let mut rows = self.rows(question.width() + 1 + summary.width());

        for item in items {
            let marker = if item.highlighted { "> " } else { "  " };
            let line = match item.checked {
                Some(true) => format!("{marker}{SELECTED_BOX} {}", item.text),
                Some(false) => format!("{marker}{UNSELECTED_BOX} {}", item.text),
                None => format!("{marker}{}", item.text),
            };
            if item.highlighted {
                self.answer(out, &line)?;
            } else {
                queue!(out, Print(&line))?;
            }
            queue!(out, Print("\r\n"))?;
            rows += self.rows(line.width());
        }

        self.screen = Screen::List { rows };
        Ok(())
    }

    /// Erase the rows of the previous list render, leaving the cursor at the
    /// start of the first one.
    fn erase(&mut self, out: &mut Vec<u8>) -> io::Result<()> {
        if let Screen::List { rows } = self.screen {
            for _ in 0..rows {
                queue!(out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
            }
            self.screen = Screen::Blank;
        }
        Ok(())
    }

    /// Terminal rows taken by a line `width` columns wide.
    fn rows(&self, width: usize) -> usize {
        let columns = usize::from(self.columns);
        if columns == 0 { 1 } else { width.div_ceil(columns).max(1) }
    }

    fn question(&self, out: &mut Vec<u8>, text: &str) -> io::Result<()> {
        self.styled_print(out, text, Stylize::bold)
    }

    fn answer(&self, out: &mut Vec<u8>, text: &str) -> io::Result<()> {
        self.styled_print(out, text, Stylize::cyan)
    }

    fn dim(&self, out: &mut Vec<u8>, text: &str) -> io::Result<()> {
        self.styled_print(out, text, Stylize::dark_grey)
    }

    fn styled_print<'a, S>(
        &self,
        out: &mut Vec<u8>,
        text: &'a str,
        style: impl FnOnce(&'a str) -> S,
    ) -> io::Result<()>
    where
        S: Display,
    {
        if self.styled {
            queue!(out, Print(style(text)))
        } else {
            queue!(out, Print(text))
        }
    }
}

fn move_left(out: &mut Vec<u8>, columns: usize) -> io::Result<()> {
    // A zero count is read as one by most terminals.
    if columns > 0 {
        queue!(out, MoveLeft(u16::try_from(columns).unwrap_or(u16::MAX)))?;
    }
    Ok(())
}
