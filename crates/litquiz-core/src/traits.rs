//! Collaborator traits for the render loop.
//!
//! The quiz core never talks to a terminal directly. It draws through a
//! [`Screen`], reads keys from an [`InputSource`] and tells time with a
//! [`Clock`]. `litquiz-term` implements the first two with crossterm; the
//! [`mock`](crate::mock) module has scripted versions for tests.

use std::time::{Duration, Instant};

use anyhow::Result;

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Cell position on screen, zero-based (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub col: u16,
    pub row: u16,
}

impl Position {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// Text colors used by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// The terminal's normal foreground.
    Default,
    Green,
    Red,
}

/// One positioned, colored run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub text: String,
    pub position: Position,
    pub color: Color,
}

/// Something the quiz can be drawn on.
pub trait Screen {
    /// Start a new frame with a blank screen.
    fn clear(&mut self) -> Result<()>;

    /// Queue `text` at `position`.
    fn draw_text(&mut self, text: &str, position: Position, color: Color) -> Result<()>;

    /// Show everything queued since the last `clear`.
    fn present(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A key the quiz reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    /// A printable character.
    Char(char),
}

/// Discrete input events, delivered in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(Key),
}

/// Source of input events.
pub trait InputSource {
    /// Return the events that arrived within `timeout`.
    ///
    /// Implementations wait up to `timeout` for the first event, which paces
    /// the render loop, and then drain whatever else is already queued.
    fn poll(&mut self, timeout: Duration) -> Result<Vec<InputEvent>>;
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
