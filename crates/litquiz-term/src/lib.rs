//! litquiz-term: crossterm implementations of the quiz's `Screen` and
//! `InputSource`.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use litquiz_core::traits::{Color, InputEvent, InputSource, Key, Position, Screen};

/// Width used when the terminal size cannot be read.
pub const FALLBACK_WIDTH: u16 = 80;

/// Current terminal width in columns.
pub fn terminal_width() -> u16 {
    match terminal::size() {
        Ok((cols, _)) if cols > 0 => cols,
        Ok(_) => FALLBACK_WIDTH,
        Err(e) => {
            tracing::debug!("terminal size unavailable: {e}");
            FALLBACK_WIDTH
        }
    }
}

/// The alternate screen in raw mode.
///
/// Entering puts the terminal in raw mode on the alternate screen with the
/// cursor hidden; dropping the value puts it back.
pub struct TerminalScreen {
    out: Stdout,
}

impl TerminalScreen {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        tracing::debug!("terminal entered");
        Ok(Self { out })
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        tracing::debug!("terminal restored");
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Position, color: Color) -> Result<()> {
        queue!(
            self.out,
            MoveTo(position.col, position.row),
            SetForegroundColor(term_color(color)),
            Print(text),
            ResetColor
        )?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush terminal")
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Green => TermColor::Green,
        Color::Red => TermColor::Red,
    }
}

/// Keyboard input read through crossterm's event queue.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        if !event::poll(timeout).context("failed to poll terminal events")? {
            return Ok(events);
        }
        loop {
            let read = event::read().context("failed to read terminal event")?;
            if let Event::Key(key) = read {
                if let Some(mapped) = map_key(key) {
                    events.push(mapped);
                }
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(events)
    }
}

/// Translate a crossterm key event. Releases, repeats and keys the quiz
/// does not use map to `None`.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Some(InputEvent::Quit),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(InputEvent::Key(Key::Char(c))),
        KeyCode::Enter => Some(InputEvent::Key(Key::Enter)),
        KeyCode::Backspace => Some(InputEvent::Key(Key::Backspace)),
        _ => None,
    }
}
