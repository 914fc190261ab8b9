//! Scripted collaborators for driving the render loop in tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::traits::{Clock, Color, InputEvent, InputSource, Key, Position, Screen, TextItem};

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Input replayed frame by frame.
///
/// Each call to `poll` consumes one scripted frame: the shared clock is
/// advanced by the frame's delay and its events are returned. Once the
/// script is exhausted every poll yields `Quit`.
#[derive(Debug)]
pub struct ScriptedInput {
    clock: ManualClock,
    frames: VecDeque<(Duration, Vec<InputEvent>)>,
}

impl ScriptedInput {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            frames: VecDeque::new(),
        }
    }

    /// Queue a frame that arrives `after` the previous one.
    pub fn frame(mut self, after: Duration, events: Vec<InputEvent>) -> Self {
        self.frames.push_back((after, events));
        self
    }

    /// Queue a frame that types `text` and presses Enter.
    pub fn line(self, after: Duration, text: &str) -> Self {
        let mut events: Vec<InputEvent> = text.chars().map(|c| InputEvent::Key(Key::Char(c))).collect();
        events.push(InputEvent::Key(Key::Enter));
        self.frame(after, events)
    }

    /// Queue an empty frame `after` the previous one.
    pub fn idle(self, after: Duration) -> Self {
        self.frame(after, Vec::new())
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> Result<Vec<InputEvent>> {
        match self.frames.pop_front() {
            Some((after, events)) => {
                self.clock.advance(after);
                Ok(events)
            }
            None => Ok(vec![InputEvent::Quit]),
        }
    }
}

/// A screen that keeps every presented frame.
#[derive(Debug, Default)]
pub struct RecordingScreen {
    pending: Vec<TextItem>,
    frames: Vec<Vec<TextItem>>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&[TextItem]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Whether any item in the last frame contains `needle`.
    pub fn last_frame_contains(&self, needle: &str) -> bool {
        self.last_frame()
            .is_some_and(|items| items.iter().any(|i| i.text.contains(needle)))
    }
}

impl Screen for RecordingScreen {
    fn clear(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Position, color: Color) -> Result<()> {
        self.pending.push(TextItem {
            text: text.to_string(),
            position,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(self.pending.clone());
        Ok(())
    }
}
