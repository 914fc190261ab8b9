//! The render loop.
//!
//! One iteration per frame: wait up to one frame interval for input, feed
//! the events to the session in order, run the timer check, persist the
//! result if the quiz just ended, then redraw.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::ScoreRecord;
use crate::scores::ScoreStore;
use crate::session::{Completion, Session};
use crate::traits::{Clock, InputEvent, InputSource, Screen};
use crate::view::View;

/// What the loop leaves behind when the player quits.
#[derive(Debug)]
pub struct LoopOutcome {
    /// Final session state.
    pub session: Session,
    /// The record written when the quiz ended, if it did.
    pub saved: Option<ScoreRecord>,
    /// Frames presented.
    pub frames: u64,
}

/// Drives a [`Session`] against a screen, an input source and a clock.
pub struct QuizLoop {
    store: ScoreStore,
    view: View,
    frame_interval: Duration,
}

impl QuizLoop {
    pub fn new(store: ScoreStore, view: View) -> Self {
        Self {
            store,
            view,
            frame_interval: Duration::from_secs(1) / 30,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// Run until the input source reports `Quit`.
    pub fn run(
        &self,
        mut session: Session,
        screen: &mut dyn Screen,
        input: &mut dyn InputSource,
        clock: &dyn Clock,
    ) -> Result<LoopOutcome> {
        let mut saved = None;
        let mut frames = 0u64;

        self.draw(&session, screen, clock)?;
        frames += 1;

        loop {
            for event in input.poll(self.frame_interval)? {
                match event {
                    InputEvent::Quit => {
                        tracing::info!(frames, finished = session.is_finished(), "quit");
                        return Ok(LoopOutcome {
                            session,
                            saved,
                            frames,
                        });
                    }
                    InputEvent::Key(key) => {
                        if let Some(done) = session.handle_key(key, clock.now()) {
                            saved = Some(self.persist(&done)?);
                        }
                    }
                }
            }

            if let Some(done) = session.tick(clock.now()) {
                saved = Some(self.persist(&done)?);
            }

            self.draw(&session, screen, clock)?;
            frames += 1;
        }
    }

    fn persist(&self, done: &Completion) -> Result<ScoreRecord> {
        self.store
            .upsert(&done.name, done.score, done.total, done.timed_out)
            .context("failed to save quiz result")
    }

    fn draw(&self, session: &Session, screen: &mut dyn Screen, clock: &dyn Clock) -> Result<()> {
        screen.clear()?;
        for item in self.view.render(session, clock.now()) {
            screen.draw_text(&item.text, item.position, item.color)?;
        }
        screen.present()
    }
}
