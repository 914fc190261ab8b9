//! Screen layout for each session phase.
//!
//! Pure: turns a session snapshot into positioned text, leaving the actual
//! drawing to a [`Screen`](crate::traits::Screen).

use std::time::Instant;

use crate::session::{Phase, Session};
use crate::traits::{Color, Position, TextItem};

/// Time left at or below which the countdown turns red.
pub const LOW_TIME_SECS: u64 = 10;

const LEFT: u16 = 2;
const CURSOR: char = '_';

/// Layout settings.
#[derive(Debug, Clone)]
pub struct View {
    /// Screen width in columns, used to right-align the countdown.
    pub width: u16,
    /// How the scores file is named on the results screen.
    pub scores_label: String,
}

impl View {
    pub fn new(width: u16, scores_label: impl Into<String>) -> Self {
        Self {
            width,
            scores_label: scores_label.into(),
        }
    }

    /// Lay out everything visible for `session` at `now`.
    pub fn render(&self, session: &Session, now: Instant) -> Vec<TextItem> {
        match session.phase() {
            Phase::NameEntry => vec![
                item("Enter your name and press Enter:", LEFT, 1, Color::Default),
                item(format!("{}{CURSOR}", session.name()), LEFT, 3, Color::Default),
            ],
            Phase::InProgress { .. } => self.quiz(session, now),
            Phase::Finished { timed_out } => self.results(session, timed_out),
        }
    }

    fn quiz(&self, session: &Session, now: Instant) -> Vec<TextItem> {
        let mut items = Vec::new();
        let heading = format!(
            "Question {}/{}:",
            session.question_index() + 1,
            session.total()
        );
        items.push(item(heading, LEFT, 1, Color::Default));

        let mut row = 2;
        if let Some(question) = session.current_question() {
            for line in question.prompt.lines() {
                items.push(item(line, LEFT, row, Color::Default));
                row += 1;
            }
        }

        row += 1;
        items.push(item("Your answer:", LEFT, row, Color::Default));
        row += 2;
        items.push(item(
            format!("{}{CURSOR}", session.input()),
            LEFT,
            row,
            Color::Default,
        ));
        row += 2;

        if let Some(feedback) = session.feedback() {
            let color = if feedback.is_correct() {
                Color::Green
            } else {
                Color::Red
            };
            items.push(item(feedback.to_string(), LEFT, row, color));
        }

        let remaining = session.remaining_secs(now);
        let countdown = format!("Time left: {remaining} seconds");
        let col = self
            .width
            .saturating_sub(text_width(&countdown).saturating_add(LEFT));
        let color = if remaining <= LOW_TIME_SECS {
            Color::Red
        } else {
            Color::Default
        };
        items.push(item(countdown, col, 0, color));

        items
    }

    fn results(&self, session: &Session, timed_out: bool) -> Vec<TextItem> {
        let title_color = if session.score() > 0 {
            Color::Green
        } else {
            Color::Red
        };
        let mut items = vec![
            item(
                format!("Quiz ended, {}!", session.name().trim()),
                LEFT,
                2,
                title_color,
            ),
            item(
                format!("Your final score: {}/{}", session.score(), session.total()),
                LEFT,
                4,
                Color::Default,
            ),
            item(
                format!("Result saved to {}", self.scores_label),
                LEFT,
                6,
                Color::Default,
            ),
        ];
        if timed_out {
            items.push(item("Time expired during the quiz.", LEFT, 8, Color::Red));
        }
        items.push(item("Press Esc to exit.", LEFT, 10, Color::Default));
        items
    }
}

fn item(text: impl Into<String>, col: u16, row: u16, color: Color) -> TextItem {
    TextItem {
        text: text.into(),
        position: Position::new(col, row),
        color,
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
