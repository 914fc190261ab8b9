//! The quiz session state machine.
//!
//! A [`Session`] moves from name entry, through the timed quiz, to a
//! terminal finished state. Transitions take the current instant as an
//! argument and never touch the filesystem: when the quiz ends they hand
//! back a [`Completion`] for the caller to persist.

use std::fmt;
use std::time::{Duration, Instant};

use crate::model::Question;
use crate::traits::Key;
use crate::validator;

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Typing a player name.
    NameEntry,
    /// Answering questions; the clock started at `started`.
    InProgress { started: Instant },
    /// Done. No further input has any effect.
    Finished { timed_out: bool },
}

/// Message shown after an answer or when time runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// Carries the `repr` of the expected answer as a hint.
    Incorrect { example: String },
    TimeUp,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "Correct!"),
            Feedback::Incorrect { example } => write!(f, "Incorrect! Example: {example}"),
            Feedback::TimeUp => write!(f, "Time's up! Quiz ended."),
        }
    }
}

/// Final result handed to the caller exactly once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub name: String,
    pub score: u32,
    pub total: u32,
    pub timed_out: bool,
}

/// A single player's run through a question list.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    time_limit: Duration,
    name: String,
    input: String,
    score: u32,
    index: usize,
    phase: Phase,
    feedback: Option<Feedback>,
}

impl Session {
    /// A session in name entry over `questions`, in the given order.
    pub fn new(questions: Vec<Question>, time_limit: Duration) -> Self {
        Self {
            questions,
            time_limit,
            name: String::new(),
            input: String::new(),
            score: 0,
            index: 0,
            phase: Phase::NameEntry,
            feedback: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Answer text typed so far for the current question.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Zero-based index of the current question; equals [`total`](Self::total)
    /// once every question has been answered.
    pub fn question_index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// The question being answered, while the quiz is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress { .. } => self.questions.get(self.index),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.phase, Phase::Finished { timed_out: true })
    }

    /// Whole seconds left on the clock: the limit minus the whole seconds
    /// elapsed, never below zero. The full limit before the quiz starts,
    /// zero after it ends.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        match self.phase {
            Phase::NameEntry => self.time_limit.as_secs(),
            Phase::InProgress { started } => self
                .time_limit
                .as_secs()
                .saturating_sub(now.saturating_duration_since(started).as_secs()),
            Phase::Finished { .. } => 0,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key, now: Instant) -> Option<Completion> {
        match self.phase {
            Phase::Finished { .. } => None,
            Phase::NameEntry => match key {
                Key::Enter => self.start(now),
                Key::Backspace => {
                    self.name.pop();
                    None
                }
                Key::Char(c) => {
                    if !c.is_control() {
                        self.name.push(c);
                    }
                    None
                }
            },
            Phase::InProgress { started } => match key {
                Key::Enter => self.submit(started, now),
                Key::Backspace => {
                    self.input.pop();
                    None
                }
                Key::Char(c) => {
                    if !c.is_control() {
                        self.input.push(c);
                    }
                    None
                }
            },
        }
    }

    /// Per-frame timer check: ends the quiz once the limit is reached even
    /// if no key is pressed.
    pub fn tick(&mut self, now: Instant) -> Option<Completion> {
        match self.phase {
            Phase::InProgress { started }
                if now.saturating_duration_since(started) >= self.time_limit =>
            {
                self.feedback = Some(Feedback::TimeUp);
                Some(self.finish(true))
            }
            _ => None,
        }
    }

    fn start(&mut self, now: Instant) -> Option<Completion> {
        if self.name.trim().is_empty() {
            return None;
        }
        self.phase = Phase::InProgress { started: now };
        tracing::info!(
            player = %self.name.trim(),
            questions = self.questions.len(),
            "quiz started"
        );
        if self.questions.is_empty() {
            return Some(self.finish(false));
        }
        None
    }

    fn submit(&mut self, started: Instant, now: Instant) -> Option<Completion> {
        if now.saturating_duration_since(started) >= self.time_limit {
            self.feedback = Some(Feedback::TimeUp);
            return Some(self.finish(true));
        }

        let Some(question) = self.questions.get(self.index) else {
            return Some(self.finish(false));
        };

        let verdict = validator::judge(&self.input, &question.expected, question.kind);
        tracing::debug!(
            question = self.index + 1,
            answer = %self.input,
            ?verdict,
            "answer checked"
        );

        self.feedback = Some(if verdict.is_correct() {
            self.score += 1;
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                example: question.expected.to_string(),
            }
        });
        self.index += 1;
        self.input.clear();

        if self.index >= self.questions.len() {
            return Some(self.finish(false));
        }
        None
    }

    fn finish(&mut self, timed_out: bool) -> Completion {
        self.phase = Phase::Finished { timed_out };
        let completion = Completion {
            name: self.name.trim().to_string(),
            score: self.score,
            total: self.total(),
            timed_out,
        };
        tracing::info!(
            player = %completion.name,
            score = completion.score,
            total = completion.total,
            timed_out,
            "quiz finished"
        );
        completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;
    use crate::literal;
    use crate::model::Kind;

    const LIMIT: Duration = Duration::from_secs(120);

    fn questions() -> Vec<Question> {
        vec![
            Question::new("list", literal::parse("[1, 2, 3]").unwrap(), Kind::List),
            Question::new("tuple", literal::parse("(7,)").unwrap(), Kind::Tuple),
            Question::new("dict", literal::parse("{'a': 1}").unwrap(), Kind::Dict),
        ]
    }

    fn type_text(session: &mut Session, text: &str, now: Instant) {
        for c in text.chars() {
            assert!(session.handle_key(Key::Char(c), now).is_none());
        }
    }

    fn started(t0: Instant) -> Session {
        let mut session = Session::new(questions(), LIMIT);
        type_text(&mut session, "Ada", t0);
        assert!(session.handle_key(Key::Enter, t0).is_none());
        session
    }

    fn answer(session: &mut Session, text: &str, now: Instant) -> Option<Completion> {
        type_text(session, text, now);
        session.handle_key(Key::Enter, now)
    }

    #[test]
    fn name_entry_edits_and_starts() {
        let t0 = Instant::now();
        let mut session = Session::new(questions(), LIMIT);
        type_text(&mut session, "Adx", t0);
        session.handle_key(Key::Backspace, t0);
        type_text(&mut session, "a", t0);
        assert_eq!(session.name(), "Ada");
        assert_eq!(session.phase(), Phase::NameEntry);

        session.handle_key(Key::Enter, t0);
        assert_eq!(session.phase(), Phase::InProgress { started: t0 });
        assert_eq!(session.current_question().unwrap().prompt, "list");
        assert_eq!(session.input(), "");
    }

    #[test]
    fn blank_name_does_not_start() {
        let t0 = Instant::now();
        let mut session = Session::new(questions(), LIMIT);
        assert!(session.handle_key(Key::Enter, t0).is_none());
        type_text(&mut session, "   ", t0);
        assert!(session.handle_key(Key::Enter, t0).is_none());
        assert_eq!(session.phase(), Phase::NameEntry);
    }

    #[test]
    fn control_characters_are_ignored() {
        let t0 = Instant::now();
        let mut session = Session::new(questions(), LIMIT);
        session.handle_key(Key::Char('\t'), t0);
        session.handle_key(Key::Char('\u{7f}'), t0);
        assert_eq!(session.name(), "");
    }

    #[test]
    fn answers_advance_and_score() {
        let t0 = Instant::now();
        let mut session = started(t0);

        assert!(answer(&mut session, "[1, 2, 3]", t0).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.question_index(), 1);
        assert_eq!(session.feedback(), Some(&Feedback::Correct));
        assert_eq!(session.input(), "");

        assert!(answer(&mut session, "(7)", t0).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.question_index(), 2);
        assert_eq!(
            session.feedback().unwrap().to_string(),
            "Incorrect! Example: (7,)"
        );

        let done = answer(&mut session, "{'a': 1}", t0).unwrap();
        assert_eq!(
            done,
            Completion {
                name: "Ada".into(),
                score: 2,
                total: 3,
                timed_out: false,
            }
        );
        assert!(session.is_finished());
        assert!(!session.timed_out());
        assert_eq!(session.question_index(), 3);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn backspace_edits_answer() {
        let t0 = Instant::now();
        let mut session = started(t0);
        type_text(&mut session, "[1, 2, 3]]", t0);
        session.handle_key(Key::Backspace, t0);
        assert_eq!(session.input(), "[1, 2, 3]");
        session.handle_key(Key::Enter, t0);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn empty_answer_is_incorrect_and_advances() {
        let t0 = Instant::now();
        let mut session = started(t0);
        assert!(session.handle_key(Key::Enter, t0).is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.question_index(), 1);
    }

    #[test]
    fn enter_after_limit_times_out_without_grading() {
        let t0 = Instant::now();
        let mut session = started(t0);
        type_text(&mut session, "[1, 2, 3]", t0);

        let done = session.handle_key(Key::Enter, t0 + LIMIT).unwrap();
        assert!(done.timed_out);
        assert_eq!(done.score, 0);
        assert_eq!(session.question_index(), 0);
        assert_eq!(session.feedback(), Some(&Feedback::TimeUp));
        assert!(session.timed_out());
    }

    #[test]
    fn tick_times_out_once() {
        let t0 = Instant::now();
        let mut session = started(t0);
        assert!(session.tick(t0 + LIMIT - Duration::from_millis(1)).is_none());

        let done = session.tick(t0 + LIMIT).unwrap();
        assert!(done.timed_out);
        assert!(session.tick(t0 + LIMIT * 2).is_none());
        assert!(session.handle_key(Key::Enter, t0 + LIMIT * 2).is_none());
    }

    #[test]
    fn finished_session_ignores_input() {
        let t0 = Instant::now();
        let mut session = started(t0);
        session.tick(t0 + LIMIT);
        session.handle_key(Key::Char('x'), t0 + LIMIT);
        session.handle_key(Key::Backspace, t0 + LIMIT);
        assert_eq!(session.input(), "");
        assert_eq!(session.name(), "Ada");
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let t0 = Instant::now();
        let mut session = Session::new(questions(), LIMIT);
        assert!(session.tick(t0 + LIMIT * 10).is_none());
        assert_eq!(session.phase(), Phase::NameEntry);
    }

    #[test]
    fn remaining_counts_down_whole_seconds() {
        let t0 = Instant::now();
        let mut session = Session::new(questions(), LIMIT);
        assert_eq!(session.remaining_secs(t0), 120);
        type_text(&mut session, "Ada", t0);
        session.handle_key(Key::Enter, t0);
        assert_eq!(session.remaining_secs(t0 + Duration::from_millis(999)), 120);
        assert_eq!(session.remaining_secs(t0 + Duration::from_millis(1500)), 119);
        assert_eq!(session.remaining_secs(t0 + LIMIT * 3), 0);
    }

    #[test]
    fn timer_is_not_reset_by_answers() {
        let t0 = Instant::now();
        let mut session = started(t0);
        answer(&mut session, "[1, 2, 3]", t0 + Duration::from_secs(100));
        assert_eq!(session.remaining_secs(t0 + Duration::from_secs(110)), 10);
        assert!(session.tick(t0 + LIMIT).unwrap().timed_out);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn empty_bank_finishes_on_start() {
        let t0 = Instant::now();
        let mut session = Session::new(Vec::new(), LIMIT);
        type_text(&mut session, "Ada", t0);
        let done = session.handle_key(Key::Enter, t0).unwrap();
        assert_eq!((done.score, done.total, done.timed_out), (0, 0, false));
    }

    #[test]
    fn completion_name_is_trimmed() {
        let t0 = Instant::now();
        let mut session = Session::new(Vec::new(), LIMIT);
        type_text(&mut session, "  Ada ", t0);
        assert_eq!(session.handle_key(Key::Enter, t0).unwrap().name, "Ada");
    }

    #[test]
    fn all_builtin_questions_answered_correctly() {
        let t0 = Instant::now();
        let bank = QuestionBank::builtin().unwrap();
        let answers: Vec<String> = bank.questions.iter().map(|q| q.expected.to_string()).collect();
        let mut session = Session::new(bank.questions, LIMIT);
        type_text(&mut session, "Ada", t0);
        session.handle_key(Key::Enter, t0);

        let mut completion = None;
        for (i, text) in answers.iter().enumerate() {
            let now = t0 + Duration::from_secs(i as u64);
            assert!(session.score() <= session.total());
            completion = answer(&mut session, text, now);
        }
        let done = completion.unwrap();
        assert_eq!((done.score, done.total, done.timed_out), (20, 20, false));
    }
}
