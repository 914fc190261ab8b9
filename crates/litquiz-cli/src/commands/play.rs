//! The `litquiz play` command.

use anyhow::{Context, Result};

use litquiz_core::bank::{self, QuestionBank};
use litquiz_core::config::load_config_from;
use litquiz_core::runtime::QuizLoop;
use litquiz_core::scores::ScoreStore;
use litquiz_core::session::Session;
use litquiz_core::traits::SystemClock;
use litquiz_core::view::View;
use litquiz_term::{terminal_width, TerminalInput, TerminalScreen};

use crate::PlayArgs;

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(path) = args.questions {
        config.questions_path = Some(path);
    }
    if let Some(path) = args.scores {
        config.scores_path = path;
    }
    if let Some(secs) = args.time_limit {
        config.time_limit_secs = secs;
    }
    if args.no_shuffle {
        config.shuffle = false;
    }

    crate::init_file_logging(config.log_file.as_deref())?;

    let mut bank = match &config.questions_path {
        Some(path) => bank::parse_bank(path)?,
        None => QuestionBank::builtin()?,
    };
    for w in bank::validate_bank(&bank) {
        match w.question {
            Some(n) => tracing::warn!(question = n, "{}", w.message),
            None => tracing::warn!("{}", w.message),
        }
    }
    if config.shuffle {
        bank.shuffle(&mut rand::thread_rng());
    }
    tracing::info!(
        bank = %bank.name,
        questions = bank.len(),
        time_limit_secs = config.time_limit_secs,
        "starting quiz"
    );

    let store = ScoreStore::new(&config.scores_path);
    let view = View::new(terminal_width(), config.scores_path.display().to_string());
    let quiz = QuizLoop::new(store, view).with_frame_interval(config.frame_interval());
    let session = Session::new(bank.questions, config.time_limit());

    let outcome = {
        let mut screen = TerminalScreen::enter()?;
        let mut input = TerminalInput::new();
        quiz.run(session, &mut screen, &mut input, &SystemClock)
            .context("quiz aborted")?
    };

    match outcome.saved {
        Some(record) => {
            println!(
                "{}: {}/{}{}",
                record.name,
                record.score,
                record.total,
                if record.timed_out { " (time expired)" } else { "" }
            );
            println!("Result saved to {}", config.scores_path.display());
        }
        None => println!("Quiz exited before the end; nothing saved."),
    }

    Ok(())
}
