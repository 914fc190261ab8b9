//! litquiz CLI: the terminal quiz and its housekeeping commands.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "litquiz", version, about = "Timed Python literal syntax quiz")]
struct Cli {
    /// Defaults to `play`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz
    Play(PlayArgs),

    /// Show the leaderboard
    Scores {
        /// Scores file (default from config)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question bank file
    Validate {
        /// Question bank TOML (the built-in bank when omitted)
        #[arg(long)]
        questions: Option<PathBuf>,
    },

    /// Create a starter config and question bank
    Init,
}

#[derive(Args, Default)]
pub struct PlayArgs {
    /// Question bank TOML (default: built-in questions)
    #[arg(long)]
    pub questions: Option<PathBuf>,

    /// Scores file
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Time limit in seconds
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Keep the bank's question order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("litquiz=info".parse()?))
}

/// Log to stderr.
fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Log to `path`, appending. The quiz owns the terminal, so without a log
/// file nothing is installed and events are dropped.
pub(crate) fn init_file_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Play(args) => commands::play::execute(args),
        Commands::Scores {
            scores,
            format,
            config,
        } => {
            init_stderr_logging()?;
            commands::scores::execute(scores, format, config)
        }
        Commands::Validate { questions } => {
            init_stderr_logging()?;
            commands::validate::execute(questions)
        }
        Commands::Init => {
            init_stderr_logging()?;
            commands::init::execute()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Play(PlayArgs::default()));

    if let Err(e) = run(command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
