//! Quiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level litquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Seconds allowed for the whole quiz, counted from name entry.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Render loop rate.
    #[serde(default = "default_fps")]
    pub frames_per_second: u32,
    /// Where score records are kept.
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
    /// Custom question bank; the built-in bank is used when unset.
    #[serde(default)]
    pub questions_path: Option<PathBuf>,
    /// Shuffle questions once at startup.
    #[serde(default = "default_true")]
    pub shuffle: bool,
    /// Log file for the interactive quiz (logs are discarded when unset).
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_time_limit() -> u64 {
    120
}
fn default_fps() -> u32 {
    30
}
fn default_scores_path() -> PathBuf {
    PathBuf::from("scores.json")
}
fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            frames_per_second: default_fps(),
            scores_path: default_scores_path(),
            questions_path: None,
            shuffle: true,
            log_file: None,
        }
    }
}

impl QuizConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Time budget of one render loop iteration.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order when `path` is `None`:
/// 1. `litquiz.toml` in the current directory
/// 2. `~/.config/litquiz/config.toml`
///
/// Environment variable overrides: `LITQUIZ_SCORES_PATH`, `LITQUIZ_TIME_LIMIT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("litquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(scores) = std::env::var("LITQUIZ_SCORES_PATH") {
        config.scores_path = PathBuf::from(scores);
    }
    if let Ok(limit) = std::env::var("LITQUIZ_TIME_LIMIT") {
        config.time_limit_secs = limit
            .trim()
            .parse()
            .with_context(|| format!("LITQUIZ_TIME_LIMIT is not a number of seconds: {limit}"))?;
    }

    config.scores_path = resolve_path(&config.scores_path);
    config.questions_path = config.questions_path.as_deref().map(resolve_path);
    config.log_file = config.log_file.as_deref().map(resolve_path);

    if let Some(path) = &config_path {
        tracing::debug!("loaded config from {}", path.display());
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("litquiz"))
}
