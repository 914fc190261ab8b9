//! Core data model types for litquiz.
//!
//! Questions, container kinds and the persisted score record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::literal::Value;

/// The container category an answer must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    List,
    Tuple,
    Dict,
    Set,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::List => write!(f, "list"),
            Kind::Tuple => write!(f, "tuple"),
            Kind::Dict => write!(f, "dict"),
            Kind::Set => write!(f, "set"),
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Kind::List),
            "tuple" => Ok(Kind::Tuple),
            "dict" | "dictionary" | "mapping" => Ok(Kind::Dict),
            "set" => Ok(Kind::Set),
            other => Err(format!("unknown kind: {other}")),
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Text shown to the player.
    pub prompt: String,
    /// The value a correct answer must evaluate to.
    pub expected: Value,
    /// The container kind a correct answer must have.
    pub kind: Kind,
}

impl Question {
    pub fn new(prompt: impl Into<String>, expected: Value, kind: Kind) -> Self {
        Self {
            prompt: prompt.into(),
            expected,
            kind,
        }
    }
}

/// One player's latest result, as stored in the scores file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player name as first entered.
    pub name: String,
    /// Correct answers.
    pub score: u32,
    /// Number of questions in the quiz.
    pub total: u32,
    /// Whether the quiz ended because the timer ran out.
    #[serde(rename = "time_out")]
    pub timed_out: bool,
}

impl ScoreRecord {
    /// Fraction of questions answered correctly, `0.0` for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.total)
        }
    }

    /// Key used to match records: trimmed, lowercased name.
    pub fn key(&self) -> String {
        name_key(&self.name)
    }
}

/// Normalize a player name for case- and whitespace-insensitive matching.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(Kind::List.to_string(), "list");
        assert_eq!(Kind::Dict.to_string(), "dict");
        assert_eq!("tuple".parse::<Kind>().unwrap(), Kind::Tuple);
        assert_eq!("Dictionary".parse::<Kind>().unwrap(), Kind::Dict);
        assert_eq!(" SET ".parse::<Kind>().unwrap(), Kind::Set);
        assert!("str".parse::<Kind>().is_err());
    }

    #[test]
    fn score_record_uses_time_out_field_name() {
        let record = ScoreRecord {
            name: "Ada".into(),
            score: 3,
            total: 20,
            timed_out: true,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Ada","score":3,"total":20,"time_out":true}"#
        );
        let back: ScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn ratio_handles_empty_quiz() {
        let record = ScoreRecord {
            name: "x".into(),
            score: 0,
            total: 0,
            timed_out: false,
        };
        assert_eq!(record.ratio(), 0.0);
    }

    #[test]
    fn name_key_trims_and_lowercases() {
        assert_eq!(name_key("  Grace Hopper \t"), "grace hopper");
    }
}
