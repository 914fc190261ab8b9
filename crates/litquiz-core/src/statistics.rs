//! Aggregate statistics over stored score records.

use serde::{Deserialize, Serialize};

use crate::model::ScoreRecord;

/// Summary of a score store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Distinct players on record.
    pub players: usize,
    /// Players whose last attempt ran out of time.
    pub timed_out: usize,
    /// Players with every question right.
    pub perfect: usize,
    /// Mean of per-player score ratios, in `[0.0, 1.0]`.
    pub mean_ratio: f64,
    /// Highest ratio on record (first in store order on ties).
    pub best: Option<ScoreRecord>,
}

/// Compute a [`ScoreSummary`] from records.
pub fn summarize(records: &[ScoreRecord]) -> ScoreSummary {
    let players = records.len();
    let timed_out = records.iter().filter(|r| r.timed_out).count();
    let perfect = records
        .iter()
        .filter(|r| r.total > 0 && r.score == r.total)
        .count();

    let mean_ratio = if players == 0 {
        0.0
    } else {
        records.iter().map(ScoreRecord::ratio).sum::<f64>() / players as f64
    };

    let best = records
        .iter()
        .fold(None::<&ScoreRecord>, |best, r| match best {
            Some(b) if b.ratio() >= r.ratio() => Some(b),
            _ => Some(r),
        })
        .cloned();

    ScoreSummary {
        players,
        timed_out,
        perfect,
        mean_ratio,
        best,
    }
}
