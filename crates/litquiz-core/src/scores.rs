//! JSON score store.
//!
//! One record per player, matched on the trimmed, lowercased name. The file
//! is read in full and rewritten in full on every update; missing or corrupt
//! content counts as an empty store.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::model::{name_key, ScoreRecord};

/// File-backed collection of [`ScoreRecord`]s.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record.
    ///
    /// A missing file or content that is not a JSON array of records yields
    /// an empty list. Other read failures are returned.
    pub fn load(&self) -> Result<Vec<ScoreRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read scores: {}", self.path.display()))
            }
        };

        match serde_json::from_slice::<Vec<ScoreRecord>>(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable scores file {}: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Insert or update the record for `name` and rewrite the file.
    ///
    /// An existing record keeps its stored name spelling; only score, total
    /// and the timeout flag are replaced. Returns the record as written.
    pub fn upsert(&self, name: &str, score: u32, total: u32, timed_out: bool) -> Result<ScoreRecord> {
        let mut records = self.load()?;
        let key = name_key(name);

        let record = match records.iter_mut().find(|r| r.key() == key) {
            Some(existing) => {
                existing.score = score;
                existing.total = total;
                existing.timed_out = timed_out;
                existing.clone()
            }
            None => {
                let record = ScoreRecord {
                    name: name.to_string(),
                    score,
                    total,
                    timed_out,
                };
                records.push(record.clone());
                record
            }
        };

        self.save(&records)?;
        tracing::info!(
            name = %record.name,
            score,
            total,
            timed_out,
            "saved score to {}",
            self.path.display()
        );
        Ok(record)
    }

    /// Records ordered best first: by score ratio, then score, then name.
    pub fn leaderboard(&self) -> Result<Vec<ScoreRecord>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| {
            b.ratio()
                .total_cmp(&a.ratio())
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.key().cmp(&b.key()))
        });
        Ok(records)
    }

    /// Replace the file with `records`, pretty-printed with 4-space indents.
    ///
    /// The content is written to a sibling temp file first and renamed into
    /// place, so readers see either the old or the new file.
    fn save(&self, records: &[ScoreRecord]) -> Result<()> {
        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
        records
            .serialize(&mut serializer)
            .context("failed to serialize scores")?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create scores directory: {}", parent.display())
                })?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(&json)
            .context("failed to write scores to temp file")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to write scores to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ScoreStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("scores.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_empty_and_overwritten() {
        let (_dir, store) = store();
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().unwrap().is_empty());

        store.upsert("Ada", 5, 20, false).unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
    }

    #[test]
    fn wrong_shape_is_treated_as_corrupt() {
        let (_dir, store) = store();
        std::fs::write(store.path(), r#"[{"name": "x"}]"#).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn upsert_appends_new_names() {
        let (_dir, store) = store();
        store.upsert("Ada", 5, 20, false).unwrap();
        store.upsert("Grace", 7, 20, true).unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Grace");
        assert!(records[1].timed_out);
    }

    #[test]
    fn upsert_overwrites_case_and_whitespace_insensitive() {
        let (_dir, store) = store();
        store.upsert("Ada", 5, 20, true).unwrap();
        let written = store.upsert("  aDA ", 18, 20, false).unwrap();

        assert_eq!(written.name, "Ada");
        let records = store.load().unwrap();
        assert_eq!(
            records,
            vec![ScoreRecord {
                name: "Ada".into(),
                score: 18,
                total: 20,
                timed_out: false,
            }]
        );
    }

    #[test]
    fn file_format_is_four_space_pretty_json() {
        let (_dir, store) = store();
        store.upsert("Ada", 20, 20, false).unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "[\n    {\n        \"name\": \"Ada\",\n        \"score\": 20,\n        \"total\": 20,\n        \"time_out\": false\n    }\n]"
        );
    }

    #[test]
    fn unreadable_path_is_an_error_not_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path());

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("failed to read scores"));

        assert!(store.upsert("Ada", 1, 2, false).is_err());
        assert!(store.leaderboard().is_err());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("nested/deeper/scores.json"));
        store.upsert("Ada", 1, 2, false).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn leaderboard_orders_best_first() {
        let (_dir, store) = store();
        store.upsert("low", 2, 20, true).unwrap();
        store.upsert("top", 20, 20, false).unwrap();
        store.upsert("Mid", 10, 20, false).unwrap();
        store.upsert("also-mid", 10, 20, false).unwrap();
        let names: Vec<String> = store
            .leaderboard()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["top", "also-mid", "Mid", "low"]);
    }
}
