//! The `litquiz scores` command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::{Cell, Color, Table};

use litquiz_core::config::load_config_from;
use litquiz_core::model::ScoreRecord;
use litquiz_core::scores::ScoreStore;
use litquiz_core::statistics::{summarize, ScoreSummary};

pub fn execute(scores: Option<PathBuf>, format: String, config: Option<PathBuf>) -> Result<()> {
    let path = match scores {
        Some(path) => path,
        None => load_config_from(config.as_deref())?.scores_path,
    };
    let store = ScoreStore::new(path);
    let records = store.leaderboard()?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        "text" => {
            if records.is_empty() {
                println!("No scores recorded in {}.", store.path().display());
            } else {
                print_leaderboard(&records);
                print_summary(&summarize(&records));
            }
        }
        other => bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_leaderboard(records: &[ScoreRecord]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Score", "Percent", "Timed out"]);

    for (rank, r) in records.iter().enumerate() {
        let percent = Cell::new(format!("{:.1}%", r.ratio() * 100.0));
        let timed_out = if r.timed_out {
            Cell::new("yes").fg(Color::Red)
        } else {
            Cell::new("no")
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&r.name),
            Cell::new(format!("{}/{}", r.score, r.total)),
            percent,
            timed_out,
        ]);
    }

    println!("{table}");
}

fn print_summary(summary: &ScoreSummary) {
    println!(
        "\n{} player(s), {} perfect, {} timed out, mean {:.1}%",
        summary.players,
        summary.perfect,
        summary.timed_out,
        summary.mean_ratio * 100.0
    );
    if let Some(best) = &summary.best {
        println!("Best: {} ({}/{})", best.name, best.score, best.total);
    }
}
