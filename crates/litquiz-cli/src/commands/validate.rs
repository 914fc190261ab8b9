//! The `litquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use litquiz_core::bank::{self, QuestionBank};

pub fn execute(questions: Option<PathBuf>) -> Result<()> {
    let bank = match &questions {
        Some(path) => bank::parse_bank(path)?,
        None => QuestionBank::builtin()?,
    };

    println!("Question bank: {} ({} questions)", bank.name, bank.len());
    if !bank.description.is_empty() {
        println!("  {}", bank.description);
    }

    let warnings = bank::validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
