//! The `litquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("litquiz.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("questions.toml"), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Edit questions.toml with your own questions");
    println!("  2. Run: litquiz validate --questions questions.toml");
    println!("  3. Run: litquiz play --questions questions.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# litquiz configuration

time_limit_secs = 120
frames_per_second = 30
scores_path = "scores.json"
shuffle = true

# questions_path = "questions.toml"
# log_file = "${HOME}/.cache/litquiz/litquiz.log"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
name = "Example Quiz"
description = "A few container literals to get started"

[[questions]]
prompt = "Create a list with the numbers 1, 2 and 3."
expected = "[1, 2, 3]"

[[questions]]
prompt = "Create a tuple holding the strings 'x' and 'y'."
expected = "('x', 'y')"

[[questions]]
prompt = "Create a dictionary mapping 'one' to 1 and 'two' to 2."
expected = "{'one': 1, 'two': 2}"

[[questions]]
prompt = "Create a tuple with a single element, 7."
expected = "(7,)"
kind = "tuple"
"#;
