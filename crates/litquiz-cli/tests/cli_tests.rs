//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn litquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("litquiz").unwrap();
    cmd.env_remove("LITQUIZ_SCORES_PATH")
        .env_remove("LITQUIZ_TIME_LIMIT");
    cmd
}

const SCORES: &str = r#"[
    {"name": "Ada", "score": 18, "total": 20, "time_out": false},
    {"name": "Grace", "score": 20, "total": 20, "time_out": false},
    {"name": "Linus", "score": 4, "total": 20, "time_out": true}
]"#;

#[test]
fn help_lists_commands() {
    litquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("scores"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn validate_builtin_bank() {
    litquiz()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Python Syntax Quiz (20 questions)"))
        .stdout(predicate::str::contains(
            "  Build lists, tuples and dictionaries as Python literals",
        ))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_bank_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.toml");
    std::fs::write(
        &path,
        r#"
[bank]
name = "Mine"

[[questions]]
prompt = "Empty list"
expected = "[]"

[[questions]]
prompt = "Pair"
expected = "(1, 2)"
"#,
    )
    .unwrap();

    litquiz()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mine (2 questions)\nQuestion bank valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.toml");
    std::fs::write(
        &path,
        r#"
[bank]
name = "Sloppy"

[[questions]]
prompt = "Make a list"
expected = "(1, 2)"
kind = "list"

[[questions]]
prompt = "make a list "
expected = "[1]"
"#,
    )
    .unwrap();

    litquiz()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] WARNING"))
        .stdout(predicate::str::contains("no answer can be correct"))
        .stdout(predicate::str::contains("[2] WARNING: duplicate prompt"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_rejects_bad_literal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bank.toml");
    std::fs::write(
        &path,
        r#"
[bank]
name = "Broken"

[[questions]]
prompt = "Oops"
expected = "[1, 2"
"#,
    )
    .unwrap();

    litquiz()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("question 1"));
}

#[test]
fn validate_nonexistent_file() {
    litquiz()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn scores_empty_store() {
    let dir = TempDir::new().unwrap();

    litquiz()
        .current_dir(dir.path())
        .arg("scores")
        .arg("--scores")
        .arg("scores.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores recorded in scores.json."));
}

#[test]
fn scores_corrupt_store_is_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("scores.json"), "{ not json").unwrap();

    litquiz()
        .current_dir(dir.path())
        .arg("scores")
        .arg("--scores")
        .arg("scores.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores recorded"));
}

#[test]
fn scores_table_and_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, SCORES).unwrap();

    litquiz()
        .arg("scores")
        .arg("--scores")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Grace"))
        .stdout(predicate::str::contains("18/20"))
        .stdout(predicate::str::contains("3 player(s), 1 perfect, 1 timed out"))
        .stdout(predicate::str::contains("Best: Grace (20/20)"));
}

#[test]
fn scores_json_is_ranked() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, SCORES).unwrap();

    let output = litquiz()
        .arg("scores")
        .arg("--scores")
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let grace = stdout.find("Grace").unwrap();
    let ada = stdout.find("Ada").unwrap();
    let linus = stdout.find("Linus").unwrap();
    assert!(grace < ada && ada < linus);
    assert!(stdout.contains("\"time_out\": true"));
}

#[test]
fn scores_unknown_format() {
    let dir = TempDir::new().unwrap();

    litquiz()
        .current_dir(dir.path())
        .arg("scores")
        .arg("--scores")
        .arg("scores.json")
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    litquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created litquiz.toml"))
        .stdout(predicate::str::contains("Created questions.toml"));

    assert!(dir.path().join("litquiz.toml").exists());
    assert!(dir.path().join("questions.toml").exists());

    litquiz()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--questions")
        .arg("questions.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Quiz (4 questions)"))
        .stdout(predicate::str::contains("  A few container literals to get started"))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("litquiz.toml"), "shuffle = false\n").unwrap();

    litquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("litquiz.toml already exists, skipping."))
        .stdout(predicate::str::contains("Created questions.toml"));

    let config = std::fs::read_to_string(dir.path().join("litquiz.toml")).unwrap();
    assert_eq!(config, "shuffle = false\n");
}
