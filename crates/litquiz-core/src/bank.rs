//! Question banks: the built-in set and TOML-defined custom banks.
//!
//! Expected answers are written as Python literal text and parsed with the
//! same parser that checks player answers.

use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::literal;
use crate::model::{Kind, Question};

/// The questions shipped with litquiz: (prompt, expected literal, kind).
const BUILTIN: &[(&str, &str, Kind)] = &[
    ("Create a list with the numbers 1, 2, 3", "[1, 2, 3]", Kind::List),
    ("Create a tuple with the numbers 4, 5, 6", "(4, 5, 6)", Kind::Tuple),
    (
        "Create a dictionary with keys 'a' and 'b' and values 1 and 2",
        "{'a': 1, 'b': 2}",
        Kind::Dict,
    ),
    ("Create an empty list", "[]", Kind::List),
    ("Create an empty dictionary", "{}", Kind::Dict),
    ("Create a tuple with one element: number 7", "(7,)", Kind::Tuple),
    (
        "Create a list of strings: 'apple', 'banana'",
        "['apple', 'banana']",
        Kind::List,
    ),
    (
        "Create a dictionary with 'name': 'John', 'age': 30",
        "{'name': 'John', 'age': 30}",
        Kind::Dict,
    ),
    (
        "Create a list with nested list: [1, [2, 3]]",
        "[1, [2, 3]]",
        Kind::List,
    ),
    (
        "Create a tuple with mixed types: 1, 'a', True",
        "(1, 'a', True)",
        Kind::Tuple,
    ),
    (
        "Create a dictionary with int key 1 and value 'one'",
        "{1: 'one'}",
        Kind::Dict,
    ),
    (
        "Create a list using range from 0 to 4: [0, 1, 2, 3, 4]",
        "[0, 1, 2, 3, 4]",
        Kind::List,
    ),
    (
        "Create a tuple with numbers from 10 to 12",
        "(10, 11, 12)",
        Kind::Tuple,
    ),
    (
        "Create a dict with 'x': 100 and 'y': 200",
        "{'x': 100, 'y': 200}",
        Kind::Dict,
    ),
    (
        "Create a list with repeated element 5, five times",
        "[5, 5, 5, 5, 5]",
        Kind::List,
    ),
    (
        "Create a tuple with values 1 to 3 using tuple()",
        "(1, 2, 3)",
        Kind::Tuple,
    ),
    (
        "Create a dictionary with boolean keys True and False",
        "{True: 'yes', False: 'no'}",
        Kind::Dict,
    ),
    (
        "Create a list containing a dictionary: [{'a': 1}]",
        "[{'a': 1}]",
        Kind::List,
    ),
    (
        "Create a tuple with another tuple inside: (1, (2, 3))",
        "(1, (2, 3))",
        Kind::Tuple,
    ),
    (
        "Create a dictionary with a tuple as key: {(1, 2): 'pair'}",
        "{(1, 2): 'pair'}",
        Kind::Dict,
    ),
];

/// A named, ordered collection of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The 20 built-in Python container questions, in authoring order.
    pub fn builtin() -> Result<Self> {
        let questions = BUILTIN
            .iter()
            .map(|&(prompt, expected, kind)| {
                let value = literal::parse(expected)
                    .with_context(|| format!("built-in answer {expected:?} does not parse"))?;
                Ok(Question::new(prompt, value, kind))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: "Python Syntax Quiz".to_string(),
            description: "Build lists, tuples and dictionaries as Python literals".to_string(),
            questions,
        })
    }

    /// Shuffle the questions in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    expected: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Parse a question bank TOML file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse question bank TOML from a string (useful for testing).
///
/// `kind` may be omitted when the expected literal is itself a container.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let number = i + 1;
            let expected = literal::parse(&q.expected).with_context(|| {
                format!("question {number}: expected answer {:?} is not a literal", q.expected)
            })?;
            let kind = match q.kind {
                Some(kind) => kind
                    .parse::<Kind>()
                    .map_err(|e| anyhow::anyhow!("question {number}: {e}"))?,
                None => expected.kind().with_context(|| {
                    format!(
                        "question {number}: cannot infer kind from a {} answer",
                        expected.type_name()
                    )
                })?,
            };
            Ok(Question::new(q.prompt, expected, kind))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions".into(),
        });
    }

    // Check for duplicate prompts
    let mut seen = std::collections::HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if !seen.insert(q.prompt.trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate prompt: {}", q.prompt),
            });
        }
    }

    // Check for empty prompts
    for (i, q) in bank.questions.iter().enumerate() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "prompt is empty".into(),
            });
        }
    }

    // An expected value of another kind can never be matched
    for (i, q) in bank.questions.iter().enumerate() {
        if q.expected.kind() != Some(q.kind) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!(
                    "kind is {} but the expected answer is a {}; no answer can be correct",
                    q.kind,
                    q.expected.type_name()
                ),
            });
        }
    }

    warnings
}
