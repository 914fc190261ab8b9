//! Answer checking.

use crate::literal::{self, Value};
use crate::model::{Kind, Question};

/// Why an answer was judged the way it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Correct,
    /// The text is not a literal data expression.
    Unparseable(String),
    /// Parsed, but not the expected container kind.
    WrongKind { found: &'static str },
    /// Right kind, different contents.
    WrongValue,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Judge `answer` against an expected value and kind.
///
/// All-or-nothing: an answer that fails to parse, has another kind, or
/// differs in any element is incorrect.
pub fn judge(answer: &str, expected: &Value, kind: Kind) -> Verdict {
    let parsed = match literal::parse(answer) {
        Ok(value) => value,
        Err(e) => return Verdict::Unparseable(e.to_string()),
    };
    if parsed.kind() != Some(kind) {
        return Verdict::WrongKind {
            found: parsed.type_name(),
        };
    }
    if parsed == *expected {
        Verdict::Correct
    } else {
        Verdict::WrongValue
    }
}

/// `true` iff `answer` is a correct response to `question`.
pub fn is_correct(answer: &str, question: &Question) -> bool {
    judge(answer, &question.expected, question.kind).is_correct()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(expected: &str, kind: Kind) -> Question {
        Question::new("q", literal::parse(expected).unwrap(), kind)
    }

    #[test]
    fn list_answer_correct() {
        let q = question("[1, 2, 3]", Kind::List);
        assert!(is_correct("[1, 2, 3]", &q));
        assert!(is_correct("[1,2,3]", &q));
        assert!(is_correct("  [1, 2, 3,]  ", &q));
    }

    #[test]
    fn tuple_for_list_is_wrong_kind() {
        let q = question("[1, 2, 3]", Kind::List);
        assert_eq!(
            judge("(1,2,3)", &q.expected, q.kind),
            Verdict::WrongKind { found: "tuple" }
        );
    }

    #[test]
    fn dict_order_does_not_matter() {
        let q = question("{'a': 1, 'b': 2}", Kind::Dict);
        assert!(is_correct("{'a':1,'b':2}", &q));
        assert!(is_correct("{'b': 2, 'a': 1}", &q));
        assert!(!is_correct("{'a': 1}", &q));
    }

    #[test]
    fn sequence_order_matters() {
        let q = question("[1, 2, 3]", Kind::List);
        assert_eq!(judge("[3, 2, 1]", &q.expected, q.kind), Verdict::WrongValue);
    }

    #[test]
    fn malformed_input_is_incorrect() {
        let q = question("[1, 2, 3]", Kind::List);
        for bad in ["", "[1, 2, 3", "list(1, 2, 3)", "[1, 2, 3] + []", "import os"] {
            assert!(
                matches!(judge(bad, &q.expected, q.kind), Verdict::Unparseable(_)),
                "{bad:?} should be unparseable"
            );
        }
    }

    #[test]
    fn numeric_equality_follows_python() {
        let q = question("[1, 2, 3]", Kind::List);
        assert!(is_correct("[1.0, 2, 3]", &q));
        let q = question("(1, 'a', True)", Kind::Tuple);
        assert!(is_correct("(1, 'a', 1)", &q));
        assert!(!is_correct("(1, 'a', 'True')", &q));
    }

    #[test]
    fn inner_containers_are_kind_strict() {
        let q = question("(1, (2, 3))", Kind::Tuple);
        assert!(is_correct("(1, (2, 3))", &q));
        assert!(!is_correct("(1, [2, 3])", &q));
    }

    #[test]
    fn single_element_tuple_needs_comma() {
        let q = question("(7,)", Kind::Tuple);
        assert!(is_correct("(7,)", &q));
        assert!(is_correct("7,", &q));
        assert_eq!(
            judge("(7)", &q.expected, q.kind),
            Verdict::WrongKind { found: "int" }
        );
    }

    #[test]
    fn empty_braces_are_a_dict_not_a_set() {
        let q = question("{}", Kind::Dict);
        assert!(is_correct("{}", &q));
        let q = Question::new("q", Value::Set(vec![]), Kind::Set);
        assert!(!is_correct("{}", &q));
    }

    #[test]
    fn empty_set_is_written_as_a_call() {
        let q = question("set()", Kind::Set);
        assert!(is_correct("set()", &q));
        assert!(is_correct("set( )", &q));
        assert!(!is_correct("{}", &q));
        assert!(!is_correct("{1}", &q));
    }
}
