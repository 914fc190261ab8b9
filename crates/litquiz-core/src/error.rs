//! Literal parse error types.
//!
//! Defined separately from the parser so the validator and the question bank
//! loader can match on the failure kind without string matching.

use thiserror::Error;

/// Errors produced while parsing text as a literal data expression.
///
/// Every variant carries the byte offset into the source text where the
/// problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The input ended while a value was still expected.
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    /// A character that cannot start or continue a literal.
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// A bare name other than `True`, `False` or `None`.
    #[error("names are not literals: {name} (offset {offset})")]
    Identifier { name: String, offset: usize },

    /// A numeric literal that is malformed or out of range.
    #[error("invalid number {text:?} at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    /// A malformed escape sequence inside a string literal.
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    /// Adjacent string literals where one is bytes and the other is text.
    #[error("cannot mix bytes and text literals at offset {0}")]
    MixedStringKinds(usize),

    /// A unary sign applied to something other than a number.
    #[error("unary operator applied to a non-numeric operand at offset {0}")]
    BadOperand(usize),

    /// A list, dict or set used as a dict key or set member.
    #[error("unhashable value used as a key or set member at offset {0}")]
    Unhashable(usize),

    /// Containers nested deeper than the parser allows.
    #[error("nesting exceeds {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// Input left over after a complete literal.
    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),
}
