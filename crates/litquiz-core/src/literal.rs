//! Python literal parser.
//!
//! A small recursive-descent parser for the subset of Python accepted by
//! `ast.literal_eval`: numbers, strings, bytes, booleans, `None`, and
//! list/tuple/dict/set displays. Names, calls, comprehensions and every
//! operator except a single unary sign on a number are rejected, so parsing
//! an answer never evaluates anything.
//!
//! [`Value`] equality follows Python `==`: numbers compare across
//! bool/int/float, dicts and sets ignore order, and a list never equals a
//! tuple at any depth. Its `Display` impl produces Python `repr` text.

use std::fmt::{self, Write as _};

use crate::error::LiteralError;
use crate::model::Kind;

/// Maximum container nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 100;

/// A parsed literal value.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Key/value pairs in insertion order. Keys are unique under `==`.
    Dict(Vec<(Value, Value)>),
    /// Members in insertion order, unique under `==`.
    Set(Vec<Value>),
}

impl Value {
    /// The container kind of this value, if it is a container.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::List(_) => Some(Kind::List),
            Value::Tuple(_) => Some(Kind::Tuple),
            Value::Dict(_) => Some(Kind::Dict),
            Value::Set(_) => Some(Kind::Set),
            _ => None,
        }
    }

    /// Python type name, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
        }
    }

    /// Whether the value may be used as a dict key or set member.
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::List(_) | Value::Dict(_) | Value::Set(_) => false,
            Value::Tuple(items) => items.iter().all(Value::is_hashable),
            _ => true,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(i), Number::Float(x)) | (Number::Float(x), Number::Int(i)) => {
                float_equals_int(x, i)
            }
        }
    }
}

/// Exact comparison; `2.0**63` does not equal any `i64`.
fn float_equals_int(x: f64, i: i64) -> bool {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-BOUND..BOUND).contains(&x) && x as i64 == i
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a == b;
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .find(|(other_key, _)| other_key == key)
                            .is_some_and(|(_, other_value)| other_value == value)
                    })
            }
            (Value::Set(a), Value::Set(b)) => a.len() == b.len() && a.iter().all(|m| b.contains(m)),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => write_str(f, s),
            Value::Bytes(b) => write_bytes(f, b),
            Value::List(items) => {
                f.write_char('[')?;
                write_joined(f, items)?;
                f.write_char(']')
            }
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_char('{')?;
                write_joined(f, items)?;
                f.write_char('}')
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }
    // Debug already switches to scientific notation at the same thresholds
    // as Python; only the exponent spelling differs (`1e16` vs `1e+16`).
    let text = format!("{x:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&text),
    }
}

fn write_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => {
                let code = u32::from(c);
                if code < 0x100 {
                    write!(f, "\\x{code:02x}")?;
                } else if code < 0x10000 {
                    write!(f, "\\u{code:04x}")?;
                } else {
                    write!(f, "\\U{code:08x}")?;
                }
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    f.write_char('b')?;
    f.write_char(char::from(quote))?;
    for &b in bytes {
        match b {
            b'\\' => f.write_str("\\\\")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            b if b == quote => {
                f.write_char('\\')?;
                f.write_char(char::from(b))?;
            }
            0x20..=0x7e => f.write_char(char::from(b))?,
            b => write!(f, "\\x{b:02x}")?,
        }
    }
    f.write_char(char::from(quote))
}

/// Parse `text` as a single literal data expression.
///
/// A top-level comma-separated sequence without parentheses is a tuple, as
/// in Python (`1, 2` parses to `(1, 2)`). Surrounding whitespace and `#`
/// comments are ignored.
pub fn parse(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(text);
    let value = parser.top_level()?;
    parser.skip_trivia();
    if parser.peek().is_some() {
        return Err(LiteralError::TrailingInput(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => self.pos += 1,
                b'\\' if self.peek_at(1) == Some(b'\n') => self.pos += 2,
                b'#' => {
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek_char() {
            Some(found) => LiteralError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => LiteralError::UnexpectedEnd(self.pos),
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), LiteralError> {
        self.skip_trivia();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn top_level(&mut self) -> Result<Value, LiteralError> {
        let first = self.value()?;
        self.skip_trivia();
        if self.peek() != Some(b',') {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_trivia();
            if self.peek().is_none() {
                break;
            }
            items.push(self.value()?);
            self.skip_trivia();
        }
        Ok(Value::Tuple(items))
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia();
        let Some(b) = self.peek() else {
            return Err(LiteralError::UnexpectedEnd(self.pos));
        };
        match b {
            b'+' | b'-' => self.signed_number(),
            b'[' => self.nested(Self::list),
            b'(' => self.nested(Self::parenthesized),
            b'{' => self.nested(Self::braced),
            b'0'..=b'9' => self.number(false),
            b'.' if self.starts_number() => self.number(false),
            _ if self.string_prefix_len().is_some() => self.strings(),
            b if b == b'_' || b.is_ascii_alphabetic() || !b.is_ascii() => self.name(),
            _ => Err(self.unexpected()),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep {
                limit: MAX_DEPTH,
                offset: self.pos,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Comma-separated values up to `close`, trailing comma allowed.
    fn items(&mut self, close: u8) -> Result<Vec<Value>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b) if b == close => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn list(&mut self) -> Result<Value, LiteralError> {
        self.pos += 1;
        Ok(Value::List(self.items(b']')?))
    }

    fn parenthesized(&mut self) -> Result<Value, LiteralError> {
        self.pos += 1;
        self.skip_trivia();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(Value::Tuple(Vec::new()));
        }
        let first = self.value()?;
        self.skip_trivia();
        match self.peek() {
            Some(b')') => {
                self.pos += 1;
                Ok(first)
            }
            Some(b',') => {
                self.pos += 1;
                let mut items = vec![first];
                items.extend(self.items(b')')?);
                Ok(Value::Tuple(items))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn braced(&mut self) -> Result<Value, LiteralError> {
        self.pos += 1;
        self.skip_trivia();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Dict(Vec::new()));
        }
        let offset = self.pos;
        let first = self.value()?;
        if !first.is_hashable() {
            return Err(LiteralError::Unhashable(offset));
        }
        self.skip_trivia();
        if self.peek() == Some(b':') {
            self.dict_entries(first)
        } else {
            self.set_members(first)
        }
    }

    fn dict_entries(&mut self, first_key: Value) -> Result<Value, LiteralError> {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        let mut key = first_key;
        loop {
            self.expect(b':')?;
            let value = self.value()?;
            // Python keeps the first spelling of the key and the last value.
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
            self.skip_trivia();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia();
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        break;
                    }
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
            let offset = self.pos;
            key = self.value()?;
            if !key.is_hashable() {
                return Err(LiteralError::Unhashable(offset));
            }
        }
        Ok(Value::Dict(entries))
    }

    fn set_members(&mut self, first: Value) -> Result<Value, LiteralError> {
        let mut members = vec![first];
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    self.skip_trivia();
                    if self.peek() == Some(b'}') {
                        self.pos += 1;
                        break;
                    }
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
            let offset = self.pos;
            let member = self.value()?;
            if !member.is_hashable() {
                return Err(LiteralError::Unhashable(offset));
            }
            if !members.contains(&member) {
                members.push(member);
            }
        }
        Ok(Value::Set(members))
    }

    fn starts_number(&self) -> bool {
        match self.peek() {
            Some(b'0'..=b'9') => true,
            Some(b'.') => self.peek_at(1).is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        }
    }

    /// A single `+`/`-` applied to a numeric literal, optionally wrapped in
    /// parentheses: `-1`, `- 2.5`, `-(3)`. `--1` and `-True` are rejected.
    fn signed_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        self.pos += 1;
        self.skip_trivia();
        let mut parens = 0;
        while self.peek() == Some(b'(') {
            self.pos += 1;
            parens += 1;
            self.skip_trivia();
        }
        if !self.starts_number() {
            return Err(LiteralError::BadOperand(start));
        }
        let value = self.number(negative)?;
        for _ in 0..parens {
            self.expect(b')')?;
        }
        Ok(value)
    }

    fn number(&mut self, negative: bool) -> Result<Value, LiteralError> {
        let start = self.pos;
        let radix = match (self.peek(), self.peek_at(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(16),
            (Some(b'0'), Some(b'o' | b'O')) => Some(8),
            (Some(b'0'), Some(b'b' | b'B')) => Some(2),
            _ => None,
        };
        let value = match radix {
            Some(radix) => {
                self.pos += 2;
                let digits_start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| b == b'_' || char::from(b).is_digit(radix))
                {
                    self.pos += 1;
                }
                let digits = &self.src[digits_start..self.pos];
                // `0x_ff` is allowed; the separator may follow the prefix.
                let digits = digits.strip_prefix('_').unwrap_or(digits);
                self.integer(digits, radix, negative, start)?
            }
            None => self.decimal(negative, start)?,
        };
        // A number must not run straight into a name: `1abc`, `2j`, `0x1g`.
        if self
            .peek()
            .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
        {
            while self
                .peek()
                .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
            {
                self.pos += 1;
            }
            return Err(self.invalid_number(start));
        }
        Ok(value)
    }

    fn decimal(&mut self, negative: bool, start: usize) -> Result<Value, LiteralError> {
        self.eat_digits();
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                self.eat_digits();
            } else {
                self.pos = mark;
            }
        }

        let text = &self.src[start..self.pos];
        if !is_float {
            let has_leading_zero =
                text.starts_with('0') && text.bytes().any(|b| b != b'0' && b != b'_');
            if has_leading_zero {
                return Err(self.invalid_number(start));
            }
            return self.integer(text, 10, negative, start);
        }

        if !separators_valid(text, |b| b.is_ascii_digit()) {
            return Err(self.invalid_number(start));
        }
        let cleaned: String = text.chars().filter(|c| *c != '_').collect();
        let magnitude: f64 = cleaned
            .parse()
            .map_err(|_| self.invalid_number(start))?;
        Ok(Value::Float(if negative { -magnitude } else { magnitude }))
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|b| b == b'_' || b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn integer(
        &self,
        digits: &str,
        radix: u32,
        negative: bool,
        start: usize,
    ) -> Result<Value, LiteralError> {
        if digits.is_empty() || !separators_valid(digits, |b| char::from(b).is_digit(radix)) {
            return Err(self.invalid_number(start));
        }
        let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
        let magnitude =
            i128::from_str_radix(&cleaned, radix).map_err(|_| self.invalid_number(start))?;
        let signed = if negative { -magnitude } else { magnitude };
        i64::try_from(signed)
            .map(Value::Int)
            .map_err(|_| self.invalid_number(start))
    }

    fn invalid_number(&self, start: usize) -> LiteralError {
        LiteralError::InvalidNumber {
            text: self.src[start..self.pos].to_string(),
            offset: start,
        }
    }

    /// Length of a valid string prefix (`r`, `b`, `rb`, ...) if a string
    /// literal starts here.
    fn string_prefix_len(&self) -> Option<usize> {
        let rest = &self.bytes[self.pos..];
        let letters = rest.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        if letters > 2 || !matches!(rest.get(letters), Some(b'\'' | b'"')) {
            return None;
        }
        let prefix = self.src[self.pos..self.pos + letters].to_ascii_lowercase();
        matches!(prefix.as_str(), "" | "r" | "u" | "b" | "rb" | "br").then_some(letters)
    }

    /// One or more adjacent string literals, concatenated.
    fn strings(&mut self) -> Result<Value, LiteralError> {
        let mut joined = self.string_literal()?;
        loop {
            self.skip_trivia();
            if self.string_prefix_len().is_none() {
                return Ok(joined);
            }
            let offset = self.pos;
            joined = match (joined, self.string_literal()?) {
                (Value::Str(mut a), Value::Str(b)) => {
                    a.push_str(&b);
                    Value::Str(a)
                }
                (Value::Bytes(mut a), Value::Bytes(b)) => {
                    a.extend(b);
                    Value::Bytes(a)
                }
                _ => return Err(LiteralError::MixedStringKinds(offset)),
            };
        }
    }

    fn string_literal(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let prefix_len = self.string_prefix_len().ok_or_else(|| self.unexpected())?;
        let prefix = self.src[start..start + prefix_len].to_ascii_lowercase();
        let raw = prefix.contains('r');
        let bytes = prefix.contains('b');
        self.pos += prefix_len;

        let quote = self.bytes[self.pos];
        let triple = self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote);
        self.pos += if triple { 3 } else { 1 };

        // Bytes literals are built as a string of chars <= U+00FF and
        // narrowed at the end.
        let mut text = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                return Err(LiteralError::UnterminatedString(start));
            };
            if c == char::from(quote) {
                if !triple {
                    self.pos += 1;
                    break;
                }
                if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                    self.pos += 3;
                    break;
                }
            } else if c == '\n' && !triple {
                return Err(LiteralError::UnterminatedString(start));
            } else if c == '\\' {
                self.escape(&mut text, raw, bytes, start)?;
                continue;
            } else if bytes && !c.is_ascii() {
                return Err(self.unexpected());
            }
            text.push(c);
            self.pos += c.len_utf8();
        }

        Ok(if bytes {
            Value::Bytes(text.chars().map(|c| u32::from(c) as u8).collect())
        } else {
            Value::Str(text)
        })
    }

    fn escape(
        &mut self,
        out: &mut String,
        raw: bool,
        bytes: bool,
        string_start: usize,
    ) -> Result<(), LiteralError> {
        let at = self.pos;
        self.pos += 1;
        let Some(c) = self.peek_char() else {
            return Err(LiteralError::UnterminatedString(string_start));
        };
        if bytes && !c.is_ascii() {
            return Err(self.unexpected());
        }
        self.pos += c.len_utf8();

        if raw {
            out.push('\\');
            out.push(c);
            return Ok(());
        }

        match c {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = u32::from(c) - u32::from('0');
                for _ in 0..2 {
                    match self.peek() {
                        Some(d @ b'0'..=b'7') => {
                            code = code * 8 + u32::from(d - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                if bytes && code > 0xFF {
                    return Err(LiteralError::InvalidEscape(at));
                }
                out.push(char::from_u32(code).ok_or(LiteralError::InvalidEscape(at))?);
            }
            'x' => {
                let code = self.hex_escape(2, at)?;
                out.push(char::from_u32(code).ok_or(LiteralError::InvalidEscape(at))?);
            }
            'u' | 'U' if !bytes => {
                let width = if c == 'u' { 4 } else { 8 };
                let code = self.hex_escape(width, at)?;
                out.push(char::from_u32(code).ok_or(LiteralError::InvalidEscape(at))?);
            }
            'N' if !bytes => return Err(LiteralError::InvalidEscape(at)),
            // Unrecognized escapes are kept verbatim.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, width: usize, at: usize) -> Result<u32, LiteralError> {
        let digits = self
            .src
            .get(self.pos..self.pos + width)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or(LiteralError::InvalidEscape(at))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| LiteralError::InvalidEscape(at))?;
        self.pos += width;
        Ok(code)
    }

    fn name(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let len: usize = self.src[start..]
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return Err(self.unexpected());
        }
        self.pos += len;
        match &self.src[start..self.pos] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            "set" if self.empty_call() => Ok(Value::Set(Vec::new())),
            name => Err(LiteralError::Identifier {
                name: name.to_string(),
                offset: start,
            }),
        }
    }

    /// Consume `( )` if it follows; the position is left alone otherwise.
    fn empty_call(&mut self) -> bool {
        let before = self.pos;
        if self.expect(b'(').is_ok() && self.expect(b')').is_ok() {
            return true;
        }
        self.pos = before;
        false
    }
}

/// `_` separators must sit between two digits.
fn separators_valid(text: &str, is_digit: impl Fn(u8) -> bool) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && is_digit(bytes[i - 1])
                && bytes.get(i + 1).is_some_and(|&next| is_digit(next)))
    })
}
