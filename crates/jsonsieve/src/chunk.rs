//! Scalar token accumulation.
//!
//! A [`Chunk`] collects the characters of one string, number, boolean or
//! null token. Its kind is fixed when it is opened; the characters are only
//! interpreted when [`Chunk::value`] is called, so a malformed token is
//! reported at the delimiter that finishes it.
use crate::{
    error::SyntaxError,
    value::{Number, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    String,
    Number,
    Boolean,
    Null,
}

impl ChunkKind {
    /// Infers the kind of a bare (unquoted) token from its first character.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::TypeInferenceError`] if no scalar can start
    /// with `c`.
    pub fn infer(c: char) -> Result<Self, SyntaxError> {
        match c {
            '0'..='9' | '.' | '-' => Ok(ChunkKind::Number),
            't' | 'T' | 'f' | 'F' => Ok(ChunkKind::Boolean),
            'n' | 'N' => Ok(ChunkKind::Null),
            _ => Err(SyntaxError::TypeInferenceError(c)),
        }
    }
}

/// An in-progress or completed scalar token.
///
/// # Examples
///
/// ```
/// use jsonsieve::{Chunk, ChunkKind, Value};
///
/// let mut chunk = Chunk::new(ChunkKind::Number);
/// for c in "1e3".chars() {
///     chunk.append(c);
/// }
/// assert_eq!(chunk.value(), Ok(Value::from(1000.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    kind: ChunkKind,
    buffer: String,
    closed: bool,
}

impl Chunk {
    #[must_use]
    pub fn new(kind: ChunkKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            closed: false,
        }
    }

    /// Opens a bare token whose kind is inferred from `first`, which becomes
    /// its first character.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::TypeInferenceError`] if no scalar can start
    /// with `first`.
    pub fn infer(first: char) -> Result<Self, SyntaxError> {
        let mut chunk = Self::new(ChunkKind::infer(first)?);
        chunk.append(first);
        Ok(chunk)
    }

    #[must_use]
    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    pub fn append(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// The raw characters collected so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Marks the token as complete: no further characters belong to it.
    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Converts the collected characters into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidNumber`], [`SyntaxError::InvalidBoolean`]
    /// or [`SyntaxError::InvalidNull`] if the characters do not spell a
    /// value of the chunk's kind.
    pub fn value(&self) -> Result<Value, SyntaxError> {
        match self.kind {
            ChunkKind::String => Ok(Value::String(self.buffer.clone())),
            ChunkKind::Number => parse_number(&self.buffer).map(Value::Number),
            ChunkKind::Boolean => {
                if self.buffer.eq_ignore_ascii_case("true") {
                    Ok(Value::Boolean(true))
                } else if self.buffer.eq_ignore_ascii_case("false") {
                    Ok(Value::Boolean(false))
                } else {
                    Err(SyntaxError::InvalidBoolean(self.buffer.clone()))
                }
            }
            ChunkKind::Null => {
                if self.buffer.eq_ignore_ascii_case("null") {
                    Ok(Value::Null)
                } else {
                    Err(SyntaxError::InvalidNull(self.buffer.clone()))
                }
            }
        }
    }

    /// Consumes the chunk, returning its raw characters.
    pub(crate) fn into_text(self) -> String {
        self.buffer
    }

    /// Consumes the chunk, returning its value.
    pub(crate) fn into_value(self) -> Result<Value, SyntaxError> {
        match self.kind {
            ChunkKind::String => Ok(Value::String(self.buffer)),
            _ => self.value(),
        }
    }
}

fn parse_number(text: &str) -> Result<Number, SyntaxError> {
    let invalid = || SyntaxError::InvalidNumber(text.to_string());
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, 'e' | 'E' | '+' | '-' | '.'))
    {
        return Err(invalid());
    }
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Number::Integer(i));
        }
        // integral text too large for i64 falls through to f64
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Number::Float(f)),
        // JSON has no spelling for infinity
        _ => Err(invalid()),
    }
}
