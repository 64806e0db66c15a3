use thiserror::Error;

use crate::element::ContainerKind;

/// A classified syntax error together with the input position of the
/// character that triggered it.
///
/// Errors of this type are never returned from [`StreamParser::consume`];
/// they are delivered to [`StreamParser::on_error`] subscribers after the
/// parser has reset itself.
///
/// [`StreamParser::consume`]: crate::StreamParser::consume
/// [`StreamParser::on_error`]: crate::StreamParser::on_error
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    pub(crate) source: SyntaxError,
    pub line: usize,
    pub column: usize,
}

impl ParserError {
    pub(crate) fn new(source: SyntaxError, line: usize, column: usize) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    /// The classification of this error.
    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.source
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("closing bracket does not match an open {0}")]
    MalformedContainer(ContainerKind),
    #[error("value has no enclosing container that can accept it")]
    MalformedStreamValue,
    #[error("invalid numeric value '{0}'")]
    InvalidNumber(String),
    #[error("invalid boolean value '{0}'")]
    InvalidBoolean(String),
    #[error("invalid null value '{0}'")]
    InvalidNull(String),
    #[error("invalid unicode escape sequence \\u{0}")]
    InvalidUnicodeEscape(String),
    #[error("unable to escape value outside string")]
    EscapeOutsideString,
    #[error("unable to determine type for token '{0}'")]
    TypeInferenceError(char),
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("object value has no pending key")]
    MissingKey,
    #[error("key '{0}' has no value")]
    MissingValue(String),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("nesting exceeds the limit of {0} open containers")]
    DepthLimitExceeded(usize),
}

/// Failure of a [`CharStream`](crate::CharStream) read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    #[error("stream is empty")]
    EmptyStreamRead,
}

/// Failure to obtain text from a byte source.
///
/// These never reach [`StreamParser::on_error`](crate::StreamParser::on_error)
/// subscribers. The parser's scope and partial state are discarded.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not valid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: u64 },
    #[error("unsupported source scheme '{0}'")]
    UnsupportedScheme(String),
}
