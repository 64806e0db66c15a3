//! An incremental, event-driven JSON parser.
//!
//! Text is pushed into a [`StreamParser`] in chunks of any size and parsed
//! one character at a time. Subscribers hear about object keys as soon as
//! they are read and about values as soon as they complete, so fields can be
//! pulled out of documents that are very large, still arriving, or several
//! documents concatenated together. Malformed input resets the parser and is
//! reported to error subscribers; parsing carries on with what follows.
//!
//! ```rust
//! use jsonsieve::{Parsed, StreamParser, Value};
//!
//! let mut found = Vec::new();
//! let mut matched = Vec::new();
//! let mut parser = StreamParser::default();
//! parser.on_find("quote", |key: &str| found.push(key.to_string()));
//! parser.on_match(
//!     |key: &str| key.starts_with('b'),
//!     |parsed: Parsed<'_>| matched.push((parsed.key.to_string(), parsed.value.clone())),
//! );
//!
//! for chunk in [r#"{"quote":{"bid":1"#, r#"0.5,"ask":11},"#, r#""bar":[true]}"#] {
//!     parser.consume(chunk);
//! }
//! assert_eq!(parser.scope().len(), 1);
//! drop(parser);
//!
//! assert_eq!(found, ["quote"]);
//! assert_eq!(
//!     matched,
//!     [
//!         ("bid".to_string(), Value::from(10.5)),
//!         ("bar".to_string(), Value::Array(vec![Value::from(true)])),
//!     ]
//! );
//! ```

#![allow(missing_docs)]

mod chunk;
mod dispatch;
mod element;
mod error;
mod escape_buffer;
mod event;
mod handler;
mod options;
mod session;
mod source;
mod stream;
mod value;

#[cfg(test)]
mod tests;

pub use chunk::{Chunk, ChunkKind};
pub use dispatch::{KeyMatcher, SubscriptionId};
pub use element::ContainerKind;
pub use error::{ParserError, SourceError, StreamError, SyntaxError};
pub use event::Parsed;
pub use options::{ParserOptions, SourceOptions};
pub use session::StreamParser;
pub use source::Sieve;
pub use stream::{CharStream, StreamEvent};
pub use value::{Array, Map, Number, Value};
