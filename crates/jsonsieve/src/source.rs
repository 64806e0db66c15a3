//! Feeding a [`StreamParser`] from byte sources.
//!
//! [`Sieve`] reads a source in fixed-size blocks, decodes each block as
//! UTF-8 and hands the text to [`StreamParser::consume`]. A multi-byte
//! sequence cut by a block boundary is carried over to the next block.
//! Transport failures are returned as [`SourceError`] and never reach the
//! parser's error subscribers.
use std::{fs::File, io, path::Path};

use tracing::debug;

use crate::{
    dispatch::{KeyMatcher, SubscriptionId},
    error::{ParserError, SourceError},
    event::Parsed,
    options::{ParserOptions, SourceOptions},
    session::StreamParser,
    value::Value,
};

/// A parser bound to a byte source.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
///
/// use jsonsieve::{Sieve, Value};
///
/// let mut prices = Vec::new();
/// let mut sieve = Sieve::default().parse("price", |value: &Value| prices.push(value.clone()));
/// let scope = sieve.read(Cursor::new(r#"{"price":1}{"price":2.5}"#))?;
/// drop(sieve);
///
/// assert_eq!(scope.len(), 2);
/// assert_eq!(prices, [Value::from(1_i64), Value::from(2.5)]);
/// # Ok::<(), jsonsieve::SourceError>(())
/// ```
#[derive(Debug, Default)]
pub struct Sieve<'cb> {
    parser: StreamParser<'cb>,
    options: SourceOptions,
}

impl<'cb> Sieve<'cb> {
    #[must_use]
    pub fn new(parser_options: ParserOptions, options: SourceOptions) -> Self {
        Self {
            parser: StreamParser::new(parser_options),
            options,
        }
    }

    #[must_use]
    pub fn with_parser(parser: StreamParser<'cb>, options: SourceOptions) -> Self {
        Self { parser, options }
    }

    #[must_use]
    pub fn parser(&self) -> &StreamParser<'cb> {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut StreamParser<'cb> {
        &mut self.parser
    }

    #[must_use]
    pub fn into_parser(self) -> StreamParser<'cb> {
        self.parser
    }

    /// See [`StreamParser::on_find`].
    #[must_use]
    pub fn find(mut self, key: impl Into<String>, callback: impl FnMut(&str) + 'cb) -> Self {
        self.parser.on_find(key, callback);
        self
    }

    /// See [`StreamParser::on_parse`].
    #[must_use]
    pub fn parse(mut self, key: impl Into<String>, callback: impl FnMut(&Value) + 'cb) -> Self {
        self.parser.on_parse(key, callback);
        self
    }

    /// See [`StreamParser::on_match`].
    #[must_use]
    pub fn matching(
        mut self,
        matcher: impl KeyMatcher + 'cb,
        callback: impl FnMut(Parsed<'_>) + 'cb,
    ) -> Self {
        self.parser.on_match(matcher, callback);
        self
    }

    /// See [`StreamParser::on_error`].
    #[must_use]
    pub fn error(mut self, callback: impl FnMut(&ParserError) + 'cb) -> Self {
        self.parser.on_error(callback);
        self
    }

    /// See [`StreamParser::on_complete`].
    #[must_use]
    pub fn complete(mut self, callback: impl FnMut(&Value) + 'cb) -> Self {
        self.parser.on_complete(callback);
        self
    }

    /// See [`StreamParser::unsubscribe`].
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.parser.unsubscribe(id)
    }

    /// Parses everything `reader` yields, then signals end of input and
    /// drains the scope.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if a read fails and
    /// [`SourceError::InvalidUtf8`] if the bytes are not UTF-8. Events for
    /// text decoded before the failure have already fired; the partial
    /// values and the scope are discarded so the next read starts clean.
    pub fn read(&mut self, reader: impl io::Read) -> Result<Vec<Value>, SourceError> {
        if let Err(err) = self.consume_reader(reader) {
            debug!(%err, "source failed");
            self.parser.reset_scope();
            return Err(err);
        }
        self.parser.finish();
        Ok(self.parser.take_scope())
    }

    fn consume_reader(&mut self, mut reader: impl io::Read) -> Result<(), SourceError> {
        let mut block = vec![0_u8; self.options.chunk_size.max(4)];
        let mut pending: Vec<u8> = Vec::with_capacity(block.len() + 4);
        let mut offset: u64 = 0;

        loop {
            let n = match reader.read(&mut block) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            pending.extend_from_slice(&block[..n]);

            let valid = match core::str::from_utf8(&pending) {
                Ok(text) => {
                    self.parser.consume(text);
                    pending.len()
                }
                Err(err) if err.error_len().is_none() => {
                    // incomplete trailing sequence; wait for the next block
                    let valid = err.valid_up_to();
                    if let Ok(text) = core::str::from_utf8(&pending[..valid]) {
                        self.parser.consume(text);
                    }
                    valid
                }
                Err(err) => {
                    if let Ok(text) = core::str::from_utf8(&pending[..err.valid_up_to()]) {
                        self.parser.consume(text);
                    }
                    return Err(SourceError::InvalidUtf8 {
                        offset: offset + err.valid_up_to() as u64,
                    });
                }
            };
            offset += valid as u64;
            pending.drain(..valid);
        }

        if pending.is_empty() {
            Ok(())
        } else {
            Err(SourceError::InvalidUtf8 { offset })
        }
    }

    /// Parses the file at `path`. See [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// As [`read`](Self::read), plus [`SourceError::Io`] if the file cannot
    /// be opened.
    pub fn read_path(&mut self, path: impl AsRef<Path>) -> Result<Vec<Value>, SourceError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening source");
        let file = File::open(path)?;
        let scope = self.read(file);
        debug!(path = %path.display(), ok = scope.is_ok(), "closed source");
        scope
    }

    /// Parses the resource named by `url`: a `file://` URL or a plain path.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnsupportedScheme`] for any other scheme,
    /// including `http` and `https`; otherwise as
    /// [`read_path`](Self::read_path).
    pub fn open(&mut self, url: &str) -> Result<Vec<Value>, SourceError> {
        if let Some(path) = url.strip_prefix("file://") {
            return self.read_path(path);
        }
        match url.split_once("://") {
            Some((scheme, _)) => Err(SourceError::UnsupportedScheme(scheme.to_string())),
            None => self.read_path(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::*;

    /// Yields its input a few bytes at a time.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn multibyte_sequences_survive_block_boundaries() {
        let text = r#"{"name":"héllo wörld ✓ 😀"}"#;
        for step in 1..=5 {
            let mut sieve = Sieve::new(ParserOptions::default(), SourceOptions { chunk_size: 4 });
            let scope = sieve
                .read(Trickle {
                    data: text.as_bytes(),
                    step,
                })
                .unwrap();
            assert_eq!(
                scope[0].get("name"),
                Some(&Value::from("héllo wörld ✓ 😀")),
                "step {step}"
            );
        }
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let mut sieve = Sieve::default();
        let err = sieve.read(Cursor::new(b"[1,\xff]".to_vec())).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUtf8 { offset: 3 }), "{err:?}");
    }

    #[test]
    fn truncated_sequence_at_eof_is_invalid() {
        let mut sieve = Sieve::default();
        let err = sieve.read(Cursor::new(b"\"\xe2\x9c".to_vec())).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUtf8 { offset: 1 }), "{err:?}");
    }

    /// Yields its data once, then fails.
    struct Broken<'a>(&'a [u8]);

    impl Read for Broken<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            let n = self.0.len().min(buf.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn io_failure_discards_partial_state() {
        let mut sieve = Sieve::default();
        let err = sieve.read(Broken(br#"[1]{"a":[2"#)).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)), "{err:?}");
        assert_eq!(sieve.parser().depth(), 0);
        assert!(sieve.parser().scope().is_empty());

        let scope = sieve.read(Cursor::new("[3]")).unwrap();
        assert_eq!(scope, [Value::Array(vec![Value::from(3_i64)])]);
    }

    #[test]
    fn remote_schemes_are_rejected() {
        let mut sieve = Sieve::default();
        for url in ["http://example.com/a.json", "https://example.com/a.json", "ftp://x"] {
            assert!(matches!(
                sieve.open(url),
                Err(SourceError::UnsupportedScheme(_))
            ));
        }
    }
}
