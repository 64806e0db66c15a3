use tracing::{debug, trace};

use crate::{
    dispatch::{Dispatcher, KeyMatcher, SubscriptionId},
    element::ElementStack,
    error::ParserError,
    event::Parsed,
    handler::TokenHandler,
    options::ParserOptions,
    stream::CharStream,
    value::Value,
};

/// An incremental JSON parser session.
///
/// Text is pushed with [`consume`](Self::consume) in chunks of any size;
/// subscribers are called synchronously while the chunk is processed.
/// Completed top-level values accumulate in the [`scope`](Self::scope), so
/// concatenated documents such as `{"a":1}{"b":2}` parse as a sequence.
///
/// Malformed input never aborts the session. The offending state is dropped,
/// [`on_error`](Self::on_error) subscribers are told, and parsing resumes
/// with the next character.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
///
/// use jsonsieve::{StreamParser, Value};
///
/// let symbols = RefCell::new(Vec::new());
/// let mut parser = StreamParser::default();
/// parser.on_parse("symbol", |value: &Value| {
///     symbols.borrow_mut().push(value.to_string());
/// });
///
/// parser.consume(r#"{"symbol":"YH"#);
/// parser.consume(r#"OO","price":20.31}"#);
/// drop(parser);
///
/// assert_eq!(symbols.into_inner(), [r#""YHOO""#]);
/// ```
#[derive(Debug)]
pub struct StreamParser<'cb> {
    stream: CharStream<'cb>,
    elements: ElementStack,
    handler: TokenHandler,
    dispatcher: Dispatcher<'cb>,
    line: usize,
    column: usize,
}

impl Default for StreamParser<'_> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl<'cb> StreamParser<'cb> {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            stream: CharStream::new(),
            elements: ElementStack::new(),
            handler: TokenHandler::new(&options),
            dispatcher: Dispatcher::default(),
            line: 1,
            column: 1,
        }
    }

    /// Parses a chunk of text, emitting events as they occur.
    ///
    /// Syntax errors are reported to [`on_error`](Self::on_error)
    /// subscribers; the rest of the chunk is still parsed.
    pub fn consume(&mut self, text: &str) {
        trace!(bytes = text.len(), depth = self.depth(), "consume");
        self.stream.write_str(text);
        while let Ok(c) = self.stream.read() {
            let (line, column) = (self.line, self.column);
            self.advance(c);
            if let Err(source) = self.handler.handle(c, &mut self.elements, &mut self.dispatcher) {
                self.fail(ParserError::new(source, line, column));
            }
        }
    }

    /// Signals the end of input.
    ///
    /// A bare top-level scalar still waiting for a delimiter is committed.
    /// If a container or string is still open, an
    /// [`UnexpectedEndOfInput`](crate::SyntaxError::UnexpectedEndOfInput) error is
    /// emitted and the session is reset.
    pub fn finish(&mut self) {
        if let Err(source) = self
            .handler
            .finish_input(&mut self.elements, &mut self.dispatcher)
        {
            self.fail(ParserError::new(source, self.line, self.column));
        }
    }

    /// Subscribes to the discovery of `key`, before its value is parsed.
    pub fn on_find(
        &mut self,
        key: impl Into<String>,
        callback: impl FnMut(&str) + 'cb,
    ) -> SubscriptionId {
        self.dispatcher.on_find(key.into(), Box::new(callback))
    }

    /// Subscribes to the completed value of every occurrence of `key`.
    pub fn on_parse(
        &mut self,
        key: impl Into<String>,
        callback: impl FnMut(&Value) + 'cb,
    ) -> SubscriptionId {
        self.dispatcher.on_parse(key.into(), Box::new(callback))
    }

    /// Subscribes to every parsed key accepted by `matcher`.
    ///
    /// ```rust
    /// use jsonsieve::{Parsed, StreamParser};
    ///
    /// let mut keys = Vec::new();
    /// let mut parser = StreamParser::default();
    /// parser.on_match(
    ///     |key: &str| key.starts_with("ba"),
    ///     |parsed: Parsed<'_>| keys.push(parsed.key.to_string()),
    /// );
    /// parser.consume(r#"{"bar":1,"baz":[2],"foo":3}"#);
    /// drop(parser);
    ///
    /// assert_eq!(keys, ["bar", "baz"]);
    /// ```
    pub fn on_match(
        &mut self,
        matcher: impl KeyMatcher + 'cb,
        callback: impl FnMut(Parsed<'_>) + 'cb,
    ) -> SubscriptionId {
        self.dispatcher.on_match(Box::new(matcher), Box::new(callback))
    }

    /// Subscribes to syntax errors. By the time the callback runs the session
    /// has already been reset.
    pub fn on_error(&mut self, callback: impl FnMut(&ParserError) + 'cb) -> SubscriptionId {
        self.dispatcher.on_error(Box::new(callback))
    }

    /// Subscribes to completed top-level values.
    pub fn on_complete(&mut self, callback: impl FnMut(&Value) + 'cb) -> SubscriptionId {
        self.dispatcher.on_complete(Box::new(callback))
    }

    /// Removes a subscription, returning `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Completed top-level values, in document order.
    #[must_use]
    pub fn scope(&self) -> &[Value] {
        self.elements.scope()
    }

    /// Drains the completed top-level values.
    pub fn take_scope(&mut self) -> Vec<Value> {
        self.elements.take_scope()
    }

    /// Discards every partial value and the scope. Subscriptions and the
    /// input position are kept.
    pub fn reset_scope(&mut self) {
        debug!(depth = self.depth(), "reset");
        self.handler.reset();
        self.elements.reset();
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.elements.depth()
    }

    /// One-based `(line, column)` of the next character to be consumed.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn fail(&mut self, err: ParserError) {
        debug!(error = %err, "syntax error");
        self.reset_scope();
        self.dispatcher.error(&err);
    }
}
