//! The character-level state machine.
//!
//! [`TokenHandler::handle`] takes one character at a time and mutates the
//! pending chunk, the key stacks and the caller's [`ElementStack`]. Events
//! are pushed to an [`EventSink`] as soon as they are known; errors are
//! returned to the caller untouched, leaving recovery to the session.
//!
//! Two key stacks are kept apart on purpose: `keys` holds an object key
//! whose value has not started yet, `container_keys` holds the keys whose
//! value is a container that is still open. Only `{` and `[` move a key from
//! the first to the second, so a closing bracket always pairs with the key
//! that owns it.

use crate::{
    chunk::{Chunk, ChunkKind},
    element::{ContainerKind, Element, ElementStack},
    error::SyntaxError,
    escape_buffer::UnicodeEscapeBuffer,
    event::EventSink,
    options::ParserOptions,
    value::Value,
};

/// Transient string-scanning state.
#[derive(Debug, Default)]
struct ParseMode {
    in_string: bool,
    escaped: bool,
    in_unicode: bool,
    unicode: UnicodeEscapeBuffer,
}

#[derive(Debug)]
pub(crate) struct TokenHandler {
    chunk: Option<Chunk>,
    keys: Vec<String>,
    container_keys: Vec<String>,
    mode: ParseMode,
    unicode_whitespace: bool,
    max_depth: usize,
}

impl TokenHandler {
    pub(crate) fn new(options: &ParserOptions) -> Self {
        Self {
            chunk: None,
            keys: Vec::new(),
            container_keys: Vec::new(),
            mode: ParseMode::default(),
            unicode_whitespace: options.allow_unicode_whitespace,
            max_depth: options.max_depth,
        }
    }

    /// Forgets the pending chunk, both key stacks and the scanning mode.
    pub(crate) fn reset(&mut self) {
        self.chunk = None;
        self.keys.clear();
        self.container_keys.clear();
        self.mode = ParseMode::default();
    }

    #[cfg(test)]
    pub(crate) fn in_string(&self) -> bool {
        self.mode.in_string
    }

    #[cfg(test)]
    pub(crate) fn pending_keys(&self) -> (usize, usize) {
        (self.keys.len(), self.container_keys.len())
    }

    /// Processes one character.
    pub(crate) fn handle<S: EventSink>(
        &mut self,
        c: char,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        if self.mode.in_string {
            return self.handle_in_string(c, elements, sink);
        }
        match c {
            '{' => self.open_container(ContainerKind::Object, c, elements),
            '[' => self.open_container(ContainerKind::Array, c, elements),
            '}' => self.close_container(ContainerKind::Object, elements, sink),
            ']' => self.close_container(ContainerKind::Array, elements, sink),
            ':' => self.finish_key(elements, sink),
            ',' => self.finish_value(elements, sink),
            '"' => self.open_string(),
            '\\' => Err(SyntaxError::EscapeOutsideString),
            c if self.is_whitespace(c) => self.end_bare_token(elements, sink),
            c => self.bare_token(c),
        }
    }

    /// Commits a pending top-level scalar, as if a delimiter had followed it.
    pub(crate) fn finish_input<S: EventSink>(
        &mut self,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        if self.mode.in_string || !elements.at_scope() {
            return Err(SyntaxError::UnexpectedEndOfInput);
        }
        self.finish_value(elements, sink)
    }

    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n') || (self.unicode_whitespace && c.is_whitespace())
    }

    fn handle_in_string<S: EventSink>(
        &mut self,
        c: char,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let mode = &mut self.mode;

        if mode.in_unicode {
            match mode.unicode.feed(c)? {
                Some(decoded) => {
                    mode.in_unicode = false;
                    self.push_char(decoded);
                }
                // a high surrogate; its low half arrives as another escape
                None if mode.unicode.is_empty() => mode.in_unicode = false,
                None => {}
            }
            return Ok(());
        }

        if mode.unicode.awaiting_low_surrogate() {
            match (mode.escaped, c) {
                (false, '\\') => mode.escaped = true,
                (true, 'u') => {
                    mode.escaped = false;
                    mode.in_unicode = true;
                }
                _ => return Err(mode.unicode.abandon()),
            }
            return Ok(());
        }

        if mode.escaped {
            mode.escaped = false;
            let decoded = match c {
                'b' => '\u{0008}',
                't' => '\u{0009}',
                'n' => '\u{000A}',
                'r' => '\u{000D}',
                'f' => '\u{000C}',
                'u' => {
                    mode.in_unicode = true;
                    return Ok(());
                }
                other => other,
            };
            self.push_char(decoded);
            return Ok(());
        }

        match c {
            '\\' => mode.escaped = true,
            '"' => {
                mode.in_string = false;
                if let Some(chunk) = self.chunk.as_mut() {
                    chunk.close();
                }
                // nothing can follow a top-level string, so it is complete now
                if elements.at_scope() {
                    self.finish_value(elements, sink)?;
                }
            }
            other => self.push_char(other),
        }
        Ok(())
    }

    fn push_char(&mut self, c: char) {
        if let Some(chunk) = self.chunk.as_mut() {
            chunk.append(c);
        }
    }

    fn open_string(&mut self) -> Result<(), SyntaxError> {
        if self.chunk.is_some() {
            return Err(SyntaxError::UnexpectedCharacter('"'));
        }
        self.chunk = Some(Chunk::new(ChunkKind::String));
        self.mode.in_string = true;
        self.mode.escaped = false;
        Ok(())
    }

    fn bare_token(&mut self, c: char) -> Result<(), SyntaxError> {
        match self.chunk.as_mut() {
            Some(chunk) if !chunk.is_closed() => chunk.append(c),
            Some(_) => return Err(SyntaxError::UnexpectedCharacter(c)),
            None => self.chunk = Some(Chunk::infer(c)?),
        }
        Ok(())
    }

    fn end_bare_token<S: EventSink>(
        &mut self,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let Some(chunk) = self.chunk.as_mut() else {
            return Ok(());
        };
        chunk.close();
        if elements.at_scope() {
            self.finish_value(elements, sink)?;
        }
        Ok(())
    }

    fn open_container(
        &mut self,
        kind: ContainerKind,
        c: char,
        elements: &mut ElementStack,
    ) -> Result<(), SyntaxError> {
        if self.chunk.is_some() {
            return Err(SyntaxError::UnexpectedCharacter(c));
        }
        if elements.depth() >= self.max_depth {
            return Err(SyntaxError::DepthLimitExceeded(self.max_depth));
        }
        if elements.top_kind() == ContainerKind::Object {
            // "found" already fired at the ':' that introduced this key
            let key = self.keys.pop().ok_or(SyntaxError::MissingKey)?;
            self.container_keys.push(key);
        }
        elements.push(Element::open(kind));
        Ok(())
    }

    fn close_container<S: EventSink>(
        &mut self,
        kind: ContainerKind,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        self.finish_value(elements, sink)?;

        if kind == ContainerKind::Object && elements.top_kind() == ContainerKind::Object {
            if let Some(key) = self.keys.pop() {
                return Err(SyntaxError::MissingValue(key));
            }
        }

        let value = elements
            .pop(kind)
            .ok_or(SyntaxError::MalformedContainer(kind))?
            .into_value();

        Self::attach(&mut self.container_keys, value, elements, sink)
    }

    fn finish_key<S: EventSink>(
        &mut self,
        elements: &ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let chunk = self.chunk.take().ok_or(SyntaxError::MissingKey)?;
        if elements.at_scope()
            || elements.top_kind() != ContainerKind::Object
            || !self.keys.is_empty()
        {
            return Err(SyntaxError::MalformedStreamValue);
        }
        if chunk.kind() != ChunkKind::String {
            // bare keys must still spell a valid scalar
            chunk.value()?;
        }
        let key = chunk.into_text();
        sink.found(&key);
        self.keys.push(key);
        Ok(())
    }

    fn finish_value<S: EventSink>(
        &mut self,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let Some(chunk) = self.chunk.take() else {
            return Ok(());
        };
        let value: Value = chunk.into_value()?;

        Self::attach(&mut self.keys, value, elements, sink)
    }

    /// Hands a finished value to its parent. At the scope that is a
    /// "complete" event; inside an object the member key comes off `keys`
    /// and "parsed" fires.
    fn attach<S: EventSink>(
        keys: &mut Vec<String>,
        value: Value,
        elements: &mut ElementStack,
        sink: &mut S,
    ) -> Result<(), SyntaxError> {
        let key = if elements.at_scope() {
            sink.complete(&value);
            None
        } else if elements.top_kind() == ContainerKind::Object {
            let key = keys.pop().ok_or(SyntaxError::MissingKey)?;
            sink.parsed(&key, &value);
            Some(key)
        } else {
            None
        };
        elements.attach(key, value);
        Ok(())
    }
}
