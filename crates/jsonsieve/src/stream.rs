//! A FIFO character buffer that feeds the token handler.
//!
//! [`CharStream`] owns no parsing logic. Writers append characters at the
//! tail, the parser reads them one at a time from the head. Reads never
//! block: an empty stream answers with [`StreamError::EmptyStreamRead`].
use std::collections::VecDeque;

use crate::error::StreamError;

/// Notification sent to stream listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent<'a> {
    /// Characters appended by a write.
    Write(&'a [char]),
    /// Characters drained by a flush.
    Flush(&'a [char]),
}

type Listener<'cb> = Box<dyn FnMut(StreamEvent<'_>) + 'cb>;

/// Character FIFO with write and flush notifications.
///
/// # Examples
///
/// ```
/// use jsonsieve::{CharStream, StreamError};
///
/// let mut stream = CharStream::new();
/// stream.write_str("{}");
/// assert_eq!(stream.read(), Ok('{'));
/// assert_eq!(stream.flush(), Ok(vec!['}']));
/// assert_eq!(stream.read(), Err(StreamError::EmptyStreamRead));
/// ```
#[derive(Default)]
pub struct CharStream<'cb> {
    buffer: VecDeque<char>,
    on_write: Vec<Listener<'cb>>,
    on_flush: Vec<Listener<'cb>>,
}

impl core::fmt::Debug for CharStream<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CharStream")
            .field("buffer", &self.buffer)
            .field("on_write", &self.on_write.len())
            .field("on_flush", &self.on_flush.len())
            .finish()
    }
}

impl<'cb> CharStream<'cb> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener called after every write with the appended
    /// characters.
    pub fn on_write(&mut self, listener: impl FnMut(StreamEvent<'_>) + 'cb) {
        self.on_write.push(Box::new(listener));
    }

    /// Registers a listener called after every successful flush with the
    /// drained characters.
    pub fn on_flush(&mut self, listener: impl FnMut(StreamEvent<'_>) + 'cb) {
        self.on_flush.push(Box::new(listener));
    }

    pub fn write_char(&mut self, c: char) {
        self.buffer.push_back(c);
        self.notify_write(&[c]);
    }

    pub fn write_str(&mut self, s: &str) {
        let data: Vec<char> = s.chars().collect();
        self.write_chars(&data);
    }

    pub fn write_chars(&mut self, data: &[char]) {
        self.buffer.extend(data.iter().copied());
        self.notify_write(data);
    }

    /// Removes and returns the character at the head of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EmptyStreamRead`] if nothing is buffered.
    pub fn read(&mut self) -> Result<char, StreamError> {
        self.buffer.pop_front().ok_or(StreamError::EmptyStreamRead)
    }

    /// Drains the whole buffer at once.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EmptyStreamRead`] if nothing is buffered.
    pub fn flush(&mut self) -> Result<Vec<char>, StreamError> {
        if self.buffer.is_empty() {
            return Err(StreamError::EmptyStreamRead);
        }
        let data: Vec<char> = self.buffer.drain(..).collect();
        for listener in &mut self.on_flush {
            listener(StreamEvent::Flush(&data));
        }
        Ok(data)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The buffered characters as a string, without consuming them.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.iter().collect()
    }

    fn notify_write(&mut self, data: &[char]) {
        for listener in &mut self.on_write {
            listener(StreamEvent::Write(data));
        }
    }
}
