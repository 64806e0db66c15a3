//! Events produced by the token handler.
//!
//! The handler reports what it discovers through an [`EventSink`]; the
//! session's dispatcher is the sink in production, tests plug in a recorder.
use crate::value::Value;

/// A key whose value has been fully parsed, as delivered to pattern
/// subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}

/// Receiver for handler events. Calls arrive synchronously, in the order of
/// the characters that trigger them.
pub(crate) trait EventSink {
    /// An object key has been read; its value has not.
    fn found(&mut self, key: &str);

    /// The value of an object key is complete.
    fn parsed(&mut self, key: &str, value: &Value);

    /// A top-level value is complete and about to join the scope.
    fn complete(&mut self, value: &Value);
}
