use std::{cell::RefCell, rc::Rc};

use crate::{ParserError, Parsed, StreamParser, Value};

/// Every event a parser emits, rendered one per line.
pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

/// Builds a parser that records found, parsed (through a catch-all matcher),
/// complete and error events into the returned log.
pub(crate) fn recording_parser<'cb>() -> (StreamParser<'cb>, EventLog) {
    let log = EventLog::default();
    let mut parser = StreamParser::default();

    // "found" has no catch-all form, so keys of interest are registered by
    // the caller; matchers see every parsed key.
    let l = Rc::clone(&log);
    parser.on_match(
        |_: &str| true,
        move |p: Parsed<'_>| l.borrow_mut().push(format!("parsed {} = {}", p.key, p.value)),
    );
    let l = Rc::clone(&log);
    parser.on_complete(move |v: &Value| l.borrow_mut().push(format!("complete {v}")));
    let l = Rc::clone(&log);
    parser.on_error(move |e: &ParserError| l.borrow_mut().push(format!("error {e}")));

    (parser, log)
}

/// Registers a "found" recorder for each of `keys`.
pub(crate) fn record_found(parser: &mut StreamParser<'_>, log: &EventLog, keys: &[&str]) {
    for key in keys {
        let l = Rc::clone(log);
        parser.on_find(*key, move |k: &str| l.borrow_mut().push(format!("found {k}")));
    }
}

/// Feeds `text` split at every index in `cuts` (character offsets).
pub(crate) fn feed_split(parser: &mut StreamParser<'_>, text: &str, cuts: &[usize]) {
    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;
    for &cut in cuts {
        let end = cut.clamp(start, chars.len());
        parser.consume(&chars[start..end].iter().collect::<String>());
        start = end;
    }
    parser.consume(&chars[start..].iter().collect::<String>());
}

/// Converts a `serde_json` value into the crate's value.
pub(crate) fn from_reference(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::from(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(from_reference).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(k, v)| (k.clone(), from_reference(v)))
                .collect(),
        ),
    }
}
