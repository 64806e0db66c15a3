//! Subscription registry and synchronous event fan-out.
//!
//! Exact-key subscriptions live in per-key lists; pattern subscriptions are
//! tested against every parsed key through a [`KeyMatcher`]. Within each
//! list callbacks run in registration order, and exact-key callbacks run
//! before pattern callbacks for the same event.
use std::collections::HashMap;

use crate::{
    error::ParserError,
    event::{EventSink, Parsed},
    value::Value,
};

/// Decides whether a parsed key is of interest to a pattern subscription.
///
/// Implemented for closures taking `&str`, and for [`regex::Regex`] when the
/// `regex` feature is enabled.
///
/// ```rust
/// use jsonsieve::KeyMatcher;
///
/// let prefix = |key: &str| key.starts_with("price");
/// assert!(prefix.matches("price_usd"));
/// assert!(!prefix.matches("symbol"));
/// ```
pub trait KeyMatcher {
    fn matches(&self, key: &str) -> bool;
}

impl<F> KeyMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, key: &str) -> bool {
        self(key)
    }
}

#[cfg(feature = "regex")]
impl KeyMatcher for regex::Regex {
    fn matches(&self, key: &str) -> bool {
        self.is_match(key)
    }
}

/// Handle returned by every registration, accepted by `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type FoundCallback<'cb> = Box<dyn FnMut(&str) + 'cb>;
type ValueCallback<'cb> = Box<dyn FnMut(&Value) + 'cb>;
type MatchCallback<'cb> = Box<dyn FnMut(Parsed<'_>) + 'cb>;
type ErrorCallback<'cb> = Box<dyn FnMut(&ParserError) + 'cb>;

struct Entry<T> {
    id: SubscriptionId,
    callback: T,
}

struct Matcher<'cb> {
    id: SubscriptionId,
    matcher: Box<dyn KeyMatcher + 'cb>,
    callback: MatchCallback<'cb>,
}

#[derive(Default)]
pub(crate) struct Dispatcher<'cb> {
    next_id: u64,
    found: HashMap<String, Vec<Entry<FoundCallback<'cb>>>>,
    parsed: HashMap<String, Vec<Entry<ValueCallback<'cb>>>>,
    matchers: Vec<Matcher<'cb>>,
    errors: Vec<Entry<ErrorCallback<'cb>>>,
    complete: Vec<Entry<ValueCallback<'cb>>>,
}

impl core::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("found", &self.found.keys().collect::<Vec<_>>())
            .field("parsed", &self.parsed.keys().collect::<Vec<_>>())
            .field("matchers", &self.matchers.len())
            .field("errors", &self.errors.len())
            .field("complete", &self.complete.len())
            .finish_non_exhaustive()
    }
}

impl<'cb> Dispatcher<'cb> {
    fn next_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    pub(crate) fn on_find(&mut self, key: String, callback: FoundCallback<'cb>) -> SubscriptionId {
        let id = self.next_id();
        self.found.entry(key).or_default().push(Entry { id, callback });
        id
    }

    pub(crate) fn on_parse(&mut self, key: String, callback: ValueCallback<'cb>) -> SubscriptionId {
        let id = self.next_id();
        self.parsed.entry(key).or_default().push(Entry { id, callback });
        id
    }

    pub(crate) fn on_match(
        &mut self,
        matcher: Box<dyn KeyMatcher + 'cb>,
        callback: MatchCallback<'cb>,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.matchers.push(Matcher {
            id,
            matcher,
            callback,
        });
        id
    }

    pub(crate) fn on_error(&mut self, callback: ErrorCallback<'cb>) -> SubscriptionId {
        let id = self.next_id();
        self.errors.push(Entry { id, callback });
        id
    }

    pub(crate) fn on_complete(&mut self, callback: ValueCallback<'cb>) -> SubscriptionId {
        let id = self.next_id();
        self.complete.push(Entry { id, callback });
        id
    }

    /// Removes a subscription. Returns `false` if `id` is not registered.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        fn remove<T>(list: &mut Vec<Entry<T>>, id: SubscriptionId) -> bool {
            let before = list.len();
            list.retain(|entry| entry.id != id);
            list.len() != before
        }

        let mut removed = false;
        self.found.retain(|_, list| {
            removed |= remove(list, id);
            !list.is_empty()
        });
        self.parsed.retain(|_, list| {
            removed |= remove(list, id);
            !list.is_empty()
        });
        let before = self.matchers.len();
        self.matchers.retain(|m| m.id != id);
        removed |= self.matchers.len() != before;
        removed |= remove(&mut self.errors, id);
        removed |= remove(&mut self.complete, id);
        removed
    }

    pub(crate) fn error(&mut self, err: &ParserError) {
        for entry in &mut self.errors {
            (entry.callback)(err);
        }
    }
}

impl EventSink for Dispatcher<'_> {
    fn found(&mut self, key: &str) {
        if let Some(list) = self.found.get_mut(key) {
            for entry in list {
                (entry.callback)(key);
            }
        }
    }

    fn parsed(&mut self, key: &str, value: &Value) {
        if let Some(list) = self.parsed.get_mut(key) {
            for entry in list {
                (entry.callback)(value);
            }
        }
        for m in &mut self.matchers {
            if m.matcher.matches(key) {
                (m.callback)(Parsed { key, value });
            }
        }
    }

    fn complete(&mut self, value: &Value) {
        for entry in &mut self.complete {
            (entry.callback)(value);
        }
    }
}
