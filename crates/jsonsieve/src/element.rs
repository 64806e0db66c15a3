use core::fmt;

use crate::value::{Array, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Object => f.write_str("object"),
            ContainerKind::Array => f.write_str("array"),
        }
    }
}

/// An open container. The variant is fixed by the opening delimiter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Array(Array),
    Object(Map),
}

impl Element {
    pub(crate) fn open(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Object => Element::Object(Map::new()),
            ContainerKind::Array => Element::Array(Array::new()),
        }
    }

    pub(crate) fn kind(&self) -> ContainerKind {
        match self {
            Element::Array(_) => ContainerKind::Array,
            Element::Object(_) => ContainerKind::Object,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        match self {
            Element::Array(a) => Value::Array(a),
            Element::Object(m) => Value::Object(m),
        }
    }
}

/// Stack of open containers.
///
/// The bottom entry is the scope: a synthetic array that collects completed
/// top-level values. It is never popped, so the stack is never empty and
/// [`depth`](Self::depth) equals the number of unmatched opening brackets.
#[derive(Debug)]
pub(crate) struct ElementStack {
    scope: Array,
    open: Vec<Element>,
}

impl Default for ElementStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStack {
    pub(crate) fn new() -> Self {
        Self {
            scope: Array::new(),
            open: Vec::with_capacity(16),
        }
    }

    /// Number of open containers above the scope.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn at_scope(&self) -> bool {
        self.open.is_empty()
    }

    /// Kind of the container currently receiving insertions. The scope
    /// counts as an array.
    pub(crate) fn top_kind(&self) -> ContainerKind {
        self.open.last().map_or(ContainerKind::Array, Element::kind)
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.open.push(element);
    }

    /// Pops the innermost open container if it has the expected kind.
    pub(crate) fn pop(&mut self, expected: ContainerKind) -> Option<Element> {
        match self.open.last() {
            Some(top) if top.kind() == expected => self.open.pop(),
            _ => None,
        }
    }

    /// Adds a finished value to the innermost container, or to the scope
    /// when nothing is open. `key` names the member when the innermost
    /// container is an object and is ignored otherwise.
    pub(crate) fn attach(&mut self, key: Option<String>, value: Value) {
        match (self.open.last_mut(), key) {
            (None, _) => self.scope.push(value),
            (Some(Element::Array(items)), _) => items.push(value),
            (Some(Element::Object(members)), Some(key)) => {
                members.insert(key, value);
            }
            // the handler pops a key before attaching to an object
            (Some(Element::Object(_)), None) => {}
        }
    }

    pub(crate) fn scope(&self) -> &[Value] {
        &self.scope
    }

    pub(crate) fn take_scope(&mut self) -> Array {
        core::mem::take(&mut self.scope)
    }

    /// Drops every open container and the scope contents.
    pub(crate) fn reset(&mut self) {
        self.open.clear();
        self.scope.clear();
    }
}
