//! Public AST types for parsed message templates.
//!
//! A parsed [`Message`] is immutable and can be shared between threads and
//! rendered any number of times.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A parsed message: an ordered sequence of nodes. An empty message renders
/// to the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub nodes: Vec<Node>,
}

impl Message {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A node within a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text.
    Text(String),
    /// Text from a quoted span, never re-interpreted as syntax.
    QuotedText(String),
    /// `#` in message text.
    Hash,
    /// `{key}`
    Placeholder { key: String },
    /// `{key, number|date|time|ordinal|duration|spellout[, style]}`
    Format {
        key: String,
        kind: FormatKind,
        style: String,
    },
    /// `{key, name[, arg, arg...]}` for a formatter name that is not built in.
    Custom {
        key: String,
        formatter: String,
        args: Vec<String>,
    },
    /// `{key, plural, [offset:N] selector {message}...}`
    Plural {
        key: String,
        offset: i64,
        cases: Cases,
    },
    /// `{key, selectordinal, [offset:N] selector {message}...}`
    SelectOrdinal {
        key: String,
        offset: i64,
        cases: Cases,
    },
    /// `{key, select, selector {message}...}`
    Select { key: String, cases: Cases },
}

impl Node {
    /// The parameter name this node reads, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Text(_) | Node::QuotedText(_) | Node::Hash => None,
            Node::Placeholder { key }
            | Node::Format { key, .. }
            | Node::Custom { key, .. }
            | Node::Plural { key, .. }
            | Node::SelectOrdinal { key, .. }
            | Node::Select { key, .. } => Some(key),
        }
    }
}

/// Built-in simple format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Number,
    Date,
    Time,
    Ordinal,
    Duration,
    Spellout,
}

impl FormatKind {
    /// Look up a built-in format type by its template name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(FormatKind::Number),
            "date" => Some(FormatKind::Date),
            "time" => Some(FormatKind::Time),
            "ordinal" => Some(FormatKind::Ordinal),
            "duration" => Some(FormatKind::Duration),
            "spellout" => Some(FormatKind::Spellout),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Number => "number",
            FormatKind::Date => "date",
            FormatKind::Time => "time",
            FormatKind::Ordinal => "ordinal",
            FormatKind::Duration => "duration",
            FormatKind::Spellout => "spellout",
        }
    }
}

impl Display for FormatKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Case bodies of a plural, selectordinal or select argument, keyed by
/// selector text (`=3`, `one`, `male`, ...).
///
/// Lookup is by key only; declaration order never affects selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cases {
    entries: BTreeMap<String, Message>,
}

impl Cases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, selector: &str) -> Option<&Message> {
        self.entries.get(selector)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.entries.contains_key(selector)
    }

    /// Insert a case. Returns the previous body if the selector was present.
    pub fn insert(&mut self, selector: impl Into<String>, message: Message) -> Option<Message> {
        self.entries.insert(selector.into(), message)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Message)> for Cases {
    fn from_iter<I: IntoIterator<Item = (S, Message)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
