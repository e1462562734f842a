//! Ordered document model.
//!
//! A [`Document`] is the top-level mapping of a YAML file kept as a plain
//! vector of entries. Unlike a hash-based model it preserves both the order
//! in which keys were written and any duplicate keys, so a document that is
//! parsed and emitted again keeps every section where the author put it.

use crate::emitter;
use crate::errors::Result;

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Presentation style of a scalar as it appeared in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
}

/// A tag attached to a node, e.g. `!!str` or `!secret`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub handle: String,
    pub suffix: String,
}

impl Tag {
    const CORE_SCHEMA_PREFIX: &'static str = "tag:yaml.org,2002:";

    /// Renders the tag the way it would be written in a document.
    pub fn to_shorthand(&self) -> String {
        match self.handle.as_str() {
            Self::CORE_SCHEMA_PREFIX | "!!" => format!("!!{}", self.suffix),
            "!" | "" => format!("!{}", self.suffix),
            handle => format!("!<{}{}>", handle, self.suffix),
        }
    }
}

/// A scalar value together with how it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub value: String,
    pub style: ScalarStyle,
    pub tag: Option<Tag>,
}

impl Scalar {
    /// Creates a plain, untagged scalar.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::Plain,
            tag: None,
        }
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(Scalar),
    Sequence {
        items: Vec<Node>,
        tag: Option<Tag>,
    },
    Mapping {
        entries: Vec<Entry>,
        tag: Option<Tag>,
    },
}

impl Node {
    /// Shorthand for a plain scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::plain(value))
    }

    /// Builds an untagged mapping node.
    pub fn mapping(entries: Vec<Entry>) -> Self {
        Node::Mapping { entries, tag: None }
    }

    /// Builds an untagged sequence node.
    pub fn sequence(items: Vec<Node>) -> Self {
        Node::Sequence { items, tag: None }
    }

    /// Returns the scalar text when this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => Some(scalar.value.as_str()),
            _ => None,
        }
    }

    /// Returns the items when this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Returns the entries when this node is a mapping.
    pub fn as_mapping(&self) -> Option<&[Entry]> {
        match self {
            Node::Mapping { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Looks up the value of the first entry whose key is the scalar `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key.as_str() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence { .. } => "sequence",
            Node::Mapping { .. } => "mapping",
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Node::Scalar(scalar) => scalar.tag.as_ref(),
            Node::Sequence { tag, .. } | Node::Mapping { tag, .. } => tag.as_ref(),
        }
    }
}

/// One key/value pair of a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Node,
    pub value: Node,
}

impl Entry {
    pub fn new(key: Node, value: Node) -> Self {
        Self { key, value }
    }

    /// Key text used for name comparisons.
    ///
    /// Scalar keys yield their value; collection keys have no name.
    pub fn key_name(&self) -> Option<&str> {
        self.key.as_str()
    }
}

/// A parsed YAML document whose root is a mapping.
///
/// # Examples
///
/// ```rust
/// let doc = ordered_yaml::parse("b: 1\na: 2\nb: 3\n").unwrap();
///
/// let keys: Vec<_> = doc.entries().iter().filter_map(|e| e.key_name()).collect();
/// assert_eq!(keys, vec!["b", "a", "b"]);
/// assert_eq!(doc.get("b").and_then(|n| n.as_str()), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Value of the first top-level entry whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|entry| entry.key_name() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Index of the first top-level entry whose key matches `name`
    /// case-insensitively.
    ///
    /// Documents may repeat a top-level key; only the first occurrence is
    /// ever reported.
    pub fn position_ci(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.entries.iter().position(|entry| {
            entry
                .key_name()
                .is_some_and(|key| key.to_lowercase() == wanted)
        })
    }

    /// First top-level entry whose key matches `name` case-insensitively.
    pub fn find_ci(&self, name: &str) -> Option<&Entry> {
        self.position_ci(name).map(|index| &self.entries[index])
    }

    /// Serializes the document to block-style YAML text.
    pub fn to_yaml_string(&self) -> Result<String> {
        emitter::emit_document(self)
    }
}

impl From<Vec<Entry>> for Document {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}
