//! YAML parser that builds ordered [`Document`] trees from `yaml-rust2` events.

use std::collections::HashMap;

use tracing::debug;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag as EventTag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::document::{Document, Entry, Node, Scalar, ScalarStyle, Tag};
use crate::errors::{Error, Result};

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

/// Parses YAML text into an ordered document.
///
/// Only the first document of a multi-document stream is read. Empty input,
/// or a document holding only a null, yields an empty [`Document`].
///
/// # Errors
///
/// * [`Error::Scan`] if the text is not well-formed YAML
/// * [`Error::NotAMapping`] if the root node is a sequence or a non-null scalar
///
/// # Examples
///
/// ```rust
/// let doc = ordered_yaml::parse("publish:\n  amazon: a\n  amazon: b\n").unwrap();
///
/// let publish = doc.get("publish").and_then(|n| n.as_mapping()).unwrap();
/// assert_eq!(publish.len(), 2);
/// ```
pub fn parse(content: &str) -> Result<Document> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = DocumentBuilder::new();

    parser.load(&mut builder, false)?;

    let document = builder.result()?;
    debug!(entries = document.len(), "Parsed ordered YAML document");
    Ok(document)
}

/// Collection under construction.
enum Frame {
    Sequence {
        items: Vec<Node>,
        anchor: usize,
        tag: Option<Tag>,
    },
    Mapping {
        entries: Vec<Entry>,
        pending_key: Option<Node>,
        anchor: usize,
        tag: Option<Tag>,
    },
}

/// Event receiver that assembles nodes bottom-up.
struct DocumentBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
        }
    }

    fn result(self) -> Result<Document> {
        match self.root {
            None => Ok(Document::default()),
            Some(Node::Mapping { entries, .. }) => Ok(Document::new(entries)),
            Some(Node::Scalar(scalar)) if is_null(&scalar) => Ok(Document::default()),
            Some(other) => Err(Error::NotAMapping {
                found: other.kind().to_string(),
            }),
        }
    }

    fn register_anchor(&mut self, anchor: usize, node: &Node) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(Entry::new(key, node)),
                None => *pending_key = Some(node),
            },
        }
    }
}

impl MarkedEventReceiver for DocumentBuilder {
    fn on_event(&mut self, ev: Event, _marker: Marker) {
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, anchor, tag) => {
                let node = Node::Scalar(Scalar {
                    value,
                    style: convert_style(style),
                    tag: tag.map(convert_tag),
                });
                self.register_anchor(anchor, &node);
                self.push_complete(node);
            }

            Event::SequenceStart(anchor, tag) => {
                self.stack.push(Frame::Sequence {
                    items: Vec::new(),
                    anchor,
                    tag: tag.map(convert_tag),
                });
            }

            Event::SequenceEnd => {
                let Some(Frame::Sequence { items, anchor, tag }) = self.stack.pop() else {
                    return;
                };
                let node = Node::Sequence { items, tag };
                self.register_anchor(anchor, &node);
                self.push_complete(node);
            }

            Event::MappingStart(anchor, tag) => {
                self.stack.push(Frame::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                    anchor,
                    tag: tag.map(convert_tag),
                });
            }

            Event::MappingEnd => {
                let Some(Frame::Mapping {
                    mut entries,
                    pending_key,
                    anchor,
                    tag,
                }) = self.stack.pop()
                else {
                    return;
                };
                // A dangling key only appears in malformed input the scanner
                // already accepted; keep it with a null value.
                if let Some(key) = pending_key {
                    entries.push(Entry::new(key, Node::scalar("~")));
                }
                let node = Node::Mapping { entries, tag };
                self.register_anchor(anchor, &node);
                self.push_complete(node);
            }

            Event::Alias(anchor) => {
                let node = self
                    .anchors
                    .get(&anchor)
                    .cloned()
                    .unwrap_or_else(|| Node::scalar("~"));
                self.push_complete(node);
            }
        }
    }
}

fn convert_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::Plain => ScalarStyle::Plain,
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        _ => ScalarStyle::Folded,
    }
}

fn convert_tag(tag: EventTag) -> Tag {
    Tag {
        handle: tag.handle,
        suffix: tag.suffix,
    }
}

fn is_null(scalar: &Scalar) -> bool {
    scalar.style == ScalarStyle::Plain
        && scalar.tag.is_none()
        && matches!(scalar.value.as_str(), "" | "~" | "null" | "Null" | "NULL")
}
