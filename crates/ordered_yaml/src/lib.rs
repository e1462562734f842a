//! # ordered_yaml
//!
//! Order-preserving YAML documents.
//!
//! Pipeline documents are edited as ordered lists of key/value entries rather
//! than hash maps: section order is meaningful to readers, and real-world
//! documents occasionally repeat a key. This crate parses YAML with the
//! `yaml-rust2` event parser into such a list, lets callers swap entries
//! around, and emits the result as block-style YAML again.
//!
//! ## Example
//!
//! ```rust
//! use ordered_yaml::{parse, to_string};
//!
//! let doc = parse("build:\n  image: golang\nnotify:\n  slack: {}\n").unwrap();
//! assert_eq!(doc.position_ci("BUILD"), Some(0));
//!
//! let text = to_string(&doc).unwrap();
//! assert_eq!(text, "build:\n  image: golang\nnotify:\n  slack: {}\n");
//! ```

mod document;
mod emitter;
mod errors;
mod parser;

pub use document::{Document, Entry, Node, Scalar, ScalarStyle, Tag};
pub use emitter::to_string;
pub use errors::{Error, Result};
pub use parser::parse;
