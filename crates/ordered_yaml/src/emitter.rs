//! Block-style YAML emitter for ordered documents.
//!
//! Output layout:
//!
//! ```yaml
//! build:
//!   image: golang
//!   commands:
//!   - go build
//!   - go test
//! ```
//!
//! Nested mappings are indented by two spaces, sequence items sit at the
//! indentation of the key that owns them, and empty collections are written
//! in flow form. Scalars keep their original style while it still reads back
//! to the same value; anything else is double-quoted.

use std::fmt::Write;

use crate::document::{Document, Entry, Node, Scalar, ScalarStyle, Tag};
use crate::errors::Result;

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;

const INDENT: usize = 2;

/// Serializes `document` to YAML text.
///
/// # Examples
///
/// ```rust
/// let doc = ordered_yaml::parse("deploy:\n    heroku:\n        app: demo\n").unwrap();
/// assert_eq!(
///     ordered_yaml::to_string(&doc).unwrap(),
///     "deploy:\n  heroku:\n    app: demo\n"
/// );
/// ```
pub fn to_string(document: &Document) -> Result<String> {
    emit_document(document)
}

pub(crate) fn emit_document(document: &Document) -> Result<String> {
    let mut out = String::new();
    if document.is_empty() {
        out.push_str("{}\n");
        return Ok(out);
    }
    emit_entries(&mut out, document.entries(), 0, false)?;
    Ok(out)
}

/// Writes mapping entries at `indent`. When `first_inline` is set the first
/// entry continues the current line (after a `- ` marker).
fn emit_entries(out: &mut String, entries: &[Entry], indent: usize, first_inline: bool) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 || !first_inline {
            write_indent(out, indent);
        }
        write_key(out, &entry.key)?;
        out.push(':');
        emit_value(out, &entry.value, indent)?;
    }
    Ok(())
}

/// Writes sequence items at `indent`, with the same `first_inline` rule as
/// [`emit_entries`].
fn emit_items(out: &mut String, items: &[Node], indent: usize, first_inline: bool) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        if index > 0 || !first_inline {
            write_indent(out, indent);
        }
        out.push('-');
        emit_item(out, item, indent)?;
    }
    Ok(())
}

/// Writes the value part of `key:` including the trailing newline.
fn emit_value(out: &mut String, value: &Node, indent: usize) -> Result<()> {
    match value {
        Node::Scalar(scalar) if is_bare_null(scalar) => {
            out.push('\n');
            Ok(())
        }
        Node::Scalar(scalar) => {
            out.push(' ');
            write_scalar(out, scalar, indent + INDENT)
        }
        Node::Mapping { entries, tag } if !entries.is_empty() => {
            write_collection_tag(out, tag.as_ref());
            out.push('\n');
            emit_entries(out, entries, indent + INDENT, false)
        }
        Node::Sequence { items, tag } if !items.is_empty() => {
            write_collection_tag(out, tag.as_ref());
            out.push('\n');
            emit_items(out, items, indent, false)
        }
        empty => {
            out.push(' ');
            write_flow(out, empty)?;
            out.push('\n');
            Ok(())
        }
    }
}

/// Writes the part of a sequence item following its `-` marker.
fn emit_item(out: &mut String, item: &Node, indent: usize) -> Result<()> {
    let nested = indent + INDENT;
    match item {
        Node::Scalar(scalar) if is_bare_null(scalar) => {
            out.push('\n');
            Ok(())
        }
        Node::Scalar(scalar) => {
            out.push(' ');
            write_scalar(out, scalar, nested)
        }
        Node::Mapping { entries, tag } if !entries.is_empty() => match tag {
            Some(tag) => {
                write!(out, " {}\n", tag.to_shorthand())?;
                emit_entries(out, entries, nested, false)
            }
            None => {
                out.push(' ');
                emit_entries(out, entries, nested, true)
            }
        },
        Node::Sequence { items, tag } if !items.is_empty() => match tag {
            Some(tag) => {
                write!(out, " {}\n", tag.to_shorthand())?;
                emit_items(out, items, nested, false)
            }
            None => {
                out.push(' ');
                emit_items(out, items, nested, true)
            }
        },
        empty => {
            out.push(' ');
            write_flow(out, empty)?;
            out.push('\n');
            Ok(())
        }
    }
}

fn write_key(out: &mut String, key: &Node) -> Result<()> {
    match key {
        Node::Scalar(scalar) => {
            write_scalar_tag(out, scalar.tag.as_ref());
            out.push_str(&inline_scalar(scalar));
            Ok(())
        }
        collection => write_flow(out, collection),
    }
}

/// Writes a scalar in block context followed by a newline. Multi-line block
/// scalars put their content at `content_indent`.
fn write_scalar(out: &mut String, scalar: &Scalar, content_indent: usize) -> Result<()> {
    write_scalar_tag(out, scalar.tag.as_ref());

    if matches!(scalar.style, ScalarStyle::Literal | ScalarStyle::Folded)
        && is_block_safe(&scalar.value)
    {
        write_literal_block(out, &scalar.value, content_indent);
        return Ok(());
    }

    out.push_str(&inline_scalar(scalar));
    out.push('\n');
    Ok(())
}

fn write_literal_block(out: &mut String, value: &str, content_indent: usize) {
    let (chomping, body) = if let Some(stripped) = value.strip_suffix('\n') {
        if stripped.ends_with('\n') {
            ("+", stripped)
        } else {
            ("", stripped)
        }
    } else {
        ("-", value)
    };

    out.push('|');
    out.push_str(chomping);
    out.push('\n');
    for line in body.split('\n') {
        if !line.is_empty() {
            write_indent(out, content_indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// Single-line rendering of a scalar, quoting as needed.
fn inline_scalar(scalar: &Scalar) -> String {
    match scalar.style {
        ScalarStyle::Plain if is_plain_safe(&scalar.value) => scalar.value.clone(),
        ScalarStyle::SingleQuoted if !scalar.value.chars().any(char::is_control) => {
            format!("'{}'", scalar.value.replace('\'', "''"))
        }
        _ => double_quoted(&scalar.value),
    }
}

fn write_flow(out: &mut String, node: &Node) -> Result<()> {
    match node {
        Node::Scalar(scalar) => {
            write_scalar_tag(out, scalar.tag.as_ref());
            if scalar.style == ScalarStyle::Plain
                && is_plain_safe(&scalar.value)
                && !scalar.value.contains([',', '[', ']', '{', '}'])
            {
                out.push_str(&scalar.value);
            } else {
                out.push_str(&double_quoted(&scalar.value));
            }
        }
        Node::Sequence { items, tag } => {
            write_flow_tag(out, tag.as_ref());
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_flow(out, item)?;
            }
            out.push(']');
        }
        Node::Mapping { entries, tag } => {
            write_flow_tag(out, tag.as_ref());
            out.push('{');
            for (index, entry) in entries.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_flow(out, &entry.key)?;
                out.push_str(": ");
                write_flow(out, &entry.value)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn write_scalar_tag(out: &mut String, tag: Option<&Tag>) {
    if let Some(tag) = tag {
        out.push_str(&tag.to_shorthand());
        out.push(' ');
    }
}

fn write_collection_tag(out: &mut String, tag: Option<&Tag>) {
    if let Some(tag) = tag {
        out.push(' ');
        out.push_str(&tag.to_shorthand());
    }
}

fn write_flow_tag(out: &mut String, tag: Option<&Tag>) {
    if let Some(tag) = tag {
        out.push_str(&tag.to_shorthand());
        out.push(' ');
    }
}

/// An untagged plain empty scalar is a null written as nothing at all, as in
/// `cache:`. Leaving the value out reads back to the same scalar.
fn is_bare_null(scalar: &Scalar) -> bool {
    scalar.style == ScalarStyle::Plain && scalar.tag.is_none() && scalar.value.is_empty()
}

/// Whether `value` reads back unchanged as a plain scalar in block context.
fn is_plain_safe(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        return false;
    }
    if value.chars().any(char::is_control) {
        return false;
    }
    if matches!(
        first,
        '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
    ) {
        return false;
    }
    if matches!(first, '-' | '?' | ':') && chars.next().map_or(true, char::is_whitespace) {
        return false;
    }
    if value.starts_with("---") || value.starts_with("...") {
        return false;
    }
    !(value.contains(": ") || value.contains(" #") || value.ends_with(':'))
}

/// Whether `value` can be written as a `|` block without an indentation
/// indicator.
fn is_block_safe(value: &str) -> bool {
    !value.chars().any(|c| c.is_control() && c != '\n')
        && value
            .split('\n')
            .find(|line| !line.is_empty())
            .is_some_and(|line| !line.starts_with(' '))
}

fn double_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\0' => quoted.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04X}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
