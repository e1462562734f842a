//! Single pass of `$$` expansion over a piece of text.

use crate::notation::{BraceIndex, Operation, SIGIL};

#[cfg(test)]
#[path = "expander_tests.rs"]
mod tests;

/// Braced occurrences nested deeper than this are left as written.
const MAX_NESTING: usize = 32;

/// Parameters visible to one expansion pass.
///
/// Bindings are ordered longest name first so that a bare `$$TAG_SHORT` is
/// matched against `TAG_SHORT` before `TAG`. Empty names are never bound.
pub(crate) struct Scope<'p> {
    bindings: Vec<(&'p str, &'p str)>,
}

impl<'p> Scope<'p> {
    pub(crate) fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut bindings: Vec<(&'p str, &'p str)> = pairs
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();
        bindings.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| b.0.cmp(a.0)));
        Self { bindings }
    }

    /// Longest bound name that `text` starts with.
    fn longest_prefix(&self, text: &str) -> Option<(&'p str, &'p str)> {
        self.bindings
            .iter()
            .copied()
            .find(|(name, _)| text.starts_with(name))
    }
}

/// Tracks whether the scan position is inside a double-quoted run.
///
/// A `"` toggles the state, `\"` inside quotes does not, and a newline always
/// ends the run. Single quotes are not tracked, so a value inserted into a
/// single-quoted run is written as is.
#[derive(Debug, Default)]
struct QuoteState {
    inside: bool,
    escaped: bool,
}

impl QuoteState {
    fn advance(&mut self, literal: &str) {
        for c in literal.chars() {
            if self.escaped {
                self.escaped = false;
                if c == '\n' {
                    self.inside = false;
                }
                continue;
            }
            match c {
                '\n' => self.inside = false,
                '\\' if self.inside => self.escaped = true,
                '"' => self.inside = !self.inside,
                _ => {}
            }
        }
    }
}

/// Expands every occurrence bound in `scope`.
///
/// Text that is not a resolvable occurrence is copied unchanged. Values
/// inserted by this pass are not scanned again.
pub(crate) fn expand(text: &str, scope: &Scope<'_>) -> String {
    expand_from(text, scope, false, 0)
}

/// Expansion starting inside (`quoted`) or outside a double-quoted run, with
/// `depth` enclosing braced occurrences.
fn expand_from(text: &str, scope: &Scope<'_>, quoted: bool, depth: usize) -> String {
    let braces = BraceIndex::new(text);
    let mut out = String::with_capacity(text.len());
    let mut quotes = QuoteState {
        inside: quoted,
        escaped: false,
    };
    let mut literal_start = 0;
    let mut quotes_upto = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(SIGIL) {
        let start = cursor + offset;

        quotes.advance(&text[quotes_upto..start]);
        quotes_upto = start;

        let occurrence = Occurrence {
            text,
            after: start + SIGIL.len(),
            braces: &braces,
            quoted: quotes.inside,
            depth,
        };
        match occurrence.expand(scope) {
            Some((replacement, end)) => {
                out.push_str(&text[literal_start..start]);
                out.push_str(&replacement);
                cursor = end;
                literal_start = end;
                quotes_upto = end;
            }
            // In `$$$NAME` the occurrence starts one byte later.
            None => cursor = start + 1,
        }
    }

    out.push_str(&text[literal_start..]);
    out
}

/// A `$$` found in `text`, with the state of the scan at that point.
struct Occurrence<'a> {
    text: &'a str,
    /// Byte index just past the sigil
    after: usize,
    braces: &'a BraceIndex,
    quoted: bool,
    depth: usize,
}

impl Occurrence<'_> {
    /// Returns the replacement and the byte index where the occurrence ends,
    /// or `None` when nothing here can be rewritten.
    fn expand(&self, scope: &Scope<'_>) -> Option<(String, usize)> {
        let rest = &self.text[self.after..];
        let (value, end) = if rest.starts_with('{') {
            if self.depth >= MAX_NESTING {
                return None;
            }
            let close = self.braces.closing(self.after)?;
            let body = &self.text[self.after + 1..close];
            match resolve_braced(body, scope, self.depth + 1) {
                Some(value) => (value, close + 1),
                // Unbound: keep the braces, expand what is nested inside.
                None => {
                    let inner = expand_from(body, scope, self.quoted, self.depth + 1);
                    return Some((format!("{SIGIL}{{{inner}}}"), close + 1));
                }
            }
        } else {
            let (name, value) = scope.longest_prefix(rest)?;
            (value.to_string(), self.after + name.len())
        };

        if self.quoted {
            Some((escape_quoted(&value), end))
        } else {
            Some((value, end))
        }
    }
}

/// Resolves the body of a braced occurrence, or `None` when its name is not
/// bound or its operator cannot be applied.
fn resolve_braced(body: &str, scope: &Scope<'_>, depth: usize) -> Option<String> {
    scope
        .bindings
        .iter()
        .filter(|(name, _)| body.starts_with(name))
        .find_map(|(name, value)| {
            let operation = Operation::parse(&body[name.len()..])?;
            operation.apply(value, |operand| expand_from(operand, scope, false, depth))
        })
}

/// Escapes a value written inside a double-quoted run, so that the run stays
/// closed and reads back to the value.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}
