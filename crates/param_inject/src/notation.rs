//! Grammar of the `$$` notation.
//!
//! A braced occurrence `$${NAME<op>ARGS}` is split into the parameter name
//! and an [`Operation`]. Operands are kept as raw text here; the expander
//! resolves any occurrences nested inside them before the operation runs.
//!
//! | Syntax              | Operation                                   |
//! |---------------------|---------------------------------------------|
//! | `$${NAME}`          | value                                       |
//! | `$${NAME=DEFAULT}`  | value, or `DEFAULT` when the value is empty |
//! | `$${NAME:N}`        | first `N` characters                        |
//! | `$${NAME:P:L}`      | `L` characters from character offset `P`    |
//! | `$${NAME##PREFIX}`  | value without a leading `PREFIX` (also `#`) |
//! | `$${NAME%%SUFFIX}`  | value without a trailing `SUFFIX` (also `%`)|
//! | `$${NAME/OLD/NEW}`  | first `OLD` replaced with `NEW`             |
//! | `$${NAME//OLD/NEW}` | every `OLD` replaced with `NEW`             |

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

#[cfg(test)]
#[path = "notation_tests.rs"]
mod tests;

/// Marker that introduces an occurrence.
pub(crate) const SIGIL: &str = "$$";

static SLICE_ARGUMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?::\s*(\d+)\s*)?$").expect("slice argument pattern is valid")
});

/// Operation applied to a parameter value inside braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation<'t> {
    Value,
    Default(&'t str),
    Slice(&'t str),
    TrimPrefix(&'t str),
    TrimSuffix(&'t str),
    Replace {
        pattern: &'t str,
        replacement: &'t str,
        all: bool,
    },
}

impl<'t> Operation<'t> {
    /// Parses the text that follows the parameter name inside the braces.
    ///
    /// Returns `None` for an unknown operator.
    pub(crate) fn parse(rest: &'t str) -> Option<Self> {
        let Some(operator) = rest.chars().next() else {
            return Some(Operation::Value);
        };

        let operation = match operator {
            '=' => Operation::Default(&rest[1..]),
            ':' => Operation::Slice(&rest[1..]),
            '#' => Operation::TrimPrefix(rest.strip_prefix("##").unwrap_or(&rest[1..])),
            '%' => Operation::TrimSuffix(rest.strip_prefix("%%").unwrap_or(&rest[1..])),
            '/' => {
                let (all, body) = match rest.strip_prefix("//") {
                    Some(body) => (true, body),
                    None => (false, &rest[1..]),
                };
                let (pattern, replacement) = split_unnested(body, '/').unwrap_or((body, ""));
                Operation::Replace {
                    pattern,
                    replacement,
                    all,
                }
            }
            _ => return None,
        };
        Some(operation)
    }

    /// Applies the operation to `value`.
    ///
    /// `resolve` expands occurrences nested in an operand. Returns `None` when
    /// the operands are malformed, in which case the occurrence is kept as
    /// written.
    pub(crate) fn apply<F>(&self, value: &str, resolve: F) -> Option<String>
    where
        F: Fn(&str) -> String,
    {
        let result = match *self {
            Operation::Value => value.to_string(),
            Operation::Default(fallback) => {
                if value.is_empty() {
                    resolve(fallback)
                } else {
                    value.to_string()
                }
            }
            Operation::Slice(arguments) => slice(value, &resolve(arguments))?,
            Operation::TrimPrefix(prefix) => {
                let prefix = resolve(prefix);
                value.strip_prefix(prefix.as_str()).unwrap_or(value).to_string()
            }
            Operation::TrimSuffix(suffix) => {
                let suffix = resolve(suffix);
                value.strip_suffix(suffix.as_str()).unwrap_or(value).to_string()
            }
            Operation::Replace {
                pattern,
                replacement,
                all,
            } => {
                let pattern = resolve(pattern);
                if pattern.is_empty() {
                    value.to_string()
                } else if all {
                    value.replace(&pattern, &resolve(replacement))
                } else {
                    value.replacen(&pattern, &resolve(replacement), 1)
                }
            }
        };
        Some(result)
    }
}

/// Character slice for `:N` and `:P:L` arguments.
fn slice(value: &str, arguments: &str) -> Option<String> {
    let captures = SLICE_ARGUMENTS.captures(arguments)?;
    let first: usize = captures[1].parse().ok()?;

    let sliced = match captures.get(2) {
        Some(length) => {
            let length: usize = length.as_str().parse().ok()?;
            value.chars().skip(first).take(length).collect()
        }
        None => value.chars().take(first).collect(),
    };
    Some(sliced)
}

/// Closing brace of every balanced `{` in a text, found in one scan.
///
/// Every brace counts toward nesting. A `}` with nothing open is ignored.
pub(crate) struct BraceIndex {
    closing: HashMap<usize, usize>,
}

impl BraceIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut open = Vec::new();
        let mut closing = HashMap::new();
        for (index, c) in text.char_indices() {
            match c {
                '{' => open.push(index),
                '}' => {
                    if let Some(start) = open.pop() {
                        closing.insert(start, index);
                    }
                }
                _ => {}
            }
        }
        Self { closing }
    }

    /// Byte index of the `}` closing the `{` at byte index `open`, or `None`
    /// when that brace never balances.
    pub(crate) fn closing(&self, open: usize) -> Option<usize> {
        self.closing.get(&open).copied()
    }
}

/// Splits `text` at the first `separator` outside any braces.
fn split_unnested(text: &str, separator: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                return Some((&text[..index], &text[index + c.len_utf8()..]));
            }
            _ => {}
        }
    }
    None
}
