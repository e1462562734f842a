//! Parameter substitution over raw text.
//!
//! The [`Substitutor`] rewrites `$$NAME` and `$${NAME<op>ARGS}` occurrences
//! into parameter values. It never looks at the structure of the text and
//! never fails: anything it cannot resolve is left exactly as written.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::expander::{expand, Scope};

#[cfg(test)]
#[path = "substitutor_tests.rs"]
mod tests;

/// How parameter names are resolved against the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// One pass per parameter, in descending lexicographic name order.
    ///
    /// Each pass rewrites every form of that single name before the next
    /// name is considered, so a longer name such as `TAG_SHORT` is handled
    /// before `TAG`. Occurrences nested in an operand resolve when the inner
    /// name sorts after the outer one. Text inserted by an earlier pass is
    /// visible to later passes.
    #[default]
    KeyOrdered,

    /// A single pass with every parameter in scope.
    ///
    /// Nested occurrences resolve regardless of how their names sort, and
    /// inserted values are never scanned for further occurrences.
    Scoped,
}

/// Rewrites `$$` notation in text using a parameter mapping.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use param_inject::Substitutor;
///
/// let params = HashMap::from([
///     ("TAG".to_string(), String::new()),
///     ("SHA".to_string(), "f36cbf54ee1a1eeab264c8e388f386218ab1701b".to_string()),
/// ]);
///
/// let substitutor = Substitutor::new();
/// assert_eq!(
///     substitutor.substitute("tag: $${TAG=$${SHA:8}}", &params),
///     "tag: f36cbf54"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Substitutor {
    resolution: Resolution,
}

impl Substitutor {
    /// Creates a substitutor using [`Resolution::KeyOrdered`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(resolution: Resolution) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Substitutes `params` into `text`.
    ///
    /// An empty mapping returns `text` unchanged without interpreting any
    /// notation. A single `$` is never treated as notation.
    pub fn substitute(&self, text: &str, params: &HashMap<String, String>) -> String {
        if params.is_empty() {
            return text.to_string();
        }

        debug!(
            parameters = params.len(),
            resolution = ?self.resolution,
            "Substituting parameters"
        );

        match self.resolution {
            Resolution::KeyOrdered => {
                let mut names: Vec<&String> = params.keys().collect();
                names.sort_unstable_by(|a, b| b.cmp(a));

                let mut injected = text.to_string();
                for name in names {
                    trace!(parameter = %name, "Applying parameter");
                    let scope = Scope::new([(name.as_str(), params[name].as_str())]);
                    injected = expand(&injected, &scope);
                }
                injected
            }
            Resolution::Scoped => {
                let scope = Scope::new(
                    params
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                );
                expand(text, &scope)
            }
        }
    }
}
