//! Substitution that leaves one document section untouched.
//!
//! Documents contributed by untrusted parties (public pull requests, forks)
//! must not be able to pull secrets into the commands they run. The
//! [`SafeInjector`] substitutes parameters everywhere, then swaps the
//! protected top-level section of the result for the same section taken from
//! the document as it was supplied.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::errors::{InjectError, InjectResult, ParseStage};
use crate::substitutor::{Resolution, Substitutor};

#[cfg(test)]
#[path = "safe_tests.rs"]
mod tests;

/// Top-level section protected by default.
pub const DEFAULT_PROTECTED_SECTION: &str = "build";

/// Injects parameters while keeping one top-level section verbatim.
///
/// The protected section is matched case-insensitively. When a document
/// repeats the section, only the first occurrence in each document is
/// considered.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use param_inject::SafeInjector;
///
/// let params = HashMap::from([("TOKEN".to_string(), "s3cr3t".to_string())]);
/// let text = "build:\n  commands:\n  - echo $$TOKEN\ndeploy:\n  token: $$TOKEN\n";
///
/// let injected = SafeInjector::new().inject(text, &params).unwrap();
/// assert_eq!(
///     injected,
///     "build:\n  commands:\n  - echo $$TOKEN\ndeploy:\n  token: s3cr3t\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SafeInjector {
    protected_section: String,
    substitutor: Substitutor,
}

impl Default for SafeInjector {
    fn default() -> Self {
        Self {
            protected_section: DEFAULT_PROTECTED_SECTION.to_string(),
            substitutor: Substitutor::default(),
        }
    }
}

impl SafeInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Protects `section` instead of `build`.
    pub fn with_protected_section(mut self, section: impl Into<String>) -> Self {
        self.protected_section = section.into();
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.substitutor = Substitutor::with_resolution(resolution);
        self
    }

    pub fn protected_section(&self) -> &str {
        &self.protected_section
    }

    pub fn resolution(&self) -> Resolution {
        self.substitutor.resolution()
    }

    /// Substitutes `params` into `text` everywhere except the protected
    /// section.
    ///
    /// An empty mapping returns `text` unchanged. The result is re-serialized,
    /// so indentation and list style are normalized even in the protected
    /// section; its keys and values are exactly those of the input.
    ///
    /// # Errors
    ///
    /// * [`InjectError::Parse`] if `text`, or `text` after substitution, is not
    ///   a well-formed mapping document
    /// * [`InjectError::Serialize`] if the merged document cannot be emitted
    #[instrument(skip_all, fields(section = %self.protected_section, parameters = params.len()))]
    pub fn inject(&self, text: &str, params: &HashMap<String, String>) -> InjectResult<String> {
        if params.is_empty() {
            return Ok(text.to_string());
        }

        let before = ordered_yaml::parse(text)
            .map_err(|source| InjectError::parse(ParseStage::Original, source, text))?;

        let injected = self.substitutor.substitute(text, params);
        let mut after = ordered_yaml::parse(&injected)
            .map_err(|source| InjectError::parse(ParseStage::Substituted, source, text))?;

        if let Some(index) = after.position_ci(&self.protected_section) {
            match before.find_ci(&self.protected_section) {
                Some(original) => {
                    after.entries_mut()[index] = original.clone();
                    debug!(index, "Restored protected section from the original document");
                }
                None => {
                    // The section only exists after substitution, so a
                    // parameter value produced it.
                    after.entries_mut().remove(index);
                    warn!("Dropped protected section introduced by parameter substitution");
                }
            }
        }

        after.to_yaml_string().map_err(|source| InjectError::Serialize {
            source,
            original: text.to_string(),
        })
    }
}
