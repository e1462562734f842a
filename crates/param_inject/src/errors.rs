use std::fmt;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Which of the two documents handled by the safe injector failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    /// The text as supplied by the caller.
    Original,
    /// The text after parameters were substituted.
    Substituted,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Original => write!(f, "original"),
            ParseStage::Substituted => write!(f, "substituted"),
        }
    }
}

/// Errors returned by safe injection.
///
/// Every variant carries the text the caller supplied so that it can be used
/// as a fallback. A partially injected document is never returned.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use param_inject::{inject_safe, InjectError, ParseStage};
///
/// let params = HashMap::from([("TOKEN".to_string(), "x".to_string())]);
/// let text = "build: [unterminated\n";
///
/// match inject_safe(text, &params) {
///     Err(err @ InjectError::Parse { .. }) => {
///         assert_eq!(err.stage(), Some(ParseStage::Original));
///         assert_eq!(err.original_text(), text);
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum InjectError {
    /// The original or the substituted text is not a well-formed document.
    ///
    /// Substitution can break an otherwise valid document, e.g. when a value
    /// contains `: ` or starts with an indicator character.
    #[error("Failed to parse the {stage} document: {source}")]
    Parse {
        /// Document that failed to parse
        stage: ParseStage,
        /// Parser error
        #[source]
        source: ordered_yaml::Error,
        /// Text supplied by the caller
        original: String,
    },

    /// The merged document could not be written back to text.
    #[error("Failed to serialize the injected document: {source}")]
    Serialize {
        /// Emitter error
        #[source]
        source: ordered_yaml::Error,
        /// Text supplied by the caller
        original: String,
    },
}

impl InjectError {
    pub(crate) fn parse(stage: ParseStage, source: ordered_yaml::Error, original: &str) -> Self {
        InjectError::Parse {
            stage,
            source,
            original: original.to_string(),
        }
    }

    /// Text supplied by the caller, unchanged.
    pub fn original_text(&self) -> &str {
        match self {
            InjectError::Parse { original, .. } | InjectError::Serialize { original, .. } => {
                original
            }
        }
    }

    /// Consumes the error, returning the caller's text.
    pub fn into_original_text(self) -> String {
        match self {
            InjectError::Parse { original, .. } | InjectError::Serialize { original, .. } => {
                original
            }
        }
    }

    /// Stage that failed to parse, if this is a parse error.
    pub fn stage(&self) -> Option<ParseStage> {
        match self {
            InjectError::Parse { stage, .. } => Some(*stage),
            InjectError::Serialize { .. } => None,
        }
    }
}

/// Result alias for safe injection.
pub type InjectResult<T> = Result<T, InjectError>;
