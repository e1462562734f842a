use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while reading or writing an ordered YAML document.
///
/// # Examples
///
/// ```rust
/// use ordered_yaml::Error;
///
/// match ordered_yaml::parse("- just\n- a list\n") {
///     Err(Error::NotAMapping { found }) => assert_eq!(found, "sequence"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The text is not well-formed YAML.
    ///
    /// Wraps the message and position reported by the `yaml-rust2` scanner.
    #[error("YAML syntax error: {message}")]
    Scan {
        /// Scanner message, including line and column
        message: String,
    },

    /// The top-level value of the document is not a mapping.
    ///
    /// Pipeline documents are always key/value mappings at the root; a
    /// scalar or sequence at the top level cannot carry named sections.
    #[error("Expected a mapping at the top level of the document, found a {found}")]
    NotAMapping {
        /// Kind of node found at the root
        found: String,
    },

    /// Writing the document back to text failed.
    #[error("Failed to emit YAML: {0}")]
    Emit(String),
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Scan {
            message: err.to_string(),
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Emit(err.to_string())
    }
}

/// Result alias for ordered YAML operations.
pub type Result<T> = std::result::Result<T, Error>;
