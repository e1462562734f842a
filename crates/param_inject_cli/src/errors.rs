use std::{io, path::PathBuf};

use param_inject::InjectError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the param-inject CLI application.
///
/// Every variant ends the process with exit code `1`.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or saving configuration.
    ///
    /// Returned when the configuration file is missing, unreadable, or does
    /// not match the expected TOML structure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to read the input document or a parameters file.
    #[error("Failed to load file {path:?}: {source}")]
    LoadFile {
        /// File that could not be read, `-` for stdin
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the injected document.
    #[error("Failed to write file {path:?}: {source}")]
    WriteFile {
        /// File that could not be written, `-` for stdout
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A parameters file is not a flat table of strings.
    #[error("Failed to parse parameters: {0}")]
    ParseParams(String),

    /// Safe injection rejected the document.
    ///
    /// The input is never written out partially injected.
    #[error("Injection failed: {0}")]
    Inject(#[from] InjectError),
}
