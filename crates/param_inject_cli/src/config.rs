//! Configuration management for the param-inject CLI.
//!
//! A configuration file supplies default parameters and injection settings
//! in TOML format. Command-line flags override anything loaded from it.

use std::{collections::BTreeMap, fs, path::Path};

use clap::ValueEnum;
use param_inject::{Resolution, DEFAULT_PROTECTED_SECTION};
use serde::Deserialize;
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the param-inject CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// safe = true
/// protected_section = "build"
/// resolution = "key-ordered"
///
/// [params]
/// REGISTRY = "registry.example.com"
/// TAG = ""
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Parameters applied before any params file or `--param` flag.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Keep the protected section out of substitution.
    #[serde(default)]
    pub safe: bool,

    /// Top-level section kept verbatim in safe mode.
    #[serde(default = "AppConfig::default_protected_section")]
    pub protected_section: String,

    #[serde(default)]
    pub resolution: ResolutionMode,
}

impl AppConfig {
    fn default_protected_section() -> String {
        DEFAULT_PROTECTED_SECTION.to_string()
    }

    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file does not exist, cannot be read,
    /// or does not match the configuration schema.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use param_inject_cli::config::AppConfig;
    ///
    /// match AppConfig::load(Path::new("./param-inject.toml")) {
    ///     Ok(config) => println!("Loaded {} parameters", config.params.len()),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        debug!(
            parameters = config.params.len(),
            safe = config.safe,
            "Configuration loaded"
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params: BTreeMap::new(),
            safe: false,
            protected_section: Self::default_protected_section(),
            resolution: ResolutionMode::default(),
        }
    }
}

/// Order in which parameters are resolved, as written in configuration
/// files and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// One pass per parameter, in descending key order
    #[default]
    KeyOrdered,
    /// A single pass with every parameter in scope
    Scoped,
}

impl From<ResolutionMode> for Resolution {
    fn from(mode: ResolutionMode) -> Self {
        match mode {
            ResolutionMode::KeyOrdered => Resolution::KeyOrdered,
            ResolutionMode::Scoped => Resolution::Scoped,
        }
    }
}
