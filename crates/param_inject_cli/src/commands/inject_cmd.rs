//! Parameter injection command.
//!
//! Reads a document from a file or stdin, collects parameters from a
//! configuration file, a parameters file and `--param` flags, and writes the
//! injected document to a file or stdout.
//!
//! Parameter precedence, lowest to highest:
//!
//! 1. `[params]` in the configuration file
//! 2. the parameters file
//! 3. `--param KEY=VALUE` flags

use std::{
    collections::HashMap,
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::Args;
use param_inject::{Resolution, SafeInjector, Substitutor, DEFAULT_PROTECTED_SECTION};
use tracing::{debug, info, instrument};

use crate::{
    config::{AppConfig, ResolutionMode},
    errors::Error,
};

#[cfg(test)]
#[path = "inject_cmd_tests.rs"]
mod tests;

/// Path that stands for stdin or stdout.
const STDIO_PATH: &str = "-";

/// Command-line arguments for parameter injection.
///
/// Flags override the corresponding values from the configuration file.
#[derive(Args, Debug, Default)]
pub struct InjectArgs {
    /// Document to inject into. `-` or absent reads stdin.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Parameter to inject, may be repeated.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// TOML table of string parameters. Files ending in `.json` are read as
    /// a JSON object instead.
    #[arg(long, value_name = "PATH")]
    pub params_file: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the protected section free of substituted values.
    #[arg(long)]
    pub safe: bool,

    /// Top-level section kept verbatim in safe mode [default: build]
    #[arg(long, value_name = "NAME")]
    pub protected_section: Option<String>,

    /// Order in which parameters are resolved [default: key-ordered]
    #[arg(long, value_enum)]
    pub resolution: Option<ResolutionMode>,

    /// Where to write the result. `-` or absent writes stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Effective settings after merging configuration, files and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectSettings {
    pub params: HashMap<String, String>,
    pub safe: bool,
    pub protected_section: String,
    pub resolution: Resolution,
}

impl Default for InjectSettings {
    fn default() -> Self {
        Self {
            params: HashMap::new(),
            safe: false,
            protected_section: DEFAULT_PROTECTED_SECTION.to_string(),
            resolution: Resolution::default(),
        }
    }
}

impl InjectSettings {
    /// Merges the configuration file, the parameters file and the flags in
    /// `args`.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`], [`Error::LoadFile`] or [`Error::ParseParams`] if
    ///   the configuration or parameters file cannot be loaded
    /// * [`Error::InvalidArguments`] if safe mode ends up with an empty
    ///   protected section name
    pub fn resolve(args: &InjectArgs) -> Result<Self, Error> {
        let config = match &args.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        let mut params: HashMap<String, String> = config.params.into_iter().collect();
        if let Some(path) = &args.params_file {
            params.extend(load_params_file(path)?);
        }
        params.extend(args.params.iter().cloned());

        let settings = Self {
            params,
            safe: args.safe || config.safe,
            protected_section: args
                .protected_section
                .clone()
                .unwrap_or(config.protected_section),
            resolution: args.resolution.unwrap_or(config.resolution).into(),
        };

        if settings.safe && settings.protected_section.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "the protected section name must not be empty".to_string(),
            ));
        }

        debug!(
            parameters = settings.params.len(),
            safe = settings.safe,
            section = %settings.protected_section,
            resolution = ?settings.resolution,
            "Resolved injection settings"
        );
        Ok(settings)
    }

    /// Injects the parameters into `text`.
    ///
    /// # Errors
    ///
    /// Only safe mode can fail, see [`SafeInjector::inject`].
    pub fn inject(&self, text: &str) -> Result<String, Error> {
        if self.safe {
            let injector = SafeInjector::new()
                .with_protected_section(self.protected_section.clone())
                .with_resolution(self.resolution);
            Ok(injector.inject(text, &self.params)?)
        } else {
            Ok(Substitutor::with_resolution(self.resolution).substitute(text, &self.params))
        }
    }
}

/// Runs the injection command end to end.
#[instrument(skip_all)]
pub fn execute(args: &InjectArgs) -> Result<(), Error> {
    let settings = InjectSettings::resolve(args)?;

    let text = read_input(args.input.as_deref())?;
    let injected = settings.inject(&text)?;
    write_output(args.output.as_deref(), &injected)?;

    info!(
        parameters = settings.params.len(),
        safe = settings.safe,
        "Injected parameters"
    );
    Ok(())
}

/// Parses a `KEY=VALUE` pair. The value may be empty or contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    if pos == 0 {
        return Err(format!("invalid KEY=VALUE: empty key in `{}`", s));
    }
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Loads a flat table of string parameters.
///
/// # Errors
///
/// * [`Error::LoadFile`] if the file cannot be read
/// * [`Error::ParseParams`] if it is not a table of strings
pub fn load_params_file(path: &Path) -> Result<HashMap<String, String>, Error> {
    debug!("Loading parameters from {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .map_err(|e| Error::ParseParams(format!("{}: {}", path.display(), e)))
    } else {
        toml::from_str(&content)
            .map_err(|e| Error::ParseParams(format!("{}: {}", path.display(), e)))
    }
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p == Path::new(STDIO_PATH))
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    let path = input.unwrap_or(Path::new(STDIO_PATH));
    let load_error = |source| Error::LoadFile {
        path: path.to_path_buf(),
        source,
    };

    if is_stdio(input) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(load_error)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(load_error)
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), Error> {
    let path = output.unwrap_or(Path::new(STDIO_PATH));
    let write_error = |source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if is_stdio(output) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).map_err(write_error)?;
        stdout.flush().map_err(write_error)
    } else {
        fs::write(path, text).map_err(write_error)
    }
}
