//! # param_inject
//!
//! Parameter injection for pipeline documents.
//!
//! Parameters are written with a doubled dollar sign, like variables in a
//! Makefile, so they never collide with the `$VAR` placeholders that a
//! later stage of the pipeline expands:
//!
//! ```yaml
//! deploy:
//!   heroku:
//!     token: $$HEROKU_TOKEN
//!     tag: $${TAG=$${COMMIT_SHA:8}}
//! ```
//!
//! [`substitute`] rewrites every occurrence it can resolve and leaves the rest
//! alone. [`inject_safe`] does the same but keeps the `build` section exactly
//! as supplied, which is what untrusted documents need.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! let params = HashMap::from([("FOO".to_string(), "BAZ".to_string())]);
//!
//! assert_eq!(param_inject::substitute("echo $$FOO $BAR", &params), "echo BAZ $BAR");
//! ```

use std::collections::HashMap;

mod errors;
mod expander;
mod notation;
mod safe;
mod substitutor;

pub use errors::{InjectError, InjectResult, ParseStage};
pub use safe::{SafeInjector, DEFAULT_PROTECTED_SECTION};
pub use substitutor::{Resolution, Substitutor};

/// Substitutes `params` into `text` with the default [`Substitutor`].
pub fn substitute(text: &str, params: &HashMap<String, String>) -> String {
    Substitutor::default().substitute(text, params)
}

/// Substitutes `params` into `text`, keeping the `build` section verbatim.
///
/// See [`SafeInjector::inject`].
pub fn inject_safe(text: &str, params: &HashMap<String, String>) -> InjectResult<String> {
    SafeInjector::default().inject(text, params)
}
