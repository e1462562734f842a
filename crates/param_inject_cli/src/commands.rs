//! Command implementations for the param-inject CLI.
//!
//! - `inject_cmd`: reads a document, injects parameters and writes the result

pub mod inject_cmd;
