//! param-inject CLI library exports for integration testing.
//!
//! The binary is a thin wrapper around [`commands::inject_cmd::execute`].

pub mod commands;
pub mod config;
pub mod errors;
