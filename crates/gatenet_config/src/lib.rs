//! Parsing and validation of `gatenet.toml` netlist configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`NetlistConfig`] covering identifier minimums, connectivity policy, and
//! diagnostic escalation.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{build_sink, resolve_denied_codes};
pub use types::*;
