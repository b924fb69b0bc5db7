//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::resolve::resolve_denied_codes;
use crate::types::NetlistConfig;
use gatenet_common::EntityKind;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "gatenet.toml";

/// Loads and validates a `gatenet.toml` configuration from a directory.
pub fn load_config(dir: &Path) -> Result<NetlistConfig, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `gatenet.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<NetlistConfig, ConfigError> {
    let config: NetlistConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &NetlistConfig) -> Result<(), ConfigError> {
    if config.netlist.name.is_empty() {
        return Err(ConfigError::MissingField("netlist.name".to_string()));
    }
    if config.netlist.top_module.is_empty() {
        return Err(ConfigError::MissingField("netlist.top_module".to_string()));
    }
    for kind in EntityKind::ALL {
        if config.ids.min_for(kind) == 0 {
            return Err(ConfigError::ValidationError(format!(
                "ids.min_{kind}_id must be at least 1"
            )));
        }
    }
    resolve_denied_codes(&config.diagnostics)?;
    Ok(())
}
