//! Turning configuration values into runtime objects.

use crate::error::ConfigError;
use crate::types::{DiagnosticsConfig, NetlistConfig};
use gatenet_diagnostics::{DiagnosticCode, DiagnosticSink};

/// Parses every entry of `diagnostics.deny` into a [`DiagnosticCode`].
pub fn resolve_denied_codes(
    config: &DiagnosticsConfig,
) -> Result<Vec<DiagnosticCode>, ConfigError> {
    config
        .deny
        .iter()
        .map(|s| {
            s.parse::<DiagnosticCode>()
                .map_err(|_| ConfigError::UnknownCode(s.clone()))
        })
        .collect()
}

/// Builds the diagnostic sink a netlist created from `config` reports into.
pub fn build_sink(config: &NetlistConfig) -> Result<DiagnosticSink, ConfigError> {
    Ok(DiagnosticSink::with_denied(resolve_denied_codes(
        &config.diagnostics,
    )?))
}
