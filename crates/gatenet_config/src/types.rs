//! Configuration types deserialized from `gatenet.toml`.

use gatenet_common::EntityKind;
use serde::Deserialize;

/// The top-level netlist configuration.
///
/// Every section is optional; an empty file yields [`NetlistConfig::default`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NetlistConfig {
    /// Naming of the netlist and its implicit top module.
    pub netlist: NetlistSection,
    /// Minimum identifiers per entity kind.
    pub ids: IdConfig,
    /// Connectivity policy switches.
    pub connectivity: ConnectivityConfig,
    /// Diagnostic escalation.
    pub diagnostics: DiagnosticsConfig,
}

/// The `[netlist]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NetlistSection {
    /// The netlist (design) name.
    pub name: String,
    /// The name given to the implicit top module.
    pub top_module: String,
}

impl Default for NetlistSection {
    fn default() -> Self {
        Self {
            name: "netlist".to_string(),
            top_module: "top_module".to_string(),
        }
    }
}

/// The `[ids]` section: smallest identifier accepted per entity kind.
///
/// Explicit registrations below the minimum are rejected and allocation
/// starts at the minimum. Zero is always reserved.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IdConfig {
    /// Minimum gate identifier.
    pub min_gate_id: u32,
    /// Minimum net identifier.
    pub min_net_id: u32,
    /// Minimum module identifier.
    pub min_module_id: u32,
}

impl IdConfig {
    /// Returns the configured minimum for an entity kind.
    pub fn min_for(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Gate => self.min_gate_id,
            EntityKind::Net => self.min_net_id,
            EntityKind::Module => self.min_module_id,
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            min_gate_id: 1,
            min_net_id: 1,
            min_module_id: 1,
        }
    }
}

/// The `[connectivity]` section.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectivityConfig {
    /// Reject a source endpoint that already drives another net.
    pub exclusive_sources: bool,
    /// Emit a note when a single source is read from a multi-source net.
    pub warn_ambiguous_source: bool,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            exclusive_sources: false,
            warn_ambiguous_source: true,
        }
    }
}

/// The `[diagnostics]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Diagnostic codes (e.g. `"C103"`) escalated to errors.
    pub deny: Vec<String>,
}
