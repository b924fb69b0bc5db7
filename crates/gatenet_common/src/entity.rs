//! The kinds of entities a netlist owns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a netlist entity.
///
/// Identifiers are unique per `(netlist, kind)`, so the same raw number may
/// name a gate and a net at the same time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    /// A gate instance.
    Gate,
    /// A net (wire).
    Net,
    /// A hierarchical module.
    Module,
}

impl EntityKind {
    /// All entity kinds, in declaration order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Gate, EntityKind::Net, EntityKind::Module];

    /// Returns the lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Gate => "gate",
            EntityKind::Net => "net",
            EntityKind::Module => "module",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
