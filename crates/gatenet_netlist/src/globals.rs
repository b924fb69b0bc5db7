//! Netlist-scoped registry of global boundary nets.

use crate::ids::NetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The boundary direction a net can be marked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalDirection {
    /// Driven from outside the netlist.
    Input,
    /// Observed outside the netlist.
    Output,
    /// Both.
    InOut,
}

impl GlobalDirection {
    /// All directions, in declaration order.
    pub const ALL: [GlobalDirection; 3] = [
        GlobalDirection::Input,
        GlobalDirection::Output,
        GlobalDirection::InOut,
    ];
}

impl fmt::Display for GlobalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GlobalDirection::Input => "input",
            GlobalDirection::Output => "output",
            GlobalDirection::InOut => "inout",
        })
    }
}

/// The three global-net sets of one netlist.
///
/// This is the only place global marks are stored; both the netlist-level
/// and the per-net queries read from it.
#[derive(Debug, Clone, Default)]
pub struct GlobalNets {
    input: BTreeSet<NetId>,
    output: BTreeSet<NetId>,
    inout: BTreeSet<NetId>,
}

impl GlobalNets {
    fn set(&self, direction: GlobalDirection) -> &BTreeSet<NetId> {
        match direction {
            GlobalDirection::Input => &self.input,
            GlobalDirection::Output => &self.output,
            GlobalDirection::InOut => &self.inout,
        }
    }

    fn set_mut(&mut self, direction: GlobalDirection) -> &mut BTreeSet<NetId> {
        match direction {
            GlobalDirection::Input => &mut self.input,
            GlobalDirection::Output => &mut self.output,
            GlobalDirection::InOut => &mut self.inout,
        }
    }

    /// Marks `net`. Marking twice is a no-op.
    pub fn mark(&mut self, net: NetId, direction: GlobalDirection) {
        self.set_mut(direction).insert(net);
    }

    /// Unmarks `net`, returning `false` if it was not marked.
    pub fn unmark(&mut self, net: NetId, direction: GlobalDirection) -> bool {
        self.set_mut(direction).remove(&net)
    }

    /// Returns `true` if `net` carries the mark.
    pub fn contains(&self, net: NetId, direction: GlobalDirection) -> bool {
        self.set(direction).contains(&net)
    }

    /// Iterates the marked nets of one direction in ID order.
    pub fn iter(&self, direction: GlobalDirection) -> impl Iterator<Item = NetId> + '_ {
        self.set(direction).iter().copied()
    }

    /// Drops every mark of `net`.
    pub fn forget(&mut self, net: NetId) {
        for direction in GlobalDirection::ALL {
            self.set_mut(direction).remove(&net);
        }
    }
}
