//! Hierarchical modules and their read handle.

use crate::data::DataContainer;
use crate::ids::{GateId, ModuleId, NetId};
use crate::netlist::Netlist;
use std::collections::BTreeSet;
use std::ops::Deref;

/// A named group of gates inside the module tree.
#[derive(Debug, Clone)]
pub struct Module {
    /// The unique ID of this module.
    pub id: ModuleId,
    /// The module name. Not unique.
    pub name: String,
    /// The parent module; `None` only for the top module.
    pub parent: Option<ModuleId>,
    /// Direct child modules.
    pub submodules: BTreeSet<ModuleId>,
    /// Gates placed directly in this module.
    pub gates: BTreeSet<GateId>,
    /// Caller annotations.
    pub data: DataContainer,
}

impl Module {
    pub(crate) fn new(id: ModuleId, name: String, parent: Option<ModuleId>) -> Self {
        Self {
            id,
            name,
            parent,
            submodules: BTreeSet::new(),
            gates: BTreeSet::new(),
            data: DataContainer::default(),
        }
    }
}

/// A borrowed view of a [`Module`] together with its netlist.
#[derive(Clone, Copy)]
pub struct ModuleRef<'a> {
    netlist: &'a Netlist,
    module: &'a Module,
}

impl<'a> Deref for ModuleRef<'a> {
    type Target = Module;

    fn deref(&self) -> &Module {
        self.module
    }
}

/// How a net relates to the gates of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleBoundary {
    /// Nets entering the module.
    pub inputs: Vec<NetId>,
    /// Nets leaving the module.
    pub outputs: Vec<NetId>,
    /// Nets with every endpoint inside the module.
    pub internal: Vec<NetId>,
}

impl<'a> ModuleRef<'a> {
    pub(crate) fn new(netlist: &'a Netlist, module: &'a Module) -> Self {
        Self { netlist, module }
    }

    /// Returns `true` for the netlist's top module.
    pub fn is_top(&self) -> bool {
        self.module.parent.is_none()
    }

    /// Child modules; with `recursive`, every descendant in breadth-first order.
    pub fn submodules(&self, recursive: bool) -> Vec<ModuleId> {
        if !recursive {
            return self.module.submodules.iter().copied().collect();
        }
        let mut out = Vec::new();
        let mut frontier: Vec<ModuleId> = self.module.submodules.iter().copied().collect();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for id in frontier {
                out.push(id);
                if let Some(m) = self.netlist.modules.get(id) {
                    next.extend(m.submodules.iter().copied());
                }
            }
            frontier = next;
        }
        out
    }

    /// Gates of this module; with `recursive`, also those of all descendants.
    pub fn gates(&self, recursive: bool) -> Vec<GateId> {
        let mut out: Vec<GateId> = self.module.gates.iter().copied().collect();
        if recursive {
            for sub in self.submodules(true) {
                if let Some(m) = self.netlist.modules.get(sub) {
                    out.extend(m.gates.iter().copied());
                }
            }
        }
        out
    }

    /// Returns `true` if `gate` is in this module (or a descendant, with `recursive`).
    pub fn contains_gate(&self, gate: GateId, recursive: bool) -> bool {
        if self.module.gates.contains(&gate) {
            return true;
        }
        recursive
            && self
                .netlist
                .gate(gate)
                .is_some_and(|g| self.is_parent_module_of(g.module, true))
    }

    /// Returns `true` if this module is the parent of `other`, or with
    /// `recursive` any ancestor of it.
    pub fn is_parent_module_of(&self, other: ModuleId, recursive: bool) -> bool {
        let mut current = self.netlist.modules.get(other).and_then(|m| m.parent);
        while let Some(parent) = current {
            if parent == self.module.id {
                return true;
            }
            if !recursive {
                return false;
            }
            current = self.netlist.modules.get(parent).and_then(|m| m.parent);
        }
        false
    }

    /// Classifies the nets touching this module's gates (recursively).
    ///
    /// A net is an input if it feeds a gate inside and is driven from
    /// outside or marked global input; an output if it is driven inside and
    /// feeds a gate outside or is marked global output. A net touching the
    /// module that is neither is internal.
    pub fn boundary(&self) -> ModuleBoundary {
        let inside: BTreeSet<GateId> = self.gates(true).into_iter().collect();
        let mut touched = BTreeSet::new();
        for gate in &inside {
            if let Some(g) = self.netlist.gate(*gate) {
                touched.extend(g.fan_in_nets());
                touched.extend(g.fan_out_nets());
            }
        }
        let mut boundary = ModuleBoundary::default();
        for id in touched {
            let Some(net) = self.netlist.net(id) else {
                continue;
            };
            let is_inside = |ep: &crate::endpoint::Endpoint| inside.contains(&ep.gate());
            let feeds_inside = net.destinations().iter().any(is_inside);
            let driven_inside = net.sources().iter().any(is_inside);
            let input = feeds_inside
                && (net.is_global_input_net() || !net.sources().iter().all(is_inside));
            let output = driven_inside
                && (net.is_global_output_net() || !net.destinations().iter().all(is_inside));
            if input {
                boundary.inputs.push(id);
            }
            if output {
                boundary.outputs.push(id);
            }
            if !input && !output {
                boundary.internal.push(id);
            }
        }
        boundary
    }

    /// Nets entering the module. See [`ModuleRef::boundary`].
    pub fn input_nets(&self) -> Vec<NetId> {
        self.boundary().inputs
    }

    /// Nets leaving the module. See [`ModuleRef::boundary`].
    pub fn output_nets(&self) -> Vec<NetId> {
        self.boundary().outputs
    }

    /// Nets fully inside the module. See [`ModuleRef::boundary`].
    pub fn internal_nets(&self) -> Vec<NetId> {
        self.boundary().internal
    }
}

#[cfg(test)]
mod tests {
    use crate::netlist::Netlist;
    use crate::test_util::gate_1_to_1;

    #[test]
    fn recursive_queries() {
        let mut nl = Netlist::new("d");
        let top = nl.top_module();
        let a = nl.create_module("a", top).unwrap();
        let b = nl.create_module("b", a).unwrap();
        let g = nl.create_gate(&gate_1_to_1(), "g").unwrap();
        nl.assign_gate(b, g);

        let top_ref = nl.module(top).unwrap();
        assert!(top_ref.is_top());
        assert_eq!(top_ref.submodules(false), vec![a]);
        assert_eq!(top_ref.submodules(true), vec![a, b]);
        assert!(top_ref.gates(false).is_empty());
        assert_eq!(top_ref.gates(true), vec![g]);
        assert!(top_ref.contains_gate(g, true));
        assert!(!top_ref.contains_gate(g, false));
        assert!(top_ref.is_parent_module_of(b, true));
        assert!(!top_ref.is_parent_module_of(b, false));
        assert!(!nl.module(b).unwrap().is_parent_module_of(top, true));
    }

    #[test]
    fn boundary_nets() {
        let mut nl = Netlist::new("d");
        let top = nl.top_module();
        let m = nl.create_module("m", top).unwrap();
        let ty = gate_1_to_1();
        let outside_src = nl.create_gate(&ty, "src").unwrap();
        let inner_a = nl.create_gate(&ty, "a").unwrap();
        let inner_b = nl.create_gate(&ty, "b").unwrap();
        let outside_dst = nl.create_gate(&ty, "dst").unwrap();
        nl.assign_gate(m, inner_a);
        nl.assign_gate(m, inner_b);

        let n_in = nl.create_net("in").unwrap();
        let n_mid = nl.create_net("mid").unwrap();
        let n_out = nl.create_net("out").unwrap();
        nl.add_source(n_in, outside_src, "O");
        nl.add_destination(n_in, inner_a, "I");
        nl.add_source(n_mid, inner_a, "O");
        nl.add_destination(n_mid, inner_b, "I");
        nl.add_source(n_out, inner_b, "O");
        nl.add_destination(n_out, outside_dst, "I");

        let module = nl.module(m).unwrap();
        assert_eq!(module.input_nets(), vec![n_in]);
        assert_eq!(module.output_nets(), vec![n_out]);
        assert_eq!(module.internal_nets(), vec![n_mid]);
    }
}
