//! Moving gates and modules within the module tree.

use crate::error::NetlistError;
use crate::ids::{GateId, ModuleId};
use crate::netlist::Netlist;

impl Netlist {
    /// Moves `gate` into `module`.
    ///
    /// The gate leaves its previous module in the same step; it is never in
    /// zero or two modules. Assigning a gate to the module it is already in
    /// succeeds without change.
    pub fn assign_gate(&mut self, module: ModuleId, gate: GateId) -> bool {
        let previous = match self
            .check_module(module)
            .and_then(|_| self.check_gate(gate))
        {
            Ok(g) => g.module,
            Err(err) => return self.report(err),
        };
        if previous == module {
            return true;
        }
        if let Some(old) = self.modules.get_mut(previous) {
            old.gates.remove(&gate);
        }
        if let Some(new) = self.modules.get_mut(module) {
            new.gates.insert(gate);
        }
        if let Some(g) = self.gates.get_mut(gate) {
            g.module = module;
        }
        true
    }

    /// Places `module` under `parent`.
    ///
    /// Refused for the top module, for foreign modules, and when `parent` is
    /// `module` itself or one of its descendants.
    pub fn set_module_parent(&mut self, module: ModuleId, parent: ModuleId) -> bool {
        let previous = match self.validate_reparent(module, parent) {
            Ok(previous) => previous,
            Err(err) => return self.report(err),
        };
        if previous == parent {
            return true;
        }
        if let Some(old) = self.modules.get_mut(previous) {
            old.submodules.remove(&module);
        }
        if let Some(new) = self.modules.get_mut(parent) {
            new.submodules.insert(module);
        }
        if let Some(m) = self.modules.get_mut(module) {
            m.parent = Some(parent);
        }
        true
    }

    /// Returns the current parent of `module`.
    fn validate_reparent(
        &self,
        module: ModuleId,
        parent: ModuleId,
    ) -> Result<ModuleId, NetlistError> {
        let moved = self.check_module(module)?;
        self.check_module(parent)?;
        let Some(previous) = moved.parent else {
            return Err(NetlistError::TopModuleFixed { action: "reparented" });
        };
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == module {
                return Err(NetlistError::HierarchyCycle {
                    module: module.raw(),
                    parent: parent.raw(),
                });
            }
            ancestor = self.modules.get(current).and_then(|m| m.parent);
        }
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use crate::netlist::Netlist;
    use crate::test_util::gate_1_to_1;
    use gatenet_diagnostics::DiagnosticCode;

    #[test]
    fn assign_moves_atomically() {
        let mut nl = Netlist::new("d");
        let top = nl.top_module();
        let m = nl.create_module("m", top).unwrap();
        let g = nl.create_gate(&gate_1_to_1(), "g").unwrap();
        assert!(nl.assign_gate(m, g));
        assert!(!nl.module(top).unwrap().gates.contains(&g));
        assert!(nl.module(m).unwrap().gates.contains(&g));
        assert_eq!(nl.gate(g).unwrap().module, m);
        assert!(nl.assign_gate(m, g));
    }

    #[test]
    fn assign_to_foreign_module_fails() {
        let mut nl = Netlist::new("a");
        let other = Netlist::new("b");
        let g = nl.create_gate(&gate_1_to_1(), "g").unwrap();
        assert!(!nl.assign_gate(other.top_module(), g));
        assert!(nl.diagnostics().has_code(DiagnosticCode::FOREIGN_MODULE));
        assert_eq!(nl.gate(g).unwrap().module, nl.top_module());
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut nl = Netlist::new("d");
        let top = nl.top_module();
        let a = nl.create_module("a", top).unwrap();
        let b = nl.create_module("b", a).unwrap();
        assert!(!nl.set_module_parent(a, b));
        assert!(!nl.set_module_parent(a, a));
        assert_eq!(nl.diagnostics().count_code(DiagnosticCode::HIERARCHY_CYCLE), 2);
        assert!(!nl.set_module_parent(top, a));
        assert!(nl.diagnostics().has_code(DiagnosticCode::TOP_MODULE_FIXED));

        assert!(nl.set_module_parent(b, top));
        assert_eq!(nl.module(b).unwrap().parent, Some(top));
        assert!(nl.module(a).unwrap().submodules.is_empty());
        assert!(nl.set_module_parent(a, b));
    }
}
