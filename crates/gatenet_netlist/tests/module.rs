//! Module hierarchy scenarios.

mod common;

use common::{empty_netlist, gate_type};
use gatenet_diagnostics::DiagnosticCode;
use gatenet_netlist::{GateId, Netlist};

/// `top > cpu > {alu, regs}` with a chain `a -> b -> c` where `b` sits in `alu`.
fn chain() -> (Netlist, [GateId; 3]) {
    let (mut nl, lib) = empty_netlist();
    let inv = gate_type(&lib, "gate_1_to_1");
    let top = nl.top_module();
    let cpu = nl.create_module("cpu", top).unwrap();
    let alu = nl.create_module("alu", cpu).unwrap();
    nl.create_module("regs", cpu).unwrap();

    let a = nl.create_gate(&inv, "a").unwrap();
    let b = nl.create_gate(&inv, "b").unwrap();
    let c = nl.create_gate(&inv, "c").unwrap();
    nl.assign_gate(alu, b);

    let ab = nl.create_net("ab").unwrap();
    nl.add_source(ab, a, "O");
    nl.add_destination(ab, b, "I");
    let bc = nl.create_net("bc").unwrap();
    nl.add_source(bc, b, "O");
    nl.add_destination(bc, c, "I");
    (nl, [a, b, c])
}

#[test]
fn top_module_is_fixed() {
    let (mut nl, _) = chain();
    let top = nl.top_module();
    let cpu = nl.modules_by_name("cpu")[0];
    assert!(nl.module(top).unwrap().is_top());
    assert!(!nl.set_module_parent(top, cpu));
    assert!(!nl.delete_module(top));
    assert_eq!(nl.diagnostics().count_code(DiagnosticCode::TOP_MODULE_FIXED), 2);
    assert!(nl.module(top).unwrap().parent.is_none());
}

#[test]
fn submodules_direct_and_recursive() {
    let (nl, _) = chain();
    let top = nl.module(nl.top_module()).unwrap();
    assert_eq!(top.submodules(false).len(), 1);
    assert_eq!(top.submodules(true).len(), 3);
    let cpu = nl.modules_by_name("cpu")[0];
    let alu = nl.modules_by_name("alu")[0];
    assert!(top.is_parent_module_of(alu, true));
    assert!(!top.is_parent_module_of(alu, false));
    assert!(nl.module(cpu).unwrap().is_parent_module_of(alu, false));
}

#[test]
fn gate_membership_is_exclusive() {
    let (mut nl, [a, b, _]) = chain();
    let alu = nl.modules_by_name("alu")[0];
    let regs = nl.modules_by_name("regs")[0];
    let top = nl.top_module();

    assert!(nl.module(alu).unwrap().contains_gate(b, false));
    assert!(!nl.module(top).unwrap().contains_gate(b, false));
    assert!(nl.module(top).unwrap().contains_gate(b, true));

    assert!(nl.assign_gate(regs, b));
    assert!(!nl.module(alu).unwrap().contains_gate(b, true));
    assert_eq!(nl.gate(b).unwrap().module, regs);

    // assigning to the current module changes nothing
    assert!(nl.assign_gate(top, a));
    assert_eq!(nl.module(top).unwrap().gates(false), vec![a, nl.gates_by_name("c")[0]]);
}

#[test]
fn assign_gate_rejects_unknown_entities_atomically() {
    let (mut nl, [a, _, _]) = chain();
    let mut other = Netlist::new("other");
    let foreign = other.create_module("foreign", other.top_module()).unwrap();

    assert!(!nl.assign_gate(foreign, a));
    assert_eq!(nl.gate(a).unwrap().module, nl.top_module());
    assert!(nl.diagnostics().has_code(DiagnosticCode::FOREIGN_MODULE));

    assert!(!nl.assign_gate(nl.top_module(), GateId::INVALID));
    assert!(nl.module(nl.top_module()).unwrap().contains_gate(a, false));
}

#[test]
fn boundary_nets_of_a_module() {
    let (nl, [_, b, _]) = chain();
    let alu = nl.module(nl.gate(b).unwrap().module).unwrap();
    let ab = nl.nets_by_name("ab")[0];
    let bc = nl.nets_by_name("bc")[0];
    assert_eq!(alu.input_nets(), vec![ab]);
    assert_eq!(alu.output_nets(), vec![bc]);
    assert!(alu.internal_nets().is_empty());

    // from the top everything is inside
    let top = nl.module(nl.top_module()).unwrap();
    let boundary = top.boundary();
    assert!(boundary.inputs.is_empty());
    assert!(boundary.outputs.is_empty());
    assert_eq!(boundary.internal, vec![ab, bc]);
}

#[test]
fn reparenting_moves_whole_subtree() {
    let (mut nl, [_, b, _]) = chain();
    let top = nl.top_module();
    let cpu = nl.modules_by_name("cpu")[0];
    let alu = nl.modules_by_name("alu")[0];
    let regs = nl.modules_by_name("regs")[0];

    assert!(nl.set_module_parent(alu, regs));
    assert!(nl.module(regs).unwrap().contains_gate(b, true));
    assert!(!nl.module(cpu).unwrap().is_parent_module_of(alu, false));
    assert!(nl.module(top).unwrap().is_parent_module_of(alu, true));

    assert!(!nl.set_module_parent(regs, alu));
    assert_eq!(nl.module(regs).unwrap().parent, Some(cpu));
    assert!(nl.verify_integrity().is_ok());
}
