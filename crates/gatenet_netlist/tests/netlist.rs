//! Netlist-level scenarios: identifiers, configuration, hierarchy, replay and
//! concurrent use.

mod common;

use common::{empty_netlist, gate_type, test_library};
use gatenet_config::load_config_from_str;
use gatenet_diagnostics::{DiagnosticCode, DiagnosticSink, Severity};
use gatenet_netlist::{
    EntityId, GateId, ModuleId, Netlist, NetlistAbstraction, SimulationView, Snapshot,
};
use std::sync::Arc;
use std::thread;

#[test]
fn identifiers_are_per_kind_and_never_reused() {
    let (mut nl, lib) = empty_netlist();
    let ty = gate_type(&lib, "gate_1_to_1");
    let g1 = nl.create_gate(&ty, "g1").unwrap();
    let n1 = nl.create_net("n1").unwrap();
    assert_eq!(g1.raw(), 1);
    assert_eq!(n1.raw(), 1);

    let g5 = nl.create_gate_with_id(5, &ty, "g5").unwrap();
    assert_eq!(g5.raw(), 5);
    assert_eq!(nl.create_gate(&ty, "g2").unwrap().raw(), 2);

    nl.delete_gate(g1);
    assert!(nl.create_gate_with_id(1, &ty, "again").is_none());
    assert_eq!(nl.diagnostics().count_code(DiagnosticCode::ID_CONFLICT), 1);
    assert!(nl.id_registry().is_taken(gatenet_common::EntityKind::Gate, 1));
}

#[test]
fn configuration_drives_ids_names_and_policy() {
    let config = load_config_from_str(
        r#"
[netlist]
name = "design"
top_module = "top"

[ids]
min_gate_id = 100
min_module_id = 10

[connectivity]
exclusive_sources = true
warn_ambiguous_source = false

[diagnostics]
deny = ["C103"]
"#,
    )
    .unwrap();
    let mut nl = Netlist::from_config(config).unwrap();
    let lib = test_library();
    let ty = gate_type(&lib, "gate_1_to_1");

    assert_eq!(nl.name(), "design");
    assert_eq!(nl.module(nl.top_module()).unwrap().name, "top");
    assert_eq!(nl.top_module().raw(), 10);
    assert!(nl.create_gate_with_id(99, &ty, "low").is_none());
    let g = nl.create_gate(&ty, "g").unwrap();
    assert_eq!(g.raw(), 100);

    let a = nl.create_net("a").unwrap();
    let b = nl.create_net("b").unwrap();
    assert!(nl.add_source(a, g, "O"));
    assert!(!nl.add_source(b, g, "O"));
    assert!(nl.diagnostics().has_errors());
    let occupied: Vec<_> = nl
        .diagnostics()
        .diagnostics()
        .into_iter()
        .filter(|d| d.code == DiagnosticCode::ALREADY_OCCUPIED)
        .collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].severity, Severity::Error);
}

#[test]
fn shared_sink_collects_from_several_netlists() {
    let sink = Arc::new(DiagnosticSink::new());
    let mut a = Netlist::with_sink(Default::default(), Arc::clone(&sink));
    let mut b = Netlist::with_sink(Default::default(), Arc::clone(&sink));
    assert!(a.create_net("").is_none());
    assert!(b.create_module("", b.top_module()).is_none());
    assert_eq!(sink.count_code(DiagnosticCode::EMPTY_NAME), 2);
}

#[test]
fn module_tree_operations() {
    let (mut nl, lib) = empty_netlist();
    let top = nl.top_module();
    let alu = nl.create_module("alu", top).unwrap();
    let adder = nl.create_module("adder", alu).unwrap();
    let g = nl.create_gate(&gate_type(&lib, "gate_3_to_1"), "sum").unwrap();

    assert!(nl.assign_gate(adder, g));
    assert_eq!(nl.gate(g).unwrap().module, adder);
    assert!(nl.module(top).unwrap().contains_gate(g, true));

    // a child cannot become the parent of its ancestor
    assert!(!nl.set_module_parent(alu, adder));
    assert!(nl.diagnostics().has_code(DiagnosticCode::HIERARCHY_CYCLE));

    // deleting the middle module lifts its contents
    assert!(nl.delete_module(alu));
    assert_eq!(nl.module(adder).unwrap().parent, Some(top));
    assert_eq!(nl.modules_by_name("alu"), Vec::<ModuleId>::new());
    assert!(nl.verify_integrity().is_ok());
}

fn build_design(nl: &mut Netlist) {
    let lib = test_library();
    let ff = gate_type(&lib, "dff");
    let and3 = gate_type(&lib, "gate_3_to_1");
    let inv = gate_type(&lib, "gate_1_to_1");
    let top = nl.top_module();
    let core = nl.create_module_with_id(4, "core", top).unwrap();

    let q = nl.create_gate_with_id(10, &ff, "q").unwrap();
    let logic = nl.create_gate_with_id(11, &and3, "logic").unwrap();
    let not = nl.create_gate_with_id(12, &inv, "not").unwrap();
    nl.assign_gate(core, logic);

    let clk = nl.create_net_with_id(20, "clk").unwrap();
    nl.add_destination(clk, q, "CLK");
    nl.mark_global_input_net(clk);

    let d = nl.create_net_with_id(21, "d").unwrap();
    nl.add_source(d, logic, "O");
    nl.add_destination(d, q, "D");

    let fb = nl.create_net_with_id(22, "fb").unwrap();
    nl.add_source(fb, q, "Q");
    nl.add_destination(fb, not, "I");
    nl.add_destination(fb, logic, "I1");

    let inv_out = nl.create_net_with_id(23, "inv_out").unwrap();
    nl.add_source(inv_out, not, "O");
    nl.add_destination(inv_out, logic, "I0");
    nl.mark_global_output_net(inv_out);
}

#[test]
fn replaying_explicit_ids_reproduces_the_graph() {
    let mut original = Netlist::new("replay");
    build_design(&mut original);
    let snapshot = Snapshot::capture(&original);

    // replay the same calls by hand on a fresh netlist
    let mut by_hand = Netlist::new("replay");
    build_design(&mut by_hand);
    assert_eq!(Snapshot::capture(&by_hand), snapshot);

    // and through the snapshot
    let rebuilt = snapshot
        .replay(&test_library(), Arc::new(DiagnosticSink::new()))
        .unwrap();
    assert_eq!(Snapshot::capture(&rebuilt), snapshot);
    assert!(rebuilt.verify_integrity().is_ok());
    assert_eq!(Snapshot::capture(&rebuilt).fingerprint(), snapshot.fingerprint());

    for net in original.nets() {
        let twin = rebuilt
            .net(gatenet_netlist::NetId::new(rebuilt.id(), net.id.raw()))
            .unwrap();
        assert_eq!(twin.name, net.name);
        let raw = |eps: &[gatenet_netlist::Endpoint]| -> Vec<u32> {
            eps.iter().map(|e| e.gate().raw()).collect()
        };
        assert_eq!(raw(twin.sources()), raw(net.sources()));
        assert_eq!(raw(twin.destinations()), raw(net.destinations()));
    }
}

#[test]
fn abstraction_over_design() {
    let mut nl = Netlist::new("abs");
    build_design(&mut nl);
    let q = GateId::new(nl.id(), 10);
    let abs: NetlistAbstraction = NetlistAbstraction::build_sequential(&nl);
    assert_eq!(abs.gates(), &[q]);
    // q feeds itself through `not` and `logic`
    assert_eq!(abs.successors(q), &[q]);
    assert_eq!(abs.feedback_groups(), vec![vec![q]]);

    let view = SimulationView::new(&nl);
    assert_eq!(view.input_nets().len(), 1);
    assert_eq!(view.output_nets().len(), 1);
    let sig = view
        .function_signature(GateId::new(nl.id(), 11), "O")
        .unwrap();
    assert_eq!(sig.inputs, vec!["I0", "I1", "I2"]);
}

#[test]
fn independent_netlists_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let mut nl = Netlist::new(format!("thread_{i}"));
                build_design(&mut nl);
                Snapshot::capture(&nl).fingerprint()
            })
        })
        .collect();
    let prints: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // names differ, so fingerprints do too
    for (i, a) in prints.iter().enumerate() {
        for b in &prints[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn concurrent_readers_share_one_netlist() {
    let mut nl = Netlist::new("shared");
    build_design(&mut nl);
    let nl = Arc::new(nl);
    let expected = Snapshot::capture(&nl);
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let nl = Arc::clone(&nl);
            thread::spawn(move || Snapshot::capture(&nl))
        })
        .collect();
    for r in readers {
        assert_eq!(r.join().unwrap(), expected);
    }
}
