//! Read-only views handed to analysis collaborators.
//!
//! [`NetlistAbstraction`] condenses the netlist to a chosen subset of gates
//! (by default the sequential ones) and the paths between them, looking
//! through every other gate. Dataflow plugins match structural motifs on it
//! and keep their own per-gate results in its annotation slot.
//! [`SimulationView`] is the static lookup surface a simulation controller
//! needs. Neither computes signal values.

use crate::endpoint::Endpoint;
use crate::filter::GateFilter;
use crate::gate::Gate;
use crate::gate_type::{FunctionSignature, PinDirection};
use crate::globals::GlobalDirection;
use crate::ids::{GateId, NetId};
use crate::netlist::Netlist;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Gate-to-gate reachability among a subset of gates.
///
/// `A -> B` means a signal leaving `A` reaches `B` through nets and gates
/// outside the subset only.
#[derive(Debug, Clone)]
pub struct NetlistAbstraction<A = ()> {
    gates: Vec<GateId>,
    successors: BTreeMap<GateId, Vec<GateId>>,
    predecessors: BTreeMap<GateId, Vec<GateId>>,
    annotations: HashMap<GateId, A>,
}

impl<A> NetlistAbstraction<A> {
    /// Builds the abstraction over the sequential gates of `netlist`.
    pub fn build_sequential(netlist: &Netlist) -> Self {
        Self::build(netlist, |g: &Gate| g.gate_type.kind().is_sequential())
    }

    /// Builds the abstraction over the gates accepted by `filter`.
    ///
    /// The per-gate searches run in parallel over the shared netlist.
    pub fn build<F: GateFilter>(netlist: &Netlist, filter: F) -> Self {
        let gates = netlist.gates_where(filter);
        let chosen: BTreeSet<GateId> = gates.iter().copied().collect();

        let edges: Vec<(GateId, Vec<GateId>)> = gates
            .par_iter()
            .map(|&gate| (gate, reachable_subset(netlist, gate, &chosen)))
            .collect();

        let mut successors = BTreeMap::new();
        let mut predecessors: BTreeMap<GateId, Vec<GateId>> =
            gates.iter().map(|g| (*g, Vec::new())).collect();
        for (gate, targets) in edges {
            for target in &targets {
                if let Some(preds) = predecessors.get_mut(target) {
                    preds.push(gate);
                }
            }
            successors.insert(gate, targets);
        }

        Self {
            gates,
            successors,
            predecessors,
            annotations: HashMap::new(),
        }
    }

    /// The gates of the subset in ID order.
    pub fn gates(&self) -> &[GateId] {
        &self.gates
    }

    /// Subset gates reached from `gate`.
    pub fn successors(&self, gate: GateId) -> &[GateId] {
        self.successors.get(&gate).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Subset gates reaching `gate`.
    pub fn predecessors(&self, gate: GateId) -> &[GateId] {
        self.predecessors.get(&gate).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exports the abstraction as a directed graph with one node per gate.
    pub fn to_graph(&self) -> (DiGraph<GateId, ()>, HashMap<GateId, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut index = HashMap::with_capacity(self.gates.len());
        for gate in &self.gates {
            index.insert(*gate, graph.add_node(*gate));
        }
        for (from, targets) in &self.successors {
            for to in targets {
                if let (Some(a), Some(b)) = (index.get(from), index.get(to)) {
                    graph.add_edge(*a, *b, ());
                }
            }
        }
        (graph, index)
    }

    /// Groups of gates lying on a common feedback loop.
    ///
    /// Each group is a strongly connected component with more than one gate,
    /// or a single gate feeding itself. Gates inside a group are sorted.
    pub fn feedback_groups(&self) -> Vec<Vec<GateId>> {
        let (graph, _) = self.to_graph();
        let mut groups: Vec<Vec<GateId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut group: Vec<GateId> = scc.into_iter().map(|n| graph[n]).collect();
                group.sort();
                group
            })
            .collect();
        groups.sort();
        groups
    }

    /// Stores the plugin's result for `gate`, returning the previous one.
    pub fn annotate(&mut self, gate: GateId, annotation: A) -> Option<A> {
        self.annotations.insert(gate, annotation)
    }

    /// Returns the plugin's result for `gate`.
    pub fn annotation(&self, gate: GateId) -> Option<&A> {
        self.annotations.get(&gate)
    }

    /// Returns the plugin's result for `gate` mutably.
    pub fn annotation_mut(&mut self, gate: GateId) -> Option<&mut A> {
        self.annotations.get_mut(&gate)
    }
}

/// Breadth-first search from `start`'s outputs, stopping at subset gates.
fn reachable_subset(netlist: &Netlist, start: GateId, chosen: &BTreeSet<GateId>) -> Vec<GateId> {
    let mut found = BTreeSet::new();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let Some(gate) = netlist.gate(current) else {
            continue;
        };
        for next in gate.unique_successors() {
            if chosen.contains(&next) {
                found.insert(next);
            } else if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    found.into_iter().collect()
}

/// Static per-gate and per-net lookups for a simulation controller.
#[derive(Clone, Copy)]
pub struct SimulationView<'a> {
    netlist: &'a Netlist,
}

impl<'a> SimulationView<'a> {
    /// Wraps `netlist`.
    pub fn new(netlist: &'a Netlist) -> Self {
        Self { netlist }
    }

    /// Pin names and directions of `gate`, in type order.
    pub fn pin_directions(&self, gate: GateId) -> Option<Vec<(&'a str, PinDirection)>> {
        let gate = self.netlist.gate(gate)?.gate();
        Some(
            gate.gate_type
                .pins()
                .iter()
                .map(|p| (p.name.as_str(), p.direction))
                .collect(),
        )
    }

    /// The net attached to `pin`: the driving net for receiving pins,
    /// otherwise the first driven net.
    pub fn net_at_pin(&self, gate: GateId, pin: &str) -> Option<NetId> {
        let g = self.netlist.gate(gate)?;
        match g.pin_direction(pin)? {
            PinDirection::Input => g.fan_in_net(pin),
            PinDirection::InOut => g.fan_in_net(pin).or_else(|| g.fan_out_net(pin)),
            PinDirection::Output | PinDirection::Internal => g.fan_out_net(pin),
        }
    }

    /// The Boolean function reference of `output` on `gate`'s type.
    pub fn boolean_function(&self, gate: GateId, output: &str) -> Option<&'a str> {
        self.netlist
            .gate(gate)?
            .gate()
            .gate_type
            .boolean_function(output)
    }

    /// The translator contract for `output` on `gate`'s type.
    pub fn function_signature(&self, gate: GateId, output: &str) -> Option<FunctionSignature> {
        self.netlist.gate(gate)?.function_signature(output)
    }

    /// Sources of `net` in insertion order.
    pub fn net_sources(&self, net: NetId) -> &'a [Endpoint] {
        self.netlist.net(net).map(|n| n.sources()).unwrap_or(&[])
    }

    /// Destinations of `net` in insertion order.
    pub fn net_destinations(&self, net: NetId) -> &'a [Endpoint] {
        self.netlist
            .net(net)
            .map(|n| n.destinations())
            .unwrap_or(&[])
    }

    /// Nets driven from outside the netlist.
    pub fn input_nets(&self) -> Vec<NetId> {
        self.netlist.global_nets(GlobalDirection::Input)
    }

    /// Nets observed outside the netlist.
    pub fn output_nets(&self) -> Vec<NetId> {
        self.netlist.global_nets(GlobalDirection::Output)
    }
}
