//! Gate instances and their read handle.

use crate::data::DataContainer;
use crate::endpoint::Endpoint;
use crate::gate_type::{FunctionSignature, GateType, PinDirection};
use crate::ids::{GateId, ModuleId, NetId};
use crate::net::unique_gates;
use crate::netlist::Netlist;
use std::ops::Deref;
use std::sync::Arc;

/// An instance of a [`GateType`].
///
/// A gate's pins are exactly its type's pins. Gates own no nets; they take
/// part in nets through endpoints.
#[derive(Debug, Clone)]
pub struct Gate {
    /// The unique ID of this gate.
    pub id: GateId,
    /// The instance name. Not unique.
    pub name: String,
    /// The shared, immutable type.
    pub gate_type: Arc<GateType>,
    /// The module containing this gate.
    pub module: ModuleId,
    /// Caller annotations.
    pub data: DataContainer,
}

/// A borrowed view of a [`Gate`] together with its netlist, used for
/// navigation across nets.
#[derive(Clone, Copy)]
pub struct GateRef<'a> {
    netlist: &'a Netlist,
    gate: &'a Gate,
}

impl<'a> Deref for GateRef<'a> {
    type Target = Gate;

    fn deref(&self) -> &Gate {
        self.gate
    }
}

impl<'a> GateRef<'a> {
    pub(crate) fn new(netlist: &'a Netlist, gate: &'a Gate) -> Self {
        Self { netlist, gate }
    }

    /// Returns the underlying gate with the netlist's lifetime.
    pub fn gate(&self) -> &'a Gate {
        self.gate
    }

    /// Returns the direction of `pin`, or `None` if the type has no such pin.
    pub fn pin_direction(&self, pin: &str) -> Option<PinDirection> {
        self.gate.gate_type.pin_direction(pin)
    }

    /// Returns the endpoint for one of this gate's pins.
    pub fn endpoint(&self, pin: &str) -> Option<Endpoint> {
        self.gate.gate_type.pin(pin)?;
        Some(self.netlist.endpoint(self.gate.id, pin))
    }

    fn receiving_endpoints(&self) -> impl Iterator<Item = Endpoint> + 'a {
        let netlist = self.netlist;
        let id = self.gate.id;
        self.gate
            .gate_type
            .input_pins()
            .filter_map(move |pin| netlist.known_endpoint(id, &pin.name))
    }

    fn driving_endpoints(&self) -> impl Iterator<Item = Endpoint> + 'a {
        let netlist = self.netlist;
        let id = self.gate.id;
        self.gate
            .gate_type
            .output_pins()
            .filter_map(move |pin| netlist.known_endpoint(id, &pin.name))
    }

    /// Returns the net driving `pin`, if any.
    pub fn fan_in_net(&self, pin: &str) -> Option<NetId> {
        let ep = self.netlist.known_endpoint(self.gate.id, pin)?;
        self.netlist.destination_net_of(ep)
    }

    /// Returns the first net driven by `pin`, if any.
    pub fn fan_out_net(&self, pin: &str) -> Option<NetId> {
        let ep = self.netlist.known_endpoint(self.gate.id, pin)?;
        self.netlist.source_nets_of(ep).first().copied()
    }

    /// Distinct nets driving this gate, in pin order.
    pub fn fan_in_nets(&self) -> Vec<NetId> {
        let mut nets = Vec::new();
        for ep in self.receiving_endpoints() {
            if let Some(net) = self.netlist.destination_net_of(ep) {
                if !nets.contains(&net) {
                    nets.push(net);
                }
            }
        }
        nets
    }

    /// Distinct nets driven by this gate, in pin order.
    pub fn fan_out_nets(&self) -> Vec<NetId> {
        let mut nets = Vec::new();
        for ep in self.driving_endpoints() {
            for net in self.netlist.source_nets_of(ep) {
                if !nets.contains(net) {
                    nets.push(*net);
                }
            }
        }
        nets
    }

    /// Source endpoints of every fan-in net.
    pub fn predecessors(&self) -> Vec<Endpoint> {
        let mut out = Vec::new();
        for net in self.fan_in_nets() {
            if let Some(n) = self.netlist.net(net) {
                out.extend(n.sources().iter().copied());
            }
        }
        out
    }

    /// Destination endpoints of every fan-out net.
    pub fn successors(&self) -> Vec<Endpoint> {
        let mut out = Vec::new();
        for net in self.fan_out_nets() {
            if let Some(n) = self.netlist.net(net) {
                out.extend(n.destinations().iter().copied());
            }
        }
        out
    }

    /// Returns the endpoint driving `pin`, or [`Endpoint::EMPTY`].
    pub fn predecessor(&self, pin: &str) -> Endpoint {
        self.fan_in_net(pin)
            .and_then(|net| self.netlist.net(net))
            .and_then(|net| net.sources().first().copied())
            .unwrap_or(Endpoint::EMPTY)
    }

    /// Distinct predecessor gates.
    pub fn unique_predecessors(&self) -> Vec<GateId> {
        unique_gates(&self.predecessors())
    }

    /// Distinct successor gates.
    pub fn unique_successors(&self) -> Vec<GateId> {
        unique_gates(&self.successors())
    }

    /// Returns `true` if any fan-in net is a global input.
    pub fn is_global_input_gate(&self) -> bool {
        self.fan_in_nets().into_iter().any(|net| {
            self.netlist
                .net(net)
                .is_some_and(|n| n.is_global_input_net())
        })
    }

    /// Returns `true` if any fan-out net is a global output.
    pub fn is_global_output_gate(&self) -> bool {
        self.fan_out_nets().into_iter().any(|net| {
            self.netlist
                .net(net)
                .is_some_and(|n| n.is_global_output_net())
        })
    }

    /// Returns the translator contract for one output pin.
    pub fn function_signature(&self, output: &str) -> Option<FunctionSignature> {
        self.gate.gate_type.function_signature(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::netlist::Netlist;
    use crate::test_util::{gate_1_to_1, gate_3_to_1, gate_4_to_4};

    #[test]
    fn fan_in_and_fan_out() {
        let mut nl = Netlist::new("d");
        let a = nl.create_gate(&gate_1_to_1(), "a").unwrap();
        let b = nl.create_gate(&gate_1_to_1(), "b").unwrap();
        let c = nl.create_gate(&gate_3_to_1(), "c").unwrap();
        let ab = nl.create_net("ab").unwrap();
        let bc = nl.create_net("bc").unwrap();
        nl.add_source(ab, a, "O");
        nl.add_destination(ab, b, "I");
        nl.add_source(bc, b, "O");
        nl.add_destination(bc, c, "I0");
        nl.add_destination(bc, c, "I1");

        let gb = nl.gate(b).unwrap();
        assert_eq!(gb.fan_in_nets(), vec![ab]);
        assert_eq!(gb.fan_out_nets(), vec![bc]);
        assert_eq!(gb.fan_in_net("I"), Some(ab));
        assert_eq!(gb.fan_out_net("O"), Some(bc));
        assert_eq!(gb.predecessor("I"), nl.endpoint(a, "O"));
        assert_eq!(gb.unique_successors(), vec![c]);

        let gc = nl.gate(c).unwrap();
        // same net on two pins counts once
        assert_eq!(gc.fan_in_nets(), vec![bc]);
        assert_eq!(gc.unique_predecessors(), vec![b]);
        assert!(gc.predecessor("I2").is_empty());
        assert!(gc.fan_out_nets().is_empty());
    }

    #[test]
    fn global_gates_follow_net_marks() {
        let mut nl = Netlist::new("d");
        let g = nl.create_gate(&gate_4_to_4(), "g").unwrap();
        let input = nl.create_net("in").unwrap();
        let output = nl.create_net("out").unwrap();
        nl.add_destination(input, g, "I0");
        nl.add_source(output, g, "O3");
        assert!(!nl.gate(g).unwrap().is_global_input_gate());
        nl.mark_global_input_net(input);
        nl.mark_global_output_net(output);
        let gate = nl.gate(g).unwrap();
        assert!(gate.is_global_input_gate());
        assert!(gate.is_global_output_gate());
    }

    #[test]
    fn endpoint_requires_pin() {
        let mut nl = Netlist::new("d");
        let g = nl.create_gate(&gate_1_to_1(), "g").unwrap();
        let gate = nl.gate(g).unwrap();
        assert!(gate.endpoint("I").is_some());
        assert!(gate.endpoint("nope").is_none());
    }
}
