//! Side-effect-free predicates over endpoints, gates and nets.
//!
//! Filters are plain values: the named structs in this module, closures, or
//! an [`And`] of two filters. They never mutate what they inspect.
//!
//! ```
//! use gatenet_netlist::filter::{and, endpoint_gate_type, PinName};
//! let only_clock_pins_of_dffs = and(endpoint_gate_type("dff"), PinName::new("CLK"));
//! # let _ = only_clock_pins_of_dffs;
//! ```

use crate::endpoint::Endpoint;
use crate::gate::Gate;
use crate::gate_type::PinDirection;
use crate::net::Net;
use crate::netlist::Netlist;

/// An endpoint resolved against its netlist, as seen by an [`EndpointFilter`].
#[derive(Debug, Clone, Copy)]
pub struct EndpointView<'a> {
    /// The endpoint itself.
    pub endpoint: Endpoint,
    /// The gate the endpoint is on.
    pub gate: &'a Gate,
    /// The pin name.
    pub pin: &'a str,
    /// The pin's direction on the gate type.
    pub direction: PinDirection,
}

impl<'a> EndpointView<'a> {
    /// Resolves `endpoint` in `netlist`. Returns `None` for the empty endpoint
    /// and for endpoints whose gate or pin is unknown.
    pub fn resolve(netlist: &'a Netlist, endpoint: Endpoint) -> Option<Self> {
        let gate = netlist.gate(endpoint.gate())?.gate();
        let pin = netlist.pin_name(endpoint)?;
        let direction = gate.gate_type.pin_direction(pin)?;
        Some(Self {
            endpoint,
            gate,
            pin,
            direction,
        })
    }
}

/// A predicate over endpoints.
pub trait EndpointFilter {
    /// Returns `true` if the endpoint passes.
    fn matches(&self, view: &EndpointView<'_>) -> bool;
}

/// A predicate over gates.
pub trait GateFilter {
    /// Returns `true` if the gate passes.
    fn matches(&self, gate: &Gate) -> bool;
}

/// A predicate over nets.
pub trait NetFilter {
    /// Returns `true` if the net passes.
    fn matches(&self, net: &Net) -> bool;
}

impl<F> EndpointFilter for F
where
    F: Fn(&EndpointView<'_>) -> bool,
{
    fn matches(&self, view: &EndpointView<'_>) -> bool {
        self(view)
    }
}

impl<F> GateFilter for F
where
    F: Fn(&Gate) -> bool,
{
    fn matches(&self, gate: &Gate) -> bool {
        self(gate)
    }
}

impl<F> NetFilter for F
where
    F: Fn(&Net) -> bool,
{
    fn matches(&self, net: &Net) -> bool {
        self(net)
    }
}

/// Accepts what both inner filters accept. The second filter is only
/// evaluated if the first passes.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(pub A, pub B);

/// Combines two filters of the same kind.
pub fn and<A, B>(a: A, b: B) -> And<A, B> {
    And(a, b)
}

impl<A: EndpointFilter, B: EndpointFilter> EndpointFilter for And<A, B> {
    fn matches(&self, view: &EndpointView<'_>) -> bool {
        self.0.matches(view) && self.1.matches(view)
    }
}

impl<A: GateFilter, B: GateFilter> GateFilter for And<A, B> {
    fn matches(&self, gate: &Gate) -> bool {
        self.0.matches(gate) && self.1.matches(gate)
    }
}

impl<A: NetFilter, B: NetFilter> NetFilter for And<A, B> {
    fn matches(&self, net: &Net) -> bool {
        self.0.matches(net) && self.1.matches(net)
    }
}

/// Gates with exactly this name.
#[derive(Debug, Clone)]
pub struct GateName(String);

impl GateName {
    /// Creates the filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl GateFilter for GateName {
    fn matches(&self, gate: &Gate) -> bool {
        gate.name == self.0
    }
}

/// Gates whose type has exactly this name.
#[derive(Debug, Clone)]
pub struct GateTypeName(String);

impl GateTypeName {
    /// Creates the filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl GateFilter for GateTypeName {
    fn matches(&self, gate: &Gate) -> bool {
        gate.gate_type.name() == self.0
    }
}

/// Nets with exactly this name.
#[derive(Debug, Clone)]
pub struct NetName(String);

impl NetName {
    /// Creates the filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl NetFilter for NetName {
    fn matches(&self, net: &Net) -> bool {
        net.name == self.0
    }
}

/// Endpoints whose gate passes the inner gate filter.
#[derive(Debug, Clone)]
pub struct OnGate<G>(pub G);

impl<G: GateFilter> EndpointFilter for OnGate<G> {
    fn matches(&self, view: &EndpointView<'_>) -> bool {
        self.0.matches(view.gate)
    }
}

/// Endpoints on a pin with exactly this name.
#[derive(Debug, Clone)]
pub struct PinName(String);

impl PinName {
    /// Creates the filter.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl EndpointFilter for PinName {
    fn matches(&self, view: &EndpointView<'_>) -> bool {
        view.pin == self.0
    }
}

/// Endpoints whose pin has this direction.
#[derive(Debug, Clone, Copy)]
pub struct PinDirectionIs(pub PinDirection);

impl EndpointFilter for PinDirectionIs {
    fn matches(&self, view: &EndpointView<'_>) -> bool {
        view.direction == self.0
    }
}

/// Endpoints on a gate with this name.
pub fn endpoint_gate_name(name: impl Into<String>) -> OnGate<GateName> {
    OnGate(GateName::new(name))
}

/// Endpoints on a gate of this type.
pub fn endpoint_gate_type(type_name: impl Into<String>) -> OnGate<GateTypeName> {
    OnGate(GateTypeName::new(type_name))
}
