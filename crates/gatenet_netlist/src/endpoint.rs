//! Endpoints: a gate paired with one of its pins.

use crate::ids::GateId;
use gatenet_common::Ident;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(gate, pin)` pair, the unit of connectivity.
///
/// The pin is an [`Ident`] interned in the owning netlist; use
/// [`Netlist::endpoint`](crate::Netlist::endpoint) to build one from a pin name
/// and [`Netlist::pin_name`](crate::Netlist::pin_name) to read it back.
///
/// The pin ident only has meaning inside the netlist that interned it, so
/// endpoints are not serializable; snapshots store `(gate, pin name)` pairs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Endpoint {
    gate: GateId,
    pin: Ident,
}

impl Endpoint {
    /// The "no endpoint" sentinel returned by queries that have no answer.
    pub const EMPTY: Endpoint = Endpoint {
        gate: GateId::INVALID,
        pin: Ident::from_raw(u32::MAX),
    };

    pub(crate) fn new(gate: GateId, pin: Ident) -> Self {
        Self { gate, pin }
    }

    /// Returns the gate.
    pub fn gate(self) -> GateId {
        self.gate
    }

    /// Returns the interned pin name.
    pub fn pin(self) -> Ident {
        self.pin
    }

    /// Returns `true` for [`Endpoint::EMPTY`].
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("<no endpoint>")
        } else {
            write!(f, "({}, pin {})", self.gate, self.pin.as_raw())
        }
    }
}

/// The role an endpoint plays on a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointRole {
    /// The endpoint drives the net.
    Source,
    /// The endpoint is driven by the net.
    Destination,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EndpointRole::Source => "source",
            EndpointRole::Destination => "destination",
        })
    }
}
