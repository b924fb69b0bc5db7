//! Attaching and detaching endpoints, and global-net marks.
//!
//! Every operation validates completely before touching any state, so a
//! refused request leaves the netlist exactly as it was.

use crate::endpoint::{Endpoint, EndpointRole};
use crate::error::NetlistError;
use crate::globals::GlobalDirection;
use crate::ids::{GateId, NetId};
use crate::netlist::Netlist;

impl Netlist {
    /// Adds `pin` of `gate` as a source of `net`.
    ///
    /// Refused if either entity is unknown or foreign, the pin does not exist
    /// or cannot drive, or the endpoint is already a source of this net.
    pub fn add_source(&mut self, net: NetId, gate: GateId, pin: &str) -> bool {
        self.attach(net, gate, pin, EndpointRole::Source)
    }

    /// Endpoint form of [`Netlist::add_source`].
    pub fn add_source_endpoint(&mut self, net: NetId, endpoint: Endpoint) -> bool {
        let pin = self.endpoint_pin(endpoint);
        self.attach(net, endpoint.gate(), &pin, EndpointRole::Source)
    }

    /// Removes `pin` of `gate` from the sources of `net`.
    pub fn remove_source(&mut self, net: NetId, gate: GateId, pin: &str) -> bool {
        self.detach(net, gate, pin, EndpointRole::Source)
    }

    /// Endpoint form of [`Netlist::remove_source`].
    pub fn remove_source_endpoint(&mut self, net: NetId, endpoint: Endpoint) -> bool {
        let pin = self.endpoint_pin(endpoint);
        self.detach(net, endpoint.gate(), &pin, EndpointRole::Source)
    }

    /// Adds `pin` of `gate` as a destination of `net`.
    ///
    /// Besides the checks of [`Netlist::add_source`], refused if the pin is
    /// already the destination of this or any other net.
    pub fn add_destination(&mut self, net: NetId, gate: GateId, pin: &str) -> bool {
        self.attach(net, gate, pin, EndpointRole::Destination)
    }

    /// Endpoint form of [`Netlist::add_destination`].
    pub fn add_destination_endpoint(&mut self, net: NetId, endpoint: Endpoint) -> bool {
        let pin = self.endpoint_pin(endpoint);
        self.attach(net, endpoint.gate(), &pin, EndpointRole::Destination)
    }

    /// Removes `pin` of `gate` from the destinations of `net`.
    pub fn remove_destination(&mut self, net: NetId, gate: GateId, pin: &str) -> bool {
        self.detach(net, gate, pin, EndpointRole::Destination)
    }

    /// Endpoint form of [`Netlist::remove_destination`].
    pub fn remove_destination_endpoint(&mut self, net: NetId, endpoint: Endpoint) -> bool {
        let pin = self.endpoint_pin(endpoint);
        self.detach(net, endpoint.gate(), &pin, EndpointRole::Destination)
    }

    fn endpoint_pin(&self, endpoint: Endpoint) -> String {
        self.resolve_pin(endpoint.pin()).to_string()
    }

    fn attach(&mut self, net: NetId, gate: GateId, pin: &str, role: EndpointRole) -> bool {
        if let Err(err) = self.validate_attach(net, gate, pin, role) {
            return self.report(err);
        }
        let ep = Endpoint::new(gate, self.interner.get_or_intern(pin));
        let Some(entry) = self.nets.get_mut(net) else {
            return false;
        };
        match role {
            EndpointRole::Source => {
                entry.sources.push(ep);
                self.sources_of.entry(ep).or_default().push(net);
            }
            EndpointRole::Destination => {
                entry.destinations.push(ep);
                self.destination_of.insert(ep, net);
            }
        }
        true
    }

    fn validate_attach(
        &self,
        net: NetId,
        gate: GateId,
        pin: &str,
        role: EndpointRole,
    ) -> Result<(), NetlistError> {
        let entry = self.check_net(net)?;
        let g = self.check_gate(gate)?;
        let direction = g
            .gate_type
            .pin_direction(pin)
            .ok_or_else(|| NetlistError::UnknownPin {
                gate: gate.raw(),
                pin: pin.to_string(),
            })?;
        let allowed = match role {
            EndpointRole::Source => direction.can_drive(),
            EndpointRole::Destination => direction.can_receive(),
        };
        if !allowed {
            return Err(NetlistError::DirectionMismatch {
                gate: gate.raw(),
                pin: pin.to_string(),
                direction,
                role,
            });
        }

        // a pin name never interned cannot be attached anywhere yet
        let Some(ep) = self.known_endpoint(gate, pin) else {
            return Ok(());
        };
        let duplicate = || NetlistError::DuplicateEndpoint {
            gate: gate.raw(),
            pin: pin.to_string(),
            role,
            net: net.raw(),
        };
        let occupied = |other: NetId| NetlistError::AlreadyOccupied {
            gate: gate.raw(),
            pin: pin.to_string(),
            role,
            net: other.raw(),
        };
        match role {
            EndpointRole::Source => {
                if entry.sources.contains(&ep) {
                    return Err(duplicate());
                }
                if self.config.connectivity.exclusive_sources {
                    if let Some(other) = self.source_nets_of(ep).first() {
                        return Err(occupied(*other));
                    }
                }
            }
            EndpointRole::Destination => match self.destination_net_of(ep) {
                Some(current) if current == net => return Err(duplicate()),
                Some(other) => return Err(occupied(other)),
                None => {}
            },
        }
        Ok(())
    }

    fn detach(&mut self, net: NetId, gate: GateId, pin: &str, role: EndpointRole) -> bool {
        let (ep, position) = match self.validate_detach(net, gate, pin, role) {
            Ok(found) => found,
            Err(err) => return self.report(err),
        };
        let Some(entry) = self.nets.get_mut(net) else {
            return false;
        };
        match role {
            EndpointRole::Source => {
                entry.sources.remove(position);
                if let Some(nets) = self.sources_of.get_mut(&ep) {
                    nets.retain(|n| *n != net);
                    if nets.is_empty() {
                        self.sources_of.remove(&ep);
                    }
                }
            }
            EndpointRole::Destination => {
                entry.destinations.remove(position);
                self.destination_of.remove(&ep);
            }
        }
        true
    }

    /// Returns the endpoint and its index in the net's sequence for `role`.
    fn validate_detach(
        &self,
        net: NetId,
        gate: GateId,
        pin: &str,
        role: EndpointRole,
    ) -> Result<(Endpoint, usize), NetlistError> {
        let entry = self.check_net(net)?;
        let g = self.check_gate(gate)?;
        if g.gate_type.pin(pin).is_none() {
            return Err(NetlistError::UnknownPin {
                gate: gate.raw(),
                pin: pin.to_string(),
            });
        }
        let sequence = match role {
            EndpointRole::Source => &entry.sources,
            EndpointRole::Destination => &entry.destinations,
        };
        self.known_endpoint(gate, pin)
            .and_then(|ep| sequence.iter().position(|e| *e == ep).map(|i| (ep, i)))
            .ok_or_else(|| NetlistError::EndpointNotFound {
                gate: gate.raw(),
                pin: pin.to_string(),
                role,
                net: net.raw(),
            })
    }

    // ---- global nets --------------------------------------------------

    /// Marks `net` as a global net of `direction`. Marking twice is a no-op
    /// that still succeeds.
    pub fn mark_global_net(&mut self, net: NetId, direction: GlobalDirection) -> bool {
        if let Err(err) = self.check_net(net) {
            return self.report(err);
        }
        self.globals.mark(net, direction);
        true
    }

    /// Removes the `direction` mark from `net`. Refused if it is not marked.
    pub fn unmark_global_net(&mut self, net: NetId, direction: GlobalDirection) -> bool {
        if let Err(err) = self.check_net(net) {
            return self.report(err);
        }
        if self.globals.unmark(net, direction) {
            true
        } else {
            self.report(NetlistError::NotMarkedGlobal {
                net: net.raw(),
                direction,
            })
        }
    }

    /// Returns `true` if `net` carries the `direction` mark.
    pub fn is_global_net(&self, net: NetId, direction: GlobalDirection) -> bool {
        net.netlist() == self.id() && self.globals.contains(net, direction)
    }

    /// Global nets of one direction, in ID order.
    pub fn global_nets(&self, direction: GlobalDirection) -> Vec<NetId> {
        self.globals.iter(direction).collect()
    }

    /// Marks `net` as a global input.
    pub fn mark_global_input_net(&mut self, net: NetId) -> bool {
        self.mark_global_net(net, GlobalDirection::Input)
    }

    /// Marks `net` as a global output.
    pub fn mark_global_output_net(&mut self, net: NetId) -> bool {
        self.mark_global_net(net, GlobalDirection::Output)
    }

    /// Marks `net` as a global inout.
    pub fn mark_global_inout_net(&mut self, net: NetId) -> bool {
        self.mark_global_net(net, GlobalDirection::InOut)
    }

    /// Removes the global input mark.
    pub fn unmark_global_input_net(&mut self, net: NetId) -> bool {
        self.unmark_global_net(net, GlobalDirection::Input)
    }

    /// Removes the global output mark.
    pub fn unmark_global_output_net(&mut self, net: NetId) -> bool {
        self.unmark_global_net(net, GlobalDirection::Output)
    }

    /// Removes the global inout mark.
    pub fn unmark_global_inout_net(&mut self, net: NetId) -> bool {
        self.unmark_global_net(net, GlobalDirection::InOut)
    }

    /// Returns `true` if `net` is a global input.
    pub fn is_global_input_net(&self, net: NetId) -> bool {
        self.is_global_net(net, GlobalDirection::Input)
    }

    /// Returns `true` if `net` is a global output.
    pub fn is_global_output_net(&self, net: NetId) -> bool {
        self.is_global_net(net, GlobalDirection::Output)
    }

    /// Returns `true` if `net` is a global inout.
    pub fn is_global_inout_net(&self, net: NetId) -> bool {
        self.is_global_net(net, GlobalDirection::InOut)
    }
}
