//! Structural self-check of a netlist.

use crate::endpoint::Endpoint;
use crate::globals::GlobalDirection;
use crate::ids::EntityId;
use crate::netlist::Netlist;
use gatenet_common::{EntityKind, GatenetResult, InternalError};
use std::collections::{HashMap, VecDeque};

impl Netlist {
    /// Verifies that every cross-reference in the netlist agrees.
    ///
    /// The public operations keep these invariants on their own, so an `Err`
    /// here always means a bug in this crate:
    ///
    /// - every endpoint names a live gate and a pin of its type, with a
    ///   direction matching the side it is on;
    /// - the pin-occupancy index lists exactly the attached endpoints;
    /// - each gate is in exactly the module it names, and every module is
    ///   reachable from the top module through consistent parent links;
    /// - global marks only name live nets;
    /// - the identifier registry counts match the live entities.
    pub fn verify_integrity(&self) -> GatenetResult<()> {
        self.verify_endpoints()?;
        self.verify_hierarchy()?;
        for direction in GlobalDirection::ALL {
            if let Some(net) = self.globals.iter(direction).find(|n| !self.nets.contains(*n)) {
                return Err(InternalError::new(format!(
                    "global {direction} mark on deleted net {}",
                    net.raw()
                )));
            }
        }
        for (kind, live) in [
            (EntityKind::Gate, self.gates.len()),
            (EntityKind::Net, self.nets.len()),
            (EntityKind::Module, self.modules.len()),
        ] {
            if self.ids.live_count(kind) != live {
                return Err(InternalError::new(format!(
                    "{kind} registry holds {} live IDs for {live} entities",
                    self.ids.live_count(kind)
                )));
            }
        }
        Ok(())
    }

    fn verify_endpoint(&self, ep: &Endpoint, drives: bool) -> GatenetResult<()> {
        let gate = self.gates.get(ep.gate()).ok_or_else(|| {
            InternalError::new(format!("endpoint on deleted gate {}", ep.gate().raw()))
        })?;
        let pin = self.resolve_pin(ep.pin());
        let direction = gate.gate_type.pin_direction(pin).ok_or_else(|| {
            InternalError::new(format!("gate {} has no pin '{pin}'", ep.gate().raw()))
        })?;
        let fits = if drives {
            direction.can_drive()
        } else {
            direction.can_receive()
        };
        if !fits {
            return Err(InternalError::new(format!(
                "pin '{pin}' of gate {} attached against its direction",
                ep.gate().raw()
            )));
        }
        Ok(())
    }

    fn verify_endpoints(&self) -> GatenetResult<()> {
        let mut destinations = 0;
        let mut sources: HashMap<Endpoint, usize> = HashMap::new();
        for net in self.nets.values() {
            for ep in &net.sources {
                self.verify_endpoint(ep, true)?;
                if !self.source_nets_of(*ep).contains(&net.id) {
                    return Err(InternalError::new(format!(
                        "source of net {} missing from the occupancy index",
                        net.id.raw()
                    )));
                }
                *sources.entry(*ep).or_default() += 1;
            }
            for ep in &net.destinations {
                self.verify_endpoint(ep, false)?;
                if self.destination_net_of(*ep) != Some(net.id) {
                    return Err(InternalError::new(format!(
                        "destination of net {} missing from the occupancy index",
                        net.id.raw()
                    )));
                }
                destinations += 1;
            }
        }
        if destinations != self.destination_of.len() {
            return Err(InternalError::new("stale destination index entries"));
        }
        let indexed = self.sources_of.iter().filter(|(_, nets)| !nets.is_empty());
        for (ep, nets) in indexed {
            if sources.get(ep) != Some(&nets.len()) {
                return Err(InternalError::new(format!(
                    "stale source index entry for gate {}",
                    ep.gate().raw()
                )));
            }
        }
        Ok(())
    }

    fn verify_hierarchy(&self) -> GatenetResult<()> {
        for gate in self.gates.values() {
            let owned = self
                .modules
                .get(gate.module)
                .is_some_and(|m| m.gates.contains(&gate.id));
            if !owned {
                return Err(InternalError::new(format!(
                    "gate {} not listed by module {}",
                    gate.id.raw(),
                    gate.module.raw()
                )));
            }
        }
        let listed: usize = self.modules.values().map(|m| m.gates.len()).sum();
        if listed != self.gates.len() {
            return Err(InternalError::new("module gate lists disagree with gates"));
        }

        let mut seen = 0;
        let mut queue = VecDeque::from([self.top_module()]);
        while let Some(id) = queue.pop_front() {
            let module = self.modules.get(id).ok_or_else(|| {
                InternalError::new(format!("submodule {} does not exist", id.raw()))
            })?;
            seen += 1;
            for child in &module.submodules {
                let parent = self.modules.get(*child).and_then(|c| c.parent);
                if parent != Some(id) {
                    return Err(InternalError::new(format!(
                        "module {} listed under {} but points elsewhere",
                        child.raw(),
                        id.raw()
                    )));
                }
                queue.push_back(*child);
            }
        }
        if seen != self.modules.len() {
            return Err(InternalError::new("modules unreachable from the top module"));
        }
        Ok(())
    }
}
