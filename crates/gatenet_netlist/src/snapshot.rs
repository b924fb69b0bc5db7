//! Structural snapshots and replay.
//!
//! A [`Snapshot`] lists every module, gate and net with its raw ID, in an
//! order that can be replayed through the public `*_with_id` creation and
//! connectivity operations. Replaying into a fresh netlist yields the same
//! structure, which [`Snapshot::capture`] of the result confirms.

use crate::data::DataContainer;
use crate::gate_type::GateLibrary;
use crate::globals::GlobalDirection;
use crate::ids::{EntityId, GateId, ModuleId};
use crate::netlist::Netlist;
use gatenet_common::{ContentHash, ContentHasher};
use gatenet_config::{IdConfig, NetlistConfig};
use gatenet_diagnostics::DiagnosticSink;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// One module of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Raw module ID.
    pub id: u32,
    /// Module name.
    pub name: String,
    /// Raw parent ID; `None` for the top module.
    pub parent: Option<u32>,
    /// Annotations.
    pub data: DataContainer,
}

/// One gate of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Raw gate ID.
    pub id: u32,
    /// Instance name.
    pub name: String,
    /// Name of the gate type in the library.
    pub gate_type: String,
    /// Raw ID of the containing module.
    pub module: u32,
    /// Annotations.
    pub data: DataContainer,
}

/// A `(raw gate ID, pin name)` pair.
pub type EndpointRecord = (u32, String);

/// One net of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetRecord {
    /// Raw net ID.
    pub id: u32,
    /// Net name.
    pub name: String,
    /// Sources in insertion order.
    pub sources: Vec<EndpointRecord>,
    /// Destinations in insertion order.
    pub destinations: Vec<EndpointRecord>,
    /// Global marks.
    pub globals: Vec<GlobalDirection>,
    /// Annotations.
    pub data: DataContainer,
}

/// The full structure of a netlist, keyed by raw IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Netlist name.
    pub name: String,
    /// Minimum ID per kind the netlist was created with.
    pub min_ids: [u32; 3],
    /// Modules, parents before children; the first is the top module.
    pub modules: Vec<ModuleRecord>,
    /// Gates in ID order.
    pub gates: Vec<GateRecord>,
    /// Nets in ID order.
    pub nets: Vec<NetRecord>,
}

/// Why a snapshot could not be replayed.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The snapshot names a gate type the library lacks.
    #[error("gate type `{0}` is not in the library")]
    UnknownGateType(String),
    /// The snapshot has no top module.
    #[error("snapshot has no top module")]
    MissingTopModule,
    /// A replayed operation was refused; details are in the sink.
    #[error("replay refused: {0}")]
    Refused(String),
}

impl Snapshot {
    /// Records the structure of `netlist`.
    pub fn capture(netlist: &Netlist) -> Self {
        let registry = netlist.id_registry();
        let min_ids = gatenet_common::EntityKind::ALL.map(|k| registry.min_id(k));

        let mut modules = Vec::with_capacity(netlist.module_count());
        let mut queue = VecDeque::from([netlist.top_module()]);
        while let Some(id) = queue.pop_front() {
            let Some(m) = netlist.module(id) else {
                continue;
            };
            modules.push(ModuleRecord {
                id: id.raw(),
                name: m.name.clone(),
                parent: m.parent.map(|p| p.raw()),
                data: m.data.clone(),
            });
            queue.extend(m.submodules.iter().copied());
        }

        let gates = netlist
            .gates()
            .map(|g| GateRecord {
                id: g.id.raw(),
                name: g.name.clone(),
                gate_type: g.gate_type.name().to_string(),
                module: g.module.raw(),
                data: g.data.clone(),
            })
            .collect();

        let record = |ep: &crate::Endpoint| -> EndpointRecord {
            (
                ep.gate().raw(),
                netlist.pin_name(*ep).unwrap_or_default().to_string(),
            )
        };
        let nets = netlist
            .nets()
            .map(|n| NetRecord {
                id: n.id.raw(),
                name: n.name.clone(),
                sources: n.sources().iter().map(record).collect(),
                destinations: n.destinations().iter().map(record).collect(),
                globals: GlobalDirection::ALL
                    .into_iter()
                    .filter(|d| netlist.is_global_net(n.id, *d))
                    .collect(),
                data: n.data.clone(),
            })
            .collect();

        Self {
            name: netlist.name().to_string(),
            min_ids,
            modules,
            gates,
            nets,
        }
    }

    /// Rebuilds the netlist in a fresh instance reporting into `sink`.
    ///
    /// Gate types are looked up by name in `library`. Only public creation,
    /// hierarchy and connectivity operations are used.
    pub fn replay(
        &self,
        library: &GateLibrary,
        sink: Arc<DiagnosticSink>,
    ) -> Result<Netlist, ReplayError> {
        let (top, rest) = self
            .modules
            .split_first()
            .ok_or(ReplayError::MissingTopModule)?;

        let mut config = NetlistConfig::default();
        config.netlist.name = self.name.clone();
        config.netlist.top_module = top.name.clone();
        config.ids = IdConfig {
            min_gate_id: self.min_ids[0],
            min_net_id: self.min_ids[1],
            min_module_id: self.min_ids[2],
        };
        let mut nl = Netlist::with_sink(config, sink);
        let nid = nl.id();
        let refused = ReplayError::Refused;

        if nl.top_module().raw() != top.id {
            return Err(refused(format!("top module #{}", top.id)));
        }
        if let Some(data) = nl.module_data_mut(nl.top_module()) {
            *data = top.data.clone();
        }

        for m in rest {
            let parent = ModuleId::new(nid, m.parent.unwrap_or(top.id));
            let id = nl
                .create_module_with_id(m.id, &m.name, parent)
                .ok_or_else(|| refused(format!("module #{}", m.id)))?;
            if let Some(data) = nl.module_data_mut(id) {
                *data = m.data.clone();
            }
        }

        for g in &self.gates {
            let ty = library
                .get(&g.gate_type)
                .ok_or_else(|| ReplayError::UnknownGateType(g.gate_type.clone()))?;
            let id = nl
                .create_gate_with_id(g.id, ty, &g.name)
                .ok_or_else(|| refused(format!("gate #{}", g.id)))?;
            if !nl.assign_gate(ModuleId::new(nid, g.module), id) {
                return Err(refused(format!("gate #{} into module #{}", g.id, g.module)));
            }
            if let Some(data) = nl.gate_data_mut(id) {
                *data = g.data.clone();
            }
        }

        for n in &self.nets {
            let id = nl
                .create_net_with_id(n.id, &n.name)
                .ok_or_else(|| refused(format!("net #{}", n.id)))?;
            for (gate, pin) in &n.sources {
                if !nl.add_source(id, GateId::new(nid, *gate), pin) {
                    return Err(refused(format!("source ({gate}, {pin}) on net #{}", n.id)));
                }
            }
            for (gate, pin) in &n.destinations {
                if !nl.add_destination(id, GateId::new(nid, *gate), pin) {
                    return Err(refused(format!(
                        "destination ({gate}, {pin}) on net #{}",
                        n.id
                    )));
                }
            }
            for direction in &n.globals {
                nl.mark_global_net(id, *direction);
            }
            if let Some(data) = nl.net_data_mut(id) {
                *data = n.data.clone();
            }
        }
        Ok(nl)
    }

    /// Content hash of the structure, independent of the netlist instance.
    pub fn fingerprint(&self) -> ContentHash {
        let mut h = ContentHasher::new();
        h.write_str(&self.name);
        for min in self.min_ids {
            h.write_u32(min);
        }
        for m in &self.modules {
            h.write_u32(m.id);
            h.write_str(&m.name);
            h.write_u32(m.parent.unwrap_or(0));
            hash_data(&mut h, &m.data);
        }
        for g in &self.gates {
            h.write_u32(g.id);
            h.write_str(&g.name);
            h.write_str(&g.gate_type);
            h.write_u32(g.module);
            hash_data(&mut h, &g.data);
        }
        for n in &self.nets {
            h.write_u32(n.id);
            h.write_str(&n.name);
            for list in [&n.sources, &n.destinations] {
                h.write_u32(list.len() as u32);
                for (gate, pin) in list {
                    h.write_u32(*gate);
                    h.write_str(pin);
                }
            }
            h.write_u32(n.globals.len() as u32);
            for d in &n.globals {
                h.write_u32(*d as u32);
            }
            hash_data(&mut h, &n.data);
        }
        h.finish()
    }
}

fn hash_data(h: &mut ContentHasher, data: &DataContainer) {
    h.write_u32(data.len() as u32);
    for (category, key, entry) in data.iter() {
        h.write_str(category);
        h.write_str(key);
        h.write_str(&entry.value_type);
        h.write_str(&entry.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{gate_3_to_1, library};

    fn sample() -> Netlist {
        let lib = library();
        let mut nl = Netlist::new("sample");
        let top = nl.top_module();
        let sub = nl.create_module("sub", top).unwrap();
        let ty = lib.get("gate_3_to_1").unwrap();
        let a = nl.create_gate(ty, "a").unwrap();
        let b = nl.create_gate_with_id(40, ty, "b").unwrap();
        nl.assign_gate(sub, b);
        let n = nl.create_net_with_id(7, "n").unwrap();
        nl.add_source(n, a, "O");
        nl.add_destination(n, b, "I2");
        nl.add_destination(n, a, "I0");
        nl.mark_global_output_net(n);
        nl.gate_data_mut(a).unwrap().set("plugin", "role", "string", "counter");
        nl
    }

    #[test]
    fn capture_is_id_ordered() {
        let snap = Snapshot::capture(&sample());
        assert_eq!(snap.modules.len(), 2);
        assert_eq!(snap.modules[0].parent, None);
        assert_eq!(snap.gates.iter().map(|g| g.id).collect::<Vec<_>>(), vec![1, 40]);
        assert_eq!(snap.nets[0].destinations[0], (40, "I2".to_string()));
        assert_eq!(snap.nets[0].globals, vec![GlobalDirection::Output]);
    }

    #[test]
    fn replay_reproduces_structure() {
        let original = sample();
        let snap = Snapshot::capture(&original);
        let rebuilt = snap
            .replay(&library(), Arc::new(DiagnosticSink::new()))
            .unwrap();
        assert_ne!(rebuilt.id(), original.id());
        assert_eq!(Snapshot::capture(&rebuilt), snap);
        assert_eq!(Snapshot::capture(&rebuilt).fingerprint(), snap.fingerprint());
        assert!(rebuilt.diagnostics().is_empty());
    }

    #[test]
    fn replay_reports_missing_type() {
        let snap = Snapshot::capture(&sample());
        let empty = GateLibrary::new("empty");
        let err = snap
            .replay(&empty, Arc::new(DiagnosticSink::new()))
            .unwrap_err();
        assert!(matches!(err, ReplayError::UnknownGateType(ref t) if t == "gate_3_to_1"));
    }

    #[test]
    fn fingerprint_tracks_changes() {
        let mut nl = sample();
        let before = Snapshot::capture(&nl).fingerprint();
        let g = nl.create_gate(&gate_3_to_1(), "c").unwrap();
        assert_ne!(Snapshot::capture(&nl).fingerprint(), before);
        nl.delete_gate(g);
        assert_eq!(Snapshot::capture(&nl).fingerprint(), before);
    }

    #[test]
    fn json_round_trip() {
        let mut nl = sample();
        let n = nl.nets_by_name("n")[0];
        nl.net_data_mut(n).unwrap().set("plugin", "k", "string", "v");
        let sub = nl.modules_by_name("sub")[0];
        nl.module_data_mut(sub).unwrap().set("partition", "level", "int", "1");
        let snap = Snapshot::capture(&nl);
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
        assert_eq!(back.fingerprint(), snap.fingerprint());

        let rebuilt = back
            .replay(&library(), Arc::new(DiagnosticSink::new()))
            .unwrap();
        let sub = rebuilt.modules_by_name("sub")[0];
        let entry = rebuilt.module(sub).unwrap().data.get("partition", "level").cloned();
        assert_eq!(entry.map(|e| e.value), Some("1".to_string()));
    }
}
