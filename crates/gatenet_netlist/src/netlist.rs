//! The netlist aggregate: owner of every gate, net and module.

use crate::arena::Arena;
use crate::data::DataContainer;
use crate::endpoint::Endpoint;
use crate::error::NetlistError;
use crate::filter::{GateFilter, NetFilter};
use crate::gate::{Gate, GateRef};
use crate::gate_type::GateType;
use crate::globals::GlobalNets;
use crate::id_registry::IdRegistry;
use crate::ids::{EntityId, GateId, ModuleId, NetId, NetlistId};
use crate::module::{Module, ModuleRef};
use crate::net::{Net, NetRef};
use gatenet_common::{EntityKind, Ident, Interner};
use gatenet_config::{build_sink, ConfigError, NetlistConfig};
use gatenet_diagnostics::DiagnosticSink;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// A gate-level circuit: gates, nets, modules and their connectivity.
///
/// The netlist is the only owner of its entities. Everything else refers to
/// them by ID, and every ID carries the [`NetlistId`] of the netlist that
/// minted it.
///
/// Mutating operations never panic and never leave partial state behind.
/// They return `bool` or `Option` and describe any refusal as a
/// [`Diagnostic`](gatenet_diagnostics::Diagnostic) in the netlist's
/// [`DiagnosticSink`].
///
/// A `Netlist` is not internally synchronized. Shared `&Netlist` reads may run
/// on many threads at once; mutation requires `&mut Netlist`.
#[derive(Debug)]
pub struct Netlist {
    id: NetlistId,
    pub(crate) config: NetlistConfig,
    pub(crate) interner: Interner,
    pub(crate) ids: IdRegistry,
    pub(crate) gates: Arena<GateId, Gate>,
    pub(crate) nets: Arena<NetId, Net>,
    pub(crate) modules: Arena<ModuleId, Module>,
    top_module: ModuleId,
    pub(crate) globals: GlobalNets,
    gate_names: HashMap<String, BTreeSet<GateId>>,
    net_names: HashMap<String, BTreeSet<NetId>>,
    module_names: HashMap<String, BTreeSet<ModuleId>>,
    /// A pin is the destination of at most one net.
    pub(crate) destination_of: HashMap<Endpoint, NetId>,
    /// Nets driven by each source pin, in attachment order.
    pub(crate) sources_of: HashMap<Endpoint, Vec<NetId>>,
    sink: Arc<DiagnosticSink>,
}

impl Netlist {
    /// Creates an empty netlist with default settings and a private sink.
    pub fn new(name: impl Into<String>) -> Self {
        let mut config = NetlistConfig::default();
        config.netlist.name = name.into();
        Self::with_sink(config, Arc::new(DiagnosticSink::new()))
    }

    /// Creates an empty netlist from a loaded configuration.
    ///
    /// The sink escalates the codes listed under `[diagnostics] deny`.
    pub fn from_config(config: NetlistConfig) -> Result<Self, ConfigError> {
        let sink = build_sink(&config)?;
        Ok(Self::with_sink(config, Arc::new(sink)))
    }

    /// Creates an empty netlist reporting into `sink`.
    pub fn with_sink(config: NetlistConfig, sink: Arc<DiagnosticSink>) -> Self {
        let id = NetlistId::fresh();
        let mut ids = IdRegistry::new(&config.ids);
        let top_raw = ids.claim_minimum(EntityKind::Module);
        let top_module = ModuleId::new(id, top_raw);

        let mut modules = Arena::new();
        let top = Module::new(top_module, config.netlist.top_module.clone(), None);
        modules.insert(top_module, top);
        let mut module_names: HashMap<String, BTreeSet<ModuleId>> = HashMap::new();
        module_names
            .entry(config.netlist.top_module.clone())
            .or_default()
            .insert(top_module);

        Self {
            id,
            config,
            interner: Interner::new(),
            ids,
            gates: Arena::new(),
            nets: Arena::new(),
            modules,
            top_module,
            globals: GlobalNets::default(),
            gate_names: HashMap::new(),
            net_names: HashMap::new(),
            module_names,
            destination_of: HashMap::new(),
            sources_of: HashMap::new(),
            sink,
        }
    }

    /// Returns the session-unique tag of this netlist.
    pub fn id(&self) -> NetlistId {
        self.id
    }

    /// Returns the netlist name.
    pub fn name(&self) -> &str {
        &self.config.netlist.name
    }

    /// Renames the netlist. An empty name leaves it unchanged.
    pub fn set_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.config.netlist.name = name.to_string();
        }
    }

    /// Returns the configuration this netlist was built with.
    pub fn config(&self) -> &NetlistConfig {
        &self.config
    }

    /// Returns the sink receiving this netlist's diagnostics.
    pub fn diagnostics(&self) -> &Arc<DiagnosticSink> {
        &self.sink
    }

    /// Returns the identifier registry.
    pub fn id_registry(&self) -> &IdRegistry {
        &self.ids
    }

    /// Returns the implicit top module.
    pub fn top_module(&self) -> ModuleId {
        self.top_module
    }

    // ---- reporting and validation ------------------------------------

    /// Emits `err` into the sink and returns `false`.
    pub(crate) fn report(&self, err: NetlistError) -> bool {
        self.sink.emit(err.to_diagnostic());
        false
    }

    pub(crate) fn report_none<T>(&self, err: NetlistError) -> Option<T> {
        self.report(err);
        None
    }

    /// Confirms `id` was minted here and is not the invalid sentinel.
    pub(crate) fn check_owned<I: EntityId>(&self, id: I) -> Result<(), NetlistError> {
        if id.raw() == 0 {
            return Err(NetlistError::NotFound {
                kind: I::KIND,
                id: 0,
            });
        }
        if id.netlist() != self.id {
            return Err(NetlistError::ForeignEntity {
                kind: I::KIND,
                id: id.raw(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_gate(&self, id: GateId) -> Result<&Gate, NetlistError> {
        self.check_owned(id)?;
        self.gates.get(id).ok_or(NetlistError::NotFound {
            kind: EntityKind::Gate,
            id: id.raw(),
        })
    }

    pub(crate) fn check_net(&self, id: NetId) -> Result<&Net, NetlistError> {
        self.check_owned(id)?;
        self.nets.get(id).ok_or(NetlistError::NotFound {
            kind: EntityKind::Net,
            id: id.raw(),
        })
    }

    pub(crate) fn check_module(&self, id: ModuleId) -> Result<&Module, NetlistError> {
        self.check_owned(id)?;
        self.modules.get(id).ok_or(NetlistError::NotFound {
            kind: EntityKind::Module,
            id: id.raw(),
        })
    }

    fn check_name(kind: EntityKind, name: &str) -> Result<(), NetlistError> {
        if name.is_empty() {
            Err(NetlistError::EmptyName { kind })
        } else {
            Ok(())
        }
    }

    /// Reserves the requested or the next free raw ID of `kind`.
    fn reserve_id(&mut self, kind: EntityKind, explicit: Option<u32>) -> Result<u32, NetlistError> {
        match explicit {
            Some(raw) => self.ids.register_id(kind, raw).map(|()| raw),
            None => self.ids.allocate_id(kind),
        }
    }

    // ---- pins and endpoints ------------------------------------------

    /// Builds the endpoint for `gate` and `pin`.
    ///
    /// Pin names are interned when a gate carrying them is created, so a name
    /// no gate type in this netlist declares yields [`Endpoint::EMPTY`]. The
    /// pin is not checked against this particular gate's type; connectivity
    /// operations do that.
    pub fn endpoint(&self, gate: GateId, pin: &str) -> Endpoint {
        self.known_endpoint(gate, pin).unwrap_or(Endpoint::EMPTY)
    }

    /// Returns the endpoint for `gate` and `pin` if that pin name was ever
    /// used in this netlist.
    pub(crate) fn known_endpoint(&self, gate: GateId, pin: &str) -> Option<Endpoint> {
        self.interner.get(pin).map(|ident| Endpoint::new(gate, ident))
    }

    /// Returns the pin name of an endpoint built by this netlist.
    pub fn pin_name(&self, endpoint: Endpoint) -> Option<&str> {
        self.interner.try_resolve(endpoint.pin())
    }

    pub(crate) fn resolve_pin(&self, pin: Ident) -> &str {
        self.interner.try_resolve(pin).unwrap_or("")
    }

    /// Returns the net `endpoint` is a destination of.
    pub fn destination_net_of(&self, endpoint: Endpoint) -> Option<NetId> {
        self.destination_of.get(&endpoint).copied()
    }

    /// Returns the nets `endpoint` is a source of, in attachment order.
    pub fn source_nets_of(&self, endpoint: Endpoint) -> &[NetId] {
        self.sources_of
            .get(&endpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ---- lookups ------------------------------------------------------

    /// Returns a read handle for a gate of this netlist.
    pub fn gate(&self, id: GateId) -> Option<GateRef<'_>> {
        if id.netlist() != self.id {
            return None;
        }
        self.gates.get(id).map(|gate| GateRef::new(self, gate))
    }

    /// Returns a read handle for a net of this netlist.
    pub fn net(&self, id: NetId) -> Option<NetRef<'_>> {
        if id.netlist() != self.id {
            return None;
        }
        self.nets.get(id).map(|net| NetRef::new(self, net))
    }

    /// Returns a read handle for a module of this netlist.
    pub fn module(&self, id: ModuleId) -> Option<ModuleRef<'_>> {
        if id.netlist() != self.id {
            return None;
        }
        self.modules.get(id).map(|module| ModuleRef::new(self, module))
    }

    /// Returns `true` if the gate exists in this netlist.
    pub fn contains_gate(&self, id: GateId) -> bool {
        self.check_gate(id).is_ok()
    }

    /// Returns `true` if the net exists in this netlist.
    pub fn contains_net(&self, id: NetId) -> bool {
        self.check_net(id).is_ok()
    }

    /// Returns `true` if the module exists in this netlist.
    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.check_module(id).is_ok()
    }

    /// Iterates all gates in ascending ID order.
    pub fn gates(&self) -> impl Iterator<Item = GateRef<'_>> {
        self.gates.values().map(move |gate| GateRef::new(self, gate))
    }

    /// Iterates all nets in ascending ID order.
    pub fn nets(&self) -> impl Iterator<Item = NetRef<'_>> {
        self.nets.values().map(move |net| NetRef::new(self, net))
    }

    /// Iterates all modules in ascending ID order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleRef<'_>> {
        self.modules.values().map(move |module| ModuleRef::new(self, module))
    }

    /// Returns the gates accepted by `filter`, in ID order.
    pub fn gates_where<F: GateFilter>(&self, filter: F) -> Vec<GateId> {
        self.gates
            .values()
            .filter(|gate| filter.matches(gate))
            .map(|gate| gate.id)
            .collect()
    }

    /// Returns the nets accepted by `filter`, in ID order.
    pub fn nets_where<F: NetFilter>(&self, filter: F) -> Vec<NetId> {
        self.nets
            .values()
            .filter(|net| filter.matches(net))
            .map(|net| net.id)
            .collect()
    }

    /// Returns every gate named `name`. Names are not unique.
    pub fn gates_by_name(&self, name: &str) -> Vec<GateId> {
        Self::lookup_name(&self.gate_names, name)
    }

    /// Returns every net named `name`.
    pub fn nets_by_name(&self, name: &str) -> Vec<NetId> {
        Self::lookup_name(&self.net_names, name)
    }

    /// Returns every module named `name`.
    pub fn modules_by_name(&self, name: &str) -> Vec<ModuleId> {
        Self::lookup_name(&self.module_names, name)
    }

    /// Returns every gate whose type is named `type_name`.
    pub fn gates_by_type(&self, type_name: &str) -> Vec<GateId> {
        self.gates_where(crate::filter::GateTypeName::new(type_name))
    }

    /// Returns the number of gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Returns the number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Returns the number of modules, including the top module.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    fn lookup_name<I: Copy>(table: &HashMap<String, BTreeSet<I>>, name: &str) -> Vec<I> {
        table
            .get(name)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn index_name<I: Ord>(table: &mut HashMap<String, BTreeSet<I>>, name: &str, id: I) {
        table.entry(name.to_string()).or_default().insert(id);
    }

    fn unindex_name<I: Ord>(table: &mut HashMap<String, BTreeSet<I>>, name: &str, id: &I) {
        if let Some(ids) = table.get_mut(name) {
            ids.remove(id);
            if ids.is_empty() {
                table.remove(name);
            }
        }
    }

    // ---- creation -----------------------------------------------------

    /// Creates a gate of `gate_type` in the top module with the next free ID.
    pub fn create_gate(&mut self, gate_type: &Arc<GateType>, name: &str) -> Option<GateId> {
        self.insert_gate(None, gate_type, name)
    }

    /// Creates a gate with a caller-chosen raw ID.
    ///
    /// Fails if the ID is below the configured minimum or was ever used.
    pub fn create_gate_with_id(
        &mut self,
        id: u32,
        gate_type: &Arc<GateType>,
        name: &str,
    ) -> Option<GateId> {
        self.insert_gate(Some(id), gate_type, name)
    }

    fn insert_gate(
        &mut self,
        explicit: Option<u32>,
        gate_type: &Arc<GateType>,
        name: &str,
    ) -> Option<GateId> {
        let reserved = Self::check_name(EntityKind::Gate, name)
            .and_then(|()| self.reserve_id(EntityKind::Gate, explicit));
        let raw = match reserved {
            Ok(raw) => raw,
            Err(err) => return self.report_none(err),
        };
        let id = GateId::new(self.id, raw);
        for pin in gate_type.pins() {
            self.interner.get_or_intern(&pin.name);
        }
        let module = self.top_module;
        self.gates.insert(
            id,
            Gate {
                id,
                name: name.to_string(),
                gate_type: Arc::clone(gate_type),
                module,
                data: DataContainer::default(),
            },
        );
        if let Some(top) = self.modules.get_mut(module) {
            top.gates.insert(id);
        }
        Self::index_name(&mut self.gate_names, name, id);
        Some(id)
    }

    /// Creates an unconnected net with the next free ID.
    pub fn create_net(&mut self, name: &str) -> Option<NetId> {
        self.insert_net(None, name)
    }

    /// Creates an unconnected net with a caller-chosen raw ID.
    pub fn create_net_with_id(&mut self, id: u32, name: &str) -> Option<NetId> {
        self.insert_net(Some(id), name)
    }

    fn insert_net(&mut self, explicit: Option<u32>, name: &str) -> Option<NetId> {
        let reserved = Self::check_name(EntityKind::Net, name)
            .and_then(|()| self.reserve_id(EntityKind::Net, explicit));
        let raw = match reserved {
            Ok(raw) => raw,
            Err(err) => return self.report_none(err),
        };
        let id = NetId::new(self.id, raw);
        self.nets.insert(id, Net::new(id, name.to_string()));
        Self::index_name(&mut self.net_names, name, id);
        Some(id)
    }

    /// Creates an empty module below `parent` with the next free ID.
    pub fn create_module(&mut self, name: &str, parent: ModuleId) -> Option<ModuleId> {
        self.insert_module(None, name, parent)
    }

    /// Creates an empty module below `parent` with a caller-chosen raw ID.
    pub fn create_module_with_id(
        &mut self,
        id: u32,
        name: &str,
        parent: ModuleId,
    ) -> Option<ModuleId> {
        self.insert_module(Some(id), name, parent)
    }

    fn insert_module(
        &mut self,
        explicit: Option<u32>,
        name: &str,
        parent: ModuleId,
    ) -> Option<ModuleId> {
        let reserved = Self::check_name(EntityKind::Module, name)
            .and_then(|()| self.check_module(parent).map(|_| ()))
            .and_then(|()| self.reserve_id(EntityKind::Module, explicit));
        let raw = match reserved {
            Ok(raw) => raw,
            Err(err) => return self.report_none(err),
        };
        let id = ModuleId::new(self.id, raw);
        self.modules
            .insert(id, Module::new(id, name.to_string(), Some(parent)));
        if let Some(parent) = self.modules.get_mut(parent) {
            parent.submodules.insert(id);
        }
        Self::index_name(&mut self.module_names, name, id);
        Some(id)
    }

    // ---- renaming and annotations -------------------------------------

    /// Renames a gate. Returns `false` for an empty name (no change) or an
    /// unknown gate (reported).
    pub fn set_gate_name(&mut self, gate: GateId, name: &str) -> bool {
        let old = match self.check_gate(gate) {
            Ok(g) => g.name.clone(),
            Err(err) => return self.report(err),
        };
        if name.is_empty() {
            return false;
        }
        Self::unindex_name(&mut self.gate_names, &old, &gate);
        Self::index_name(&mut self.gate_names, name, gate);
        if let Some(g) = self.gates.get_mut(gate) {
            g.name = name.to_string();
        }
        true
    }

    /// Renames a net. Same rules as [`Netlist::set_gate_name`].
    pub fn set_net_name(&mut self, net: NetId, name: &str) -> bool {
        let old = match self.check_net(net) {
            Ok(n) => n.name.clone(),
            Err(err) => return self.report(err),
        };
        if name.is_empty() {
            return false;
        }
        Self::unindex_name(&mut self.net_names, &old, &net);
        Self::index_name(&mut self.net_names, name, net);
        if let Some(n) = self.nets.get_mut(net) {
            n.name = name.to_string();
        }
        true
    }

    /// Renames a module. Same rules as [`Netlist::set_gate_name`].
    pub fn set_module_name(&mut self, module: ModuleId, name: &str) -> bool {
        let old = match self.check_module(module) {
            Ok(m) => m.name.clone(),
            Err(err) => return self.report(err),
        };
        if name.is_empty() {
            return false;
        }
        Self::unindex_name(&mut self.module_names, &old, &module);
        Self::index_name(&mut self.module_names, name, module);
        if let Some(m) = self.modules.get_mut(module) {
            m.name = name.to_string();
        }
        true
    }

    /// Returns the annotation store of a gate.
    pub fn gate_data_mut(&mut self, gate: GateId) -> Option<&mut DataContainer> {
        if let Err(err) = self.check_gate(gate) {
            return self.report_none(err);
        }
        self.gates.get_mut(gate).map(|g| &mut g.data)
    }

    /// Returns the annotation store of a net.
    pub fn net_data_mut(&mut self, net: NetId) -> Option<&mut DataContainer> {
        if let Err(err) = self.check_net(net) {
            return self.report_none(err);
        }
        self.nets.get_mut(net).map(|n| &mut n.data)
    }

    /// Returns the annotation store of a module.
    pub fn module_data_mut(&mut self, module: ModuleId) -> Option<&mut DataContainer> {
        if let Err(err) = self.check_module(module) {
            return self.report_none(err);
        }
        self.modules.get_mut(module).map(|m| &mut m.data)
    }

    // ---- deletion -----------------------------------------------------

    /// Every endpoint of `gate` that is attached to some net.
    fn attached_endpoints(&self, gate: &Gate) -> Vec<Endpoint> {
        gate.gate_type
            .pins()
            .iter()
            .filter_map(|pin| self.known_endpoint(gate.id, &pin.name))
            .filter(|ep| self.destination_of.contains_key(ep) || self.sources_of.contains_key(ep))
            .collect()
    }

    /// Deletes a gate, detaching its endpoints from every net and removing
    /// it from its module.
    pub fn delete_gate(&mut self, gate: GateId) -> bool {
        let (module, name, endpoints) = match self.check_gate(gate) {
            Ok(g) => (g.module, g.name.clone(), self.attached_endpoints(g)),
            Err(err) => return self.report(err),
        };
        for ep in endpoints {
            if let Some(net) = self.destination_of.remove(&ep) {
                if let Some(n) = self.nets.get_mut(net) {
                    n.destinations.retain(|d| *d != ep);
                }
            }
            for net in self.sources_of.remove(&ep).unwrap_or_default() {
                if let Some(n) = self.nets.get_mut(net) {
                    n.sources.retain(|s| *s != ep);
                }
            }
        }
        if let Some(m) = self.modules.get_mut(module) {
            m.gates.remove(&gate);
        }
        Self::unindex_name(&mut self.gate_names, &name, &gate);
        self.gates.remove(gate);
        self.ids.release_id(EntityKind::Gate, gate.raw());
        true
    }

    /// Deletes a net, detaching all its endpoints and clearing its global marks.
    pub fn delete_net(&mut self, net: NetId) -> bool {
        if let Err(err) = self.check_net(net) {
            return self.report(err);
        }
        let Some(removed) = self.nets.remove(net) else {
            return false;
        };
        for ep in &removed.sources {
            if let Some(nets) = self.sources_of.get_mut(ep) {
                nets.retain(|n| *n != net);
                if nets.is_empty() {
                    self.sources_of.remove(ep);
                }
            }
        }
        for ep in &removed.destinations {
            self.destination_of.remove(ep);
        }
        self.globals.forget(net);
        Self::unindex_name(&mut self.net_names, &removed.name, &net);
        self.ids.release_id(EntityKind::Net, net.raw());
        true
    }

    /// Deletes a module. Its gates and submodules move to its parent.
    ///
    /// The top module cannot be deleted.
    pub fn delete_module(&mut self, module: ModuleId) -> bool {
        let parent = match self.check_module(module) {
            Ok(m) => m.parent,
            Err(err) => return self.report(err),
        };
        let Some(parent) = parent else {
            return self.report(NetlistError::TopModuleFixed { action: "deleted" });
        };
        let Some(removed) = self.modules.remove(module) else {
            return false;
        };
        for child in &removed.submodules {
            if let Some(c) = self.modules.get_mut(*child) {
                c.parent = Some(parent);
            }
        }
        for gate in &removed.gates {
            if let Some(g) = self.gates.get_mut(*gate) {
                g.module = parent;
            }
        }
        if let Some(p) = self.modules.get_mut(parent) {
            p.submodules.remove(&module);
            p.submodules.extend(removed.submodules.iter().copied());
            p.gates.extend(removed.gates.iter().copied());
        }
        Self::unindex_name(&mut self.module_names, &removed.name, &module);
        self.ids.release_id(EntityKind::Module, module.raw());
        true
    }
}
