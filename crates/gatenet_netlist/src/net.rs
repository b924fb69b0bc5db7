//! Nets and their read handle.

use crate::data::DataContainer;
use crate::endpoint::Endpoint;
use crate::filter::{EndpointFilter, EndpointView};
use crate::globals::GlobalDirection;
use crate::ids::{GateId, NetId};
use crate::netlist::Netlist;
use gatenet_diagnostics::{Diagnostic, DiagnosticCode, EntityRef, Label};
use std::ops::Deref;

/// A wire connecting source endpoints to destination endpoints.
///
/// Both sequences keep insertion order. Nets are only mutated through
/// [`Netlist`] connectivity operations.
#[derive(Debug, Clone)]
pub struct Net {
    /// The unique ID of this net.
    pub id: NetId,
    /// The net name. Not unique.
    pub name: String,
    /// Endpoints driving the net.
    pub sources: Vec<Endpoint>,
    /// Endpoints driven by the net.
    pub destinations: Vec<Endpoint>,
    /// Caller annotations.
    pub data: DataContainer,
}

impl Net {
    pub(crate) fn new(id: NetId, name: String) -> Self {
        Self {
            id,
            name,
            sources: Vec::new(),
            destinations: Vec::new(),
            data: DataContainer::default(),
        }
    }

    /// Returns `true` if the net has no source or no destination.
    pub fn is_unrouted(&self) -> bool {
        self.sources.is_empty() || self.destinations.is_empty()
    }
}

/// A borrowed view of a [`Net`] together with its netlist.
#[derive(Clone, Copy)]
pub struct NetRef<'a> {
    netlist: &'a Netlist,
    net: &'a Net,
}

impl<'a> Deref for NetRef<'a> {
    type Target = Net;

    fn deref(&self) -> &Net {
        self.net
    }
}

impl<'a> NetRef<'a> {
    pub(crate) fn new(netlist: &'a Netlist, net: &'a Net) -> Self {
        Self { netlist, net }
    }

    /// Returns the underlying net with the netlist's lifetime.
    pub fn net(&self) -> &'a Net {
        self.net
    }

    /// Returns the first source, or [`Endpoint::EMPTY`] if there is none.
    ///
    /// With several sources the first inserted one is returned and, unless
    /// disabled in the configuration, an ambiguity note is emitted. Use
    /// [`NetRef::sources`] to read all of them.
    pub fn source(&self) -> Endpoint {
        let Some(first) = self.net.sources.first() else {
            return Endpoint::EMPTY;
        };
        if self.net.sources.len() > 1 && self.netlist.config.connectivity.warn_ambiguous_source {
            let diag = Diagnostic::note(
                DiagnosticCode::AMBIGUOUS_SOURCE,
                format!(
                    "net #{} has {} sources; returning the first",
                    self.net.id.raw(),
                    self.net.sources.len()
                ),
            )
            .with_label(Label::primary(EntityRef::net(self.net.id.raw()), ""));
            self.netlist.diagnostics().emit(diag);
        }
        *first
    }

    /// Returns all sources in insertion order.
    pub fn sources(&self) -> &'a [Endpoint] {
        &self.net.sources
    }

    /// Returns all destinations in insertion order.
    pub fn destinations(&self) -> &'a [Endpoint] {
        &self.net.destinations
    }

    /// Lazily yields the sources accepted by `filter`, keeping order.
    pub fn sources_where<F>(&self, filter: F) -> impl Iterator<Item = Endpoint> + 'a
    where
        F: EndpointFilter + 'a,
    {
        Self::filtered(self.netlist, &self.net.sources, filter)
    }

    /// Lazily yields the destinations accepted by `filter`, keeping order.
    pub fn destinations_where<F>(&self, filter: F) -> impl Iterator<Item = Endpoint> + 'a
    where
        F: EndpointFilter + 'a,
    {
        Self::filtered(self.netlist, &self.net.destinations, filter)
    }

    fn filtered<F>(
        netlist: &'a Netlist,
        endpoints: &'a [Endpoint],
        filter: F,
    ) -> impl Iterator<Item = Endpoint> + 'a
    where
        F: EndpointFilter + 'a,
    {
        endpoints.iter().copied().filter(move |ep| {
            EndpointView::resolve(netlist, *ep).is_some_and(|view| filter.matches(&view))
        })
    }

    /// Returns the number of sources.
    pub fn num_of_sources(&self) -> usize {
        self.net.sources.len()
    }

    /// Returns the number of destinations.
    pub fn num_of_destinations(&self) -> usize {
        self.net.destinations.len()
    }

    /// Returns `true` if `pin` of `gate` drives this net.
    ///
    /// Unknown gates and pins simply yield `false`.
    pub fn is_a_source(&self, gate: GateId, pin: &str) -> bool {
        self.netlist
            .known_endpoint(gate, pin)
            .is_some_and(|ep| self.is_a_source_endpoint(ep))
    }

    /// Returns `true` if `endpoint` drives this net.
    pub fn is_a_source_endpoint(&self, endpoint: Endpoint) -> bool {
        self.net.sources.contains(&endpoint)
    }

    /// Returns `true` if `pin` of `gate` is driven by this net.
    pub fn is_a_destination(&self, gate: GateId, pin: &str) -> bool {
        self.netlist
            .known_endpoint(gate, pin)
            .is_some_and(|ep| self.is_a_destination_endpoint(ep))
    }

    /// Returns `true` if `endpoint` is driven by this net.
    pub fn is_a_destination_endpoint(&self, endpoint: Endpoint) -> bool {
        self.netlist.destination_net_of(endpoint) == Some(self.net.id)
    }

    /// Distinct gates driving this net, in first-seen order.
    pub fn source_gates(&self) -> Vec<GateId> {
        unique_gates(&self.net.sources)
    }

    /// Distinct gates driven by this net, in first-seen order.
    pub fn destination_gates(&self) -> Vec<GateId> {
        unique_gates(&self.net.destinations)
    }

    /// Returns `true` if the net is marked as a global input.
    pub fn is_global_input_net(&self) -> bool {
        self.netlist.is_global_net(self.net.id, GlobalDirection::Input)
    }

    /// Returns `true` if the net is marked as a global output.
    pub fn is_global_output_net(&self) -> bool {
        self.netlist.is_global_net(self.net.id, GlobalDirection::Output)
    }

    /// Returns `true` if the net is marked as a global inout.
    pub fn is_global_inout_net(&self) -> bool {
        self.netlist.is_global_net(self.net.id, GlobalDirection::InOut)
    }
}

pub(crate) fn unique_gates(endpoints: &[Endpoint]) -> Vec<GateId> {
    let mut gates: Vec<GateId> = Vec::with_capacity(endpoints.len());
    for ep in endpoints {
        if !gates.contains(&ep.gate()) {
            gates.push(ep.gate());
        }
    }
    gates
}
