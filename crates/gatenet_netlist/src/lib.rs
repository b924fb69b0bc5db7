//! Gatenet netlist: the in-memory graph store for gate-level circuits.
//!
//! A [`Netlist`] owns all [`Gate`]s, [`Net`]s and [`Module`]s and keeps their
//! connectivity consistent: no dangling endpoints, no pin that is the
//! destination of two nets, stable IDs that are never reused. Analysis code
//! reads it through [`GateRef`], [`NetRef`], [`ModuleRef`], the [`filter`]
//! predicates and the collaborator views in [`abstraction`].

#![warn(missing_docs)]

pub mod abstraction;
pub mod arena;
mod connectivity;
pub mod data;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod gate;
pub mod gate_type;
pub mod globals;
mod hierarchy;
pub mod id_registry;
pub mod ids;
mod integrity;
pub mod module;
pub mod net;
pub mod netlist;
pub mod snapshot;

#[cfg(test)]
mod test_util;

pub use abstraction::{NetlistAbstraction, SimulationView};
pub use data::{DataContainer, DataEntry};
pub use endpoint::{Endpoint, EndpointRole};
pub use error::NetlistError;
pub use gate::{Gate, GateRef};
pub use gate_type::{
    FunctionSignature, GateLibrary, GateType, GateTypeBuilder, GateTypeError, GateTypeKind, Pin,
    PinDirection, PinGroup, SequentialPins,
};
pub use globals::GlobalDirection;
pub use id_registry::IdRegistry;
pub use ids::{EntityId, GateId, ModuleId, NetId, NetlistId};
pub use module::{Module, ModuleBoundary, ModuleRef};
pub use net::{Net, NetRef};
pub use netlist::Netlist;
pub use snapshot::{ReplayError, Snapshot};
