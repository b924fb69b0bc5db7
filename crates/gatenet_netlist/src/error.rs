//! Reasons a netlist operation can be rejected.
//!
//! Public mutation methods do not return these; they report them through the
//! netlist's [`DiagnosticSink`](gatenet_diagnostics::DiagnosticSink) and return
//! a plain failure indicator. Each variant maps to one [`DiagnosticCode`].

use crate::endpoint::EndpointRole;
use crate::gate_type::PinDirection;
use crate::globals::GlobalDirection;
use gatenet_common::EntityKind;
use gatenet_diagnostics::{Diagnostic, DiagnosticCode, EntityRef, Label};

/// Why a creation, deletion, connectivity, or hierarchy request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetlistError {
    /// The referenced entity does not exist (never created, or deleted).
    #[error("{kind} #{id} does not exist in this netlist")]
    NotFound {
        /// Entity kind.
        kind: EntityKind,
        /// Raw ID.
        id: u32,
    },

    /// The referenced entity was minted by a different netlist.
    #[error("{kind} #{id} belongs to a different netlist")]
    ForeignEntity {
        /// Entity kind.
        kind: EntityKind,
        /// Raw ID.
        id: u32,
    },

    /// The gate's type has no pin with this name.
    #[error("gate #{gate} has no pin `{pin}`")]
    UnknownPin {
        /// Raw gate ID.
        gate: u32,
        /// Requested pin name.
        pin: String,
    },

    /// A name required on creation was empty.
    #[error("{kind} name must not be empty")]
    EmptyName {
        /// Entity kind being created.
        kind: EntityKind,
    },

    /// The pin's direction does not allow the requested role.
    #[error("pin `{pin}` of gate #{gate} has direction {direction} and cannot be a {role}")]
    DirectionMismatch {
        /// Raw gate ID.
        gate: u32,
        /// Pin name.
        pin: String,
        /// Fixed direction of the pin.
        direction: PinDirection,
        /// Requested role.
        role: EndpointRole,
    },

    /// The pin already plays this role on another net.
    #[error("pin `{pin}` of gate #{gate} is already a {role} of net #{net}")]
    AlreadyOccupied {
        /// Raw gate ID.
        gate: u32,
        /// Pin name.
        pin: String,
        /// The occupied role.
        role: EndpointRole,
        /// Raw ID of the net already holding the endpoint.
        net: u32,
    },

    /// The identical endpoint is already on this net.
    #[error("pin `{pin}` of gate #{gate} is already a {role} of this net (#{net})")]
    DuplicateEndpoint {
        /// Raw gate ID.
        gate: u32,
        /// Pin name.
        pin: String,
        /// The duplicated role.
        role: EndpointRole,
        /// Raw net ID.
        net: u32,
    },

    /// The endpoint to remove is not present on the net.
    #[error("pin `{pin}` of gate #{gate} is not a {role} of net #{net}")]
    EndpointNotFound {
        /// Raw gate ID.
        gate: u32,
        /// Pin name.
        pin: String,
        /// The role searched.
        role: EndpointRole,
        /// Raw net ID.
        net: u32,
    },

    /// The explicit ID was used before, possibly by a deleted entity.
    #[error("{kind} id {id} is already taken")]
    IdTaken {
        /// Entity kind.
        kind: EntityKind,
        /// Requested raw ID.
        id: u32,
    },

    /// The explicit ID is below the configured minimum.
    #[error("{kind} id {id} is below the minimum {min}")]
    IdBelowMinimum {
        /// Entity kind.
        kind: EntityKind,
        /// Requested raw ID.
        id: u32,
        /// Configured minimum.
        min: u32,
    },

    /// Every ID of this kind has been handed out.
    #[error("no free {kind} identifiers left")]
    IdExhausted {
        /// Entity kind.
        kind: EntityKind,
    },

    /// Reparenting would make a module its own ancestor.
    #[error("module #{module} cannot be placed under module #{parent}: it would create a cycle")]
    HierarchyCycle {
        /// Raw module ID being moved.
        module: u32,
        /// Raw ID of the requested parent.
        parent: u32,
    },

    /// The net is not marked as a global net of this direction.
    #[error("net #{net} is not a global {direction} net")]
    NotMarkedGlobal {
        /// Raw net ID.
        net: u32,
        /// Direction that was queried.
        direction: GlobalDirection,
    },

    /// The top module cannot be deleted or given a parent.
    #[error("the top module cannot be {action}")]
    TopModuleFixed {
        /// What was attempted.
        action: &'static str,
    },
}

impl NetlistError {
    /// Returns the diagnostic code reported for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            NetlistError::NotFound { kind, .. } => match kind {
                EntityKind::Gate => DiagnosticCode::INVALID_ARGUMENT,
                EntityKind::Net => DiagnosticCode::ENTITY_NOT_FOUND,
                EntityKind::Module => DiagnosticCode::MODULE_NOT_FOUND,
            },
            NetlistError::ForeignEntity { kind, .. } => match kind {
                EntityKind::Module => DiagnosticCode::FOREIGN_MODULE,
                _ => DiagnosticCode::FOREIGN_ENTITY,
            },
            NetlistError::UnknownPin { .. } | NetlistError::NotMarkedGlobal { .. } => {
                DiagnosticCode::INVALID_ARGUMENT
            }
            NetlistError::EmptyName { .. } => DiagnosticCode::EMPTY_NAME,
            NetlistError::DirectionMismatch { .. } => DiagnosticCode::DIRECTION_MISMATCH,
            NetlistError::AlreadyOccupied { .. } => DiagnosticCode::ALREADY_OCCUPIED,
            NetlistError::DuplicateEndpoint { .. } => DiagnosticCode::DUPLICATE_ENDPOINT,
            NetlistError::EndpointNotFound { .. } => DiagnosticCode::ENDPOINT_NOT_FOUND,
            NetlistError::IdTaken { .. } | NetlistError::IdBelowMinimum { .. } => {
                DiagnosticCode::ID_CONFLICT
            }
            NetlistError::IdExhausted { .. } => DiagnosticCode::ID_EXHAUSTED,
            NetlistError::HierarchyCycle { .. } => DiagnosticCode::HIERARCHY_CYCLE,
            NetlistError::TopModuleFixed { .. } => DiagnosticCode::TOP_MODULE_FIXED,
        }
    }

    /// Builds the warning-level diagnostic describing this error.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::warning(self.code(), self.to_string());
        match self {
            NetlistError::NotFound { kind, id } | NetlistError::ForeignEntity { kind, id } => {
                diag = diag.with_label(Label::primary(EntityRef { kind: *kind, id: *id }, ""));
            }
            NetlistError::UnknownPin { gate, .. } => {
                diag = diag.with_label(Label::primary(EntityRef::gate(*gate), ""));
            }
            NetlistError::NotMarkedGlobal { net, .. } => {
                diag = diag.with_label(Label::primary(EntityRef::net(*net), ""));
            }
            NetlistError::DirectionMismatch { gate, .. } => {
                diag = diag
                    .with_label(Label::primary(EntityRef::gate(*gate), ""))
                    .with_note(
                        "sources must be output or inout pins, destinations input or inout pins",
                    );
            }
            NetlistError::AlreadyOccupied { gate, net, role, .. } => {
                let note = match role {
                    EndpointRole::Destination => "a pin may be the destination of at most one net",
                    EndpointRole::Source => "exclusive sources are enabled for this netlist",
                };
                diag = diag
                    .with_label(Label::primary(EntityRef::gate(*gate), ""))
                    .with_label(Label::secondary(EntityRef::net(*net), "occupied here"))
                    .with_note(note);
            }
            NetlistError::DuplicateEndpoint { gate, net, .. }
            | NetlistError::EndpointNotFound { gate, net, .. } => {
                diag = diag
                    .with_label(Label::primary(EntityRef::net(*net), ""))
                    .with_label(Label::secondary(EntityRef::gate(*gate), ""));
            }
            NetlistError::IdTaken { .. } => {
                diag = diag.with_note("identifiers are never reused within a netlist");
            }
            NetlistError::HierarchyCycle { module, parent } => {
                diag = diag
                    .with_label(Label::primary(EntityRef::module(*module), "moved module"))
                    .with_label(Label::secondary(EntityRef::module(*parent), "requested parent"));
            }
            NetlistError::EmptyName { .. }
            | NetlistError::IdBelowMinimum { .. }
            | NetlistError::IdExhausted { .. }
            | NetlistError::TopModuleFixed { .. } => {}
        }
        diag
    }
}
