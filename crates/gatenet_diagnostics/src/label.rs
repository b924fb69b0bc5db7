//! Labels that anchor a diagnostic to netlist entities.

use gatenet_common::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a netlist entity by kind and raw ID.
///
/// Diagnostics outlive the operations that produced them, so they refer to
/// entities by number rather than by borrowed handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EntityRef {
    /// The entity kind.
    pub kind: EntityKind,
    /// The raw identifier within its kind.
    pub id: u32,
}

impl EntityRef {
    /// Creates a reference to a gate.
    pub fn gate(id: u32) -> Self {
        Self {
            kind: EntityKind::Gate,
            id,
        }
    }

    /// Creates a reference to a net.
    pub fn net(id: u32) -> Self {
        Self {
            kind: EntityKind::Net,
            id,
        }
    }

    /// Creates a reference to a module.
    pub fn module(id: u32) -> Self {
        Self {
            kind: EntityKind::Module,
            id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Whether a label marks the entity the operation targeted or a related one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The entity the failed operation was invoked on.
    Primary,
    /// A related entity, e.g. the net already occupying a pin.
    Secondary,
}

/// An entity annotated with an explanatory message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The entity this label annotates.
    pub entity: EntityRef,
    /// The message displayed next to the entity.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(entity: EntityRef, message: impl Into<String>) -> Self {
        Self {
            entity,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(entity: EntityRef, message: impl Into<String>) -> Self {
        Self {
            entity,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}
