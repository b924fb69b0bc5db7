//! Opaque ID newtypes for all netlist entities.
//!
//! Every entity ID pairs the raw per-kind number with the [`NetlistId`] of the
//! netlist that minted it, so an ID handed to the wrong netlist is detected
//! instead of silently aliasing an unrelated entity.

use gatenet_common::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Session-unique tag of a [`Netlist`](crate::Netlist) instance.
///
/// Zero is never issued and marks the invalid IDs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NetlistId(u32);

impl NetlistId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw tag.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Common interface of the typed entity IDs.
pub trait EntityId: Copy + Eq + Ord + std::hash::Hash {
    /// The entity kind this ID names.
    const KIND: EntityKind;

    /// Creates an ID owned by `netlist`.
    fn new(netlist: NetlistId, raw: u32) -> Self;

    /// Returns the raw per-kind number.
    fn raw(self) -> u32;

    /// Returns the netlist that minted this ID.
    fn netlist(self) -> NetlistId;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name {
            netlist: NetlistId,
            raw: u32,
        }

        impl $name {
            /// The reserved "none" ID. It compares equal only to itself and
            /// never resolves in any netlist.
            pub const INVALID: Self = Self {
                netlist: NetlistId(0),
                raw: 0,
            };

            /// Returns the raw per-kind number.
            pub fn raw(self) -> u32 {
                self.raw
            }

            /// Returns the netlist that minted this ID.
            pub fn netlist(self) -> NetlistId {
                self.netlist
            }

            /// Returns `true` for [`Self::INVALID`].
            pub fn is_invalid(self) -> bool {
                self.raw == 0
            }
        }

        impl EntityId for $name {
            const KIND: EntityKind = $kind;

            fn new(netlist: NetlistId, raw: u32) -> Self {
                Self { netlist, raw }
            }

            fn raw(self) -> u32 {
                self.raw
            }

            fn netlist(self) -> NetlistId {
                self.netlist
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", <Self as EntityId>::KIND, self.raw)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a gate.
    GateId,
    EntityKind::Gate
);

define_id!(
    /// Opaque, copyable ID for a net.
    NetId,
    EntityKind::Net
);

define_id!(
    /// Opaque, copyable ID for a module.
    ModuleId,
    EntityKind::Module
);
