//! Shared foundational types used across the gatenet crates.
//!
//! This crate provides interned names, entity kinds, structural content hashing,
//! and the common internal-error result type.

#![warn(missing_docs)]

pub mod entity;
pub mod hash;
pub mod ident;
pub mod result;

pub use entity::EntityKind;
pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use result::{GatenetResult, InternalError};
