//! Per-kind identifier bookkeeping for one netlist.
//!
//! IDs move through three states: free, live, and retired. Retired IDs
//! belonged to deleted entities and are never handed out again, so a stale
//! ID held by a caller can never resolve to a newer entity.

use crate::error::NetlistError;
use gatenet_common::EntityKind;
use gatenet_config::IdConfig;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
struct KindIds {
    min: u32,
    /// Every ID in `[min, cursor)` is taken.
    cursor: u32,
    taken: BTreeSet<u32>,
    live: BTreeSet<u32>,
}

impl KindIds {
    fn new(min: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            cursor: min,
            taken: BTreeSet::new(),
            live: BTreeSet::new(),
        }
    }

    fn allocate(&mut self) -> Option<u32> {
        let mut candidate = self.cursor;
        while self.taken.contains(&candidate) {
            candidate = candidate.checked_add(1)?;
        }
        self.taken.insert(candidate);
        self.live.insert(candidate);
        self.cursor = candidate.saturating_add(1);
        Some(candidate)
    }
}

/// Allocates and tracks unique IDs per entity kind.
#[derive(Debug, Clone)]
pub struct IdRegistry {
    kinds: [KindIds; 3],
}

impl IdRegistry {
    /// Creates a registry honoring the configured minimum per kind.
    pub fn new(config: &IdConfig) -> Self {
        Self {
            kinds: EntityKind::ALL.map(|k| KindIds::new(config.min_for(k))),
        }
    }

    fn kind(&self, kind: EntityKind) -> &KindIds {
        &self.kinds[kind as usize]
    }

    fn kind_mut(&mut self, kind: EntityKind) -> &mut KindIds {
        &mut self.kinds[kind as usize]
    }

    /// Reserves the kind's minimum ID on a fresh registry.
    ///
    /// Used for the implicit top module, which always carries the minimum.
    pub(crate) fn claim_minimum(&mut self, kind: EntityKind) -> u32 {
        let ids = self.kind_mut(kind);
        let min = ids.min;
        ids.taken.insert(min);
        ids.live.insert(min);
        if ids.cursor == min {
            ids.cursor = min.saturating_add(1);
        }
        min
    }

    /// Returns the smallest ID `allocate_id` would hand out next, without reserving it.
    pub fn peek_next(&self, kind: EntityKind) -> Option<u32> {
        let ids = self.kind(kind);
        let mut candidate = ids.cursor;
        while ids.taken.contains(&candidate) {
            candidate = candidate.checked_add(1)?;
        }
        Some(candidate)
    }

    /// Reserves and returns the smallest never-used ID of `kind`.
    pub fn allocate_id(&mut self, kind: EntityKind) -> Result<u32, NetlistError> {
        self.kind_mut(kind)
            .allocate()
            .ok_or(NetlistError::IdExhausted { kind })
    }

    /// Reserves a caller-chosen ID.
    ///
    /// Fails if the ID is below the kind's minimum or has ever been used,
    /// including by an entity that was since deleted.
    pub fn register_id(&mut self, kind: EntityKind, id: u32) -> Result<(), NetlistError> {
        let ids = self.kind_mut(kind);
        if id < ids.min {
            return Err(NetlistError::IdBelowMinimum {
                kind,
                id,
                min: ids.min,
            });
        }
        if !ids.taken.insert(id) {
            return Err(NetlistError::IdTaken { kind, id });
        }
        ids.live.insert(id);
        Ok(())
    }

    /// Retires a live ID. It stops being live but is never reallocated.
    ///
    /// Returns `false` if the ID was not live.
    pub fn release_id(&mut self, kind: EntityKind, id: u32) -> bool {
        self.kind_mut(kind).live.remove(&id)
    }

    /// Returns `true` if the ID names a currently existing entity.
    pub fn is_live(&self, kind: EntityKind, id: u32) -> bool {
        self.kind(kind).live.contains(&id)
    }

    /// Returns `true` if the ID was ever handed out, live or retired.
    pub fn is_taken(&self, kind: EntityKind, id: u32) -> bool {
        self.kind(kind).taken.contains(&id)
    }

    /// Returns the configured minimum of `kind`.
    pub fn min_id(&self, kind: EntityKind) -> u32 {
        self.kind(kind).min
    }

    /// Returns the number of live IDs of `kind`.
    pub fn live_count(&self, kind: EntityKind) -> usize {
        self.kind(kind).live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> IdRegistry {
        IdRegistry::new(&IdConfig::default())
    }

    #[test]
    fn allocates_smallest_unused() {
        let mut ids = registry();
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), 1);
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), 2);
        // kinds are independent
        assert_eq!(ids.allocate_id(EntityKind::Net).unwrap(), 1);
    }

    #[test]
    fn allocation_skips_registered() {
        let mut ids = registry();
        ids.register_id(EntityKind::Gate, 1).unwrap();
        ids.register_id(EntityKind::Gate, 2).unwrap();
        ids.register_id(EntityKind::Gate, 4).unwrap();
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), 3);
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), 5);
    }

    #[test]
    fn register_rejects_taken_and_zero() {
        let mut ids = registry();
        ids.register_id(EntityKind::Net, 7).unwrap();
        assert_eq!(
            ids.register_id(EntityKind::Net, 7),
            Err(NetlistError::IdTaken {
                kind: EntityKind::Net,
                id: 7
            })
        );
        assert!(matches!(
            ids.register_id(EntityKind::Net, 0),
            Err(NetlistError::IdBelowMinimum { min: 1, .. })
        ));
    }

    #[test]
    fn register_respects_minimum() {
        let config = IdConfig {
            min_gate_id: 100,
            ..IdConfig::default()
        };
        let mut ids = IdRegistry::new(&config);
        assert!(ids.register_id(EntityKind::Gate, 99).is_err());
        assert!(ids.register_id(EntityKind::Gate, 100).is_ok());
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), 101);
    }

    #[test]
    fn released_ids_are_never_reused() {
        let mut ids = registry();
        let a = ids.allocate_id(EntityKind::Module).unwrap();
        assert!(ids.release_id(EntityKind::Module, a));
        assert!(!ids.is_live(EntityKind::Module, a));
        assert!(ids.is_taken(EntityKind::Module, a));
        assert_ne!(ids.allocate_id(EntityKind::Module).unwrap(), a);
        assert!(ids.register_id(EntityKind::Module, a).is_err());
        assert!(!ids.release_id(EntityKind::Module, a));
    }

    #[test]
    fn exhaustion_at_range_limit() {
        let mut ids = registry();
        ids.register_id(EntityKind::Gate, u32::MAX - 1).unwrap();
        let config_cursor_jump = |ids: &mut IdRegistry| {
            // fill everything below by moving the cursor directly
            ids.kind_mut(EntityKind::Gate).cursor = u32::MAX - 1;
        };
        config_cursor_jump(&mut ids);
        assert_eq!(ids.allocate_id(EntityKind::Gate).unwrap(), u32::MAX);
        assert_eq!(
            ids.allocate_id(EntityKind::Gate),
            Err(NetlistError::IdExhausted {
                kind: EntityKind::Gate
            })
        );
    }

    #[test]
    fn claim_minimum_takes_the_floor() {
        let config = IdConfig {
            min_module_id: 10,
            ..IdConfig::default()
        };
        let mut ids = IdRegistry::new(&config);
        assert_eq!(ids.claim_minimum(EntityKind::Module), 10);
        assert!(ids.is_live(EntityKind::Module, 10));
        assert_eq!(ids.allocate_id(EntityKind::Module).unwrap(), 11);
    }

    #[test]
    fn peek_does_not_reserve() {
        let mut ids = registry();
        assert_eq!(ids.peek_next(EntityKind::Net), Some(1));
        assert_eq!(ids.peek_next(EntityKind::Net), Some(1));
        assert_eq!(ids.allocate_id(EntityKind::Net).unwrap(), 1);
        assert_eq!(ids.peek_next(EntityKind::Net), Some(2));
    }
}
