//! Content hashing for structural fingerprints of netlists.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit content hash computed using XXH3.
///
/// Two netlist snapshots with the same `ContentHash` are assumed to describe
/// the same structure.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

/// Incremental XXH3-128 hasher for feeding a structure piece by piece.
///
/// Every field is length- or tag-prefixed by the caller's choice of `write_*`
/// method, so `["ab", "c"]` and `["a", "bc"]` hash differently.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Creates a hasher with the default seed.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds a `u32` in little-endian order.
    pub fn write_u32(&mut self, value: u32) {
        self.state.update(&value.to_le_bytes());
    }

    /// Feeds a length-prefixed string.
    pub fn write_str(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.state.update(value.as_bytes());
    }

    /// Finishes hashing and returns the digest.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"net n1");
        let b = ContentHash::from_bytes(b"net n1");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"gate");
        let b = ContentHash::from_bytes(b"net");
        assert_ne!(a, b);
    }

    #[test]
    fn display_format() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32, "Display should be 32 hex chars");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hasher_is_boundary_sensitive() {
        let mut a = ContentHasher::new();
        a.write_str("ab");
        a.write_str("c");
        let mut b = ContentHasher::new();
        b.write_str("a");
        b.write_str("bc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn hasher_deterministic() {
        let feed = |h: &mut ContentHasher| {
            h.write_u32(5);
            h.write_str("O");
        };
        let mut a = ContentHasher::new();
        let mut b = ContentHasher::new();
        feed(&mut a);
        feed(&mut b);
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::from_bytes(b"serde test");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
