//! Free-form annotations attached to gates, nets and modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed annotation value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    /// Caller-defined type tag, e.g. `"string"` or `"bit_vector"`.
    pub value_type: String,
    /// The value, stored verbatim.
    pub value: String,
}

/// `(category, key) -> (type, value)` store owned by one entity.
///
/// Entries are grouped per category so the store serializes with plain string
/// keys. The netlist never reads or validates the contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataContainer {
    categories: BTreeMap<String, BTreeMap<String, DataEntry>>,
}

impl DataContainer {
    /// Sets an entry, replacing any previous value under the same key.
    pub fn set(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        value_type: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.categories.entry(category.into()).or_default().insert(
            key.into(),
            DataEntry {
                value_type: value_type.into(),
                value: value.into(),
            },
        );
    }

    /// Looks up an entry.
    pub fn get(&self, category: &str, key: &str) -> Option<&DataEntry> {
        self.categories.get(category)?.get(key)
    }

    /// Removes an entry, returning `false` if none existed.
    pub fn remove(&mut self, category: &str, key: &str) -> bool {
        let Some(entries) = self.categories.get_mut(category) else {
            return false;
        };
        let removed = entries.remove(key).is_some();
        if entries.is_empty() {
            self.categories.remove(category);
        }
        removed
    }

    /// Iterates `(category, key, entry)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &DataEntry)> {
        self.categories.iter().flat_map(|(c, entries)| {
            entries
                .iter()
                .map(move |(k, e)| (c.as_str(), k.as_str(), e))
        })
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeMap::is_empty)
    }
}
