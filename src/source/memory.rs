//! In-memory property store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::PropertySource;

/// Ordered, thread-safe in-memory [`PropertySource`].
///
/// This is the store handed to accessors in production (seeded from a
/// properties file and `-D` definitions) and in tests, where it plays the
/// role of the externally mutated process-wide property table.
///
/// # Example
///
/// ```
/// use sysenv::source::{MemorySource, PropertySource};
///
/// let source = MemorySource::new();
/// source.set("cruise.server.port", "8153");
/// assert_eq!(source.get("cruise.server.port").as_deref(), Some("8153"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySource {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }

    /// Returns the number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no properties are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns a copy of all properties in key order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl PropertySource for MemorySource {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}
