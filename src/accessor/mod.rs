//! Typed, memoizing access to a shared property source.
//!
//! [`ConfigurationAccessor`] resolves [`Setting`]s against a
//! [`PropertySource`] and owns a private cache of resolved values.
//!
//! # Cache Rules
//!
//! - A [`CachePolicy::CacheOnFirstRead`] setting is read from the source
//!   once; that first value is returned for the rest of the accessor's
//!   lifetime, whatever happens to the source afterwards.
//! - A [`CachePolicy::ReadThrough`] setting is re-read and re-parsed on
//!   every call and never populates the cache on its own.
//! - [`ConfigurationAccessor::set`] writes the source *and* replaces the
//!   cache entry, for either policy. After an accessor write the setting
//!   behaves as cached: later external writes to the source are not seen.
//! - Resets drop cache entries so the next read goes back to the source.
//!
//! # Concurrency
//!
//! The cache is guarded by a single [`RwLock`]. Cache hits take a shared
//! lock. A miss on a cached setting takes the upgradable lock, which is
//! exclusive among resolvers, re-checks, reads and parses the source, then
//! upgrades to insert. Two threads racing on the same uncached setting
//! therefore perform exactly one source read between them, and both see
//! its result. Writes hold the exclusive lock across the source write and
//! the cache replacement.
//!
//! Each accessor has its own cache; accessors sharing one source never
//! see each other's cached values.

mod named;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;


pub use named::PluginStatus;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::error::SettingError;
use crate::setting::catalog;
use crate::setting::{CachePolicy, Setting, SettingType, Value};
use crate::source::PropertySource;

/// Outcome of looking a setting up in the cache.
enum Cached<T> {
    Hit(T),
    /// An entry exists under the key but holds another type.
    Mismatch,
    Miss,
}

fn probe<T: SettingType>(cache: &HashMap<String, Value>, key: &str) -> Cached<T> {
    match cache.get(key) {
        Some(value) => T::from_value(value).map_or(Cached::Mismatch, Cached::Hit),
        None => Cached::Miss,
    }
}

/// Resolves settings against a shared [`PropertySource`], memoizing per
/// each setting's [`CachePolicy`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sysenv::accessor::ConfigurationAccessor;
/// use sysenv::setting::catalog;
/// use sysenv::source::{MemorySource, PropertySource};
///
/// let source = Arc::new(MemorySource::new());
/// let accessor = ConfigurationAccessor::new(source.clone());
///
/// source.set("cruise.server.ssl.port", "8154");
/// assert_eq!(accessor.get(&catalog::SSL_SERVER_PORT).unwrap(), 8154);
///
/// // Cached on first read: external changes are not picked up.
/// source.set("cruise.server.ssl.port", "20000");
/// assert_eq!(accessor.get(&catalog::SSL_SERVER_PORT).unwrap(), 8154);
/// ```
pub struct ConfigurationAccessor {
    source: Arc<dyn PropertySource>,
    cache: RwLock<HashMap<String, Value>>,
}

impl fmt::Debug for ConfigurationAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationAccessor")
            .field("cached", &self.cache.read().len())
            .finish_non_exhaustive()
    }
}

impl ConfigurationAccessor {
    /// Creates an accessor with an empty cache over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the underlying property source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn PropertySource> {
        &self.source
    }

    /// Resolves a setting.
    ///
    /// Absent properties resolve to the setting's default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Malformed`] if a strict setting holds a value
    /// its parser rejects. The failure is not cached; the next call tries again.
    pub fn get<T: SettingType>(&self, setting: &Setting<T>) -> Result<T, SettingError> {
        let key = setting.key();

        {
            let cache = self.cache.read();
            match probe(&cache, key) {
                Cached::Hit(value) => {
                    tracing::debug!("Setting cache hit: {key}");
                    return Ok(value);
                }
                Cached::Mismatch => return self.read_mismatched(setting),
                Cached::Miss => {}
            }
        }

        match setting.policy() {
            CachePolicy::ReadThrough => self.read_source(setting),
            CachePolicy::CacheOnFirstRead => self.populate(setting),
        }
    }

    /// Writes `raw` for a setting through to the source and the cache.
    ///
    /// `raw` is parsed first. If a strict parser rejects it nothing is
    /// written and the previous cache entry (if any) is kept. Otherwise the
    /// source write and cache replacement happen under the exclusive lock,
    /// and every later read through this accessor returns the new value
    /// until a reset.
    ///
    /// Returns the parsed value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Malformed`] if a strict parser rejects `raw`.
    pub fn set<T: SettingType>(&self, setting: &Setting<T>, raw: &str) -> Result<T, SettingError> {
        let key = setting.key();
        let value = setting.parse(Some(raw))?;

        let mut cache = self.cache.write();
        self.source.set(key, raw);
        cache.insert(key.to_string(), value.clone().into_value());
        drop(cache);

        tracing::info!("Setting '{key}' set to '{raw}'");
        Ok(value)
    }

    /// Writes a property by key.
    ///
    /// Catalog keys, plugin log level keys and feature keys are written with
    /// [`set`](Self::set) semantics. Any other key is written to the source
    /// and its cache entry, if one exists, is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Malformed`] if the key belongs to a strict
    /// setting that rejects `raw`.
    pub fn set_raw(&self, key: &str, raw: &str) -> Result<(), SettingError> {
        if let Some(entry) = catalog::find(key) {
            return entry.write(self, raw).map(drop);
        }
        if let Some(plugin_id) = catalog::plugin_id_from_key(key) {
            return self.set(&catalog::plugin_log_level(plugin_id), raw).map(drop);
        }
        if key.starts_with(crate::setting::defaults::FEATURE_PREFIX) {
            return self.set(&catalog::feature(key), raw).map(drop);
        }

        let mut cache = self.cache.write();
        self.source.set(key, raw);
        cache.remove(key);
        drop(cache);

        tracing::info!("Property '{key}' set to '{raw}'");
        Ok(())
    }

    /// Drops the cache entry for a setting.
    ///
    /// Returns `true` if an entry was removed.
    pub fn reset<T>(&self, setting: &Setting<T>) -> bool {
        self.reset_key(setting.key())
    }

    /// Drops the cache entry for a key.
    ///
    /// Returns `true` if an entry was removed.
    pub fn reset_key(&self, key: &str) -> bool {
        let removed = self.cache.write().remove(key).is_some();
        if removed {
            tracing::info!("Setting cache reset: {key}");
        }
        removed
    }

    /// Drops every cache entry.
    pub fn reset_all(&self) {
        let mut cache = self.cache.write();
        let count = cache.len();
        cache.clear();
        drop(cache);
        tracing::info!("Setting cache cleared ({count} entries)");
    }

    /// Returns `true` if a value is cached under `key`.
    #[must_use]
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.read().contains_key(key)
    }

    /// Reads and parses a setting without touching the cache.
    fn read_source<T: SettingType>(&self, setting: &Setting<T>) -> Result<T, SettingError> {
        let raw = self.source.get(setting.key());
        setting.parse(raw.as_deref())
    }

    /// First resolution of a cached setting.
    fn populate<T: SettingType>(&self, setting: &Setting<T>) -> Result<T, SettingError> {
        let key = setting.key();
        let cache = self.cache.upgradable_read();

        // Another resolver may have populated the entry while we waited.
        match probe(&cache, key) {
            Cached::Hit(value) => return Ok(value),
            Cached::Mismatch => return self.read_mismatched(setting),
            Cached::Miss => {}
        }

        let value = self.read_source(setting)?;
        let mut cache = RwLockUpgradableReadGuard::upgrade(cache);
        cache.insert(key.to_string(), value.clone().into_value());
        tracing::debug!("Setting cache populated: {key}");
        Ok(value)
    }

    fn read_mismatched<T: SettingType>(&self, setting: &Setting<T>) -> Result<T, SettingError> {
        tracing::warn!(
            "Cached value for '{}' has a different type, reading source instead",
            setting.key()
        );
        self.read_source(setting)
    }
}
