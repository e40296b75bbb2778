//! Property sources consulted for raw configuration strings.
//!
//! A [`PropertySource`] is the shared, externally mutable key/value store
//! that sits behind a [`ConfigurationAccessor`]. Any code holding the
//! source may change it at any time; the accessor never assumes exclusive
//! control over it.
//!
//! [`ConfigurationAccessor`]: crate::accessor::ConfigurationAccessor

mod file;
mod memory;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::{PropertiesFile, default_properties_template, write_default_properties};
pub use memory::MemorySource;

use crate::error::SourceError;

/// Abstraction over a string key/value property store.
///
/// Implementations must use interior mutability: both operations take
/// `&self` so that one store can be shared by many accessors and by
/// arbitrary other code.
///
/// No atomicity is assumed across multiple keys.
pub trait PropertySource: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

/// Splits a `key=value` definition as given to `-D` on the command line.
///
/// The key is trimmed; the value is kept verbatim after the first `=`,
/// so values may themselves contain `=`.
///
/// # Errors
///
/// Returns [`SourceError::InvalidDefinition`] if there is no `=` or the key is empty.
pub fn parse_definition(definition: &str) -> Result<(String, String), SourceError> {
    match definition.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(SourceError::InvalidDefinition {
            value: definition.to_string(),
        }),
    }
}
