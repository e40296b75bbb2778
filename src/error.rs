//! Error types for setting resolution and property sources.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a strict parser to turn a raw property string into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The raw string is not a decimal integer.
    #[error("not an integer: {source}")]
    InvalidInteger {
        /// Underlying integer parse error
        #[source]
        source: ParseIntError,
    },

    /// The raw string is not a size such as `100`, `50M` or `2G`.
    #[error("not a size (expected an integer with optional M, G or T suffix)")]
    InvalidSize,

    /// The value does not fit the target type after unit conversion.
    #[error("value out of range")]
    Overflow,
}

impl From<ParseIntError> for ParseError {
    fn from(source: ParseIntError) -> Self {
        Self::InvalidInteger { source }
    }
}

/// Error returned when a setting cannot be resolved or written.
///
/// Only strict settings produce errors; absent keys and lenient settings
/// always resolve to a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    /// The property holds a value the setting's strict parser rejects.
    #[error("Invalid value '{value}' for setting '{key}': {source}")]
    Malformed {
        /// Property key
        key: String,
        /// Raw value found in (or offered to) the property source
        value: String,
        /// Why the parser rejected it
        #[source]
        source: ParseError,
    },
}

impl SettingError {
    /// Creates a `Malformed` error.
    #[must_use]
    pub fn malformed(key: impl Into<String>, value: impl Into<String>, source: ParseError) -> Self {
        Self::Malformed {
            key: key.into(),
            value: value.into(),
            source,
        }
    }

    /// Returns the key of the setting that failed.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Malformed { key, .. } => key,
        }
    }
}

/// Error type for loading and preparing property sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the properties file.
    #[error("Failed to read properties file '{}': {source}", path.display())]
    FileRead {
        /// Path to the properties file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the properties file as TOML.
    #[error("Failed to parse properties file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A TOML value that has no single-string property representation.
    #[error("Unsupported value for property '{key}': {kind} cannot be used as a property")]
    UnsupportedValue {
        /// Dotted property key
        key: String,
        /// TOML type name of the offending value
        kind: &'static str,
    },

    /// Failed to write the properties template (for init command).
    #[error("Failed to write properties file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the properties file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A `key=value` definition could not be split.
    #[error("Invalid property definition '{value}': expected 'key=value'")]
    InvalidDefinition {
        /// The invalid definition string
        value: String,
    },
}
