//! Setting descriptors: what a named configuration item is and how it resolves.
//!
//! This module provides:
//! - The typed descriptor ([`Setting`]) with its default, parser and cache policy
//! - Cache policies ([`CachePolicy`])
//! - Parser fallback policies ([`Parser`]) and the parse functions ([`parse`])
//! - Enumerated log levels ([`LogLevel`])
//! - Type-erased cached values ([`Value`], [`SettingType`])
//! - Centralized defaults ([`defaults`]) and the well-known settings ([`catalog`])
//!
//! # Resolution Rules
//!
//! An absent property always resolves to the setting's default. A present
//! property is handed to the parser:
//!
//! - [`Parser::Strict`] rejects malformed input with a [`SettingError`]
//!   for that call only; nothing is cached.
//! - [`Parser::Lenient`] maps unrecognized input to the default.

pub mod catalog;
pub mod defaults;
mod level;
pub mod parse;
mod value;


pub use level::LogLevel;
pub use value::{SettingType, Value};

use std::borrow::Cow;
use std::fmt;

use crate::error::{ParseError, SettingError};

/// Whether a resolved value is memoized by the accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// The first resolved value is fixed for the accessor's lifetime.
    CacheOnFirstRead,
    /// Every read re-queries and re-parses the property source.
    ReadThrough,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CacheOnFirstRead => write!(f, "cached"),
            Self::ReadThrough => write!(f, "read-through"),
        }
    }
}

/// Parser fallback policy for a present property value.
#[derive(Debug, Clone)]
pub enum Parser<T> {
    /// Malformed input is an error for the calling read.
    Strict(fn(&str) -> Result<T, ParseError>),
    /// Unrecognized input (`None`) silently resolves to the default.
    Lenient(fn(&str) -> Option<T>),
}

/// A named, statically known configuration item.
///
/// Static settings live in [`catalog`]; settings whose key is composed at
/// runtime (per-plugin log levels, feature flags) are built on demand with
/// the same constructors.
///
/// # Example
///
/// ```
/// use sysenv::setting::{CachePolicy, Parser, Setting, parse};
///
/// let port = Setting::cached("cruise.server.port", 8153, Parser::Strict(parse::int))
///     .with_description("HTTP port");
///
/// assert_eq!(port.policy(), CachePolicy::CacheOnFirstRead);
/// assert_eq!(port.parse(None).unwrap(), 8153);
/// assert_eq!(port.parse(Some("9000")).unwrap(), 9000);
/// assert!(port.parse(Some("ninety")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Setting<T> {
    key: Cow<'static, str>,
    description: &'static str,
    default: T,
    parser: Parser<T>,
    policy: CachePolicy,
}

impl<T> Setting<T> {
    /// Creates a setting whose first resolved value is memoized.
    pub fn cached(key: impl Into<Cow<'static, str>>, default: T, parser: Parser<T>) -> Self {
        Self::new(key, default, parser, CachePolicy::CacheOnFirstRead)
    }

    /// Creates a setting that is re-read on every access.
    pub fn read_through(key: impl Into<Cow<'static, str>>, default: T, parser: Parser<T>) -> Self {
        Self::new(key, default, parser, CachePolicy::ReadThrough)
    }

    fn new(
        key: impl Into<Cow<'static, str>>,
        default: T,
        parser: Parser<T>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            key: key.into(),
            description: "",
            default,
            parser,
            policy,
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Returns the property key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the value used when the property is absent.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the cache policy.
    #[must_use]
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns `true` if the parser never fails.
    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        matches!(self.parser, Parser::Lenient(_))
    }
}

impl<T: Clone> Setting<T> {
    /// Resolves a raw property value (or its absence) to a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Malformed`] if the value is present and a
    /// strict parser rejects it.
    pub fn parse(&self, raw: Option<&str>) -> Result<T, SettingError> {
        let Some(raw) = raw else {
            return Ok(self.default.clone());
        };

        match self.parser {
            Parser::Strict(parse) => {
                parse(raw).map_err(|e| SettingError::malformed(self.key(), raw, e))
            }
            Parser::Lenient(parse) => Ok(parse(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Unrecognized value '{}' for '{}', using default",
                    raw,
                    self.key
                );
                self.default.clone()
            })),
        }
    }
}
