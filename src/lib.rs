//! sysenv: typed system environment settings
//!
//! A library for resolving named configuration settings from a shared
//! property source, with per-setting caching, strict or lenient parsing,
//! experimental feature flags and per-plugin log levels.

pub mod accessor;
pub mod cli;
pub mod error;
pub mod setting;
pub mod source;
