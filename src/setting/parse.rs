//! Parse functions used by setting descriptors.
//!
//! Functions returning `Result` are strict and back [`Parser::Strict`];
//! functions returning `Option` are lenient and back [`Parser::Lenient`].
//!
//! [`Parser::Strict`]: super::Parser::Strict
//! [`Parser::Lenient`]: super::Parser::Lenient

use std::num::{IntErrorKind, ParseIntError};
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::ParseError;

use super::LogLevel;

const MB_PER_GB: i64 = 1024;
const MB_PER_TB: i64 = 1024 * 1024;

/// Integer with an optional `M`, `G` or `T` suffix, each optionally followed by `B`.
static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)\s*(?:([mgt])b?)?$").expect("size pattern is a valid regex")
});

/// Parses a 32-bit decimal integer.
///
/// # Errors
///
/// Returns an error if `raw` is not a decimal integer in range.
pub fn int(raw: &str) -> Result<i32, ParseError> {
    Ok(raw.trim().parse()?)
}

/// Parses a size in megabytes.
///
/// A plain integer is taken as megabytes. `M`/`MB`, `G`/`GB` and `T`/`TB`
/// suffixes are accepted in any case.
///
/// # Errors
///
/// Returns [`ParseError::InvalidSize`] for anything else and
/// [`ParseError::Overflow`] if the result does not fit in an `i64`.
pub fn size_mb(raw: &str) -> Result<i64, ParseError> {
    let captures = SIZE_PATTERN
        .captures(raw.trim())
        .ok_or(ParseError::InvalidSize)?;

    let amount: i64 = captures[1].parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ParseError::Overflow,
        _ => ParseError::InvalidSize,
    })?;
    let multiplier = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 1,
        Some(unit) if unit == "m" => 1,
        Some(unit) if unit == "g" => MB_PER_GB,
        Some(_) => MB_PER_TB,
    };

    amount.checked_mul(multiplier).ok_or(ParseError::Overflow)
}

/// Parses a non-negative number of milliseconds.
///
/// # Errors
///
/// Returns an error if `raw` is not a non-negative integer.
pub fn millis(raw: &str) -> Result<Duration, ParseError> {
    let ms: u64 = raw.trim().parse()?;
    Ok(Duration::from_millis(ms))
}

/// Parses a non-negative number of minutes.
///
/// # Errors
///
/// Returns an error if `raw` is not a non-negative integer or overflows.
pub fn minutes(raw: &str) -> Result<Duration, ParseError> {
    let minutes: u64 = raw.trim().parse()?;
    let secs = minutes.checked_mul(60).ok_or(ParseError::Overflow)?;
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean flag.
///
/// Accepts `true`/`yes`/`y`/`on`/`1` and `false`/`no`/`n`/`off`/`0` in any case,
/// which covers both `true`/`false` and `Y`/`N` style properties.
#[must_use]
pub fn flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Takes the raw string as-is.
#[must_use]
pub fn text(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// Parses a file-system path, expanding a leading `~` to the home directory.
///
/// If the home directory cannot be determined the path is kept verbatim.
#[must_use]
pub fn path(raw: &str) -> Option<PathBuf> {
    let expanded = match raw.strip_prefix('~') {
        Some("") => dirs::home_dir(),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => {
            dirs::home_dir().map(|home| home.join(&rest[1..]))
        }
        _ => None,
    };
    Some(expanded.unwrap_or_else(|| PathBuf::from(raw)))
}

/// Parses a log level name.
#[must_use]
pub fn level(raw: &str) -> Option<LogLevel> {
    LogLevel::parse(raw)
}
