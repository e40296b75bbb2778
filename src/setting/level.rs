//! Enumerated log levels parsed from free-form property strings.

use std::fmt;

/// Closed set of log levels a property may name.
///
/// Parsing is case-insensitive and never fails outright: callers pick the
/// fallback for unrecognized names with [`LogLevel::parse_or`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    /// Finest-grained tracing output
    Trace,
    /// Diagnostic detail
    Debug,
    /// Normal operational messages
    Info,
    /// Something unexpected but recoverable
    Warn,
    /// Failures
    Error,
}

impl LogLevel {
    /// All levels, from most to least verbose.
    pub const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Parses a level name, returning `None` for unrecognized input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw))
    }

    /// Parses a level name, returning `fallback` for unrecognized input.
    ///
    /// # Example
    ///
    /// ```
    /// use sysenv::setting::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse_or("debug", LogLevel::Info), LogLevel::Debug);
    /// assert_eq!(LogLevel::parse_or("LOUD", LogLevel::Info), LogLevel::Info);
    /// ```
    #[must_use]
    pub fn parse_or(raw: &str, fallback: Self) -> Self {
        Self::parse(raw).unwrap_or(fallback)
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
