//! Default values for well-known settings.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use super::LogLevel;

/// Default agent connection timeout in seconds.
pub const AGENT_CONNECTION_TIMEOUT_SECS: i32 = 300;

/// Default HTTP port.
pub const SERVER_PORT: i32 = 8153;

/// Default HTTPS port.
pub const SSL_SERVER_PORT: i32 = 8154;

/// Default configuration directory.
pub const CONFIG_DIR: &str = "config";

/// Default configuration file.
pub const CONFIG_FILE: &str = "config/cruise-config.xml";

/// Default free-space limit for database and artifact disks, in MB.
pub const DISK_SPACE_FULL_LIMIT_MB: i64 = 100;

/// Default configuration repository directory.
pub const CONFIG_REPO_DIR: &str = "db/config.git";

/// Default idle interval between material updates in milliseconds.
pub const MATERIAL_UPDATE_IDLE_INTERVAL_MS: u64 = 60_000;

/// Default database cache size (128 KiB), kept as the raw string handed to the database.
pub const DB_CACHE_SIZE: &str = "131072";

/// Default number of compiled XSL transformers kept in memory.
pub const XSL_TRANSFORMER_REGISTRY_CACHE_SIZE: i32 = 20;

/// Default time in minutes before an unresponsive job raises a warning.
pub const UNRESPONSIVE_JOB_WARNING_MINUTES: u64 = 5;

/// Default number of days before license expiry at which to warn.
pub const LICENSE_EXPIRY_WARNING_DAYS: i32 = 30;

/// Default TFS socket timeout in milliseconds (20 minutes).
pub const TFS_SOCKET_TIMEOUT_MS: i32 = 20 * 60 * 1000;

/// Default database provider.
pub const DATABASE_PROVIDER: &str = "com.thoughtworks.go.server.database.H2Database";

/// Application context path that prefixes every URL path.
pub const CONTEXT_PATH: &str = "/go";

/// Host name used in base URLs.
pub const HOSTNAME: &str = "localhost";

/// Jetty configuration file name inside the configuration directory.
pub const JETTY_CONFIG_FILE_NAME: &str = "jetty.xml";

/// Key prefix shared by experimental feature flags.
pub const FEATURE_PREFIX: &str = "cruise.experimental.feature.";

/// Log level for plugins without an explicit level.
pub const PLUGIN_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Default material update idle interval as Duration.
#[must_use]
pub const fn material_update_idle_interval() -> Duration {
    Duration::from_millis(MATERIAL_UPDATE_IDLE_INTERVAL_MS)
}

/// Default unresponsive job warning threshold as Duration.
#[must_use]
pub const fn unresponsive_job_warning_threshold() -> Duration {
    Duration::from_secs(UNRESPONSIVE_JOB_WARNING_MINUTES * 60)
}
