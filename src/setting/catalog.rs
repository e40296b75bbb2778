//! Well-known settings.
//!
//! Every named setting the accessor exposes is declared here once, with its
//! key, default, parser and cache policy. The accessor's named getters and
//! the CLI both read from this table; nothing else decides whether a
//! setting is cached.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use crate::accessor::ConfigurationAccessor;
use crate::error::SettingError;

use super::{CachePolicy, LogLevel, Parser, Setting, SettingType, Value, defaults, parse};

/// Key of the override that turns on every experimental feature.
pub const EXPERIMENTAL_ENABLE_ALL_KEY: &str = "cruise.experimental.enable.all";

pub static AGENT_CONNECTION_TIMEOUT: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::cached(
        "agent.connection.timeout",
        defaults::AGENT_CONNECTION_TIMEOUT_SECS,
        Parser::Strict(parse::int),
    )
    .with_description("Agent connection timeout in seconds")
});

pub static SERVER_PORT: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::cached(
        "cruise.server.port",
        defaults::SERVER_PORT,
        Parser::Strict(parse::int),
    )
    .with_description("HTTP port")
});

pub static SSL_SERVER_PORT: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::cached(
        "cruise.server.ssl.port",
        defaults::SSL_SERVER_PORT,
        Parser::Strict(parse::int),
    )
    .with_description("HTTPS port")
});

pub static CONFIG_DIR: LazyLock<Setting<String>> = LazyLock::new(|| {
    Setting::cached(
        "cruise.config.dir",
        defaults::CONFIG_DIR.to_string(),
        Parser::Lenient(parse::text),
    )
    .with_description("Configuration directory")
});

pub static CONFIG_FILE: LazyLock<Setting<PathBuf>> = LazyLock::new(|| {
    Setting::cached(
        "cruise.config.file",
        PathBuf::from(defaults::CONFIG_FILE),
        Parser::Lenient(parse::path),
    )
    .with_description("Main configuration file")
});

pub static DATABASE_FULL_SIZE_LIMIT: LazyLock<Setting<i64>> = LazyLock::new(|| {
    Setting::cached(
        "db.full.limit",
        defaults::DISK_SPACE_FULL_LIMIT_MB,
        Parser::Strict(parse::size_mb),
    )
    .with_description("Free space (MB) below which the database disk counts as full")
});

pub static ARTIFACT_FULL_SIZE_LIMIT: LazyLock<Setting<i64>> = LazyLock::new(|| {
    Setting::cached(
        "artifact.full.limit",
        defaults::DISK_SPACE_FULL_LIMIT_MB,
        Parser::Strict(parse::size_mb),
    )
    .with_description("Free space (MB) below which the artifact repository counts as full")
});

pub static CONFIG_REPO_DIR: LazyLock<Setting<PathBuf>> = LazyLock::new(|| {
    Setting::read_through(
        "cruise.config.repo.dir",
        PathBuf::from(defaults::CONFIG_REPO_DIR),
        Parser::Lenient(parse::path),
    )
    .with_description("Configuration history repository")
});

pub static MATERIAL_UPDATE_IDLE_INTERVAL: LazyLock<Setting<Duration>> = LazyLock::new(|| {
    Setting::read_through(
        "material.update.idle.interval",
        defaults::material_update_idle_interval(),
        Parser::Strict(parse::millis),
    )
    .with_description("Idle interval between material updates in milliseconds")
});

pub static DB_CACHE_SIZE: LazyLock<Setting<String>> = LazyLock::new(|| {
    Setting::read_through(
        "cruise.db.cache.size",
        defaults::DB_CACHE_SIZE.to_string(),
        Parser::Lenient(parse::text),
    )
    .with_description("Database cache size passed to the database as-is")
});

pub static XSL_TRANSFORMER_REGISTRY_CACHE_SIZE: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::read_through(
        "cruise.shine.xslt-cache-size",
        defaults::XSL_TRANSFORMER_REGISTRY_CACHE_SIZE,
        Parser::Strict(parse::int),
    )
    .with_description("Number of compiled XSL transformers kept in memory")
});

pub static UNRESPONSIVE_JOB_WARNING_THRESHOLD: LazyLock<Setting<Duration>> = LazyLock::new(|| {
    Setting::read_through(
        "cruise.unresponsive.job.warning",
        defaults::unresponsive_job_warning_threshold(),
        Parser::Strict(parse::minutes),
    )
    .with_description("Minutes of silence before a job is reported as unresponsive")
});

pub static ACTIVEMQ_USE_JMX: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::read_through("activemq.use.jmx", false, Parser::Lenient(parse::flag))
        .with_description("Expose the message broker over JMX")
});

pub static LICENSE_EXPIRY_WARNING_DAYS: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::read_through(
        "go.license.expiry.warning.days",
        defaults::LICENSE_EXPIRY_WARNING_DAYS,
        Parser::Strict(parse::int),
    )
    .with_description("Days before license expiry at which to warn")
});

pub static PLUGINS_ENABLED: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::read_through("plugins.enabled", false, Parser::Lenient(parse::flag))
        .with_description("Enable plugins (Y/N)")
});

pub static AGENT_LAUNCHER_VERSION: LazyLock<Setting<String>> = LazyLock::new(|| {
    Setting::read_through(
        "agent.launcher.version",
        String::new(),
        Parser::Lenient(parse::text),
    )
    .with_description("Version of the agent launcher that started this process")
});

pub static RESOLVE_FANIN_REVISIONS: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::cached("resolve.fanin.revisions", true, Parser::Lenient(parse::flag))
        .with_description("Enforce revision compatibility with upstream pipelines (Y/N)")
});

pub static ENABLE_CONFIG_MERGE: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::cached("enable.config.merge", true, Parser::Lenient(parse::flag))
        .with_description("Merge concurrent configuration edits (Y/N)")
});

pub static TFS_SOCKET_TIMEOUT: LazyLock<Setting<i32>> = LazyLock::new(|| {
    Setting::read_through(
        "tfs.socket.block.timeout",
        defaults::TFS_SOCKET_TIMEOUT_MS,
        Parser::Strict(parse::int),
    )
    .with_description("TFS socket timeout in milliseconds")
});

pub static DATABASE_PROVIDER: LazyLock<Setting<String>> = LazyLock::new(|| {
    Setting::read_through(
        "go.database.provider",
        defaults::DATABASE_PROVIDER.to_string(),
        Parser::Lenient(parse::text),
    )
    .with_description("Database provider")
});

pub static USE_COMPRESSED_JS: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::read_through("rails.use.compressed.js", true, Parser::Lenient(parse::flag))
        .with_description("Serve compressed JavaScript")
});

pub static EXPERIMENTAL_ENABLE_ALL: LazyLock<Setting<bool>> = LazyLock::new(|| {
    Setting::read_through(
        EXPERIMENTAL_ENABLE_ALL_KEY,
        false,
        Parser::Lenient(parse::flag),
    )
    .with_description("Turn on every experimental feature")
});

/// Builds the key for a plugin's log level.
#[must_use]
pub fn plugin_log_level_key(plugin_id: &str) -> String {
    format!("plugin.{plugin_id}.log.level")
}

/// Extracts the plugin id from a plugin log level key.
#[must_use]
pub fn plugin_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix("plugin.")?
        .strip_suffix(".log.level")
        .filter(|id| !id.is_empty())
}

/// Builds the log level setting for one plugin.
#[must_use]
pub fn plugin_log_level(plugin_id: &str) -> Setting<LogLevel> {
    Setting::read_through(
        plugin_log_level_key(plugin_id),
        defaults::PLUGIN_LOG_LEVEL,
        Parser::Lenient(parse::level),
    )
    .with_description("Plugin log level")
}

/// Builds the key for an experimental feature from its short name.
#[must_use]
pub fn feature_key(name: &str) -> String {
    format!("{}{name}", defaults::FEATURE_PREFIX)
}

/// Builds the flag setting for a feature identified by its full key.
#[must_use]
pub fn feature(key: &str) -> Setting<bool> {
    Setting::read_through(key.to_string(), false, Parser::Lenient(parse::flag))
        .with_description("Experimental feature flag")
}

/// Type-erased view of a catalog setting.
pub trait CatalogEntry: Sync {
    /// Property key.
    fn key(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Cache policy.
    fn policy(&self) -> CachePolicy;

    /// Resolves the setting through `accessor`.
    ///
    /// # Errors
    ///
    /// Returns an error if a strict setting holds a malformed value.
    fn resolve(&self, accessor: &ConfigurationAccessor) -> Result<Value, SettingError>;

    /// Writes `raw` through `accessor`, returning the parsed value.
    ///
    /// # Errors
    ///
    /// Returns an error if a strict setting rejects `raw`.
    fn write(&self, accessor: &ConfigurationAccessor, raw: &str) -> Result<Value, SettingError>;
}

impl<T: SettingType> CatalogEntry for Setting<T> {
    fn key(&self) -> &str {
        Self::key(self)
    }

    fn description(&self) -> &'static str {
        Self::description(self)
    }

    fn policy(&self) -> CachePolicy {
        Self::policy(self)
    }

    fn resolve(&self, accessor: &ConfigurationAccessor) -> Result<Value, SettingError> {
        accessor.get(self).map(SettingType::into_value)
    }

    fn write(&self, accessor: &ConfigurationAccessor, raw: &str) -> Result<Value, SettingError> {
        accessor.set(self, raw).map(SettingType::into_value)
    }
}

/// Returns every static catalog setting in display order.
#[must_use]
pub fn entries() -> Vec<&'static dyn CatalogEntry> {
    let entries: &[&'static dyn CatalogEntry] = &[
        &*AGENT_CONNECTION_TIMEOUT,
        &*SERVER_PORT,
        &*SSL_SERVER_PORT,
        &*CONFIG_DIR,
        &*CONFIG_FILE,
        &*DATABASE_FULL_SIZE_LIMIT,
        &*ARTIFACT_FULL_SIZE_LIMIT,
        &*CONFIG_REPO_DIR,
        &*MATERIAL_UPDATE_IDLE_INTERVAL,
        &*DB_CACHE_SIZE,
        &*XSL_TRANSFORMER_REGISTRY_CACHE_SIZE,
        &*UNRESPONSIVE_JOB_WARNING_THRESHOLD,
        &*ACTIVEMQ_USE_JMX,
        &*LICENSE_EXPIRY_WARNING_DAYS,
        &*PLUGINS_ENABLED,
        &*AGENT_LAUNCHER_VERSION,
        &*RESOLVE_FANIN_REVISIONS,
        &*ENABLE_CONFIG_MERGE,
        &*TFS_SOCKET_TIMEOUT,
        &*DATABASE_PROVIDER,
        &*USE_COMPRESSED_JS,
        &*EXPERIMENTAL_ENABLE_ALL,
    ];
    entries.to_vec()
}

/// Looks up a static catalog setting by key.
#[must_use]
pub fn find(key: &str) -> Option<&'static dyn CatalogEntry> {
    entries().into_iter().find(|entry| entry.key() == key)
}
