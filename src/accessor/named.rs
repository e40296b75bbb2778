//! Named getters for the well-known settings.
//!
//! Getters for strict settings return `Result`; getters for lenient
//! settings return the value directly since they cannot fail.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SettingError;
use crate::setting::{LogLevel, Setting, SettingType, catalog, defaults};

use super::ConfigurationAccessor;

/// Whether plugins are enabled, in the `Y`/`N` form used by properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    /// Plugins are enabled (`Y`)
    Enabled,
    /// Plugins are disabled (`N`)
    Disabled,
}

impl PluginStatus {
    /// Returns the property form: `Y` or `N`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Y",
            Self::Disabled => "N",
        }
    }
}

impl From<bool> for PluginStatus {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigurationAccessor {
    /// Resolves a setting whose parser cannot fail.
    fn lenient<T: SettingType>(&self, setting: &Setting<T>) -> T {
        debug_assert!(setting.is_lenient(), "{} is strict", setting.key());
        self.get(setting).unwrap_or_else(|e| {
            tracing::error!("{e}");
            setting.default_value().clone()
        })
    }

    /// Agent connection timeout in seconds (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn agent_connection_timeout(&self) -> Result<i32, SettingError> {
        self.get(&catalog::AGENT_CONNECTION_TIMEOUT)
    }

    /// HTTP port (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn server_port(&self) -> Result<i32, SettingError> {
        self.get(&catalog::SERVER_PORT)
    }

    /// HTTPS port (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn ssl_server_port(&self) -> Result<i32, SettingError> {
        self.get(&catalog::SSL_SERVER_PORT)
    }

    /// Configuration directory (cached).
    #[must_use]
    pub fn config_dir(&self) -> String {
        self.lenient(&catalog::CONFIG_DIR)
    }

    /// Main configuration file (cached).
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.lenient(&catalog::CONFIG_FILE)
    }

    /// Jetty configuration file inside the configuration directory.
    #[must_use]
    pub fn jetty_config_file(&self) -> PathBuf {
        PathBuf::from(self.config_dir()).join(defaults::JETTY_CONFIG_FILE_NAME)
    }

    /// Free-space limit for the database disk in MB (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not a size.
    pub fn database_disk_space_full_limit(&self) -> Result<i64, SettingError> {
        self.get(&catalog::DATABASE_FULL_SIZE_LIMIT)
    }

    /// Free-space limit for the artifact repository in MB (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not a size.
    pub fn artifact_repository_full_limit(&self) -> Result<i64, SettingError> {
        self.get(&catalog::ARTIFACT_FULL_SIZE_LIMIT)
    }

    /// Configuration history repository.
    #[must_use]
    pub fn config_repo_dir(&self) -> PathBuf {
        self.lenient(&catalog::CONFIG_REPO_DIR)
    }

    /// Idle interval between material updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not a number of milliseconds.
    pub fn material_update_idle_interval(&self) -> Result<Duration, SettingError> {
        self.get(&catalog::MATERIAL_UPDATE_IDLE_INTERVAL)
    }

    /// Database cache size, passed through as a string.
    #[must_use]
    pub fn db_cache_size(&self) -> String {
        self.lenient(&catalog::DB_CACHE_SIZE)
    }

    /// Number of compiled XSL transformers kept in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn xsl_transformer_registry_cache_size(&self) -> Result<i32, SettingError> {
        self.get(&catalog::XSL_TRANSFORMER_REGISTRY_CACHE_SIZE)
    }

    /// Silence after which a job is reported as unresponsive.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not a number of minutes.
    pub fn unresponsive_job_warning_threshold(&self) -> Result<Duration, SettingError> {
        self.get(&catalog::UNRESPONSIVE_JOB_WARNING_THRESHOLD)
    }

    /// Whether the message broker is exposed over JMX.
    #[must_use]
    pub fn activemq_use_jmx(&self) -> bool {
        self.lenient(&catalog::ACTIVEMQ_USE_JMX)
    }

    /// Days before license expiry at which to warn.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn license_expiry_warning_days(&self) -> Result<i32, SettingError> {
        self.get(&catalog::LICENSE_EXPIRY_WARNING_DAYS)
    }

    /// Whether plugins are enabled.
    #[must_use]
    pub fn plugins_enabled(&self) -> bool {
        self.lenient(&catalog::PLUGINS_ENABLED)
    }

    /// Plugin status in `Y`/`N` form.
    #[must_use]
    pub fn plugin_status(&self) -> PluginStatus {
        self.plugins_enabled().into()
    }

    /// Version of the agent launcher; empty when not launched by one.
    #[must_use]
    pub fn agent_launcher_version(&self) -> String {
        self.lenient(&catalog::AGENT_LAUNCHER_VERSION)
    }

    /// Whether fan-in resolution enforces revision compatibility with
    /// upstream pipelines (cached).
    #[must_use]
    pub fn enforce_revision_compatibility_with_upstream(&self) -> bool {
        self.lenient(&catalog::RESOLVE_FANIN_REVISIONS)
    }

    /// Whether concurrent configuration edits are merged (cached).
    #[must_use]
    pub fn config_merge_enabled(&self) -> bool {
        self.lenient(&catalog::ENABLE_CONFIG_MERGE)
    }

    /// TFS socket timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is not an integer.
    pub fn tfs_socket_timeout(&self) -> Result<i32, SettingError> {
        self.get(&catalog::TFS_SOCKET_TIMEOUT)
    }

    /// Class name of the database provider.
    #[must_use]
    pub fn database_provider(&self) -> String {
        self.lenient(&catalog::DATABASE_PROVIDER)
    }

    /// Whether compressed JavaScript is served.
    #[must_use]
    pub fn use_compressed_js(&self) -> bool {
        self.lenient(&catalog::USE_COMPRESSED_JS)
    }

    /// Name of the host operating system.
    #[must_use]
    pub const fn operating_system_name(&self) -> &'static str {
        std::env::consts::OS
    }

    /// Base URL of the HTTP endpoint, e.g. `http://localhost:8153/go`.
    ///
    /// # Errors
    ///
    /// Returns an error if the port property is not an integer.
    pub fn base_url(&self) -> Result<String, SettingError> {
        Ok(format!(
            "http://{}:{}{}",
            defaults::HOSTNAME,
            self.server_port()?,
            defaults::CONTEXT_PATH
        ))
    }

    /// Base URL of the HTTPS endpoint, e.g. `https://localhost:8154/go`.
    ///
    /// # Errors
    ///
    /// Returns an error if the port property is not an integer.
    pub fn base_ssl_url(&self) -> Result<String, SettingError> {
        Ok(format!(
            "https://{}:{}{}",
            defaults::HOSTNAME,
            self.ssl_server_port()?,
            defaults::CONTEXT_PATH
        ))
    }

    /// Prefixes an application path with the context path.
    ///
    /// Leading separators on `suffix` collapse into the join point.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use sysenv::accessor::ConfigurationAccessor;
    /// # use sysenv::source::MemorySource;
    /// let accessor = ConfigurationAccessor::new(Arc::new(MemorySource::new()));
    /// assert_eq!(accessor.path_for("foo/bar"), "/go/foo/bar");
    /// assert_eq!(accessor.path_for("/baz/quux"), "/go/baz/quux");
    /// ```
    #[must_use]
    pub fn path_for(&self, suffix: &str) -> String {
        let suffix = suffix.trim_start_matches('/');
        format!("{}/{suffix}", defaults::CONTEXT_PATH)
    }

    /// Whether every experimental feature is switched on.
    #[must_use]
    pub fn experimental_enable_all(&self) -> bool {
        self.lenient(&catalog::EXPERIMENTAL_ENABLE_ALL)
    }

    /// Whether an experimental feature is on.
    ///
    /// The global `cruise.experimental.enable.all` override wins when true;
    /// otherwise the feature's own flag decides, defaulting to off.
    #[must_use]
    pub fn is_feature_enabled(&self, feature_key: &str) -> bool {
        if self.experimental_enable_all() {
            return true;
        }
        self.lenient(&catalog::feature(feature_key))
    }

    /// Log level for a plugin; `INFO` when unset or unrecognized.
    #[must_use]
    pub fn plugin_logging_level(&self, plugin_id: &str) -> LogLevel {
        self.lenient(&catalog::plugin_log_level(plugin_id))
    }
}
