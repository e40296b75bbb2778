//! Command execution.
//!
//! This module builds the property source and accessor from the CLI
//! options and runs a single command against them.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use sysenv::accessor::ConfigurationAccessor;
use sysenv::cli::{Cli, Command};
use sysenv::error::{SettingError, SourceError};
use sysenv::setting::catalog::{self, CatalogEntry};
use sysenv::setting::defaults::FEATURE_PREFIX;
use sysenv::source::{
    MemorySource, PropertiesFile, PropertySource, parse_definition, write_default_properties,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The property source could not be prepared.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A setting holds or was offered a malformed value.
    #[error(transparent)]
    Setting(#[from] SettingError),

    /// `get` named a key that is neither well-known nor present in the source.
    #[error("Unknown property '{key}'")]
    UnknownKey {
        /// The requested key
        key: String,
    },

    /// `show` listed every setting but some failed to resolve.
    #[error("{count} setting(s) could not be resolved")]
    Unresolved {
        /// Number of settings that failed
        count: usize,
    },

    /// Failed to write command output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Failed to encode JSON output.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunError {
    /// Returns true if the failure came from resolving a setting value
    /// rather than from preparing the configuration.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Setting(_) | Self::Unresolved { .. })
    }
}

/// One row of `show --json`.
#[derive(Debug, Serialize)]
struct ShowEntry {
    key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    policy: String,
    description: &'static str,
}

impl ShowEntry {
    fn resolve(entry: &'static dyn CatalogEntry, accessor: &ConfigurationAccessor) -> Self {
        let (value, error) = match entry.resolve(accessor) {
            Ok(value) => (Some(value.to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            key: entry.key(),
            value,
            error,
            policy: entry.policy().to_string(),
            description: entry.description(),
        }
    }
}

/// Executes the parsed command, writing its result to `out`.
///
/// # Errors
///
/// Returns an error if:
/// - The properties file cannot be loaded, or a `K=V` option is malformed
/// - A `--set` value or a resolved setting is rejected by its parser
/// - `get` names an unknown, absent key
/// - Writing the output fails
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<(), RunError> {
    if let Command::Init { output } = &cli.command {
        return init(output, out);
    }

    let accessor = build_accessor(cli)?;

    match &cli.command {
        Command::Show { json } => show(&accessor, *json, out),
        Command::Get { key } => get(&accessor, key, out),
        Command::Feature { name } => {
            let state = if accessor.is_feature_enabled(&catalog::feature_key(name)) {
                "enabled"
            } else {
                "disabled"
            };
            writeln!(out, "{state}")?;
            Ok(())
        }
        Command::Path { suffix } => {
            writeln!(out, "{}", accessor.path_for(suffix))?;
            Ok(())
        }
        Command::PluginLevel { id } => {
            writeln!(out, "{}", accessor.plugin_logging_level(id))?;
            Ok(())
        }
        Command::Init { .. } => Ok(()),
    }
}

fn init<W: Write>(output: &Path, out: &mut W) -> Result<(), RunError> {
    write_default_properties(output)?;
    writeln!(out, "Properties template written to: {}", output.display())?;
    Ok(())
}

/// Loads the properties file (if any) and applies `-D` definitions.
///
/// Definitions are plain source writes, exactly as an external writer
/// would make them.
fn build_source(cli: &Cli) -> Result<Arc<MemorySource>, RunError> {
    let source = match &cli.properties {
        Some(path) => PropertiesFile::load(path)?,
        None => MemorySource::new(),
    };

    for definition in &cli.define {
        let (key, value) = parse_definition(definition)?;
        source.set(&key, &value);
    }

    Ok(Arc::new(source))
}

/// Creates the accessor and applies `--set` writes through it.
fn build_accessor(cli: &Cli) -> Result<ConfigurationAccessor, RunError> {
    let accessor = ConfigurationAccessor::new(build_source(cli)?);

    for definition in &cli.set {
        let (key, value) = parse_definition(definition)?;
        accessor.set_raw(&key, &value)?;
    }

    tracing::debug!("{accessor:?}");
    Ok(accessor)
}

fn show<W: Write>(accessor: &ConfigurationAccessor, json: bool, out: &mut W) -> Result<(), RunError> {
    let entries: Vec<ShowEntry> = catalog::entries()
        .into_iter()
        .map(|entry| ShowEntry::resolve(entry, accessor))
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
    } else {
        let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
        for entry in &entries {
            match (&entry.value, &entry.error) {
                (Some(value), _) => {
                    writeln!(out, "{:<width$} = {value} ({})", entry.key, entry.policy)?;
                }
                (None, error) => {
                    let error = error.as_deref().unwrap_or_default();
                    writeln!(out, "{:<width$} ! {error}", entry.key)?;
                }
            }
        }
    }

    match entries.iter().filter(|e| e.error.is_some()).count() {
        0 => Ok(()),
        count => Err(RunError::Unresolved { count }),
    }
}

/// Resolves a single key.
///
/// Well-known keys, plugin log level keys and feature keys resolve through
/// their settings, with feature keys honoring the enable-all override; any
/// other key prints the raw source value.
fn get<W: Write>(accessor: &ConfigurationAccessor, key: &str, out: &mut W) -> Result<(), RunError> {
    if let Some(entry) = catalog::find(key) {
        writeln!(out, "{}", entry.resolve(accessor)?)?;
    } else if let Some(plugin_id) = catalog::plugin_id_from_key(key) {
        writeln!(out, "{}", accessor.plugin_logging_level(plugin_id))?;
    } else if key.starts_with(FEATURE_PREFIX) {
        writeln!(out, "{}", accessor.is_feature_enabled(key))?;
    } else {
        let raw = accessor
            .source()
            .get(key)
            .ok_or_else(|| RunError::UnknownKey {
                key: key.to_string(),
            })?;
        writeln!(out, "{raw}")?;
    }
    Ok(())
}
