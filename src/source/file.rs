//! Properties file loading.
//!
//! Properties files are TOML documents whose nested tables flatten into
//! dotted keys, so both of these define `cruise.server.port`:
//!
//! ```toml
//! "cruise.server.port" = 8153
//!
//! [cruise.server]
//! port = 8153
//! ```

use std::path::Path;

use toml::{Table, Value};

use crate::error::SourceError;

use super::MemorySource;

/// Loader for TOML properties files.
#[derive(Debug, Clone, Copy)]
pub struct PropertiesFile;

impl PropertiesFile {
    /// Loads a properties file into a new [`MemorySource`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML,
    /// or holds values with no property representation.
    pub fn load(path: &Path) -> Result<MemorySource, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let source = Self::parse(&content)?;
        tracing::debug!(
            "Loaded {} properties from {}",
            source.len(),
            path.display()
        );
        Ok(source)
    }

    /// Parses properties from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or contains arrays or datetimes.
    pub fn parse(content: &str) -> Result<MemorySource, SourceError> {
        let table: Table = toml::from_str(content)?;
        let mut properties = Vec::new();
        flatten_into("", &table, &mut properties)?;
        Ok(properties.into_iter().collect())
    }
}

fn flatten_into(
    prefix: &str,
    table: &Table,
    out: &mut Vec<(String, String)>,
) -> Result<(), SourceError> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        match value {
            Value::Table(nested) => flatten_into(&key, nested, out)?,
            Value::String(s) => out.push((key, s.clone())),
            Value::Integer(i) => out.push((key, i.to_string())),
            Value::Float(f) => out.push((key, f.to_string())),
            Value::Boolean(b) => out.push((key, b.to_string())),
            Value::Array(_) => {
                return Err(SourceError::UnsupportedValue { key, kind: "array" });
            }
            Value::Datetime(_) => {
                return Err(SourceError::UnsupportedValue {
                    key,
                    kind: "datetime",
                });
            }
        }
    }
    Ok(())
}

/// Writes the default properties template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_properties(path: &Path) -> Result<(), SourceError> {
    std::fs::write(path, default_properties_template()).map_err(|e| SourceError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Generates a default properties file with comments.
#[must_use]
pub fn default_properties_template() -> String {
    r#"# sysenv properties file
#
# Nested tables flatten into dotted property keys. Every key is optional;
# absent keys resolve to the built-in default shown in the comment.
# Values marked (cached) are fixed at first read for the lifetime of the process.

[cruise.server]
# HTTP port (cached, default: 8153)
# port = 8153

# HTTPS port (cached, default: 8154)
# "ssl.port" = 8154

[cruise.config]
# Configuration directory (cached, default: "config")
# dir = "config"

# Configuration repository directory (default: "db/config.git")
# "repo.dir" = "db/config.git"

[db]
# Free-space limit for the database disk, in MB; accepts M, G or T suffix (cached, default: 100)
# "full.limit" = "100"

[artifact]
# Free-space limit for the artifact repository, in MB (cached, default: 100)
# "full.limit" = "100"

[plugins]
# Enable plugins: "Y" or "N" (default: "N")
# enabled = "N"

[cruise.experimental]
# Turn on every experimental feature (default: false)
# "enable.all" = false

# Per-plugin log level: TRACE, DEBUG, INFO, WARN or ERROR (default: INFO)
# [plugin.my-plugin.log]
# level = "DEBUG"
"#
    .to_string()
}
