//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sysenv: typed system environment settings
///
/// Resolves well-known settings against a properties file and
/// command-line definitions, with per-setting caching rules.
#[derive(Debug, Parser)]
#[command(name = "sysenv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML properties file
    #[arg(long, short, global = true)]
    pub properties: Option<PathBuf>,

    /// Define a property in the source, as an external writer would (can be specified multiple times)
    #[arg(short = 'D', value_name = "K=V", global = true)]
    pub define: Vec<String>,

    /// Write a property through the accessor, pinning its value (can be specified multiple times)
    #[arg(long = "set", value_name = "K=V", global = true)]
    pub set: Vec<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for sysenv
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and print every well-known setting
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve one setting by property key
    Get {
        /// Property key, e.g. `cruise.server.port`
        key: String,
    },

    /// Report whether an experimental feature is enabled
    Feature {
        /// Feature name, without the `cruise.experimental.feature.` prefix
        name: String,
    },

    /// Print an application path prefixed with the context path
    Path {
        /// Path below the context path
        suffix: String,
    },

    /// Print the log level configured for a plugin
    PluginLevel {
        /// Plugin identifier
        id: String,
    },

    /// Generate a properties file template
    Init {
        /// Output path for the properties file
        #[arg(long, short, default_value = "sysenv.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
