//! sysenv: typed system environment settings
//!
//! Entry point for the sysenv application.

use std::process::ExitCode;

use sysenv::cli::Cli;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::RunError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    match run::execute(&cli, &mut stdout) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let RunError::Source(source) = &e {
                print_config_hint(source);
            }
            if e.is_resolution() {
                exit_code::resolution_error()
            } else {
                exit_code::CONFIG_ERROR
            }
        }
    }
}
