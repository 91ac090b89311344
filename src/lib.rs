//! Core library entry for the `phagelaunch` CLI.
//!
//! Declares the nf-core/phageannotator parameters as a typed manifest,
//! projects caller values onto Nextflow flags, and drives one pipeline run
//! through provisioning, staging, execution, and log upload.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod launch;
pub mod manifest;
pub mod ports;
pub mod telemetry;

use clap::Parser;
use tracing::Level;

use crate::commands::CommandError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns a [`CommandError`] when argument parsing fails or command
/// execution fails. Help and version requests come back as errors with
/// exit code 0.
pub fn run<I, T>(args: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)
        .map_err(|err| CommandError { message: err.to_string(), exit_code: err.exit_code() })?;
    telemetry::init_tracing(cli.log_format, Level::INFO);
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_lists_params() {
        assert!(run(["phagelaunch", "params"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let err = run(["phagelaunch", "unknown"]).unwrap_err();
        assert_eq!(err.exit_code, 2);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = run(["phagelaunch", "--help"]).unwrap_err();
        assert_eq!(err.exit_code, 0);
        assert!(err.message.contains("params"));
    }
}
