//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `phagelaunch`.
#[derive(Debug, Parser)]
#[command(
    name = "phagelaunch",
    version,
    about = "Launch the nf-core/phageannotator pipeline on a managed workflow platform"
)]
pub struct Cli {
    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the pipeline's parameters.
    Params {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the pipeline command line without running anything.
    Render {
        /// Parameter values.
        #[command(flatten)]
        values: ValueArgs,
    },
    /// Provision a shared storage volume and print its name.
    Provision {
        /// Volume size in GiB.
        #[arg(long)]
        storage_gib: Option<u32>,
    },
    /// Provision, stage, run the pipeline, and upload its log.
    ///
    /// The log upload needs the platform execution name, taken from
    /// `--execution-name` or `PHAGELAUNCH_EXECUTION_NAME`. Without either the
    /// run still completes but the upload is skipped with a warning.
    Launch {
        /// Parameter values.
        #[command(flatten)]
        values: ValueArgs,
        /// Run in this already provisioned volume.
        #[arg(long)]
        volume: Option<String>,
        /// Execution name used to file the uploaded log.
        ///
        /// Overrides `PHAGELAUNCH_EXECUTION_NAME`. Required for the log upload:
        /// when neither is set the upload is skipped.
        #[arg(long)]
        execution_name: Option<String>,
    },
}

/// Where parameter values come from.
#[derive(Debug, Clone, Default, Args)]
pub struct ValueArgs {
    /// YAML or JSON file mapping parameter names to values.
    #[arg(long, short = 'p', value_name = "FILE")]
    pub params_file: Option<PathBuf>,

    /// Set a parameter, overriding the params file.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Mark a parameter as absent, suppressing its default.
    #[arg(long, value_name = "NAME")]
    pub unset: Vec<String>,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// Newline-delimited JSON.
    Json,
}

/// Output format for `params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table.
    Table,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, LogFormat, OutputFormat};
    use clap::Parser;

    #[test]
    fn parses_params_subcommand() {
        let cli = Cli::parse_from(["phagelaunch", "params", "--format", "json"]);
        assert!(matches!(cli.command, Command::Params { format: OutputFormat::Json }));
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn parses_repeated_overrides() {
        let cli = Cli::parse_from([
            "phagelaunch",
            "render",
            "-p",
            "params.yaml",
            "--set",
            "run_cobra=true",
            "--set",
            "cobra_mink=21",
            "--unset",
            "logo",
        ]);
        let Command::Render { values } = cli.command else { panic!("expected render") };
        assert_eq!(values.params_file.as_deref(), Some(std::path::Path::new("params.yaml")));
        assert_eq!(values.set, ["run_cobra=true", "cobra_mink=21"]);
        assert_eq!(values.unset, ["logo"]);
    }

    #[test]
    fn parses_launch_with_volume() {
        let cli = Cli::parse_from([
            "phagelaunch",
            "--log-format",
            "json",
            "launch",
            "--volume",
            "pvc-1",
            "--execution-name",
            "brave-otter",
        ]);
        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Launch { volume, execution_name, .. } = cli.command else {
            panic!("expected launch")
        };
        assert_eq!(volume.as_deref(), Some("pvc-1"));
        assert_eq!(execution_name.as_deref(), Some("brave-otter"));
    }
}
