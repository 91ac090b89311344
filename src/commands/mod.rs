//! Command dispatch and handlers.

pub mod launch;
pub mod params;
pub mod provision;
pub mod render;

use std::fmt;
use std::path::Path;

use tokio::runtime::Runtime;

use crate::cli::{Command, ValueArgs};
use crate::error::LaunchError;
use crate::launch::{LaunchRequest, RawValues};
use crate::manifest::Manifest;

/// A failed command: the message to print and the exit code to leave with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    /// Human-readable failure.
    pub message: String,
    /// Process exit code.
    pub exit_code: i32,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self { message, exit_code: 1 }
    }
}

impl From<LaunchError> for CommandError {
    fn from(err: LaunchError) -> Self {
        Self { exit_code: err.exit_code(), message: err.to_string() }
    }
}

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns a [`CommandError`] if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), CommandError> {
    match command {
        Command::Params { format } => params::run(*format),
        Command::Render { values } => render::run(values),
        Command::Provision { storage_gib } => provision::run(*storage_gib),
        Command::Launch { values, volume, execution_name } => {
            launch::run(values, volume.as_deref(), execution_name.as_deref())
        }
    }
}

/// Collects raw values from the params file and the `--set`/`--unset` overrides.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or an override is malformed.
pub fn collect_values(args: &ValueArgs) -> Result<RawValues, String> {
    let mut raw = match &args.params_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read params file {}: {e}", path.display()))?;
            RawValues::from_yaml(&text)?
        }
        None => RawValues::new(),
    };
    for assignment in &args.set {
        raw.assign(assignment).map_err(|e| e.to_string())?;
    }
    for name in &args.unset {
        raw.unset(name.as_str());
    }
    Ok(raw)
}

/// Resolves CLI value arguments into a launch request.
///
/// Relative file references resolve against `base_dir`.
///
/// # Errors
///
/// Returns an error string if values cannot be collected or resolved.
pub fn resolve_request(
    manifest: &Manifest,
    args: &ValueArgs,
    base_dir: &Path,
) -> Result<LaunchRequest, String> {
    let raw = collect_values(args)?;
    LaunchRequest::resolve(manifest, &raw, base_dir).map_err(|e| e.to_string())
}

fn current_dir() -> Result<std::path::PathBuf, String> {
    std::env::current_dir().map_err(|e| format!("Failed to read working directory: {e}"))
}

fn runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{phageannotator, ParamValue};

    #[test]
    fn overrides_win_over_the_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("params.yaml");
        std::fs::write(&file, "input: s.csv\noutdir: /out\ngenomad_splits: 8\nemail: a@b.org\n")
            .unwrap();
        let args = ValueArgs {
            params_file: Some(file),
            set: vec!["genomad_splits=2".into()],
            unset: vec!["email".into()],
        };

        let request = resolve_request(&phageannotator(), &args, dir.path()).unwrap();

        assert_eq!(request.get("genomad_splits"), Some(&ParamValue::Int(2)));
        assert_eq!(request.get("email"), None);
    }

    #[test]
    fn missing_params_file_is_reported() {
        let args = ValueArgs {
            params_file: Some("/no/such/params.yaml".into()),
            ..ValueArgs::default()
        };
        let err = collect_values(&args).unwrap_err();
        assert!(err.contains("Failed to read params file"));
    }

    #[test]
    fn launch_errors_keep_the_pipeline_exit_code() {
        let err = CommandError::from(LaunchError::PipelineFailed { exit_code: 137 });
        assert_eq!(err.exit_code, 137);
    }
}
