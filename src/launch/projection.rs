//! Flag projection: turning typed values into command-line tokens.

use crate::config::LaunchConfig;
use crate::manifest::{Manifest, ParamSpec, ParamValue};

use super::request::LaunchRequest;

/// Projects one parameter onto zero or more command-line tokens.
///
/// Absent values and `false` booleans emit nothing, `true` emits the bare
/// flag, and everything else emits `--name value`. The declared default is
/// never consulted: a value equal to its default is still emitted.
#[must_use]
pub fn project_to_flags(spec: &ParamSpec, value: Option<&ParamValue>) -> Vec<String> {
    let flag = format!("--{}", spec.name);
    match value {
        None | Some(ParamValue::Bool(false)) => Vec::new(),
        Some(ParamValue::Bool(true)) => vec![flag],
        Some(value) => vec![flag, value.render()],
    }
}

/// Builds the complete pipeline command: the fixed Nextflow prefix followed
/// by every projected parameter in manifest order.
#[must_use]
pub fn build_command(
    config: &LaunchConfig,
    manifest: &Manifest,
    request: &LaunchRequest,
) -> Vec<String> {
    let shared = &config.shared_dir;
    let mut argv = vec![
        config.nextflow_bin.display().to_string(),
        "run".to_string(),
        shared.join(&config.entry_script).display().to_string(),
        "-work-dir".to_string(),
        shared.display().to_string(),
        "-profile".to_string(),
        config.profile.clone(),
        "-c".to_string(),
        config.config_file.clone(),
    ];
    for spec in manifest {
        argv.extend(project_to_flags(spec, request.get(spec.name)));
    }
    argv
}
