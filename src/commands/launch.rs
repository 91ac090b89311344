//! `phagelaunch launch` command.

use crate::cli::ValueArgs;
use crate::config::LaunchConfig;
use crate::context::ServiceContext;
use crate::launch::Launcher;
use crate::manifest::phageannotator;

use super::{current_dir, resolve_request, runtime, CommandError};

/// Execute the `launch` command.
///
/// # Errors
///
/// Returns an error if values are invalid, provisioning fails, or the
/// pipeline exits non-zero; the pipeline's exit code is preserved.
pub fn run(
    values: &ValueArgs,
    volume: Option<&str>,
    execution_name: Option<&str>,
) -> Result<(), CommandError> {
    let mut config = LaunchConfig::from_env()?;
    if let Some(name) = execution_name {
        config.execution_name = Some(name.to_string());
    }

    let manifest = phageannotator();
    let mut request = resolve_request(&manifest, values, &current_dir()?)?;
    if let Some(volume) = volume {
        request = request.with_volume(volume);
    }

    let ctx = ServiceContext::live(&config);
    let launcher = Launcher::new(&ctx, &config, &manifest);
    let report = runtime()?.block_on(launcher.launch(&request))?;

    println!("Pipeline finished in volume {}", report.volume);
    if let Some(destination) = report.finalize.uploaded_to {
        println!("Log uploaded to {destination}");
    }
    Ok(())
}
