//! `phagelaunch provision` command.

use crate::config::LaunchConfig;
use crate::context::ServiceContext;
use crate::error::LaunchError;
use crate::launch::Launcher;
use crate::manifest::phageannotator;

use super::{runtime, CommandError};

/// Execute the `provision` command and print the volume name.
///
/// # Errors
///
/// Returns an error if the execution token is missing or provisioning fails.
pub fn run(storage_gib: Option<u32>) -> Result<(), CommandError> {
    let config = LaunchConfig::from_env()?;
    let ctx = ServiceContext::live(&config);
    let manifest = phageannotator();
    let launcher = Launcher::new(&ctx, &config, &manifest);

    let size = storage_gib.unwrap_or(config.storage_gib);
    let volume = runtime()?
        .block_on(launcher.provision_volume(size))
        .map_err(LaunchError::from)?;
    println!("{volume}");
    Ok(())
}
