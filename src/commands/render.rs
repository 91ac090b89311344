//! `phagelaunch render` command.

use crate::cli::ValueArgs;
use crate::config::LaunchConfig;
use crate::launch::build_command;
use crate::manifest::phageannotator;

use super::{current_dir, resolve_request, CommandError};

/// Execute the `render` command: print the pipeline command line.
///
/// # Errors
///
/// Returns an error if configuration or parameter values are invalid.
pub fn run(values: &ValueArgs) -> Result<(), CommandError> {
    let config = LaunchConfig::from_env()?;
    let manifest = phageannotator();
    let request = resolve_request(&manifest, values, &current_dir()?)?;
    println!("{}", build_command(&config, &manifest, &request).join(" "));
    Ok(())
}
