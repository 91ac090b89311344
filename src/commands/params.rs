//! `phagelaunch params` command.

use std::fmt::Write as _;

use crate::cli::OutputFormat;
use crate::manifest::{phageannotator, Manifest};

use super::CommandError;

/// Execute the `params` command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be serialized.
pub fn run(format: OutputFormat) -> Result<(), CommandError> {
    println!("{}", render(&phageannotator(), format)?);
    Ok(())
}

/// Renders the manifest in the requested format.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn render(manifest: &Manifest, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(manifest)
            .map_err(|e| format!("Failed to serialize manifest: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(manifest)
            .map_err(|e| format!("Failed to serialize manifest: {e}")),
        OutputFormat::Table => Ok(table(manifest)),
    }
}

fn table(manifest: &Manifest) -> String {
    let width = manifest.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for section in manifest.sections() {
        if let Some(title) = section.title {
            let _ = writeln!(out, "\n{title}");
        }
        for spec in section.params {
            let default = spec.default.as_ref().map(|d| format!(" [default: {}]", d.render()));
            let _ = writeln!(
                out,
                "  {:width$}  {:18}  {}{}",
                spec.name,
                spec.ty.describe(),
                spec.description.unwrap_or(""),
                default.unwrap_or_default(),
            );
        }
    }
    out.trim_start_matches('\n').trim_end().to_string()
}
