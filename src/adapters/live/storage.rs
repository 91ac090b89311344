//! Live adapter for the `ObjectStore` port.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::ports::storage::ObjectStore;
use crate::ports::PortError;

/// Uploads artifacts according to the destination's scheme.
///
/// `latch://` destinations go through the `latch cp` CLI shipped in the
/// runtime image; `file://` and bare paths are plain filesystem copies.
pub struct LiveObjectStore {
    latch_bin: PathBuf,
}

impl LiveObjectStore {
    /// Creates a store that invokes `latch` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self { latch_bin: PathBuf::from("latch") }
    }

    /// Creates a store that invokes the given `latch` binary.
    #[must_use]
    pub fn with_latch_bin(latch_bin: impl Into<PathBuf>) -> Self {
        Self { latch_bin: latch_bin.into() }
    }

    fn copy_local(local: &Path, target: &Path) -> Result<(), PortError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(local, target)?;
        Ok(())
    }
}

impl Default for LiveObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for LiveObjectStore {
    fn upload(&self, local: &Path, destination: &str) -> Result<(), PortError> {
        if destination.starts_with("latch://") {
            let output =
                Command::new(&self.latch_bin).arg("cp").arg(local).arg(destination).output()?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!("latch cp failed: {}", stderr.trim()).into());
            }
            return Ok(());
        }

        if let Some(path) = destination.strip_prefix("file://") {
            return Self::copy_local(local, Path::new(path));
        }

        if destination.contains("://") {
            return Err(format!("Unsupported upload destination: {destination}").into());
        }

        Self::copy_local(local, Path::new(destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_to_plain_paths() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(".nextflow.log");
        fs::write(&local, "log line").unwrap();
        let target = dir.path().join("logs/run-1/nextflow.log");

        LiveObjectStore::new().upload(&local, target.to_str().unwrap()).unwrap();

        assert_eq!(fs::read_to_string(target).unwrap(), "log line");
    }

    #[test]
    fn copies_to_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.log");
        fs::write(&local, "x").unwrap();
        let target = dir.path().join("out/nextflow.log");

        LiveObjectStore::new().upload(&local, &format!("file://{}", target.display())).unwrap();

        assert!(target.exists());
    }

    #[test]
    fn rejects_unknown_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.log");
        fs::write(&local, "x").unwrap();

        let err = LiveObjectStore::new().upload(&local, "gopher://host/x").unwrap_err();
        assert!(err.to_string().contains("Unsupported upload destination"));
    }

    #[test]
    fn missing_latch_cli_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.log");
        fs::write(&local, "x").unwrap();

        let store = LiveObjectStore::with_latch_bin("/definitely/not/latch");
        assert!(store.upload(&local, "latch:///logs/nextflow.log").is_err());
    }
}
