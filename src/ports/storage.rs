//! Object store port for uploading run artifacts.

use std::path::Path;

use super::PortError;

/// Uploads local files to remote storage.
pub trait ObjectStore: Send + Sync {
    /// Uploads `local` to the remote location `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination scheme is unsupported or the
    /// upload fails.
    fn upload(&self, local: &Path, destination: &str) -> Result<(), PortError>;
}
