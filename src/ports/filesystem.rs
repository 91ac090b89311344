//! Filesystem port for staging and log discovery.

use std::path::Path;

use super::PortError;

/// Provides the filesystem operations the launcher needs.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively copies `source` into `target`, merging into existing
    /// directories.
    ///
    /// Entries whose file name appears in `ignore` are skipped at every
    /// depth, as are dangling symlinks. Returns the number of files copied.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read or a copy fails.
    fn copy_tree(&self, source: &Path, target: &Path, ignore: &[String])
        -> Result<u64, PortError>;
}
