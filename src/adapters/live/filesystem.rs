//! Live filesystem adapter using `std::fs`.

use std::fs;
use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy_tree(
        &self,
        source: &Path,
        target: &Path,
        ignore: &[String],
    ) -> Result<u64, PortError> {
        fs::create_dir_all(target)
            .map_err(|e| format!("Failed to create {}: {e}", target.display()))?;

        let mut copied = 0;
        for entry in fs::read_dir(source)
            .map_err(|e| format!("Failed to read {}: {e}", source.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();
            if ignore.iter().any(|skip| name.to_str() == Some(skip.as_str())) {
                continue;
            }

            let from = entry.path();
            let to = target.join(&name);
            // `metadata` follows symlinks; a dangling link fails here and is skipped.
            let Ok(meta) = fs::metadata(&from) else {
                continue;
            };

            if meta.is_dir() {
                copied += self.copy_tree(&from, &to, ignore)?;
            } else {
                fs::copy(&from, &to).map_err(|e| {
                    format!("Failed to copy {} to {}: {e}", from.display(), to.display())
                })?;
                copied += 1;
            }
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn copies_nested_files() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("modules/local")).unwrap();
        fs::write(src.path().join("main.nf"), "workflow {}").unwrap();
        fs::write(src.path().join("modules/local/qc.nf"), "process QC {}").unwrap();

        let copied = LiveFileSystem.copy_tree(src.path(), dst.path(), &[]).unwrap();

        assert_eq!(copied, 2);
        let qc = fs::read_to_string(dst.path().join("modules/local/qc.nf")).unwrap();
        assert_eq!(qc, "process QC {}");
    }

    #[test]
    fn skips_ignored_names_at_every_depth() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("work")).unwrap();
        fs::create_dir_all(src.path().join("assets/results")).unwrap();
        fs::write(src.path().join("work/cache"), "x").unwrap();
        fs::write(src.path().join("assets/results/old.txt"), "x").unwrap();
        fs::write(src.path().join("assets/logo.png"), "x").unwrap();

        LiveFileSystem.copy_tree(src.path(), dst.path(), &ignore(&["work", "results"])).unwrap();

        assert!(!dst.path().join("work").exists());
        assert!(!dst.path().join("assets/results").exists());
        assert!(dst.path().join("assets/logo.png").exists());
    }

    #[test]
    fn merges_into_existing_target() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("main.nf"), "new").unwrap();
        fs::write(dst.path().join("main.nf"), "old").unwrap();
        fs::write(dst.path().join("keep.txt"), "kept").unwrap();

        LiveFileSystem.copy_tree(src.path(), dst.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(dst.path().join("main.nf")).unwrap(), "new");
        assert!(dst.path().join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_symlinks() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(src.path().join("missing"), src.path().join("broken")).unwrap();

        let copied = LiveFileSystem.copy_tree(src.path(), dst.path(), &[]).unwrap();

        assert_eq!(copied, 0);
        assert!(!dst.path().join("broken").exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let dst = tempfile::tempdir().unwrap();
        let result = LiveFileSystem.copy_tree(&dst.path().join("nope"), dst.path(), &[]);
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }
}
