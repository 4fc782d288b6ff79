// oracle.rs — Filesystem-backed existence oracle for a working copy.

use std::fs;
use std::path::PathBuf;

use land_reconcile::ExistenceOracle;

/// Existence queries rooted at the working-copy root.
///
/// `symlink_metadata` is used throughout so that a dangling symbolic link
/// still counts as present — `Path::exists()` would follow the link and
/// report the missing target instead of the link itself.
pub struct WorkingCopyOracle {
    root: PathBuf,
}

impl WorkingCopyOracle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ExistenceOracle for WorkingCopyOracle {
    fn exists(&self, path: &str) -> bool {
        fs::symlink_metadata(self.root.join(path)).is_ok()
    }

    fn is_symlink(&self, path: &str) -> bool {
        fs::symlink_metadata(self.root.join(path))
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }
}
