//! # land-vcs
//!
//! The VCS side of landing a change: working-copy status snapshots and the
//! final commit invocation, realized by shelling out to the `svn` binary.
//!
//! The commit flow only sees the [`Vcs`] trait, so tests run against mocks
//! and no `svn` installation is needed outside production use. Status
//! parsing is a pure function over captured `svn status` output.

pub mod error;
pub mod oracle;
pub mod status;
pub mod svn;

use std::path::Path;

use land_reconcile::WorkingCopyStatus;

pub use error::VcsError;
pub use oracle::WorkingCopyOracle;
pub use status::parse_status;
pub use svn::SvnClient;

pub type Result<T> = std::result::Result<T, VcsError>;

/// Status and commit operations against one working copy.
pub trait Vcs {
    /// Refuse early if `root` is not a working copy this backend handles.
    fn ensure_working_copy(&self, root: &Path) -> Result<()>;

    /// Snapshot the working copy's per-path change flags.
    fn status(&self, root: &Path) -> Result<WorkingCopyStatus>;

    /// Commit exactly `paths` with `message`. A non-zero exit from the
    /// underlying tool is an error carrying its diagnostic output; nothing
    /// is rolled back (the commit is treated as atomic by the caller).
    fn commit(&self, root: &Path, paths: &[String], message: &str) -> Result<()>;
}
