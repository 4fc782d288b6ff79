// error.rs — Error types for the VCS subsystem.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from working-copy inspection and commit invocation.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The VCS process could not be started or its output read.
    #[error("I/O error running VCS command: {0}")]
    Io(#[from] std::io::Error),

    /// The VCS process ran and exited non-zero. `stderr` carries the
    /// tool's own diagnostic; it is surfaced verbatim and never retried.
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The directory is not a working copy this backend can operate on.
    #[error("'{root}' is not a Subversion working copy (no .svn directory){hint}", root = .root.display())]
    UnsupportedWorkingCopy { root: PathBuf, hint: String },

    /// A status line did not match the expected column layout.
    #[error("unrecognized svn status line: '{line}'")]
    StatusParse { line: String },
}
