// error.rs — Error types for reconciliation.

use thiserror::Error;

/// Errors that make a commit attempt structurally impossible.
///
/// Both variants are fatal: no advisory decision can convert either one
/// into a proceed-path. Presentation is left to the caller.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The declared set includes a directory while an excluded descendant
    /// has local changes. Committing the directory would sweep the
    /// descendant in, so the whole attempt is refused.
    #[error("cannot commit directory '{directory}': '{descendant}' has local changes but is not part of the reviewed change; commit or revert '{descendant}' first")]
    DirectoryConflict {
        directory: String,
        descendant: String,
    },

    /// Every declared path was dropped during reconciliation.
    #[error("nothing left to commit: no declared path survived reconciliation")]
    EmptyCommit,
}
