// reconcile.rs — The reconciliation algorithm.
//
// Check order is load-bearing: a structural conflict invalidates the whole
// attempt and must be detected before any advisory is collected, and the
// emptiness check runs only after missing paths have been dropped.

use std::collections::BTreeSet;

use crate::error::ReconcileError;
use crate::model::{
    ChangeFlags, DeclaredPathSet, ExistenceOracle, Reconciliation, WorkingCopyStatus,
};

/// Reconcile the declared path set against live working-copy state.
///
/// Produces the final commit list plus advisory findings, or refuses:
///
/// 1. A locally changed path outside the declared set that sits under a
///    declared directory is a [`ReconcileError::DirectoryConflict`] — the
///    VCS would sweep it into the commit, and no override can fix that.
/// 2. Other locally changed paths outside the declared set are collected
///    as `unincluded` (a legitimate case: the author chose not to include
///    every local edit in this revision).
/// 3. A declared path is kept if it exists on disk or is a symlink
///    (dangling links still commit), or if the status flags it DELETED
///    (the VCS finalizes the staged deletion). Anything else is recorded
///    as `missing` and dropped.
/// 4. An empty survivor set is [`ReconcileError::EmptyCommit`].
///
/// Paths are only ever removed relative to `declared`, never added.
pub fn reconcile(
    declared: &DeclaredPathSet,
    status: &WorkingCopyStatus,
    oracle: &dyn ExistenceOracle,
) -> Result<Reconciliation, ReconcileError> {
    // Structural conflicts first. Status iterates in sorted order, so the
    // lexicographically first offender is the one reported.
    for (path, _) in status.iter() {
        if declared.contains(path) {
            continue;
        }
        if let Some(directory) = declared.ancestor_of(path) {
            return Err(ReconcileError::DirectoryConflict {
                directory: directory.to_string(),
                descendant: path.to_string(),
            });
        }
    }

    let unincluded: Vec<String> = status
        .iter()
        .filter(|(path, _)| !declared.contains(path))
        .map(|(path, _)| path.to_string())
        .collect();

    let mut final_paths = BTreeSet::new();
    let mut missing = Vec::new();
    for path in declared.iter() {
        if oracle.exists(path) || oracle.is_symlink(path) {
            final_paths.insert(path.to_string());
        } else if status.flags(path).contains(ChangeFlags::DELETED) {
            // Gone from disk, but the deletion is staged: committing the
            // path finalizes it.
            final_paths.insert(path.to_string());
        } else {
            tracing::debug!(path, "declared path missing from working copy, dropping");
            missing.push(path.to_string());
        }
    }

    if final_paths.is_empty() {
        return Err(ReconcileError::EmptyCommit);
    }

    tracing::debug!(
        final_paths = final_paths.len(),
        unincluded = unincluded.len(),
        missing = missing.len(),
        "reconciliation complete"
    );

    Ok(Reconciliation {
        final_paths,
        unincluded,
        missing,
    })
}
