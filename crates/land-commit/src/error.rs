// error.rs — The user-facing failure taxonomy for a commit attempt.

use land_reconcile::{Advisory, ReconcileError};
use land_review::{ReviewError, RevisionId, RevisionRef};
use land_vcs::VcsError;
use thiserror::Error;

/// Every way a commit attempt can end without a commit.
///
/// All variants are fatal for the current invocation. `Aborted` is an
/// expected exit path, not a defect; the rest carry enough detail for the
/// operator to act on.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The service lists nothing committable for this owner.
    #[error("no committable revisions for '{owner}'; a change must be approved before it can be landed")]
    NoCommittableRevisions { owner: String },

    /// An explicitly requested revision is not in the committable set.
    #[error("revision {revision} is not committable for '{owner}'; run `land revisions` to see what is")]
    RevisionNotCommittable { revision: RevisionId, owner: String },

    /// No revision was specified and several are committable; choosing
    /// one is the caller's job.
    #[error("{} revisions are committable; specify which one to land", .candidates.len())]
    RevisionRequired { candidates: Vec<RevisionRef> },

    /// Structural conflict or empty commit from reconciliation.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// The operator declined to proceed past an advisory.
    #[error("aborted at the {advisory} prompt; nothing was committed")]
    Aborted { advisory: Advisory },

    /// Review service call failed; the service's diagnostic is preserved.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// VCS probe, status, or commit failed; the tool's diagnostic is
    /// preserved. No rollback is attempted.
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// The commit itself succeeded but the compensating mark-committed
    /// call did not. The working copy is committed; only the review
    /// service's bookkeeping is stale.
    #[error("revision {revision} was committed, but marking it committed on the review service failed: {source}")]
    MarkCommittedFailed {
        revision: RevisionId,
        source: ReviewError,
    },
}
