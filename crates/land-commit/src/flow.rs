// flow.rs — Start-to-finish orchestration of one commit attempt.

use std::path::Path;

use land_reconcile::{reconcile, Advisory, Decision, DecisionPolicy};
use land_review::{ReviewService, RevisionId};
use land_vcs::{Vcs, WorkingCopyOracle};

use crate::error::CommitError;

/// What a successful attempt committed.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub revision: RevisionId,
    /// Sorted final path list, exactly what the VCS was given.
    pub committed_paths: Vec<String>,
    /// Whether the mark-committed compensation ran.
    pub marked_committed: bool,
}

/// One commit attempt over borrowed collaborators.
///
/// Construct fresh per attempt; nothing is cached across invocations.
pub struct CommitFlow<'a> {
    review: &'a dyn ReviewService,
    vcs: &'a dyn Vcs,
    policy: &'a mut dyn DecisionPolicy,
    root: &'a Path,
    mark_committed_after: bool,
}

impl<'a> CommitFlow<'a> {
    pub fn new(
        review: &'a dyn ReviewService,
        vcs: &'a dyn Vcs,
        policy: &'a mut dyn DecisionPolicy,
        root: &'a Path,
    ) -> Self {
        Self {
            review,
            vcs,
            policy,
            root,
            mark_committed_after: false,
        }
    }

    /// Run the mark-committed compensation after a successful commit.
    /// Set when the working copy's configuration says the repository has
    /// no server-side commit hooks to do it automatically.
    pub fn mark_committed_after(mut self, enabled: bool) -> Self {
        self.mark_committed_after = enabled;
        self
    }

    /// Land `revision` (or the sole committable revision when `None`).
    pub fn run(
        &mut self,
        revision: Option<RevisionId>,
        owner: &str,
    ) -> Result<CommitOutcome, CommitError> {
        let candidates = self.review.committable_revisions(owner)?;
        if candidates.is_empty() {
            return Err(CommitError::NoCommittableRevisions {
                owner: owner.to_string(),
            });
        }

        let revision = match revision {
            Some(id) => {
                if !candidates.iter().any(|r| r.id == id) {
                    return Err(CommitError::RevisionNotCommittable {
                        revision: id,
                        owner: owner.to_string(),
                    });
                }
                id
            }
            None if candidates.len() == 1 => candidates[0].id,
            None => return Err(CommitError::RevisionRequired { candidates }),
        };
        tracing::info!(%revision, owner, "landing revision");

        let declared = self.review.declared_paths(revision)?;
        let message = self.review.commit_message(revision)?;

        self.vcs.ensure_working_copy(self.root)?;
        let status = self.vcs.status(self.root)?;
        let oracle = WorkingCopyOracle::new(self.root);

        let reconciliation = reconcile(&declared, &status, &oracle)?;

        // Fixed advisory order: unincluded modifications, then missing
        // paths. An abort ends the attempt before anything is mutated.
        let advisories = [
            (Advisory::UnincludedModifications, &reconciliation.unincluded),
            (Advisory::MissingPaths, &reconciliation.missing),
        ];
        for (advisory, paths) in advisories {
            if paths.is_empty() {
                continue;
            }
            if self.policy.decide(advisory, paths) == Decision::Abort {
                tracing::info!(%advisory, "operator aborted");
                return Err(CommitError::Aborted { advisory });
            }
        }

        let committed_paths: Vec<String> = reconciliation.final_paths.iter().cloned().collect();
        self.vcs.commit(self.root, &committed_paths, &message)?;
        tracing::info!(%revision, paths = committed_paths.len(), "committed");

        let marked_committed = if self.mark_committed_after {
            self.review
                .mark_committed(revision)
                .map_err(|source| CommitError::MarkCommittedFailed { revision, source })?;
            true
        } else {
            false
        };

        Ok(CommitOutcome {
            revision,
            committed_paths,
            marked_committed,
        })
    }
}
