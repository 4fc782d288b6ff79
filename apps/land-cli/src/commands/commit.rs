// commit.rs — The `land commit` subcommand.
//
// Composition only: collaborators are built from config, the flow does
// the work, and the one interactive detour (choosing among several
// committable revisions) loops back into the flow with the choice made.

use std::path::Path;

use anyhow::Context;
use land_commit::{CommitError, CommitFlow, CommitOutcome};
use land_reconcile::{DecisionPolicy, ProceedAll};
use land_review::{HttpReviewService, RevisionId};
use land_vcs::SvnClient;

use crate::config::LandConfig;
use crate::prompt::{self, PromptPolicy};

pub fn execute(
    root: &Path,
    config: &LandConfig,
    owner_flag: Option<&str>,
    revision: Option<u64>,
    yes: bool,
) -> anyhow::Result<()> {
    let owner = super::resolve_owner(owner_flag, config)?;
    tracing::debug!(%owner, root = %root.display(), "starting commit attempt");
    let service = HttpReviewService::new(&config.review.url)
        .context("building review service client")?;
    let vcs = SvnClient::new()
        .with_binary(&config.vcs.svn_binary)
        .with_locale(&config.vcs.locale);

    let mut requested = revision.map(RevisionId);
    loop {
        let mut interactive = PromptPolicy;
        let mut assent = ProceedAll;
        let policy: &mut dyn DecisionPolicy = if yes { &mut assent } else { &mut interactive };

        let run = CommitFlow::new(&service, &vcs, policy, root)
            .mark_committed_after(!config.review.server_hooks)
            .run(requested, &owner);

        match run {
            Ok(outcome) => {
                report(&outcome);
                return Ok(());
            }
            Err(CommitError::RevisionRequired { candidates }) => {
                if yes {
                    anyhow::bail!(
                        "{} revisions are committable; --yes needs an explicit revision",
                        candidates.len()
                    );
                }
                requested = Some(prompt::select_revision(&candidates)?);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn report(outcome: &CommitOutcome) {
    println!(
        "Committed revision {} ({} file{}).",
        outcome.revision,
        outcome.committed_paths.len(),
        if outcome.committed_paths.len() == 1 { "" } else { "s" }
    );
    if outcome.marked_committed {
        println!("Marked committed on the review service.");
    }
}
