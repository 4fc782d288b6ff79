// revisions.rs — List the owner's committable revisions.

use anyhow::Context;
use land_review::{HttpReviewService, ReviewService};

use crate::config::LandConfig;

pub fn execute(config: &LandConfig, owner_flag: Option<&str>) -> anyhow::Result<()> {
    let owner = super::resolve_owner(owner_flag, config)?;
    let service = HttpReviewService::new(&config.review.url)
        .context("building review service client")?;

    let revisions = service
        .committable_revisions(&owner)
        .context("listing committable revisions")?;

    if revisions.is_empty() {
        println!("No committable revisions for {}.", owner);
        return Ok(());
    }

    for rev in &revisions {
        println!(
            "{:>8}  {}  {}",
            rev.id,
            rev.created_at.format("%Y-%m-%d"),
            rev.title
        );
    }
    Ok(())
}
