// mod.rs — Subcommand implementations.

pub mod commit;
pub mod revisions;

use crate::config::LandConfig;

/// Owner resolution: --owner wins, then [review].owner from config.
pub fn resolve_owner(flag: Option<&str>, config: &LandConfig) -> anyhow::Result<String> {
    flag.map(str::to_string)
        .or_else(|| config.review.owner.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no owner configured; pass --owner or set [review].owner in .land/config.toml")
        })
}
