//! # land-commit
//!
//! The commit flow: everything between "land revision N" and the working
//! copy actually being committed.
//!
//! [`CommitFlow`] composes the collaborators — review service, VCS,
//! reconciler, decision policy — and owns the ordering guarantees: the
//! revision is resolved and validated first, reconciliation runs on a
//! fresh status snapshot, advisories are put to the policy in fixed order,
//! and only then does the single mutating step (the VCS commit) happen.
//! Nothing is rolled back because nothing was mutated before that point.
//!
//! [`CommitError`] is the complete user-facing failure taxonomy; every
//! variant is terminal for the current attempt and none are retried.

pub mod error;
pub mod flow;

pub use error::CommitError;
pub use flow::{CommitFlow, CommitOutcome};
