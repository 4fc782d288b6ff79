//! # land-reconcile
//!
//! Path-set reconciliation for landing reviewed changes.
//!
//! The review service declares which paths belong to a revision; the local
//! working copy may have drifted (extra edits, deleted files, half-applied
//! changes). [`reconcile`] compares the two and produces the final file list
//! that is safe to hand to the VCS — or refuses with a reason the operator
//! can act on.
//!
//! ## Key components
//!
//! - [`DeclaredPathSet`] — the authoritative path list for one revision.
//! - [`WorkingCopyStatus`] — per-path change flags, a snapshot taken once
//!   per commit attempt.
//! - [`ExistenceOracle`] — injected read-only filesystem queries, so the
//!   algorithm itself stays pure and deterministic under test.
//! - [`reconcile`] — the algorithm: conflict check, then advisory
//!   collection, then missing-path filtering, then the emptiness check.
//! - [`DecisionPolicy`] — how advisories become proceed/abort decisions.
//!   The reconciler never calls it; the commit flow mediates.

pub mod error;
pub mod model;
pub mod policy;
pub mod reconcile;

pub use error::ReconcileError;
pub use model::{ChangeFlags, DeclaredPathSet, ExistenceOracle, Reconciliation, WorkingCopyStatus};
pub use policy::{advisory_prompt, AbortAll, Advisory, Decision, DecisionPolicy, ProceedAll};
pub use reconcile::reconcile;
