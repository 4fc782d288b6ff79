//! Core ReviewService trait and revision types

use std::fmt;

use chrono::{DateTime, Utc};
use land_reconcile::DeclaredPathSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the review service boundary.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The request never produced a usable response (connection refused,
    /// DNS, timeout, TLS).
    #[error("review service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status. The body is kept
    /// so the operator sees the service's own diagnostic.
    #[error("review service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// The response arrived but could not be decoded.
    #[error("unexpected review service response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Identifier of one reviewed revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(pub u64);

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RevisionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(RevisionId)
    }
}

/// Summary of a committable revision, as listed by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionRef {
    pub id: RevisionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// The review service surface this tool consumes.
///
/// All calls are blocking and may fail with a transport or service error
/// that the commit flow surfaces verbatim.
pub trait ReviewService {
    /// Revisions the owner may commit, in the service's order.
    fn committable_revisions(&self, owner: &str) -> Result<Vec<RevisionRef>>;

    /// The authoritative path set for a revision.
    fn declared_paths(&self, id: RevisionId) -> Result<DeclaredPathSet>;

    /// The rendered commit message for a revision. UTF-8.
    fn commit_message(&self, id: RevisionId) -> Result<String>;

    /// Record the revision as committed. Compensating call for
    /// installations whose repository has no server-side commit hooks.
    fn mark_committed(&self, id: RevisionId) -> Result<()>;
}
