//! # land-review
//!
//! Client side of the remote review service.
//!
//! The review service owns the truth about what a revision is allowed to
//! touch. This crate consumes exactly four calls: which revisions are
//! committable for an owner, a revision's declared path set, its rendered
//! commit message, and the mark-committed acknowledgement used by
//! installations without server-side commit hooks.
//!
//! [`ReviewService`] is the seam; [`HttpReviewService`] is the JSON-over-HTTP
//! implementation. Transport and service failures surface verbatim and are
//! never retried — a commit must not be attempted twice without the operator
//! noticing.

pub mod http;
pub mod service;

pub use http::HttpReviewService;
pub use service::{ReviewError, ReviewService, RevisionId, RevisionRef};
