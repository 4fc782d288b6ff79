// http.rs — Blocking JSON-over-HTTP implementation of ReviewService.
//
// The wire surface is four endpoints under /api/revisions. Non-2xx
// responses keep the service's own body text so the operator sees the
// real diagnostic, not a generic transport message.

use std::time::Duration;

use land_reconcile::DeclaredPathSet;
use serde::Deserialize;

use crate::service::{Result, ReviewError, ReviewService, RevisionId, RevisionRef};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Review service client over HTTP.
pub struct HttpReviewService {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Body of GET /api/revisions/{id}/paths.
#[derive(Debug, Deserialize)]
struct PathsPayload {
    paths: Vec<String>,
}

impl HttpReviewService {
    /// Create a client for a service base URL (e.g. `https://review.example.com`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map a non-success response to ReviewError::Service, keeping the body.
    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ReviewError::Service {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

impl ReviewService for HttpReviewService {
    fn committable_revisions(&self, owner: &str) -> Result<Vec<RevisionRef>> {
        tracing::debug!(owner, "fetching committable revisions");
        let response = self
            .client
            .get(self.endpoint("api/revisions"))
            .query(&[("owner", owner), ("state", "committable")])
            .send()?;
        let revisions: Vec<RevisionRef> = Self::check(response)?
            .json()
            .map_err(|e| ReviewError::InvalidResponse(e.to_string()))?;
        Ok(revisions)
    }

    fn declared_paths(&self, id: RevisionId) -> Result<DeclaredPathSet> {
        tracing::debug!(%id, "fetching declared path set");
        let response = self
            .client
            .get(self.endpoint(&format!("api/revisions/{}/paths", id)))
            .send()?;
        let payload: PathsPayload = Self::check(response)?
            .json()
            .map_err(|e| ReviewError::InvalidResponse(e.to_string()))?;
        Ok(DeclaredPathSet::new(payload.paths))
    }

    fn commit_message(&self, id: RevisionId) -> Result<String> {
        tracing::debug!(%id, "fetching commit message");
        let response = self
            .client
            .get(self.endpoint(&format!("api/revisions/{}/message", id)))
            .send()?;
        let message = Self::check(response)?.text()?;
        if message.trim().is_empty() {
            return Err(ReviewError::InvalidResponse(format!(
                "revision {} has an empty commit message",
                id
            )));
        }
        Ok(message)
    }

    fn mark_committed(&self, id: RevisionId) -> Result<()> {
        tracing::info!(%id, "marking revision committed");
        let response = self
            .client
            .post(self.endpoint(&format!("api/revisions/{}/committed", id)))
            .send()?;
        Self::check(response)?;
        Ok(())
    }
}
