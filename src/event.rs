//! Pull request event payload parsing.
//!
//! The triggering infrastructure delivers the event as a JSON document on
//! disk and points at it with the `GITHUB_EVENT_PATH` environment variable.
//! Everything the run needs from that payload is captured once in an
//! immutable [`PullRequestContext`] and passed into the components that
//! need it.
use serde::Deserialize;
use std::fs;

use crate::error::{LabelsaurusError, Result};

#[derive(Debug, Deserialize)]
struct BranchRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
    title: String,
    base: BranchRef,
    head: BranchRef,
}

#[derive(Debug, Deserialize)]
struct EventRepositoryOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct EventRepository {
    name: String,
    owner: EventRepositoryOwner,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
    repository: EventRepository,
}

/// Read-only snapshot of the triggering pull request event.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
    /// Pull request title.
    pub title: String,
    /// Branch the pull request targets.
    pub base_branch: String,
    /// Branch the pull request is made from.
    pub head_ref: String,
}

impl PullRequestContext {
    /// Parse an event payload document into a context snapshot.
    ///
    /// Fails if the payload does not describe a pull request event.
    pub fn from_payload(raw: &str) -> Result<Self> {
        let payload: EventPayload = serde_json::from_str(raw)?;

        let pr = payload.pull_request.ok_or_else(|| {
            LabelsaurusError::NotPullRequest(
                "payload doesn't contain 'pull_request': attach this \
                 automation only on pull requests"
                    .into(),
            )
        })?;

        Ok(Self {
            owner: payload.repository.owner.login,
            repo: payload.repository.name,
            number: pr.number,
            title: pr.title,
            base_branch: pr.base.name,
            head_ref: pr.head.name,
        })
    }

    /// Load the event payload from a file on disk.
    pub fn from_event_file(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_payload(&raw)
    }
}
