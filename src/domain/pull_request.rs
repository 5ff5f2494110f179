//! Pull-request event model and webhook payload parsing.
//!
//! Missing or mistyped payload fields resolve to empty/false/zero defaults.
//! Only unreadable inputs (missing env, I/O, invalid JSON) are errors.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::domain::AppError;

/// GitHub Actions event that triggered the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventName {
    PullRequest,
    PullRequestReview,
    Other(String),
}

impl EventName {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "pull_request" => EventName::PullRequest,
            "pull_request_review" => EventName::PullRequestReview,
            other => EventName::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventName::PullRequest => "pull_request",
            EventName::PullRequestReview => "pull_request_review",
            EventName::Other(name) => name,
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Webhook `action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestAction {
    Opened,
    Synchronize,
    ReadyForReview,
    Submitted,
    Other(String),
}

impl PullRequestAction {
    pub fn parse(action: &str) -> Self {
        match action.trim() {
            "opened" => PullRequestAction::Opened,
            "synchronize" => PullRequestAction::Synchronize,
            "ready_for_review" => PullRequestAction::ReadyForReview,
            "submitted" => PullRequestAction::Submitted,
            other => PullRequestAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PullRequestAction::Opened => "opened",
            PullRequestAction::Synchronize => "synchronize",
            PullRequestAction::ReadyForReview => "ready_for_review",
            PullRequestAction::Submitted => "submitted",
            PullRequestAction::Other(action) => action,
        }
    }
}

impl fmt::Display for PullRequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the review carried by a `pull_request_review` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Other(String),
}

impl ReviewState {
    /// Case-insensitive: webhooks send `approved`, some tooling sends `APPROVED`.
    pub fn parse(state: &str) -> Self {
        let state = state.trim();
        match state.to_ascii_lowercase().as_str() {
            "approved" => ReviewState::Approved,
            "changes_requested" => ReviewState::ChangesRequested,
            "commented" => ReviewState::Commented,
            "dismissed" => ReviewState::Dismissed,
            _ => ReviewState::Other(state.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReviewState::Approved => "approved",
            ReviewState::ChangesRequested => "changes_requested",
            ReviewState::Commented => "commented",
            ReviewState::Dismissed => "dismissed",
            ReviewState::Other(state) => state,
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the event that triggered a pull-request workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub event_name: EventName,
    pub action: PullRequestAction,
    pub is_draft: bool,
    pub pr_number: u64,
    /// Only populated for `pull_request_review` events.
    pub review_state: Option<ReviewState>,
}

impl PullRequestEvent {
    /// Build an event from a webhook payload.
    pub fn from_payload(event_name: &str, payload: &Value) -> Self {
        let event_name = EventName::parse(event_name);
        let pull_request = &payload["pull_request"];

        let review_state = match event_name {
            EventName::PullRequestReview => payload["review"]["state"]
                .as_str()
                .filter(|state| !state.trim().is_empty())
                .map(ReviewState::parse),
            _ => None,
        };

        Self {
            action: PullRequestAction::parse(payload["action"].as_str().unwrap_or("")),
            is_draft: pull_request["draft"].as_bool().unwrap_or(false),
            pr_number: pull_request["number"].as_u64().unwrap_or(0),
            event_name,
            review_state,
        }
    }

    /// Read the event payload file and parse it.
    pub fn from_event_file(event_name: &str, path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let payload: Value = serde_json::from_str(&content).map_err(|e| AppError::ParseError {
            what: format!("event payload {}", path.display()),
            details: e.to_string(),
        })?;
        Ok(Self::from_payload(event_name, &payload))
    }

    /// Build the event from `GITHUB_EVENT_NAME` and `GITHUB_EVENT_PATH`.
    pub fn from_env() -> Result<Self, AppError> {
        let event_name = std::env::var("GITHUB_EVENT_NAME")
            .map_err(|_| AppError::MissingEnv("GITHUB_EVENT_NAME"))?;
        let event_path = std::env::var("GITHUB_EVENT_PATH")
            .map_err(|_| AppError::MissingEnv("GITHUB_EVENT_PATH"))?;
        Self::from_event_file(&event_name, Path::new(&event_path))
    }

    /// Whether this event is a submitted review with state `approved`.
    pub fn is_approving_review(&self) -> bool {
        self.event_name == EventName::PullRequestReview
            && self.review_state == Some(ReviewState::Approved)
    }
}
