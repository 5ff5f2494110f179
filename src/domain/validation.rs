//! Validation tier selection for pull-request workflow runs.
//!
//! Three tiers exist: `basic` (minimal image/platform set), `full` (broader
//! matrix) and `deb` (packaging). The decision depends only on the event and,
//! for PRs leaving draft, on one review-decision lookup.

use std::fmt;

use crate::domain::{AppError, EventName, PullRequestAction, PullRequestEvent, ReviewState};
use crate::ports::ReviewQuery;

/// Aggregate review decision reported by the code host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approved,
    NotApproved,
    Unknown,
}

impl ReviewDecision {
    /// Map GitHub's `reviewDecision` field.
    ///
    /// `null` or an empty string means the repository has no review policy.
    pub fn from_github(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => ReviewDecision::Approved,
            "CHANGES_REQUESTED" | "REVIEW_REQUIRED" => ReviewDecision::NotApproved,
            _ => ReviewDecision::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::NotApproved => "not_approved",
            ReviewDecision::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which branch of the selection produced a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionReason {
    /// An approving review was submitted.
    ReviewApproved { draft: bool },
    /// A non-draft PR was opened or received new commits.
    PullRequestUpdated { action: PullRequestAction },
    /// A PR left draft; carries the review decision looked up for it.
    ReadyForReview { review: ReviewDecision },
    /// Any update to a draft PR.
    DraftUpdate,
    /// A non-draft `pull_request` action that requests nothing.
    UnhandledAction { action: PullRequestAction },
    /// A submitted review that is not an approval; `None` when the payload had no state.
    ReviewNotApproved { state: Option<ReviewState> },
    /// Event that is neither a review nor a pull-request update.
    UnhandledEvent { event: EventName },
}

impl DecisionReason {
    /// Stable identifier for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            DecisionReason::ReviewApproved { .. } => "review_approved",
            DecisionReason::PullRequestUpdated { .. } => "pull_request_updated",
            DecisionReason::ReadyForReview { .. } => "ready_for_review",
            DecisionReason::DraftUpdate => "draft_update",
            DecisionReason::UnhandledAction { .. } => "unhandled_action",
            DecisionReason::ReviewNotApproved { .. } => "review_not_approved",
            DecisionReason::UnhandledEvent { .. } => "unhandled_event",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::ReviewApproved { draft: false } => write!(f, "reviewed and approved"),
            DecisionReason::ReviewApproved { draft: true } => {
                write!(f, "reviewed and approved (still in draft)")
            }
            DecisionReason::PullRequestUpdated { action } => write!(f, "updated ({action})"),
            DecisionReason::ReadyForReview { review } => {
                write!(f, "ready for review (review decision: {review})")
            }
            DecisionReason::DraftUpdate => write!(f, "draft updated, validation deferred"),
            DecisionReason::UnhandledAction { action } => {
                write!(f, "action '{action}' requests no validation")
            }
            DecisionReason::ReviewNotApproved { state: Some(state) } => {
                write!(f, "review '{state}' requests no validation")
            }
            DecisionReason::ReviewNotApproved { state: None } => {
                write!(f, "review without a state requests no validation")
            }
            DecisionReason::UnhandledEvent { event } => {
                write!(f, "event '{event}' requests no validation")
            }
        }
    }
}

/// Tiers to run for one workflow invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDecision {
    pub run_basic: bool,
    pub run_full: bool,
    pub run_deb: bool,
    pub reason: DecisionReason,
}

impl ValidationDecision {
    fn none(reason: DecisionReason) -> Self {
        Self { run_basic: false, run_full: false, run_deb: false, reason }
    }

    /// One-line account of the decision for CI logs.
    pub fn summary(&self, pr_number: u64) -> String {
        format!(
            "PR {} {}: basic={}, full={}, deb={}",
            pr_number, self.reason, self.run_basic, self.run_full, self.run_deb
        )
    }
}

/// Decide which validation tiers to run for `event`.
///
/// `query` is consulted at most once, and only when a non-draft PR leaves
/// draft: the event payload does not carry the aggregate review decision.
/// A failed lookup is returned as an error rather than guessed.
pub fn decide(
    event: &PullRequestEvent,
    query: &(impl ReviewQuery + ?Sized),
) -> Result<ValidationDecision, AppError> {
    if event.is_approving_review() {
        // A draft approval still gets basic validation: full runs again once it leaves draft.
        return Ok(ValidationDecision {
            run_basic: event.is_draft,
            run_full: true,
            run_deb: true,
            reason: DecisionReason::ReviewApproved { draft: event.is_draft },
        });
    }

    if event.event_name == EventName::PullRequestReview {
        return Ok(ValidationDecision::none(DecisionReason::ReviewNotApproved {
            state: event.review_state.clone(),
        }));
    }

    if event.event_name != EventName::PullRequest {
        return Ok(ValidationDecision::none(DecisionReason::UnhandledEvent {
            event: event.event_name.clone(),
        }));
    }

    if event.is_draft {
        return Ok(ValidationDecision::none(DecisionReason::DraftUpdate));
    }

    match &event.action {
        PullRequestAction::Opened | PullRequestAction::Synchronize => Ok(ValidationDecision {
            run_basic: true,
            run_full: false,
            run_deb: false,
            reason: DecisionReason::PullRequestUpdated { action: event.action.clone() },
        }),
        PullRequestAction::ReadyForReview => {
            // Approval while in draft already ran basic validation.
            let review = query.review_decision(event.pr_number)?;
            Ok(ValidationDecision {
                run_basic: review != ReviewDecision::Approved,
                run_full: false,
                run_deb: false,
                reason: DecisionReason::ReadyForReview { review },
            })
        }
        action => Ok(ValidationDecision::none(DecisionReason::UnhandledAction {
            action: action.clone(),
        })),
    }
}
