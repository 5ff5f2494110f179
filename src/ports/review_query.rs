use crate::domain::{AppError, ReviewDecision};

/// Lookup of a pull request's aggregate review decision on the code host.
pub trait ReviewQuery {
    /// Current review decision for `pr_number`.
    ///
    /// Transport failures, timeouts and malformed responses are errors;
    /// implementations must not map them to a decision.
    fn review_decision(&self, pr_number: u64) -> Result<ReviewDecision, AppError>;
}
