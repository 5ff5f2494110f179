use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{AppError, ReviewDecision};
use crate::ports::ReviewQuery;

/// Review query with a canned answer that records how it was called.
pub struct FakeReviewQuery {
    answer: Option<ReviewDecision>,
    calls: AtomicUsize,
    last_pr: Mutex<Option<u64>>,
}

impl FakeReviewQuery {
    pub fn returning(decision: ReviewDecision) -> Self {
        Self { answer: Some(decision), calls: AtomicUsize::new(0), last_pr: Mutex::new(None) }
    }

    /// Fails every lookup, as an unreachable API would.
    pub fn failing() -> Self {
        Self { answer: None, calls: AtomicUsize::new(0), last_pr: Mutex::new(None) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_pr(&self) -> Option<u64> {
        *self.last_pr.lock().unwrap()
    }
}

impl ReviewQuery for FakeReviewQuery {
    fn review_decision(&self, pr_number: u64) -> Result<ReviewDecision, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_pr.lock().unwrap() = Some(pr_number);
        self.answer.ok_or_else(|| AppError::review_query(pr_number, "simulated API outage"))
    }
}
