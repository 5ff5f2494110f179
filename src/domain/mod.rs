pub mod config;
pub mod error;
pub mod pull_request;
pub mod validation;

pub use config::{
    GitHubQueryConfig, PullRequestConfig, QueryTransport, TierConfig, ValidationConfig,
    WfconfConfig,
};
pub use error::AppError;
pub use pull_request::{EventName, PullRequestAction, PullRequestEvent, ReviewState};
pub use validation::{DecisionReason, ReviewDecision, ValidationDecision, decide};
