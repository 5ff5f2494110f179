//! Pull-request command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::app::commands::pull_request::EventSource;
use crate::domain::{
    AppError, EventName, PullRequestAction, PullRequestEvent, QueryTransport, ReviewState,
};

#[derive(Args, Debug)]
pub struct PullRequestArgs {
    /// Configuration file
    #[arg(short = 'c', long, default_value = crate::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Event name (default: GITHUB_EVENT_NAME)
    #[arg(long)]
    event_name: Option<String>,
    /// Event payload file (default: GITHUB_EVENT_PATH)
    #[arg(long, requires = "event_name", conflicts_with_all = ["action", "draft", "pr_number", "review_state"])]
    event_path: Option<PathBuf>,
    /// Webhook action (opened, synchronize, ready_for_review, submitted)
    #[arg(long, requires = "event_name")]
    action: Option<String>,
    /// The pull request is a draft
    #[arg(long, requires = "event_name")]
    draft: bool,
    /// Pull request number
    #[arg(long, requires = "event_name")]
    pr_number: Option<u64>,
    /// Review state of a pull_request_review event
    #[arg(long, requires = "event_name")]
    review_state: Option<String>,
    /// Review decision transport override (cli, api)
    #[arg(long, value_parser = ["cli", "api"])]
    transport: Option<String>,
}

impl PullRequestArgs {
    fn event_source(&self) -> EventSource {
        let Some(event_name) = &self.event_name else {
            return EventSource::Env;
        };

        if let Some(path) = &self.event_path {
            return EventSource::File { event_name: event_name.clone(), path: path.clone() };
        }

        let event_name = EventName::parse(event_name);
        let review_state = match event_name {
            EventName::PullRequestReview => {
                self.review_state.as_deref().filter(|s| !s.trim().is_empty()).map(ReviewState::parse)
            }
            _ => None,
        };

        EventSource::Explicit(PullRequestEvent {
            event_name,
            action: PullRequestAction::parse(self.action.as_deref().unwrap_or("")),
            is_draft: self.draft,
            pr_number: self.pr_number.unwrap_or(0),
            review_state,
        })
    }

    fn transport(&self) -> Option<QueryTransport> {
        self.transport.as_deref().map(|t| match t {
            "api" => QueryTransport::Api,
            _ => QueryTransport::Cli,
        })
    }
}

pub fn run_pull_request(args: PullRequestArgs) -> Result<(), AppError> {
    crate::configure_pull_request(&args.config, args.event_source(), args.transport())?;
    Ok(())
}
