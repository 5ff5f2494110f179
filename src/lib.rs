//! wfconf: decide which pull-request validation tiers a CI workflow should run.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::{GitHubOutputSink, ReviewQueryTransport};

pub use app::commands::pull_request::{EventSource, PullRequestConfiguration, PullRequestOptions};
pub use domain::{
    AppError, DecisionReason, EventName, PullRequestAction, PullRequestEvent, QueryTransport,
    ReviewDecision, ReviewState, ValidationDecision, WfconfConfig, decide,
};
pub use ports::{OutputSink, ReviewQuery};

/// Default location of the configuration file, relative to the repository root.
pub const DEFAULT_CONFIG_PATH: &str = ".github/wfconf.toml";

/// Configure a pull-request workflow run.
///
/// Loads the configuration at `config_path`, resolves the triggering event,
/// queries the review decision only when the event alone cannot answer,
/// and publishes the resulting outputs through `GITHUB_OUTPUT` and stdout.
pub fn configure_pull_request(
    config_path: &Path,
    event: EventSource,
    transport: Option<QueryTransport>,
) -> Result<PullRequestConfiguration, AppError> {
    let mut config = app::config::load_config(config_path)?;
    if let Some(transport) = transport {
        config.github.transport = transport;
    }

    let query = ReviewQueryTransport::new(config.github);
    let mut sink = GitHubOutputSink::from_env();
    let options = PullRequestOptions { event, validation: config.pull_request.validation };

    app::commands::pull_request::configure(options, &query, &mut sink)
}
