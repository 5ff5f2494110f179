//! Adapters binding ports to GitHub and the CI runner.

pub mod github_command;
pub mod github_graphql;
pub mod github_output;
pub mod review_query_transport;

pub use github_command::GhCliReviewQuery;
pub use github_graphql::GraphQlReviewQuery;
pub use github_output::GitHubOutputSink;
pub use review_query_transport::ReviewQueryTransport;
