use std::time::Duration;

use crate::adapters::{GhCliReviewQuery, GraphQlReviewQuery};
use crate::domain::{AppError, GitHubQueryConfig, QueryTransport, ReviewDecision};
use crate::ports::ReviewQuery;

/// Review query selected by `github.transport`.
///
/// The underlying client is built on first use, so credentials are only
/// required when an event actually needs a lookup.
#[derive(Debug, Clone)]
pub struct ReviewQueryTransport {
    config: GitHubQueryConfig,
}

impl ReviewQueryTransport {
    pub fn new(config: GitHubQueryConfig) -> Self {
        Self { config }
    }

    fn connect(&self) -> Result<Box<dyn ReviewQuery>, AppError> {
        match self.config.transport {
            QueryTransport::Cli => Ok(Box::new(GhCliReviewQuery::new(
                self.config.resolve_repository(),
                Duration::from_secs(self.config.timeout_secs),
            ))),
            QueryTransport::Api => Ok(Box::new(GraphQlReviewQuery::from_env(&self.config)?)),
        }
    }
}

impl ReviewQuery for ReviewQueryTransport {
    fn review_decision(&self, pr_number: u64) -> Result<ReviewDecision, AppError> {
        self.connect()?.review_decision(pr_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn api_config() -> GitHubQueryConfig {
        GitHubQueryConfig {
            transport: QueryTransport::Api,
            repository: Some("acme/widgets".into()),
            ..GitHubQueryConfig::default()
        }
    }

    #[test]
    fn cli_transport_needs_no_token() {
        let config = GitHubQueryConfig {
            repository: Some("acme/widgets".into()),
            ..GitHubQueryConfig::default()
        };
        assert!(ReviewQueryTransport::new(config).connect().is_ok());
    }

    #[test]
    #[serial]
    fn api_transport_requires_token_when_queried() {
        // SAFETY: serialized with other environment tests
        unsafe {
            std::env::remove_var("GH_TOKEN");
            std::env::remove_var("GITHUB_TOKEN");
        }
        let transport = ReviewQueryTransport::new(api_config());
        let err = transport.review_decision(5).unwrap_err();
        assert!(matches!(err, AppError::MissingEnv("GITHUB_TOKEN")));
    }

    #[test]
    #[serial]
    fn api_transport_uses_github_token() {
        // SAFETY: serialized with other environment tests
        unsafe {
            std::env::remove_var("GH_TOKEN");
            std::env::set_var("GITHUB_TOKEN", "token");
        }
        let connected = ReviewQueryTransport::new(api_config()).connect();
        unsafe {
            std::env::remove_var("GITHUB_TOKEN");
        }
        assert!(connected.is_ok());
    }
}
