//! Configuration domain models loaded from `.github/wfconf.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WfconfConfig {
    /// Pull-request workflow configuration.
    #[serde(default)]
    pub pull_request: PullRequestConfig,
    /// Review-decision query configuration.
    #[serde(default)]
    pub github: GitHubQueryConfig,
}

impl WfconfConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.pull_request.validation.validate()?;
        self.github.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PullRequestConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Image and platform lists for each validation tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    #[serde(default)]
    pub basic: TierConfig,
    #[serde(default)]
    pub full: TierConfig,
    #[serde(default)]
    pub deb: TierConfig,
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.basic.validate("basic")?;
        self.full.validate("full")?;
        self.deb.validate("deb")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    #[serde(default)]
    pub base_images: Vec<String>,
    #[serde(default)]
    pub build_platforms: Vec<String>,
}

impl TierConfig {
    fn validate(&self, tier: &str) -> Result<(), AppError> {
        let entries = self.base_images.iter().map(|v| ("base_images", v));
        let entries = entries.chain(self.build_platforms.iter().map(|v| ("build_platforms", v)));
        for (field, value) in entries {
            if value.trim().is_empty() {
                return Err(AppError::config_error(format!(
                    "pull_request.validation.{tier}.{field} must not contain empty entries"
                )));
            }
        }
        Ok(())
    }
}

/// How the review decision is fetched from GitHub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryTransport {
    /// `gh pr view` through the GitHub CLI.
    #[default]
    Cli,
    /// GitHub GraphQL API over HTTPS.
    Api,
}

impl QueryTransport {
    pub fn label(self) -> &'static str {
        match self {
            QueryTransport::Cli => "cli",
            QueryTransport::Api => "api",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubQueryConfig {
    #[serde(default)]
    pub transport: QueryTransport,
    /// Query timeout in seconds; expiry counts as a failed query.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// GraphQL endpoint used by the `api` transport.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// `owner/name`; falls back to `GITHUB_REPOSITORY`.
    #[serde(default)]
    pub repository: Option<String>,
}

impl Default for GitHubQueryConfig {
    fn default() -> Self {
        Self {
            transport: QueryTransport::default(),
            timeout_secs: default_timeout(),
            api_url: default_api_url(),
            repository: None,
        }
    }
}

impl GitHubQueryConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("github.timeout_secs must be greater than 0"));
        }
        if let Some(repository) = &self.repository {
            if split_repository(repository).is_none() {
                return Err(AppError::config_error(format!(
                    "github.repository must be 'owner/name', got '{repository}'"
                )));
            }
        }
        Ok(())
    }

    /// Configured repository, else `GITHUB_REPOSITORY`.
    pub fn resolve_repository(&self) -> Option<String> {
        self.repository
            .clone()
            .or_else(|| std::env::var("GITHUB_REPOSITORY").ok())
            .filter(|repo| !repo.trim().is_empty())
    }
}

/// Split `owner/name` into its parts.
pub fn split_repository(repository: &str) -> Option<(&str, &str)> {
    let (owner, name) = repository.trim().split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((owner, name))
}

fn default_timeout() -> u64 {
    30
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com/graphql").expect("Default API URL must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tier_lists() {
        let content = r#"
[pull_request.validation.basic]
base_images = ["ubuntu:22.04"]
build_platforms = ["linux/amd64"]

[pull_request.validation.full]
base_images = ["ubuntu:22.04", "ubuntu:24.04"]
build_platforms = ["linux/amd64", "linux/arm64"]
"#;
        let config: WfconfConfig = toml::from_str(content).unwrap();
        config.validate().unwrap();

        let validation = &config.pull_request.validation;
        assert_eq!(validation.basic.base_images, vec!["ubuntu:22.04"]);
        assert_eq!(validation.full.build_platforms, vec!["linux/amd64", "linux/arm64"]);
        assert!(validation.deb.base_images.is_empty());
        assert_eq!(config.github.transport, QueryTransport::Cli);
        assert_eq!(config.github.timeout_secs, 30);
    }

    #[test]
    fn parses_api_transport() {
        let content = r#"
[github]
transport = "api"
timeout_secs = 5
api_url = "https://github.example.com/api/graphql"
repository = "acme/widgets"
"#;
        let config: WfconfConfig = toml::from_str(content).unwrap();
        config.validate().unwrap();
        assert_eq!(config.github.transport, QueryTransport::Api);
        assert_eq!(config.github.api_url.host_str(), Some("github.example.com"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<WfconfConfig, _> = toml::from_str("[pull_request.validation.nightly]\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config: WfconfConfig = toml::from_str("[github]\ntimeout_secs = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn rejects_empty_tier_entries() {
        let content = "[pull_request.validation.deb]\nbase_images = [\"\"]\n";
        let config: WfconfConfig = toml::from_str(content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pull_request.validation.deb.base_images"));
    }

    #[test]
    fn rejects_malformed_repository() {
        let config: WfconfConfig = toml::from_str("[github]\nrepository = \"widgets\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn split_repository_requires_owner_and_name() {
        assert_eq!(split_repository("acme/widgets"), Some(("acme", "widgets")));
        assert_eq!(split_repository("acme/"), None);
        assert_eq!(split_repository("a/b/c"), None);
    }
}
