//! Review-decision lookup through the GitHub GraphQL API using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::config::split_repository;
use crate::domain::{AppError, GitHubQueryConfig, ReviewDecision};
use crate::ports::ReviewQuery;

const REVIEW_DECISION_QUERY: &str = "query($owner: String!, $name: String!, $number: Int!) { \
     repository(owner: $owner, name: $name) { pullRequest(number: $number) { reviewDecision } } }";

/// HTTP client for the GitHub GraphQL API.
#[derive(Clone)]
pub struct GraphQlReviewQuery {
    token: String,
    api_url: Url,
    owner: String,
    name: String,
    client: Client,
}

impl std::fmt::Debug for GraphQlReviewQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlReviewQuery")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GraphQlReviewQuery {
    pub fn new(
        token: String,
        repository: &str,
        config: &GitHubQueryConfig,
    ) -> Result<Self, AppError> {
        let (owner, name) = split_repository(repository).ok_or_else(|| {
            AppError::config_error(format!("repository must be 'owner/name', got '{repository}'"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token,
            api_url: config.api_url.clone(),
            owner: owner.to_string(),
            name: name.to_string(),
            client,
        })
    }

    /// Create from `GH_TOKEN`/`GITHUB_TOKEN` and the configured or ambient repository.
    pub fn from_env(config: &GitHubQueryConfig) -> Result<Self, AppError> {
        let token = std::env::var("GH_TOKEN")
            .or_else(|_| std::env::var("GITHUB_TOKEN"))
            .map_err(|_| AppError::MissingEnv("GITHUB_TOKEN"))?;
        let repository =
            config.resolve_repository().ok_or(AppError::MissingEnv("GITHUB_REPOSITORY"))?;

        Self::new(token, &repository, config)
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    owner: &'a str,
    name: &'a str,
    number: u64,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequest {
    review_decision: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl ReviewQuery for GraphQlReviewQuery {
    fn review_decision(&self, pr_number: u64) -> Result<ReviewDecision, AppError> {
        let request = GraphQlRequest {
            query: REVIEW_DECISION_QUERY,
            variables: Variables { owner: &self.owner, name: &self.name, number: pr_number },
        };

        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(USER_AGENT, concat!("wfconf/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .map_err(|e| AppError::review_query(pr_number, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::review_query(
                pr_number,
                format!("API error ({}): {}", status.as_u16(), error_text.trim()),
            ));
        }

        let body: GraphQlResponse = response.json().map_err(|e| {
            AppError::review_query(pr_number, format!("Failed to parse response: {}", e))
        })?;

        if !body.errors.is_empty() {
            let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(AppError::review_query(pr_number, messages.join("; ")));
        }

        let pull_request = body
            .data
            .and_then(|data| data.repository)
            .and_then(|repository| repository.pull_request)
            .ok_or_else(|| {
                AppError::review_query(
                    pr_number,
                    format!("pull request not found in {}/{}", self.owner, self.name),
                )
            })?;

        Ok(ReviewDecision::from_github(pull_request.review_decision.as_deref().unwrap_or("")))
    }
}
