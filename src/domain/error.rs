use std::io;

use thiserror::Error;

/// Library-wide error type for wfconf operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// Configuration file not found at the given path.
    #[error("Configuration not found: {0}")]
    ConfigMissing(String),

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// The code host could not report the review decision of a pull request.
    #[error("Review decision query failed for PR #{pr_number}: {details}")]
    ReviewQuery { pr_number: u64, details: String },

    /// Internal invariant violated.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError { what: "JSON".into(), details: err.to_string() }
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }

    pub(crate) fn review_query<S: Into<String>>(pr_number: u64, details: S) -> Self {
        AppError::ReviewQuery { pr_number, details: details.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::ParseError { .. } => io::ErrorKind::InvalidInput,
            AppError::MissingEnv(_) | AppError::ConfigMissing(_) => io::ErrorKind::NotFound,
            AppError::ReviewQuery { .. } | AppError::InternalError(_) => io::ErrorKind::Other,
        }
    }
}
