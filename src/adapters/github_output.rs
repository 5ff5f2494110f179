//! Workflow output sink.
//!
//! Appends `KEY=VALUE` lines to `GITHUB_OUTPUT` when set, then writes compact
//! single-line JSON of all outputs to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::domain::AppError;
use crate::ports::OutputSink;

#[derive(Debug, Clone, Default)]
pub struct GitHubOutputSink {
    output_path: Option<PathBuf>,
    echo_stdout: bool,
}

impl GitHubOutputSink {
    /// Sink bound to `GITHUB_OUTPUT`, echoing to stdout.
    pub fn from_env() -> Self {
        let output_path = std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from);
        Self { output_path, echo_stdout: true }
    }

    /// Sink appending to `path` only.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { output_path: Some(path.into()), echo_stdout: false }
    }

    fn check(outputs: &[(String, String)]) -> Result<(), AppError> {
        for (key, value) in outputs {
            if key.is_empty() || key.contains('=') || key.contains('\n') {
                return Err(AppError::InternalError(format!("Invalid output name '{}'", key)));
            }
            if value.contains('\n') {
                return Err(AppError::InternalError(format!(
                    "Output '{}' must be a single line",
                    key
                )));
            }
        }
        Ok(())
    }
}

impl OutputSink for GitHubOutputSink {
    fn emit(&mut self, outputs: &[(String, String)]) -> Result<(), AppError> {
        Self::check(outputs)?;

        // Single write; stdout is only echoed after it succeeds.
        if let Some(path) = &self.output_path {
            let lines: String =
                outputs.iter().map(|(key, value)| format!("{}={}\n", key, value)).collect();
            let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
                AppError::InternalError(format!("Failed to open GITHUB_OUTPUT: {}", e))
            })?;
            file.write_all(lines.as_bytes()).map_err(|e| {
                AppError::InternalError(format!("Failed to write GITHUB_OUTPUT: {}", e))
            })?;
        }

        if self.echo_stdout {
            let map: Map<String, Value> =
                outputs.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect();
            let json = serde_json::to_string(&map).map_err(|e| {
                AppError::InternalError(format!("Failed to serialize workflow output: {}", e))
            })?;
            println!("{}", json);
        }

        Ok(())
    }
}
