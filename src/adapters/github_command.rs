use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::{AppError, ReviewDecision};
use crate::ports::ReviewQuery;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Review-decision lookup through `gh pr view`.
#[derive(Debug, Clone)]
pub struct GhCliReviewQuery {
    program: PathBuf,
    repository: Option<String>,
    timeout: Duration,
}

impl GhCliReviewQuery {
    pub fn new(repository: Option<String>, timeout: Duration) -> Self {
        Self { program: PathBuf::from("gh"), repository, timeout }
    }

    /// Use a different `gh` executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    fn args(&self, pr_number: u64) -> Vec<String> {
        let mut args = vec![
            "pr".to_string(),
            "view".to_string(),
            pr_number.to_string(),
            "--json".to_string(),
            "reviewDecision".to_string(),
            "--jq".to_string(),
            ".reviewDecision".to_string(),
        ];
        if let Some(repository) = &self.repository {
            args.push("--repo".to_string());
            args.push(repository.clone());
        }
        args
    }

    fn run_gh(&self, pr_number: u64) -> Result<String, AppError> {
        let mut child = Command::new(&self.program)
            .args(self.args(pr_number))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::review_query(pr_number, format!("Failed to execute gh CLI: {}", e))
            })?;

        // Drain both pipes while waiting so a chatty gh cannot block on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_with_deadline(&mut child, self.timeout).map_err(|e| {
            AppError::review_query(pr_number, format!("Failed to wait for gh CLI: {}", e))
        })?;

        let Some(status) = status else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::review_query(
                pr_number,
                format!("gh CLI timed out after {:?}", self.timeout),
            ));
        };

        let stdout = collect(stdout);
        if !status.success() {
            let stderr = collect(stderr);
            return Err(AppError::review_query(
                pr_number,
                format!("gh command failed ({}): {}", status, stderr.trim()),
            ));
        }

        Ok(stdout.trim().to_string())
    }
}

impl ReviewQuery for GhCliReviewQuery {
    fn review_decision(&self, pr_number: u64) -> Result<ReviewDecision, AppError> {
        let output = self.run_gh(pr_number)?;
        Ok(ReviewDecision::from_github(&output))
    }
}

/// Poll `child` until it exits or `timeout` elapses. `None` means it is still running.
fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader.and_then(|handle| handle.join().ok()).unwrap_or_default()
}
