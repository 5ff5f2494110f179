//! `pull-request` command implementation.
//!
//! Resolves the triggering event, decides the validation tiers and publishes
//! the decision together with each tier's image/platform lists.

use std::path::PathBuf;

use tracing::{error, info};

use crate::domain::{
    AppError, PullRequestEvent, TierConfig, ValidationConfig, ValidationDecision, decide,
};
use crate::ports::{OutputSink, ReviewQuery};

/// Where the triggering event comes from.
#[derive(Debug, Clone)]
pub enum EventSource {
    /// `GITHUB_EVENT_NAME` and the payload at `GITHUB_EVENT_PATH`.
    Env,
    /// Explicit event name and payload file.
    File { event_name: String, path: PathBuf },
    /// Event already assembled by the caller.
    Explicit(PullRequestEvent),
}

impl EventSource {
    pub fn resolve(self) -> Result<PullRequestEvent, AppError> {
        match self {
            EventSource::Env => PullRequestEvent::from_env(),
            EventSource::File { event_name, path } => {
                PullRequestEvent::from_event_file(&event_name, &path)
            }
            EventSource::Explicit(event) => Ok(event),
        }
    }
}

/// Options for `pull-request`.
#[derive(Debug, Clone)]
pub struct PullRequestOptions {
    pub event: EventSource,
    pub validation: ValidationConfig,
}

/// Result of `pull-request`.
#[derive(Debug, Clone)]
pub struct PullRequestConfiguration {
    pub event: PullRequestEvent,
    pub decision: ValidationDecision,
    /// Outputs in the order they were emitted.
    pub outputs: Vec<(String, String)>,
}

impl PullRequestConfiguration {
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Execute `pull-request`.
///
/// Nothing is emitted when the decision fails.
pub fn configure(
    options: PullRequestOptions,
    query: &(impl ReviewQuery + ?Sized),
    sink: &mut impl OutputSink,
) -> Result<PullRequestConfiguration, AppError> {
    let event = options.event.resolve()?;

    info!(
        pr = event.pr_number,
        draft = event.is_draft,
        event_name = %event.event_name,
        action = %event.action,
        review = event.review_state.as_ref().map(|s| s.as_str()).unwrap_or(""),
        "Configuring PR job"
    );

    let decision = decide(&event, query).inspect_err(|e| {
        error!(pr = event.pr_number, error = %e, "Cannot decide validation tiers");
    })?;

    info!(
        pr = event.pr_number,
        basic = decision.run_basic,
        full = decision.run_full,
        deb = decision.run_deb,
        reason = decision.reason.code(),
        "{}",
        decision.summary(event.pr_number)
    );

    let outputs = build_outputs(&decision, &options.validation)?;
    sink.emit(&outputs)?;

    Ok(PullRequestConfiguration { event, decision, outputs })
}

fn build_outputs(
    decision: &ValidationDecision,
    validation: &ValidationConfig,
) -> Result<Vec<(String, String)>, AppError> {
    let mut outputs = Vec::with_capacity(9);
    for (prefix, tier) in
        [("BASIC", &validation.basic), ("DEB", &validation.deb), ("FULL", &validation.full)]
    {
        push_tier(&mut outputs, prefix, tier)?;
    }
    outputs.push(("VALIDATE_FULL".to_string(), decision.run_full.to_string()));
    outputs.push(("VALIDATE_DEB".to_string(), decision.run_deb.to_string()));
    outputs.push(("VALIDATE_BASIC".to_string(), decision.run_basic.to_string()));
    Ok(outputs)
}

fn push_tier(
    outputs: &mut Vec<(String, String)>,
    prefix: &str,
    tier: &TierConfig,
) -> Result<(), AppError> {
    outputs.push((
        format!("{prefix}_VALIDATION_BASE_IMAGES"),
        serde_json::to_string(&tier.base_images)?,
    ));
    outputs.push((
        format!("{prefix}_VALIDATION_BUILD_PLATFORMS"),
        serde_json::to_string(&tier.build_platforms)?,
    ));
    Ok(())
}
