//! Sequential batch execution
//!
//! Drives one submission per input file, strictly one in flight at a time, and
//! collects a per-file outcome without ever aborting the batch on an
//! individual failure. Result order always matches input order.

use super::request::UploadRequest;
use crate::document::{normalize, NormalizedDocument};
use crate::service::{DocumentSubmitter, SubmitError};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Filename used for synthetic outcomes that belong to the run as a whole
const BATCH_SLOT: &str = "(batch)";

/// Exactly one of: a normalized document, or an error message
#[derive(Debug, Clone)]
pub enum Outcome {
    Document(NormalizedDocument),
    Failed(String),
}

/// One per input file, in input order; immutable after creation
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub filename: String,
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn succeeded(filename: impl Into<String>, document: NormalizedDocument) -> Self {
        Self {
            filename: filename.into(),
            outcome: Outcome::Document(document),
        }
    }

    pub fn failed(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            outcome: Outcome::Failed(message.into()),
        }
    }

    pub fn document(&self) -> Option<&NormalizedDocument> {
        match &self.outcome {
            Outcome::Document(doc) => Some(doc),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Document(_) => None,
            Outcome::Failed(message) => Some(message),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Runs upload batches against a submission boundary
#[derive(Debug, Clone)]
pub struct BatchRunner {
    max_docs_per_batch: usize,
}

impl BatchRunner {
    pub fn new(max_docs_per_batch: usize) -> Self {
        Self { max_docs_per_batch }
    }

    /// Execute a batch run.
    ///
    /// Files are submitted one at a time; the next submission does not begin
    /// until the previous outcome is recorded, so result order matches input
    /// order and backend load stays bounded. A failed file is captured as its
    /// own outcome and never stops the remaining files.
    pub async fn run(
        &self,
        request: &UploadRequest,
        submitter: &dyn DocumentSubmitter,
    ) -> Vec<FileOutcome> {
        if request.is_empty() {
            warn!("batch run requested with no files");
            return vec![FileOutcome::failed(
                BATCH_SLOT,
                "no files selected for upload",
            )];
        }

        if request.files().len() > self.max_docs_per_batch {
            warn!(
                count = request.files().len(),
                max = self.max_docs_per_batch,
                "batch exceeds the per-run limit"
            );
            return vec![FileOutcome::failed(
                BATCH_SLOT,
                format!(
                    "too many files: {} exceeds the limit of {}",
                    request.files().len(),
                    self.max_docs_per_batch
                ),
            )];
        }

        info!(count = request.files().len(), "batch run started");

        let mut outcomes = Vec::with_capacity(request.files().len());
        for file in request.files() {
            let outcome = match submitter.submit(file, request).await {
                Ok(payload) => {
                    debug!(filename = %file.name, "file processed");
                    FileOutcome::succeeded(file.name.as_str(), normalize(&payload))
                }
                Err(err) => {
                    let message = failure_message(&err);
                    warn!(filename = %file.name, error = %message, "file failed");
                    FileOutcome::failed(file.name.as_str(), message)
                }
            };
            outcomes.push(outcome);
        }

        info!(
            failed = outcomes.iter().filter(|o| o.is_failed()).count(),
            total = outcomes.len(),
            "batch run finished"
        );
        outcomes
    }
}

/// Best-effort human-readable failure text.
///
/// For HTTP failures the detail is taken from, in order: a structured
/// `detail` field, a structured `message` field, a plain-text body, and
/// finally just the status line. The `"<status> <status_text>: <detail>"`
/// shape is relied on by UI snapshots; keep it stable.
pub fn failure_message(err: &SubmitError) -> String {
    match err {
        SubmitError::Http {
            status,
            status_text,
            body,
        } => match extract_detail(body) {
            Some(detail) => format!("{} {}: {}", status, status_text, detail),
            None => format!("{} {}", status, status_text),
        },
        SubmitError::Transport(_) | SubmitError::InvalidResponse(_) => err.to_string(),
    }
}

fn extract_detail(body: &Value) -> Option<String> {
    field_text(body, "detail")
        .or_else(|| field_text(body, "message"))
        .or_else(|| match body {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        })
}

/// A string field verbatim; a structured field as compact JSON
fn field_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string(other).ok(),
    }
}
