//! The "submit one file" boundary
//!
//! The batch runner drives this trait; the reqwest client in
//! [`crate::service::client`] is the production implementation, and tests
//! substitute scripted ones.

use crate::batch::{InputFile, UploadRequest};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Submission failure for a single file
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Connection, DNS, timeout: the request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status; `body` is the parsed JSON body when the
    /// response was JSON, else the plain text wrapped as a JSON string
    #[error("status {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: Value,
    },

    /// Success status but the body could not be parsed as JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// One logical OCR submission per file
#[async_trait]
pub trait DocumentSubmitter: Send + Sync {
    /// Submit a single file with the request's fixed parameters and return
    /// the raw response payload.
    async fn submit(&self, file: &InputFile, request: &UploadRequest) -> Result<Value, SubmitError>;
}
