//! HTTP client for the OCR backend

use super::submit::{DocumentSubmitter, SubmitError};
use crate::batch::{InputFile, UploadRequest};
use crate::config::BrowserConfig;
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Client for the backend's single-document OCR endpoint.
///
/// One multipart POST per file; `document_type` and `zero_retention` travel
/// as form fields, `enable_layout` as a query parameter.
pub struct OcrServiceClient {
    http: Client,
    config: BrowserConfig,
}

impl OcrServiceClient {
    pub fn new(config: BrowserConfig) -> Result<Self, SubmitError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/v1/ocr",
            self.config.service_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl DocumentSubmitter for OcrServiceClient {
    async fn submit(&self, file: &InputFile, request: &UploadRequest) -> Result<Value, SubmitError> {
        debug!(
            filename = %file.name,
            document_type = request.document_type.as_str(),
            bytes = file.bytes.len(),
            "submitting file"
        );

        let part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        let form = multipart::Form::new()
            .part("file", part)
            .text("document_type", request.document_type.as_str())
            .text("zero_retention", request.zero_retention.to_string());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("enable_layout", request.enable_layout)])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmitError::Transport(format!("request timed out: {}", e))
                } else {
                    SubmitError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

            warn!(filename = %file.name, status = status.as_u16(), "submission rejected");
            return Err(SubmitError::Http {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))
    }
}
