//! Configuration for the OCR browser client

use crate::batch::DocumentType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Base URL of the OCR backend
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Per-file request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Default document type tag sent with each upload
    #[serde(default)]
    pub document_type: DocumentType,

    /// Ask the backend not to retain uploaded files
    #[serde(default = "default_zero_retention")]
    pub zero_retention: bool,

    /// Request layout analysis (words/lines/blocks/tables) per page
    #[serde(default = "default_enable_layout")]
    pub enable_layout: bool,

    /// Maximum number of files accepted per batch run
    #[serde(default = "default_max_docs_per_batch")]
    pub max_docs_per_batch: usize,
}

// Default value functions
fn default_service_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_ms() -> u64 {
    120_000
}
fn default_zero_retention() -> bool {
    true
}
fn default_enable_layout() -> bool {
    true
}
fn default_max_docs_per_batch() -> usize {
    20
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            timeout_ms: default_timeout_ms(),
            document_type: DocumentType::default(),
            zero_retention: default_zero_retention(),
            enable_layout: default_enable_layout(),
            max_docs_per_batch: default_max_docs_per_batch(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from an optional `ocr-browser.toml` file layered
    /// with `OCR_*` environment variables. A `.env` file is honored first.
    pub fn load() -> crate::error::Result<Self> {
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("ocr-browser").required(false))
            .add_source(config::Environment::with_prefix("OCR"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Override fields from environment variables if present
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("OCR_SERVICE_URL") {
            self.service_url = val;
        }

        if let Ok(val) = std::env::var("OCR_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("OCR_DOCUMENT_TYPE") {
            self.document_type = DocumentType::from_tag(&val);
        }

        if let Ok(val) = std::env::var("OCR_ZERO_RETENTION") {
            self.zero_retention = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("OCR_ENABLE_LAYOUT") {
            self.enable_layout = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("OCR_MAX_DOCS_PER_BATCH") {
            if let Ok(max) = val.parse() {
                self.max_docs_per_batch = max;
            }
        }

        self
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrowserConfig::default();
        assert_eq!(config.service_url, "http://localhost:8000");
        assert_eq!(config.timeout_ms, 120_000);
        assert_eq!(config.document_type, DocumentType::Generic);
        assert!(config.zero_retention);
        assert!(config.enable_layout);
        assert_eq!(config.max_docs_per_batch, 20);
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("OCR_SERVICE_URL", "http://custom:9000");
        std::env::set_var("OCR_DOCUMENT_TYPE", "invoice");
        std::env::set_var("OCR_ZERO_RETENTION", "false");

        let config = BrowserConfig::default().from_env();

        assert_eq!(config.service_url, "http://custom:9000");
        assert_eq!(config.document_type, DocumentType::Invoice);
        assert!(!config.zero_retention);

        // Cleanup
        std::env::remove_var("OCR_SERVICE_URL");
        std::env::remove_var("OCR_DOCUMENT_TYPE");
        std::env::remove_var("OCR_ZERO_RETENTION");
    }

    #[test]
    fn test_timeout_conversion() {
        let config = BrowserConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(120_000));
    }
}
