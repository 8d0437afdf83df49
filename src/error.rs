//! Error types for the OCR browser core

use thiserror::Error;

/// Crate-level result alias
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors surfaced by the browser core itself.
///
/// Per-file submission failures are not errors at this level: they are
/// recorded inline as failed outcomes in the batch result list.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("export failed: {0}")]
    Export(String),

    #[error("playback failed: {0}")]
    Playback(String),

    #[error("no document selected")]
    NoActiveDocument,
}
