//! Batch OCR submission client with response normalization and result
//! navigation.
//!
//! The crate drives a batch of independent upload/OCR operations to
//! completion while tolerating per-file failure, normalizes the backend's
//! historically divergent response shapes into one canonical document model,
//! and maintains a consistent file x page x view-mode selection over the
//! results:
//!
//! - [`batch`]: upload requests and the strictly sequential batch runner
//! - [`document`]: the canonical model, the total normalizer, and dense
//!   table-grid reconstruction
//! - [`service`]: the submit-one-file boundary and its reqwest client
//! - [`browser`]: selection state, view derivation, and the composition
//!   root with its download/speech collaborators
//! - [`config`]: client configuration
//!
//! The backend itself (document-type inference, layout detection, table
//! structuring) is an opaque collaborator returning JSON.

pub mod batch;
pub mod browser;
pub mod config;
pub mod document;
pub mod error;
pub mod service;

pub use batch::{BatchRunner, DocumentType, FileOutcome, InputFile, Outcome, UploadRequest};
pub use browser::{RenderedView, ResultBrowser, SelectionState, ViewMode};
pub use config::BrowserConfig;
pub use document::{normalize, NormalizedDocument};
pub use error::{BrowserError, Result};
pub use service::{DocumentSubmitter, OcrServiceClient, SubmitError};
