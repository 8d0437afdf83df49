//! Submission boundary to the remote OCR service

pub mod client;
pub mod submit;

pub use client::OcrServiceClient;
pub use submit::{DocumentSubmitter, SubmitError};
