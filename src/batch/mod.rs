//! Batch upload requests and sequential execution

pub mod request;
pub mod runner;

pub use request::{DocumentType, InputFile, UploadRequest};
pub use runner::{failure_message, BatchRunner, FileOutcome, Outcome};
