//! Upload request types

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Document type tag sent with each upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Generic,
    Invoice,
    Receipt,
    Resume,
    Bill,
    Claim,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Invoice => "invoice",
            Self::Receipt => "receipt",
            Self::Resume => "resume",
            Self::Bill => "bill",
            Self::Claim => "claim",
        }
    }

    /// Parse a tag leniently; unknown tags fall back to `Generic`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "invoice" => Self::Invoice,
            "receipt" => Self::Receipt,
            "resume" => Self::Resume,
            "bill" => Self::Bill,
            "claim" => Self::Claim,
            _ => Self::Generic,
        }
    }
}

/// A file handle supplied by the file-picker collaborator
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Bytes,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// One batch run's worth of inputs and fixed request parameters.
///
/// Created when the user triggers a run, consumed once by the batch runner,
/// never mutated.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    files: Vec<InputFile>,
    pub document_type: DocumentType,
    pub zero_retention: bool,
    pub enable_layout: bool,
}

impl UploadRequest {
    /// Build a request, de-duplicating files by name (first seen wins)
    pub fn new(
        files: Vec<InputFile>,
        document_type: DocumentType,
        zero_retention: bool,
        enable_layout: bool,
    ) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(files.len());
        let files = files
            .into_iter()
            .filter(|f| seen.insert(f.name.clone()))
            .collect();

        Self {
            files,
            document_type,
            zero_retention,
            enable_layout,
        }
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
