//! Canonical document model produced by normalization
//!
//! The backend has returned two response shapes over time: a flat
//! page/word/line/block schema, and a richer one that adds a top-level
//! `document` object with markdown, block-structured pages, tables, and
//! diagnostics. Both normalize into [`NormalizedDocument`]; render code never
//! branches on which shape arrived.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single recognized word with optional geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordModel {
    pub text: String,
    /// `[x1, y1, x2, y2]` in page pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[i64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A line of words
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineModel {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordModel>,
}

/// A layout block, flat or rich
///
/// Flat-schema blocks carry only text and lines; rich-schema blocks add the
/// annotation fields. Absent annotations keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockModel {
    /// heading | paragraph | list_item | table_region | ...
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(rename = "text_normalized", default, skip_serializing_if = "String::is_empty")]
    pub normalized_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineModel>,
    #[serde(default)]
    pub table_candidate: bool,
    /// handwritten | printed, when the backend classified the block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handwriting_score: Option<f64>,
    /// List marker stripped from the first line, e.g. `-` or `1.`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Nesting depth; only meaningful when > 0
    #[serde(default)]
    pub level: i64,
    /// Opaque checkbox annotation, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<Value>,
}

impl BlockModel {
    /// Best text for display: normalized when present, raw otherwise
    pub fn display_text(&self) -> &str {
        if self.normalized_text.trim().is_empty() {
            &self.text
        } else {
            &self.normalized_text
        }
    }
}

/// A sparse table cell; coordinates are zero-based
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    pub row: i64,
    pub col: i64,
    #[serde(default)]
    pub text: String,
}

/// A table with declared geometry and a sparse cell list
///
/// The cell list may be incomplete or contain duplicate coordinates; the
/// declared `n_rows`/`n_cols` are authoritative for grid reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableModel {
    pub page_number: i64,
    pub n_rows: i64,
    pub n_cols: i64,
    #[serde(default)]
    pub cells: Vec<TableCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[i64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_block_index: Option<i64>,
}

/// One page of the flat view
///
/// `page_number` is a 1-based label assigned by the backend. It is matched by
/// value, never used as an index: sequences may be non-contiguous or start
/// above 1 (e.g. a partial re-run of a long PDF).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageModel {
    pub page_number: i64,
    pub text: String,
    #[serde(rename = "text_normalized", skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableModel>,
    /// Engine provenance, passed through verbatim for display
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub engine_usage: IndexMap<String, Value>,
    /// Per-page diagnostics, passed through verbatim for display
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub diagnostics: IndexMap<String, Value>,
}

impl PageModel {
    /// Best text for display: normalized when present, raw otherwise
    pub fn display_text(&self) -> &str {
        match &self.normalized_text {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.text,
        }
    }
}

/// A page of the rich block-oriented view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichPage {
    pub page_number: i64,
    #[serde(default)]
    pub blocks: Vec<BlockModel>,
    /// printed | handwritten | mixed | unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

/// The rich schema variant's `document` object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichDocument {
    #[serde(default)]
    pub markdown: String,
    #[serde(default)]
    pub pages: Vec<RichPage>,
    #[serde(default)]
    pub tables: Vec<TableModel>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub diagnostics: IndexMap<String, Value>,
}

/// The canonical in-memory document, whichever schema produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Never absent; an empty sequence is valid and renders as "no pages"
    pub pages: Vec<PageModel>,
    /// Explicit backend value, or derived once at normalization time
    pub full_text: String,
    /// Present only for the rich schema variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich: Option<RichDocument>,
    /// Opaque pass-through (engine name, timings, completion flags)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, Value>,
    /// The payload as received, kept for the raw view
    pub raw: Value,
}

impl NormalizedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Non-empty rich markdown, if this document has any
    pub fn rich_markdown(&self) -> Option<&str> {
        self.rich
            .as_ref()
            .map(|r| r.markdown.as_str())
            .filter(|m| !m.trim().is_empty())
    }

    /// True when any page-level engine usage, page-level diagnostics, or
    /// document-level diagnostics were returned
    pub fn has_diagnostics(&self) -> bool {
        self.pages
            .iter()
            .any(|p| !p.engine_usage.is_empty() || !p.diagnostics.is_empty())
            || self
                .rich
                .as_ref()
                .map(|r| !r.diagnostics.is_empty())
                .unwrap_or(false)
    }
}
