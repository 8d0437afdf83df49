//! Multi-dimensional selection state
//!
//! Tracks which file, page, and view mode are active across a batch result
//! list. Availability of a view mode is a derived property of the active
//! document, never stored; page numbers are labels matched by value with a
//! defined fallback, never indices.

use crate::batch::FileOutcome;
use crate::document::{NormalizedDocument, PageModel, RichDocument, RichPage, TableModel};
use serde::{Deserialize, Serialize};

/// Rendering lens over the active document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Page,
    Blocks,
    Tables,
    Markdown,
    Diagnostics,
    Raw,
}

impl ViewMode {
    pub const ALL: [ViewMode; 6] = [
        ViewMode::Page,
        ViewMode::Blocks,
        ViewMode::Tables,
        ViewMode::Markdown,
        ViewMode::Diagnostics,
        ViewMode::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Blocks => "blocks",
            Self::Tables => "tables",
            Self::Markdown => "markdown",
            Self::Diagnostics => "diagnostics",
            Self::Raw => "raw",
        }
    }

    /// Whether this mode has anything to show for the given document.
    ///
    /// `page` and `raw` are always available once a document is active.
    pub fn is_available(&self, doc: &NormalizedDocument) -> bool {
        match self {
            Self::Page | Self::Raw => true,
            Self::Markdown => doc.rich_markdown().is_some(),
            Self::Blocks => doc.rich.is_some(),
            Self::Tables => doc.rich.as_ref().map(|r| !r.tables.is_empty()).unwrap_or(false),
            Self::Diagnostics => doc.has_diagnostics(),
        }
    }

    /// Post-run default: markdown when the first successful outcome exposes
    /// non-empty markdown, else the plain page view
    pub fn default_for(outcomes: &[FileOutcome]) -> ViewMode {
        let first_document = outcomes.iter().find_map(|o| o.document());
        match first_document.and_then(|d| d.rich_markdown()) {
            Some(_) => ViewMode::Markdown,
            None => ViewMode::Page,
        }
    }
}

/// The active (file, page, view mode) tuple.
///
/// Mutated only by explicit navigation intents and by batch completion; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Index into the outcome list; `None` iff the list is empty
    pub file_index: Option<usize>,
    /// 1-based page label, matched by value against `page_number`
    pub page_number: i64,
    pub view_mode: ViewMode,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            file_index: None,
            page_number: 1,
            view_mode: ViewMode::Page,
        }
    }
}

impl SelectionState {
    /// Batch completion: first file, first page, policy-chosen view mode
    pub fn reset_after_run(&mut self, outcomes: &[FileOutcome]) {
        self.file_index = if outcomes.is_empty() { None } else { Some(0) };
        self.page_number = 1;
        self.view_mode = ViewMode::default_for(outcomes);
    }

    /// Select a file, clamping into the valid range and resetting the page.
    /// On an empty outcome list the selection stays undefined.
    pub fn select_file(&mut self, index: usize, outcomes: &[FileOutcome]) {
        if outcomes.is_empty() {
            self.file_index = None;
            return;
        }
        self.file_index = Some(index.min(outcomes.len() - 1));
        self.page_number = 1;
    }

    /// Jump to a page label; non-positive requests settle on 1
    pub fn select_page(&mut self, page_number: i64) {
        self.page_number = page_number.max(1);
    }

    pub fn select_view_mode(&mut self, mode: ViewMode) {
        // Unavailable modes are not forbidden here; they just render empty.
        self.view_mode = mode;
    }

    pub fn next_page(&mut self, page_count: usize) {
        let last = page_count.max(1) as i64;
        self.page_number = (self.page_number + 1).clamp(1, last);
    }

    pub fn prev_page(&mut self, page_count: usize) {
        let last = page_count.max(1) as i64;
        self.page_number = (self.page_number - 1).clamp(1, last);
    }
}

/// Find the page whose label matches, else fall back to the first page.
///
/// Total for any non-empty page sequence: out-of-range and non-contiguous
/// labels resolve to the first entry, never to nothing.
pub fn resolve_page(doc: &NormalizedDocument, page_number: i64) -> Option<&PageModel> {
    doc.pages
        .iter()
        .find(|p| p.page_number == page_number)
        .or_else(|| doc.pages.first())
}

/// Rich-page lookup mirroring the flat-page fallback
pub fn resolve_rich_page(rich: &RichDocument, page_number: i64) -> Option<&RichPage> {
    rich.pages
        .iter()
        .find(|p| p.page_number == page_number)
        .or_else(|| rich.pages.first())
}

/// Tables belonging to exactly this page. No fallback: table identity is
/// page-scoped, and substituting another page's tables would be misleading.
pub fn tables_on_page(rich: &RichDocument, page_number: i64) -> Vec<&TableModel> {
    rich.tables
        .iter()
        .filter(|t| t.page_number == page_number)
        .collect()
}
