//! View derivation
//!
//! Computes what the active selection renders, purely from the outcome list
//! and the selection tuple. Nothing here is cached across state changes; the
//! only precomputation is the one-time text derivation done at normalization.

use super::selection::{resolve_page, resolve_rich_page, tables_on_page, SelectionState, ViewMode};
use crate::batch::{FileOutcome, Outcome};
use crate::document::{build_grid, BlockModel, TableModel};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// A table with its dense grid, or `None` when the declared geometry is invalid
#[derive(Debug, Clone)]
pub struct TableView {
    pub table: TableModel,
    pub grid: Option<Vec<Vec<String>>>,
}

/// Per-page slice of the diagnostics bundle
#[derive(Debug, Clone)]
pub struct PageDiagnostics {
    pub page_number: i64,
    pub engine_usage: IndexMap<String, Value>,
    pub diagnostics: IndexMap<String, Value>,
}

/// What the current selection shows
#[derive(Debug, Clone)]
pub enum RenderedView {
    /// Nothing selected (empty outcome list)
    NoDocument,
    /// The selected file failed; its error text is shown inline
    Failure { filename: String, message: String },
    /// The active document has an empty page sequence
    NoPages,
    PageText {
        page_number: i64,
        text: String,
    },
    Blocks {
        page_number: i64,
        classification: Option<String>,
        blocks: Vec<BlockModel>,
    },
    /// Tables on exactly the active page; may be empty (no fallback)
    Tables {
        page_number: i64,
        tables: Vec<TableView>,
    },
    Markdown(String),
    Diagnostics {
        document: IndexMap<String, Value>,
        pages: Vec<PageDiagnostics>,
    },
    /// Pretty-printed payload as received from the backend
    Raw(String),
    /// The selected mode has nothing to show for this document
    Unavailable(ViewMode),
}

/// Derive the rendered view for the active outcome and selection
pub fn render(outcome: Option<&FileOutcome>, selection: &SelectionState) -> RenderedView {
    let outcome = match outcome {
        Some(outcome) => outcome,
        None => return RenderedView::NoDocument,
    };

    let doc = match &outcome.outcome {
        Outcome::Failed(message) => {
            return RenderedView::Failure {
                filename: outcome.filename.clone(),
                message: message.clone(),
            }
        }
        Outcome::Document(doc) => doc,
    };

    let mode = selection.view_mode;
    if !mode.is_available(doc) {
        return RenderedView::Unavailable(mode);
    }

    match mode {
        ViewMode::Page => match resolve_page(doc, selection.page_number) {
            Some(page) => RenderedView::PageText {
                page_number: page.page_number,
                text: page.display_text().to_string(),
            },
            None => RenderedView::NoPages,
        },
        ViewMode::Blocks => {
            // Availability guarantees rich data; stay total regardless.
            let page = doc
                .rich
                .as_ref()
                .and_then(|rich| resolve_rich_page(rich, selection.page_number));
            match page {
                Some(page) => RenderedView::Blocks {
                    page_number: page.page_number,
                    classification: page.classification.clone(),
                    blocks: page.blocks.clone(),
                },
                None => RenderedView::NoPages,
            }
        }
        ViewMode::Tables => {
            let tables = doc
                .rich
                .as_ref()
                .map(|rich| tables_on_page(rich, selection.page_number))
                .unwrap_or_default()
                .into_iter()
                .map(|table| TableView {
                    grid: build_grid(table),
                    table: table.clone(),
                })
                .collect();
            RenderedView::Tables {
                page_number: selection.page_number,
                tables,
            }
        }
        ViewMode::Markdown => {
            let markdown = doc.rich_markdown().unwrap_or_default().to_string();
            RenderedView::Markdown(markdown)
        }
        ViewMode::Diagnostics => RenderedView::Diagnostics {
            document: doc
                .rich
                .as_ref()
                .map(|r| r.diagnostics.clone())
                .unwrap_or_default(),
            pages: doc
                .pages
                .iter()
                .filter(|p| !p.engine_usage.is_empty() || !p.diagnostics.is_empty())
                .map(|p| PageDiagnostics {
                    page_number: p.page_number,
                    engine_usage: p.engine_usage.clone(),
                    diagnostics: p.diagnostics.clone(),
                })
                .collect(),
        },
        ViewMode::Raw => {
            let dump = serde_json::to_string_pretty(&doc.raw)
                .unwrap_or_else(|_| doc.raw.to_string());
            RenderedView::Raw(dump)
        }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => write!(f, "no document selected"),
            Self::Failure { filename, message } => write!(f, "{}: {}", filename, message),
            Self::NoPages => write!(f, "no pages"),
            Self::PageText { page_number, text } => {
                writeln!(f, "-- page {} --", page_number)?;
                write!(f, "{}", text)
            }
            Self::Blocks {
                page_number,
                classification,
                blocks,
            } => {
                match classification {
                    Some(c) => writeln!(f, "-- page {} ({}) --", page_number, c)?,
                    None => writeln!(f, "-- page {} --", page_number)?,
                }
                for block in blocks {
                    write_block(f, block)?;
                }
                Ok(())
            }
            Self::Tables { tables, .. } => {
                if tables.is_empty() {
                    return write!(f, "no tables on this page");
                }
                for (idx, view) in tables.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    write_table(f, view)?;
                }
                Ok(())
            }
            Self::Markdown(markdown) => write!(f, "{}", markdown),
            Self::Diagnostics { document, pages } => {
                if !document.is_empty() {
                    writeln!(f, "document:")?;
                    write_map(f, document, "  ")?;
                }
                for page in pages {
                    writeln!(f, "page {}:", page.page_number)?;
                    write_map(f, &page.engine_usage, "  ")?;
                    write_map(f, &page.diagnostics, "  ")?;
                }
                Ok(())
            }
            Self::Raw(dump) => write!(f, "{}", dump),
            Self::Unavailable(mode) => write!(f, "nothing to show for {}", mode.as_str()),
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &BlockModel) -> fmt::Result {
    let mut label = format!("[{}]", block.block_type);
    if let Some(marker) = &block.marker {
        label.push_str(&format!(" {}", marker));
    }
    if block.table_candidate {
        label.push_str(" (table candidate)");
    }
    if let Some(script) = &block.script {
        match block.handwriting_score {
            Some(score) => label.push_str(&format!(" ({} {:.2})", script, score)),
            None => label.push_str(&format!(" ({})", script)),
        }
    }

    // Indentation reflects nesting depth, shown only when > 0.
    let indent = if block.level > 0 {
        "  ".repeat(block.level as usize)
    } else {
        String::new()
    };
    writeln!(f, "{}{} {}", indent, label, block.display_text())
}

fn write_table(f: &mut fmt::Formatter<'_>, view: &TableView) -> fmt::Result {
    let table = &view.table;
    match table.score {
        Some(score) => writeln!(
            f,
            "table {}x{} ({}, score {:.2})",
            table.n_rows, table.n_cols, table.method, score
        )?,
        None => writeln!(f, "table {}x{} ({})", table.n_rows, table.n_cols, table.method)?,
    }

    match &view.grid {
        Some(grid) => {
            for row in grid {
                writeln!(f, "| {} |", row.join(" | "))?;
            }
            Ok(())
        }
        None => writeln!(f, "invalid table geometry"),
    }
}

fn write_map(
    f: &mut fmt::Formatter<'_>,
    map: &IndexMap<String, Value>,
    indent: &str,
) -> fmt::Result {
    for (key, value) in map {
        writeln!(f, "{}{}: {}", indent, key, value)?;
    }
    Ok(())
}
