//! Response normalization
//!
//! Maps a raw backend payload of either schema variant into one
//! [`NormalizedDocument`]. Total by construction: every accessor is
//! default-valued, so malformed or missing fields degrade to empty
//! collections or absent markers and the caller never sees an error.
//! Partial OCR output is still worth showing.

use super::models::{
    BlockModel, LineModel, NormalizedDocument, PageModel, RichDocument, RichPage, TableCell,
    TableModel, WordModel,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Default table extraction method tag when the backend omits one
const DEFAULT_TABLE_METHOD: &str = "heuristic";

/// Normalize a raw backend payload into the canonical document model.
///
/// If a `document` object is present the payload is treated as the rich
/// variant; the flat `pages`/`full_text` view is always populated from
/// whichever of `pages`, `full_text`, or the rich pages is available, so page
/// navigation works even when only the rich schema was returned.
pub fn normalize(raw: &Value) -> NormalizedDocument {
    let rich = raw
        .get("document")
        .filter(|d| d.is_object())
        .map(parse_rich_document);

    let mut pages: Vec<PageModel> = array(raw, "pages")
        .iter()
        .enumerate()
        .map(|(idx, p)| parse_page(p, idx))
        .collect();

    // Flat view fallback: a rich-only payload still gets navigable pages.
    if pages.is_empty() {
        if let Some(rich) = &rich {
            pages = rich.pages.iter().map(page_from_rich).collect();
        }
    }

    if pages.is_empty() && raw.get("pages").map(|p| !p.is_array()).unwrap_or(false) {
        debug!("payload field `pages` is not a sequence, treating as absent");
    }

    let full_text = match non_blank_str(raw, "full_text") {
        Some(text) => text.to_string(),
        None => pages
            .iter()
            .map(|p| p.display_text())
            .collect::<Vec<_>>()
            .join("\n\n"),
    };

    NormalizedDocument {
        pages,
        full_text,
        rich,
        metadata: map_field(raw, "metadata"),
        raw: raw.clone(),
    }
}

fn parse_rich_document(doc: &Value) -> RichDocument {
    RichDocument {
        markdown: string_field(doc, "markdown"),
        pages: array(doc, "pages")
            .iter()
            .enumerate()
            .map(|(idx, p)| parse_rich_page(p, idx))
            .collect(),
        tables: array(doc, "tables")
            .iter()
            .map(|t| parse_table(t, 0))
            .collect(),
        diagnostics: map_field(doc, "diagnostics"),
    }
}

fn parse_rich_page(page: &Value, idx: usize) -> RichPage {
    RichPage {
        page_number: int_field(page, "page_number", idx as i64 + 1),
        blocks: array(page, "blocks").iter().map(parse_block).collect(),
        classification: non_blank_str(page, "classification").map(str::to_string),
    }
}

fn parse_page(page: &Value, idx: usize) -> PageModel {
    let page_number = int_field(page, "page_number", idx as i64 + 1);
    let words: Vec<WordModel> = array(page, "words").iter().map(parse_word).collect();

    // Text fallback order: explicit non-blank text, then joined word tokens.
    let text = match non_blank_str(page, "text") {
        Some(t) => t.to_string(),
        None => words
            .iter()
            .map(|w| w.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    };

    PageModel {
        page_number,
        text,
        normalized_text: non_blank_str(page, "text_normalized").map(str::to_string),
        words,
        lines: array(page, "lines").iter().map(parse_line).collect(),
        blocks: array(page, "blocks").iter().map(parse_block).collect(),
        tables: array(page, "tables")
            .iter()
            .map(|t| parse_table(t, page_number))
            .collect(),
        engine_usage: map_field(page, "engine_usage"),
        diagnostics: map_field(page, "diagnostics"),
    }
}

/// Flat page synthesized from a rich page when the payload had no flat view
fn page_from_rich(page: &RichPage) -> PageModel {
    let text = page
        .blocks
        .iter()
        .map(|b| b.display_text())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    PageModel {
        page_number: page.page_number,
        text,
        normalized_text: None,
        words: vec![],
        lines: vec![],
        blocks: page.blocks.clone(),
        tables: vec![],
        engine_usage: IndexMap::new(),
        diagnostics: IndexMap::new(),
    }
}

fn parse_word(word: &Value) -> WordModel {
    WordModel {
        text: string_field(word, "text"),
        bbox: parse_bbox(word),
        confidence: word.get("confidence").and_then(Value::as_f64),
    }
}

/// Accepts either a `bbox: [x1,y1,x2,y2]` array or flat `x1..y2` fields
fn parse_bbox(value: &Value) -> Option<[i64; 4]> {
    if let Some(arr) = value.get("bbox").and_then(Value::as_array) {
        if arr.len() == 4 {
            let mut out = [0i64; 4];
            for (slot, v) in out.iter_mut().zip(arr) {
                *slot = v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))?;
            }
            return Some(out);
        }
        return None;
    }

    let coord = |key: &str| value.get(key).and_then(Value::as_i64);
    Some([coord("x1")?, coord("y1")?, coord("x2")?, coord("y2")?])
}

fn parse_line(line: &Value) -> LineModel {
    LineModel {
        text: string_field(line, "text"),
        words: array(line, "words").iter().map(parse_word).collect(),
    }
}

fn parse_block(block: &Value) -> BlockModel {
    let block_type = match non_blank_str(block, "type") {
        Some(t) => t.to_string(),
        None => "paragraph".to_string(),
    };

    BlockModel {
        block_type,
        text: string_field(block, "text"),
        normalized_text: string_field(block, "text_normalized"),
        lines: array(block, "lines").iter().map(parse_line).collect(),
        table_candidate: block
            .get("table_candidate")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        script: non_blank_str(block, "script").map(str::to_string),
        handwriting_score: block.get("handwriting_score").and_then(Value::as_f64),
        marker: non_blank_str(block, "marker").map(str::to_string),
        level: int_field(block, "level", 0),
        checkbox: block.get("checkbox").filter(|v| !v.is_null()).cloned(),
    }
}

fn parse_table(table: &Value, default_page: i64) -> TableModel {
    TableModel {
        page_number: int_field(table, "page_number", default_page),
        n_rows: int_field(table, "n_rows", 0),
        n_cols: int_field(table, "n_cols", 0),
        cells: array(table, "cells").iter().map(parse_cell).collect(),
        score: table.get("score").and_then(Value::as_f64),
        method: match non_blank_str(table, "method") {
            Some(m) => m.to_string(),
            None => DEFAULT_TABLE_METHOD.to_string(),
        },
        bbox: parse_bbox(table),
        source_block_index: table.get("source_block_index").and_then(Value::as_i64),
    }
}

fn parse_cell(cell: &Value) -> TableCell {
    TableCell {
        row: int_field(cell, "row", 0),
        col: int_field(cell, "col", 0),
        text: coerce_text(cell.get("text")),
    }
}

// ---------------------------------------------------------------------------
// Total, default-valued accessors. A field whose declared type does not match
// is treated as absent, never as an error.
// ---------------------------------------------------------------------------

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn non_blank_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn int_field(value: &Value, key: &str, default: i64) -> i64 {
    value
        .get(key)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(default)
}

fn map_field(value: &Value, key: &str) -> IndexMap<String, Value> {
    match value.get(key).and_then(Value::as_object) {
        Some(obj) => obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        None => IndexMap::new(),
    }
}

/// Coerce a cell value to display text; non-scalar values become empty
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_never_fails_on_empty_payload() {
        let doc = normalize(&json!({}));
        assert!(doc.pages.is_empty());
        assert_eq!(doc.full_text, "");
        assert!(doc.rich.is_none());
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_normalize_tolerates_wrong_types() {
        let doc = normalize(&json!({
            "pages": "not a sequence",
            "full_text": 42,
            "metadata": ["not", "a", "map"],
            "document": "not an object"
        }));
        assert!(doc.pages.is_empty());
        assert_eq!(doc.full_text, "");
        assert!(doc.rich.is_none());
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_page_text_falls_back_to_word_join() {
        let doc = normalize(&json!({
            "pages": [{
                "page_number": 1,
                "text": "   ",
                "words": [
                    {"text": "hello", "x1": 0, "y1": 0, "x2": 10, "y2": 10},
                    {"text": "world"}
                ]
            }]
        }));
        assert_eq!(doc.pages[0].text, "hello world");
        assert_eq!(doc.pages[0].words[0].bbox, Some([0, 0, 10, 10]));
        assert_eq!(doc.pages[0].words[1].bbox, None);
    }

    #[test]
    fn test_explicit_full_text_wins() {
        let doc = normalize(&json!({
            "pages": [
                {"page_number": 1, "text": "page one"},
                {"page_number": 2, "text": "page two"}
            ],
            "full_text": "the explicit text"
        }));
        assert_eq!(doc.full_text, "the explicit text");
    }

    #[test]
    fn test_full_text_derived_with_blank_line_separator() {
        let doc = normalize(&json!({
            "pages": [
                {"page_number": 1, "text": "page one"},
                {"page_number": 2, "text": "page two", "text_normalized": "Page Two"}
            ]
        }));
        assert_eq!(doc.full_text, "page one\n\nPage Two");
    }

    #[test]
    fn test_rich_document_parsed() {
        let doc = normalize(&json!({
            "pages": [{"page_number": 1, "text": "flat"}],
            "document": {
                "markdown": "# Title",
                "pages": [{
                    "page_number": 1,
                    "classification": "printed",
                    "blocks": [
                        {"type": "heading", "text": "Title", "level": 1},
                        {"text": "body", "script": "handwritten", "handwriting_score": 0.82}
                    ]
                }],
                "tables": [{
                    "page_number": 1,
                    "n_rows": 2,
                    "n_cols": 2,
                    "cells": [{"row": 0, "col": 0, "text": "a"}]
                }],
                "diagnostics": {"noise": 0.1}
            }
        }));

        let rich = doc.rich.expect("rich document");
        assert_eq!(rich.markdown, "# Title");
        assert_eq!(rich.pages.len(), 1);
        assert_eq!(rich.pages[0].classification.as_deref(), Some("printed"));
        assert_eq!(rich.pages[0].blocks[0].block_type, "heading");
        assert_eq!(rich.pages[0].blocks[1].block_type, "paragraph");
        assert_eq!(rich.pages[0].blocks[1].script.as_deref(), Some("handwritten"));
        assert_eq!(rich.tables.len(), 1);
        assert_eq!(rich.diagnostics.len(), 1);
    }

    #[test]
    fn test_rich_blocks_defaulted_when_not_a_sequence() {
        let doc = normalize(&json!({
            "document": {
                "pages": [{"page_number": 1, "blocks": "oops"}]
            }
        }));
        let rich = doc.rich.expect("rich document");
        assert!(rich.pages[0].blocks.is_empty());
    }

    #[test]
    fn test_flat_pages_synthesized_from_rich_only_payload() {
        let doc = normalize(&json!({
            "document": {
                "markdown": "# T",
                "pages": [{
                    "page_number": 3,
                    "blocks": [
                        {"text": "first", "text_normalized": "First"},
                        {"text": "second"}
                    ]
                }]
            }
        }));
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].page_number, 3);
        assert_eq!(doc.pages[0].text, "First\nsecond");
        assert_eq!(doc.full_text, "First\nsecond");
    }

    #[test]
    fn test_table_defaults() {
        let doc = normalize(&json!({
            "pages": [{
                "page_number": 4,
                "text": "t",
                "tables": [{"n_rows": 1, "n_cols": 1, "cells": [{"row": 0, "col": 0, "text": 7}]}]
            }]
        }));
        let table = &doc.pages[0].tables[0];
        assert_eq!(table.page_number, 4);
        assert_eq!(table.method, "heuristic");
        assert_eq!(table.cells[0].text, "7");
    }

    #[test]
    fn test_metadata_preserves_key_order() {
        let doc = normalize(&json!({
            "metadata": {"engine": "tesseract", "processing_time_ms": 120, "num_pages": 1}
        }));
        let keys: Vec<_> = doc.metadata.keys().cloned().collect();
        assert_eq!(keys, vec!["engine", "processing_time_ms", "num_pages"]);
    }
}
