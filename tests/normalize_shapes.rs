//! Schema-variant fixtures through normalization and browsing
//!
//! The backend has shipped two response shapes; both must land in the same
//! navigable model without the render path branching on origin.

use async_trait::async_trait;
use ocr_browser::{
    normalize, BatchRunner, DocumentSubmitter, DocumentType, FileOutcome, InputFile, RenderedView,
    ResultBrowser, SubmitError, UploadRequest, ViewMode,
};
use serde_json::{json, Value};

struct FixedSubmitter {
    payload: Value,
}

#[async_trait]
impl DocumentSubmitter for FixedSubmitter {
    async fn submit(
        &self,
        _file: &InputFile,
        _request: &UploadRequest,
    ) -> Result<Value, SubmitError> {
        Ok(self.payload.clone())
    }
}

fn request_of(names: &[&str]) -> UploadRequest {
    UploadRequest::new(
        names
            .iter()
            .map(|n| InputFile::new(*n, &b"bytes"[..]))
            .collect(),
        DocumentType::Invoice,
        false,
        true,
    )
}

#[test]
fn flat_schema_with_no_layout_fields_normalizes_clean() {
    let doc = normalize(&json!({
        "job_id": "j-2",
        "status": "success",
        "pages": [
            {"page_number": 1, "text": "only text"},
            {"page_number": 2}
        ],
        "metadata": {"engine": "tesseract"}
    }));

    assert_eq!(doc.pages.len(), 2);
    assert!(doc.pages[0].words.is_empty());
    assert!(doc.pages[0].lines.is_empty());
    assert!(doc.pages[0].blocks.is_empty());
    assert!(doc.pages[0].tables.is_empty());
    assert_eq!(doc.pages[1].text, "");
    assert!(doc.rich.is_none());
    assert_eq!(doc.full_text, "only text\n\n");
}

#[test]
fn word_only_pages_derive_text_and_full_text() {
    let doc = normalize(&json!({
        "pages": [
            {"page_number": 1, "words": [{"text": "alpha"}, {"text": "beta"}]},
            {"page_number": 2, "text": "gamma"}
        ]
    }));

    assert_eq!(doc.pages[0].text, "alpha beta");
    assert_eq!(doc.full_text, "alpha beta\n\ngamma");
}

#[test]
fn non_contiguous_page_numbers_stay_labels() {
    let doc = normalize(&json!({
        "pages": [
            {"page_number": 7, "text": "seven"},
            {"page_number": 11, "text": "eleven"}
        ]
    }));

    assert_eq!(doc.pages[0].page_number, 7);
    assert_eq!(doc.pages[1].page_number, 11);
}

#[tokio::test]
async fn flat_only_batch_defaults_to_page_view() {
    let submitter = FixedSubmitter {
        payload: json!({
            "pages": [{"page_number": 1, "text": "flat text"}],
            "full_text": "flat text"
        }),
    };
    let mut browser = ResultBrowser::new(BatchRunner::new(20));

    browser.run_batch(request_of(&["flat.png"]), &submitter).await;

    assert_eq!(browser.selection().view_mode, ViewMode::Page);
    match browser.view() {
        RenderedView::PageText { text, .. } => assert_eq!(text, "flat text"),
        other => panic!("expected PageText, got {:?}", other),
    }

    // Rich-only modes have nothing to show but selecting them is not an error.
    browser.select_view_mode(ViewMode::Blocks);
    assert!(matches!(
        browser.view(),
        RenderedView::Unavailable(ViewMode::Blocks)
    ));
}

#[tokio::test]
async fn rich_only_payload_still_navigates_pages() {
    let submitter = FixedSubmitter {
        payload: json!({
            "document": {
                "markdown": "# Doc",
                "pages": [
                    {"page_number": 1, "blocks": [{"text": "from blocks"}]},
                    {"page_number": 2, "blocks": [{"text": "second"}]}
                ]
            }
        }),
    };
    let mut browser = ResultBrowser::new(BatchRunner::new(20));

    browser.run_batch(request_of(&["rich.pdf"]), &submitter).await;
    assert_eq!(browser.selection().view_mode, ViewMode::Markdown);

    browser.select_view_mode(ViewMode::Page);
    match browser.view() {
        RenderedView::PageText { page_number, text } => {
            assert_eq!(page_number, 1);
            assert_eq!(text, "from blocks");
        }
        other => panic!("expected PageText, got {:?}", other),
    }

    browser.next_page();
    match browser.view() {
        RenderedView::PageText { page_number, text } => {
            assert_eq!(page_number, 2);
            assert_eq!(text, "second");
        }
        other => panic!("expected PageText, got {:?}", other),
    }
}

#[tokio::test]
async fn duplicate_filenames_submit_once() {
    let submitter = FixedSubmitter {
        payload: json!({"pages": [{"page_number": 1, "text": "t"}]}),
    };
    let mut browser = ResultBrowser::new(BatchRunner::new(20));

    browser
        .run_batch(request_of(&["same.pdf", "same.pdf", "other.pdf"]), &submitter)
        .await;

    let names: Vec<_> = browser
        .outcomes()
        .iter()
        .map(|o| o.filename.as_str())
        .collect();
    assert_eq!(names, vec!["same.pdf", "other.pdf"]);
}

#[test]
fn outcome_accessors_are_exclusive() {
    let ok = FileOutcome::succeeded("a.pdf", normalize(&json!({})));
    assert!(ok.document().is_some());
    assert!(ok.error_message().is_none());
    assert!(!ok.is_failed());

    let failed = FileOutcome::failed("b.pdf", "503 Service Unavailable");
    assert!(failed.document().is_none());
    assert_eq!(failed.error_message(), Some("503 Service Unavailable"));
    assert!(failed.is_failed());
}
