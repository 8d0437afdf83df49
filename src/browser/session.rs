//! Composition root
//!
//! [`ResultBrowser`] owns the batch result list and the selection tuple, and
//! wires the batch runner, the normalizer (through it), and the peripheral
//! collaborators together. All mutation happens on the caller's single task;
//! the only suspension points are the per-file network calls inside a run.

use super::selection::{SelectionState, ViewMode};
use super::view::{render, RenderedView};
use crate::batch::{BatchRunner, FileOutcome, UploadRequest};
use crate::document::NormalizedDocument;
use crate::error::{BrowserError, Result};
use crate::service::DocumentSubmitter;
use tracing::{debug, info};

/// Download collaborator: receives exported text as a named file
pub trait TextSink: Send + Sync {
    fn save(&self, filename: &str, text: &str) -> Result<()>;
}

/// A running speech playback; dropped or stopped explicitly
pub trait PlaybackHandle: Send {
    fn stop(&mut self);
}

/// Speech synthesis collaborator. The audio device is a shared singleton, so
/// the browser stops any running playback before starting a new one or a new
/// batch run.
pub trait SpeechPlayer: Send + Sync {
    fn speak(&self, text: &str) -> Result<Box<dyn PlaybackHandle>>;
}

/// Browses the outcomes of a batch run
pub struct ResultBrowser {
    runner: BatchRunner,
    outcomes: Vec<FileOutcome>,
    selection: SelectionState,
    sink: Option<Box<dyn TextSink>>,
    speech: Option<Box<dyn SpeechPlayer>>,
    playback: Option<Box<dyn PlaybackHandle>>,
}

impl ResultBrowser {
    pub fn new(runner: BatchRunner) -> Self {
        Self {
            runner,
            outcomes: Vec::new(),
            selection: SelectionState::default(),
            sink: None,
            speech: None,
            playback: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn TextSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_speech(mut self, speech: Box<dyn SpeechPlayer>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Execute a batch run and take over its outcomes.
    ///
    /// Playback is stopped and the previous result list cleared in full
    /// before the first new outcome is recorded, so no mix of old and new
    /// results is ever observable.
    pub async fn run_batch(&mut self, request: UploadRequest, submitter: &dyn DocumentSubmitter) {
        self.stop_playback();
        self.outcomes.clear();
        self.selection = SelectionState::default();

        let outcomes = self.runner.run(&request, submitter).await;

        self.outcomes = outcomes;
        self.selection.reset_after_run(&self.outcomes);
        info!(
            files = self.outcomes.len(),
            view_mode = self.selection.view_mode.as_str(),
            "batch results loaded"
        );
    }

    // --- navigation intents -------------------------------------------------

    pub fn select_file(&mut self, index: usize) {
        self.selection.select_file(index, &self.outcomes);
    }

    pub fn select_page(&mut self, page_number: i64) {
        self.selection.select_page(page_number);
    }

    pub fn select_view_mode(&mut self, mode: ViewMode) {
        self.selection.select_view_mode(mode);
    }

    pub fn next_page(&mut self) {
        self.selection.next_page(self.active_page_count());
    }

    pub fn prev_page(&mut self) {
        self.selection.prev_page(self.active_page_count());
    }

    // --- derived state ------------------------------------------------------

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn active_outcome(&self) -> Option<&FileOutcome> {
        self.selection
            .file_index
            .and_then(|index| self.outcomes.get(index))
    }

    pub fn active_document(&self) -> Option<&NormalizedDocument> {
        self.active_outcome().and_then(|o| o.document())
    }

    fn active_page_count(&self) -> usize {
        self.active_document().map(|d| d.page_count()).unwrap_or(0)
    }

    /// Re-derive the rendered view from current state
    pub fn view(&self) -> RenderedView {
        render(self.active_outcome(), &self.selection)
    }

    // --- peripheral hooks ---------------------------------------------------

    /// Hand the active document's full text to the download collaborator
    pub fn export_text(&self) -> Result<()> {
        let outcome = self.active_outcome().ok_or(BrowserError::NoActiveDocument)?;
        let doc = outcome.document().ok_or(BrowserError::NoActiveDocument)?;
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| BrowserError::Export("no download collaborator".to_string()))?;

        let filename = format!("{}.txt", file_stem(&outcome.filename));
        debug!(filename = %filename, "exporting text");
        sink.save(&filename, &doc.full_text)
    }

    /// Hand the active document's markdown to the download collaborator
    pub fn export_markdown(&self) -> Result<()> {
        let outcome = self.active_outcome().ok_or(BrowserError::NoActiveDocument)?;
        let doc = outcome.document().ok_or(BrowserError::NoActiveDocument)?;
        let markdown = doc
            .rich_markdown()
            .ok_or_else(|| BrowserError::Export("document has no markdown".to_string()))?;
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| BrowserError::Export("no download collaborator".to_string()))?;

        let filename = format!("{}.md", file_stem(&outcome.filename));
        debug!(filename = %filename, "exporting markdown");
        sink.save(&filename, markdown)
    }

    /// Read the active page aloud, replacing any running playback
    pub fn speak_page(&mut self) -> Result<()> {
        let text = match self.view() {
            RenderedView::PageText { text, .. } => text,
            _ => {
                let doc = self.active_document().ok_or(BrowserError::NoActiveDocument)?;
                doc.full_text.clone()
            }
        };

        self.stop_playback();
        let speech = self
            .speech
            .as_ref()
            .ok_or_else(|| BrowserError::Playback("no speech collaborator".to_string()))?;
        self.playback = Some(speech.speak(&text)?);
        Ok(())
    }

    /// Stop the current playback, if any
    pub fn stop_playback(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            debug!("stopping speech playback");
            playback.stop();
        }
    }
}

fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}
