//! Result browsing: selection state, view derivation, and composition

pub mod selection;
pub mod session;
pub mod view;

pub use selection::{resolve_page, resolve_rich_page, tables_on_page, SelectionState, ViewMode};
pub use session::{PlaybackHandle, ResultBrowser, SpeechPlayer, TextSink};
pub use view::{render, PageDiagnostics, RenderedView, TableView};
