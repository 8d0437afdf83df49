//! Submit files to an OCR backend and browse the results
//!
//! Usage:
//!   cargo run --example browse -- scan1.pdf scan2.png
//!
//! Configuration comes from `ocr-browser.toml` / `OCR_*` environment
//! variables (e.g. `OCR_SERVICE_URL`, `OCR_DOCUMENT_TYPE`).

use anyhow::Context;
use ocr_browser::{
    BatchRunner, BrowserConfig, InputFile, OcrServiceClient, ResultBrowser, UploadRequest, ViewMode,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BrowserConfig::load()
        .context("loading configuration")?
        .from_env();

    let mut files = Vec::new();
    for path in std::env::args().skip(1) {
        let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path))?;
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(path.clone());
        files.push(InputFile::new(name, bytes));
    }

    let request = UploadRequest::new(
        files,
        config.document_type,
        config.zero_retention,
        config.enable_layout,
    );

    let client = OcrServiceClient::new(config.clone())
        .map_err(|e| anyhow::anyhow!("building client: {}", e))?;
    let mut browser = ResultBrowser::new(BatchRunner::new(config.max_docs_per_batch));

    browser.run_batch(request, &client).await;

    for (index, outcome) in browser.outcomes().iter().enumerate() {
        let status = match outcome.error_message() {
            Some(message) => format!("FAILED - {}", message),
            None => "ok".to_string(),
        };
        println!("[{}] {} ({})", index, outcome.filename, status);
    }

    // Walk every file and show each available view for its first page.
    for index in 0..browser.outcomes().len() {
        browser.select_file(index);
        let available: Vec<ViewMode> = match browser.active_document() {
            Some(doc) => ViewMode::ALL
                .into_iter()
                .filter(|mode| mode.is_available(doc))
                .collect(),
            None => continue,
        };

        println!("\n=== {} ===", browser.outcomes()[index].filename);

        for mode in available {
            if mode == ViewMode::Raw {
                continue; // noisy; use the raw view interactively
            }
            browser.select_view_mode(mode);
            println!("\n--- {} ---", mode.as_str());
            println!("{}", browser.view());
        }
    }

    Ok(())
}
