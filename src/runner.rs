use tracing::{debug, info};

use crate::config::ContextConfig;
use crate::core::{ExtractedText, PageSource, RunSummary, extract_document, pages_to_process};
use crate::error::Result;
use crate::format::render_statement;
use crate::fs::write_atomic;
use crate::utils::pdf;

/// Extracts the leading pages and renders the asset statement without touching the output path.
pub fn render(config: &ContextConfig) -> Result<(String, RunSummary)> {
    config.validate()?;
    let source = pdf::open(&config.input, config.backend)?;
    render_source(config, source.as_ref())
}

/// Same as [`render`], over an already opened document.
pub fn render_source(
    config: &ContextConfig,
    source: &dyn PageSource,
) -> Result<(String, RunSummary)> {
    config.validate()?;

    let total_pages = source.page_count();
    info!(
        input = %config.input.display(),
        pages = total_pages,
        processing = pages_to_process(total_pages, config.max_pages),
        "opened document"
    );

    let document = extract_document(source, config.max_pages)?;
    let text = ExtractedText::from_document(&document);
    let chars_extracted = text.char_count();
    let statement =
        render_statement(&config.global_name, &text.into_string(), config.ascii_only)?;

    let summary = RunSummary {
        output: config.output.clone(),
        total_pages: document.total_pages,
        pages_considered: document.pages.len(),
        pages_with_text: document.contributing_pages(),
        chars_extracted,
        bytes_written: statement.len(),
    };
    debug!(?summary, "rendered statement");
    Ok((statement, summary))
}

/// Main entry point: open, extract, render, then replace the output file.
///
/// Nothing is written unless every earlier step succeeded.
pub fn run(config: &ContextConfig) -> Result<RunSummary> {
    let (statement, summary) = render(config)?;
    write(config, &statement, summary)
}

/// Like [`run`], but pages come from `source` instead of `config.input`.
pub fn run_with_source(config: &ContextConfig, source: &dyn PageSource) -> Result<RunSummary> {
    let (statement, summary) = render_source(config, source)?;
    write(config, &statement, summary)
}

fn write(config: &ContextConfig, statement: &str, summary: RunSummary) -> Result<RunSummary> {
    write_atomic(&config.output, statement)?;
    info!(
        output = %config.output.display(),
        bytes = summary.bytes_written,
        pages_with_text = summary.pages_with_text,
        "wrote context asset"
    );
    Ok(summary)
}
