//! Core types shared across pdf-context modules

use std::path::PathBuf;

/// One page of a loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 0-based position in the document
    pub index: usize,
    /// Extracted text; `None` when the page layout yields nothing
    pub text: Option<String>,
}

impl Page {
    pub fn new(index: usize, text: Option<String>) -> Self {
        Self { index, text }
    }

    /// Text that contributes to the output, if any
    pub fn contributing_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// The leading pages of a PDF, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Page count reported by the source, including pages past the cap
    pub total_pages: usize,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(total_pages: usize, pages: Vec<Page>) -> Self {
        Self { total_pages, pages }
    }

    pub fn contributing_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.contributing_text().is_some())
            .count()
    }
}

/// Concatenated page text, each non-empty page followed by one newline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn from_document(document: &Document) -> Self {
        let mut text = String::new();
        for page_text in document.pages.iter().filter_map(Page::contributing_text) {
            text.push_str(page_text);
            text.push('\n');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters, not bytes
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub total_pages: usize,
    pub pages_considered: usize,
    pub pages_with_text: usize,
    pub chars_extracted: usize,
    pub bytes_written: usize,
}
