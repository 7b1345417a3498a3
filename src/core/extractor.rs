//! Bounded page extraction
//!
//! Walks the leading pages of a [`PageSource`] in order and collects their
//! text into a [`Document`].

use tracing::debug;

use crate::core::{Document, Page};
use crate::error::Result;

/// Anything that can report a page count and hand out per-page text.
pub trait PageSource {
    /// Number of pages in the underlying document
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (0-based). `Ok(None)` means the page has no text.
    fn page_text(&self, index: usize) -> Result<Option<String>>;
}

impl PageSource for Vec<Option<String>> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        Ok(self.get(index).cloned().flatten())
    }
}

/// Number of pages a run will look at
pub fn pages_to_process(page_count: usize, max_pages: usize) -> usize {
    page_count.min(max_pages)
}

/// Extracts pages `0..min(page_count, max_pages)` in ascending order.
///
/// The first failing page aborts the whole extraction.
pub fn extract_document(source: &dyn PageSource, max_pages: usize) -> Result<Document> {
    let total_pages = source.page_count();
    let count = pages_to_process(total_pages, max_pages);

    let mut pages = Vec::with_capacity(count);
    for index in 0..count {
        let text = source.page_text(index)?;
        debug!(
            page = index,
            chars = text.as_deref().map_or(0, |t| t.chars().count()),
            "extracted page"
        );
        pages.push(Page::new(index, text));
    }

    Ok(Document::new(total_pages, pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExtractedText;
    use crate::error::ContextError;
    use std::cell::RefCell;

    /// Records which pages were requested
    struct TracingSource {
        pages: Vec<Option<String>>,
        requested: RefCell<Vec<usize>>,
        fail_at: Option<usize>,
    }

    impl TracingSource {
        fn numbered(n: usize) -> Self {
            Self {
                pages: (0..n).map(|i| Some(format!("page {}", i))).collect(),
                requested: RefCell::new(Vec::new()),
                fail_at: None,
            }
        }
    }

    impl PageSource for TracingSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, index: usize) -> Result<Option<String>> {
            self.requested.borrow_mut().push(index);
            if self.fail_at == Some(index) {
                return Err(ContextError::Extract {
                    page: index,
                    message: "corrupt content stream".to_string(),
                });
            }
            Ok(self.pages[index].clone())
        }
    }

    #[test]
    fn test_cap_limits_pages_to_first_twenty() -> Result<()> {
        let source = TracingSource::numbered(35);
        let document = extract_document(&source, 20)?;

        assert_eq!(document.total_pages, 35);
        assert_eq!(document.pages.len(), 20);
        assert_eq!(*source.requested.borrow(), (0..20).collect::<Vec<_>>());
        assert_eq!(document.pages.last().map(|p| p.index), Some(19));
        Ok(())
    }

    #[test]
    fn test_short_document_reads_every_page() -> Result<()> {
        let source = TracingSource::numbered(3);
        let document = extract_document(&source, 20)?;

        assert_eq!(document.pages.len(), 3);
        assert_eq!(
            ExtractedText::from_document(&document).as_str(),
            "page 0\npage 1\npage 2\n"
        );
        Ok(())
    }

    #[test]
    fn test_exactly_cap_pages() -> Result<()> {
        let source = TracingSource::numbered(20);
        assert_eq!(extract_document(&source, 20)?.pages.len(), 20);
        Ok(())
    }

    #[test]
    fn test_failure_stops_extraction() {
        let mut source = TracingSource::numbered(10);
        source.fail_at = Some(4);

        let err = extract_document(&source, 20).unwrap_err();
        assert!(matches!(err, ContextError::Extract { page: 4, .. }));
        assert_eq!(*source.requested.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_blank_middle_page_is_skipped() -> Result<()> {
        let source: Vec<Option<String>> = vec![
            Some("Hello".to_string()),
            Some(String::new()),
            Some("World".to_string()),
        ];
        let document = extract_document(&source, 20)?;
        assert_eq!(
            ExtractedText::from_document(&document).as_str(),
            "Hello\nWorld\n"
        );
        Ok(())
    }

    #[test]
    fn test_order_follows_page_index() -> Result<()> {
        let forward: Vec<Option<String>> = vec![Some("a".into()), Some("b".into())];
        let reversed: Vec<Option<String>> = vec![Some("b".into()), Some("a".into())];

        let f = ExtractedText::from_document(&extract_document(&forward, 20)?);
        let r = ExtractedText::from_document(&extract_document(&reversed, 20)?);
        assert_eq!(f.as_str(), "a\nb\n");
        assert_eq!(r.as_str(), "b\na\n");
        Ok(())
    }
}
