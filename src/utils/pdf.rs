//! PDF backends
//!
//! Both backends load the whole file into memory and expose it as a
//! [`PageSource`]. `pdf_extract` can panic on malformed input instead of
//! returning an error, so its calls run under [`std::panic::catch_unwind`]
//! with a silent panic hook installed for the duration of the call.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::config::Backend;
use crate::core::PageSource;
use crate::error::{ContextError, Result};

/// Reads `path` and loads it with the requested backend.
pub fn open(path: &Path, backend: Backend) -> Result<Box<dyn PageSource>> {
    if !path.exists() {
        return Err(ContextError::InputNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ContextError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), ?backend, "loaded input");

    let source: Box<dyn PageSource> = match backend {
        Backend::Lopdf => Box::new(LopdfSource::from_bytes(&bytes, path)?),
        Backend::PdfExtract => Box::new(LayoutSource::from_bytes(&bytes, path)?),
    };
    Ok(source)
}

/// Per-page extraction on top of `lopdf`'s page tree.
pub struct LopdfSource {
    doc: lopdf::Document,
    /// 1-based page numbers in ascending order
    page_numbers: Vec<u32>,
}

impl LopdfSource {
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| ContextError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if doc.is_encrypted() {
            warn!(path = %path.display(), "document is encrypted; extracted text may be empty");
        }
        let page_numbers = doc.get_pages().into_keys().collect();
        Ok(Self { doc, page_numbers })
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        let number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| ContextError::Extract {
                page: index,
                message: "page out of range".to_string(),
            })?;

        let text = self
            .doc
            .extract_text(&[number])
            .map_err(|e| ContextError::Extract {
                page: index,
                message: e.to_string(),
            })?;

        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}

/// Serializes panic hook swaps between threads
static HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Whole-document extraction through `pdf_extract`, which reflows text by layout.
pub struct LayoutSource {
    pages: Vec<String>,
}

impl LayoutSource {
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self> {
        // The caught panic becomes a Parse error; keep the default hook from
        // printing it to stderr as well.
        let result = {
            let _guard = HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let hook = panic::take_hook();
            panic::set_hook(Box::new(|_| {}));
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                pdf_extract::extract_text_from_mem_by_pages(bytes)
            }));
            panic::set_hook(hook);
            result
        };
        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                return Err(ContextError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(ContextError::Parse {
                    path: path.to_path_buf(),
                    message: "pdf-extract panicked (malformed document)".to_string(),
                });
            }
        };
        Ok(Self { pages })
    }
}

impl PageSource for LayoutSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        match self.pages.get(index) {
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => Ok(Some(text.clone())),
            None => Err(ContextError::Extract {
                page: index,
                message: "page out of range".to_string(),
            }),
        }
    }
}
