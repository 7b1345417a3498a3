//! Core module for pdf-context
//!
//! This module contains the document model and the bounded extraction loop.

pub mod extractor;
mod types;

pub use extractor::{PageSource, extract_document, pages_to_process};
pub use types::*;
