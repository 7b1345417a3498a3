pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{Backend, ContextConfig};
pub use crate::core::{Document, ExtractedText, Page, PageSource, RunSummary};
pub use error::{ContextError, Result};
pub use runner::{render, render_source, run, run_with_source};
