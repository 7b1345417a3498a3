//! Error types for pdf-context
//!
//! Every failure aborts the run before the output file is touched, so a
//! single enum covers the whole pipeline. Variants only exist to make the
//! reported cause more precise.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to extract text from page {page}: {message}")]
    Extract { page: usize, message: String },

    #[error("failed to encode extracted text: {0}")]
    Encode(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ContextError>;
