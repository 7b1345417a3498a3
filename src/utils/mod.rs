//! Utility modules for pdf-context

pub mod pdf;
