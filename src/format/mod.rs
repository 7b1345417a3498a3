//! Output format modules for pdf-context

pub mod script;

pub use script::{encode_literal, parse_statement, render_statement};
