use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, Result};

/// Config file picked up from the current directory when present
pub const CONFIG_FILE_NAME: &str = "pdf-context.toml";

pub const DEFAULT_INPUT: &str = "website/assets/document.pdf";
pub const DEFAULT_OUTPUT: &str = "website/assets/context.js";
pub const DEFAULT_MAX_PAGES: usize = 20;
pub const DEFAULT_GLOBAL_NAME: &str = "extractedPDFContext";

/// PDF library used to load pages and pull text out of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Page tree walk with per-page extraction; pages past the cap are never decoded
    #[default]
    Lopdf,
    /// Layout-aware extraction of the whole document
    PdfExtract,
}

/// Main configuration for pdf-context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Path to the source PDF
    pub input: PathBuf,
    /// Path of the generated script asset
    pub output: PathBuf,
    /// Upper bound on the number of leading pages to extract
    pub max_pages: usize,
    /// `window` property the generated statement assigns
    pub global_name: String,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ascii_only: bool,
    pub backend: Backend,
    /// Enable debug logging
    pub verbose: bool,
}

impl ContextConfig {
    /// Checks values that would otherwise produce a malformed asset.
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(ContextError::Config(
                "max_pages must be at least 1".to_string(),
            ));
        }
        if !is_js_identifier(&self.global_name) {
            return Err(ContextError::Config(format!(
                "global name {:?} is not a valid JavaScript identifier",
                self.global_name
            )));
        }
        Ok(())
    }

    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ContextError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content)
            .map_err(|e| ContextError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Loads `pdf-context.toml` from the current directory if it exists.
    pub fn discover() -> Result<Option<Self>> {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load_from_file(path).map(Some)
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_pages: DEFAULT_MAX_PAGES,
            global_name: DEFAULT_GLOBAL_NAME.to_string(),
            ascii_only: true,
            backend: Backend::Lopdf,
            verbose: false,
        }
    }
}

/// Plain identifier check (`[A-Za-z_$][A-Za-z0-9_$]*`); unicode identifiers are not accepted.
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
