//! Highlight language selection

use std::path::Path;

/// Which highlighter a text buffer is run through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightLanguage {
    /// SQL-like query language
    Sql,
    /// JSON documents, pretty-printed
    Json,
    /// No highlighting: one run in a single color
    #[default]
    PlainText,
}

impl HighlightLanguage {
    /// Get a human-readable name for this language
    pub fn name(&self) -> &'static str {
        match self {
            HighlightLanguage::Sql => "SQL",
            HighlightLanguage::Json => "JSON",
            HighlightLanguage::PlainText => "Plain",
        }
    }

    /// Parse a language from its name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sql" | "n1ql" | "sqlpp" => Some(HighlightLanguage::Sql),
            "json" => Some(HighlightLanguage::Json),
            "plain" | "plaintext" | "text" => Some(HighlightLanguage::PlainText),
            _ => None,
        }
    }

    /// Detect language from filename
    pub fn detect(filename: &Path) -> Self {
        let ext = filename
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("sql" | "n1ql" | "sqlpp") => HighlightLanguage::Sql,
            Some("json") => HighlightLanguage::Json,
            _ => HighlightLanguage::PlainText,
        }
    }
}
