//! Token categories for highlighting
//!
//! Every run produced by the highlighter belongs to one of these
//! categories; the palette maps each category to a color.

/// Semantic token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Plain text, whitespace, punctuation, identifiers
    Default,
    /// Query language keywords (SELECT, FROM, ...)
    Keyword,
    /// Quoted strings
    String,
    /// Numeric literals
    Number,
    /// Line and block comments
    Comment,
    /// JSON object keys
    PropertyName,
    /// JSON true/false/null
    Boolean,
}

impl TokenType {
    /// Whether runs of this category are drawn bold
    pub fn is_bold(&self) -> bool {
        matches!(self, TokenType::Keyword)
    }

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Default => "Default",
            TokenType::Keyword => "Keyword",
            TokenType::String => "String",
            TokenType::Number => "Number",
            TokenType::Comment => "Comment",
            TokenType::PropertyName => "PropertyName",
            TokenType::Boolean => "Boolean",
        }
    }

    /// Parse a token type from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Default" => Some(TokenType::Default),
            "Keyword" => Some(TokenType::Keyword),
            "String" => Some(TokenType::String),
            "Number" => Some(TokenType::Number),
            "Comment" => Some(TokenType::Comment),
            "PropertyName" => Some(TokenType::PropertyName),
            "Boolean" => Some(TokenType::Boolean),
            _ => None,
        }
    }
}
