//! Syntax and styling module
//!
//! This module turns raw text into colored runs:
//! - SQL-like queries, via a hand-written lexer
//! - JSON, via a pretty-printer
//! - Plain text, as a single run

mod style;
mod tokens;
mod palette;
mod language;
mod sql;
mod json;
mod highlighter;

pub use style::{Color, Emphasis, Run, RunSequence};
pub use tokens::TokenType;
pub use palette::{resolve, ColorPalette, Theme};
pub use language::HighlightLanguage;
pub use sql::{is_keyword, SqlLexer, SQL_KEYWORDS};
pub use json::format_json;
pub use highlighter::{tokenize, Highlighter};
