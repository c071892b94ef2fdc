//! querylens - highlighted query and result views
//!
//! The `syntax` module turns query text or JSON into colored runs. The
//! `surface` module keeps an editable text layer and a colored render layer
//! in step as the text, language or theme changes.

pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod picker;
pub mod surface;
pub mod syntax;
pub mod terminal;

pub use config::Config;
pub use error::{LensError, Result};
pub use surface::{TextBuffer, TextSurface, ThemeNotifier};
pub use syntax::{tokenize, ColorPalette, HighlightLanguage, Run, RunSequence, Theme};
pub use terminal::TerminalRenderer;
