//! Style types for colored output
//!
//! This module provides the foundation for highlighted rendering:
//! 24-bit colors, emphasis, and the `Run` / `RunSequence` output of
//! a highlight pass.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LensError, Result};

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

fn hex_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^#?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").ok())
        .as_ref()
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(text: &str) -> Result<Self> {
        let caps = hex_pattern()
            .and_then(|pattern| pattern.captures(text.trim()))
            .ok_or_else(|| LensError::InvalidColor(text.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16).map_err(|_| LensError::InvalidColor(text.to_string()))
        };
        Ok(Self::rgb(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Text emphasis of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    #[default]
    None,
    Bold,
}

impl Emphasis {
    pub fn is_bold(&self) -> bool {
        matches!(self, Emphasis::Bold)
    }
}

/// A contiguous piece of text sharing one color and emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub color: Color,
    pub emphasis: Emphasis,
}

impl Run {
    /// Create a run with no emphasis
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            emphasis: Emphasis::None,
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.emphasis = Emphasis::Bold;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.emphasis.is_bold()
    }
}

/// Ordered output of one highlight pass
///
/// Replaced wholesale on every pass, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSequence {
    runs: Vec<Run>,
}

impl RunSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    pub fn as_slice(&self) -> &[Run] {
        &self.runs
    }

    pub fn into_vec(self) -> Vec<Run> {
        self.runs
    }

    /// Concatenation of every run's text
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

impl From<Vec<Run>> for RunSequence {
    fn from(runs: Vec<Run>) -> Self {
        Self { runs }
    }
}

impl<'a> IntoIterator for &'a RunSequence {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
