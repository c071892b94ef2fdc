//! Theme palettes
//!
//! Two fixed seven-color tables, one per theme.

use super::style::Color;
use super::tokens::TokenType;

/// Light or dark application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse "light" / "dark" (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Color for unhighlighted text: black on light, white on dark
    pub fn plain_text_color(&self) -> Color {
        match self {
            Theme::Light => Color::BLACK,
            Theme::Dark => Color::WHITE,
        }
    }
}

/// Colors for each token category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub default: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub comment: Color,
    pub property_name: Color,
    pub boolean: Color,
}

const LIGHT: ColorPalette = ColorPalette {
    default: Color::rgb(0x20, 0x20, 0x20),
    keyword: Color::rgb(0x00, 0x66, 0xCC),
    string: Color::rgb(0xA3, 0x15, 0x15),
    number: Color::rgb(0x09, 0x86, 0x58),
    comment: Color::rgb(0x6A, 0x99, 0x55),
    property_name: Color::rgb(0x1A, 0x4B, 0x94),
    boolean: Color::rgb(0xB0, 0x00, 0xB5),
};

const DARK: ColorPalette = ColorPalette {
    default: Color::rgb(0xE8, 0xE8, 0xE8),
    keyword: Color::rgb(0x4F, 0xC1, 0xFF),
    string: Color::rgb(0xCE, 0x91, 0x78),
    number: Color::rgb(0xB5, 0xCE, 0xA8),
    comment: Color::rgb(0x6A, 0x99, 0x55),
    property_name: Color::rgb(0x4E, 0xC9, 0xB0),
    boolean: Color::rgb(0xC5, 0x86, 0xC0),
};

impl ColorPalette {
    /// Look up the palette for a theme
    pub fn resolve(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn color_for(&self, token_type: TokenType) -> Color {
        match token_type {
            TokenType::Default => self.default,
            TokenType::Keyword => self.keyword,
            TokenType::String => self.string,
            TokenType::Number => self.number,
            TokenType::Comment => self.comment,
            TokenType::PropertyName => self.property_name,
            TokenType::Boolean => self.boolean,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::resolve(Theme::default())
    }
}

/// Look up the palette for a theme
pub fn resolve(theme: Theme) -> ColorPalette {
    ColorPalette::resolve(theme)
}
