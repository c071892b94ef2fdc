//! Configuration file support
//!
//! Loads settings from ~/.querylens.toml (or %USERPROFILE%\.querylens.toml on Windows)
//!
//! Example:
//! ```text
//! # querylens configuration
//! theme = "dark"
//! plain-text-color = "#C0C0C0"
//! wrap-width = 100
//!
//! [editor]
//! font-size = 13
//! font-family = "Cascadia Mono"
//! padding = 2
//! placeholder = "Enter a query"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LensError, Result};
use crate::surface::LayoutProps;
use crate::syntax::{Color, Theme};

/// File contents as written by the user
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawConfig {
    theme: Option<String>,
    plain_text_color: Option<String>,
    wrap_width: Option<usize>,
    editor: RawEditor,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct RawEditor {
    font_size: Option<f32>,
    font_family: Option<String>,
    padding: Option<u16>,
    placeholder: Option<String>,
    read_only: Option<bool>,
    autosize: Option<bool>,
    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: Theme,
    /// Explicit PlainText color; `None` follows the theme
    pub plain_text_color: Option<Color>,
    /// Terminal column limit, 0 = no wrapping
    pub wrap_width: usize,
    /// Layout applied to both surface layers
    pub layout: LayoutProps,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            plain_text_color: None,
            wrap_width: 0,
            layout: LayoutProps::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".querylens.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".querylens.toml"))
        }
    }

    /// Load configuration, falling back to defaults
    ///
    /// A missing file is silent; a broken one is logged.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.apply(raw)?;
        Ok(config)
    }

    fn apply(&mut self, raw: RawConfig) -> Result<()> {
        for key in raw.unknown.keys() {
            warn!(key = %key, "ignoring unknown config key");
        }
        for key in raw.editor.unknown.keys() {
            warn!(key = %format!("editor.{key}"), "ignoring unknown config key");
        }

        if let Some(name) = raw.theme {
            self.theme = Theme::from_name(&name)
                .ok_or_else(|| LensError::Message(format!("unknown theme: {name}")))?;
        }

        if let Some(hex) = raw.plain_text_color {
            self.plain_text_color = Some(Color::from_hex(&hex)?);
        }

        if let Some(width) = raw.wrap_width {
            self.wrap_width = width;
        }

        let editor = raw.editor;
        if let Some(size) = editor.font_size {
            self.layout.font_size = size.clamp(6.0, 72.0);
        }
        if let Some(family) = editor.font_family {
            self.layout.font_family = family;
        }
        if let Some(padding) = editor.padding {
            self.layout.padding = padding.min(64);
        }
        if editor.placeholder.is_some() {
            self.layout.placeholder = editor.placeholder;
        }
        if let Some(read_only) = editor.read_only {
            self.layout.read_only = read_only;
        }
        if let Some(autosize) = editor.autosize {
            self.layout.autosize = autosize;
        }

        Ok(())
    }
}
