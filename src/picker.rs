//! File and folder picker requests
//!
//! Platform pickers differ in what they can honour. A request is described
//! once here and trimmed to a platform's capabilities before it is handed to
//! that platform's dialog.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerKind {
    #[default]
    OpenFile,
    SaveFile,
    Folder,
}

/// Named group of file extensions, e.g. "Queries" → ["sql", "n1ql"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// What a platform picker supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerCapabilities {
    pub initial_directory: bool,
    pub title: bool,
    pub filters: bool,
}

impl PickerCapabilities {
    pub const ALL: PickerCapabilities = PickerCapabilities {
        initial_directory: true,
        title: true,
        filters: true,
    };
}

/// A picker request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerRequest {
    pub kind: PickerKind,
    pub title: Option<String>,
    pub initial_directory: Option<PathBuf>,
    pub filters: Vec<FileFilter>,
}

impl PickerRequest {
    pub fn new(kind: PickerKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Builder: set the dialog title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Builder: set the starting directory
    pub fn with_initial_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.initial_directory = Some(dir.into());
        self
    }

    /// Builder: add a file-type filter (ignored for folder pickers)
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Copy of this request without the fields `caps` cannot honour
    pub fn for_platform(&self, caps: PickerCapabilities) -> Self {
        Self {
            kind: self.kind,
            title: self.title.clone().filter(|_| caps.title),
            initial_directory: self.initial_directory.clone().filter(|_| caps.initial_directory),
            filters: if caps.filters && self.kind != PickerKind::Folder {
                self.filters.clone()
            } else {
                Vec::new()
            },
        }
    }
}
