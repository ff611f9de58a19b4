//! Loaded template text and the settings loaders resolve against.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a piece of template text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Read from a file under a configured template directory.
    Directory(PathBuf),
    /// Found in an embedded template module.
    Module(String),
    /// Held in memory (programmatic or test templates).
    Memory,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Module(name) => write!(f, "module:{name}"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Raw template source as returned by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateText {
    pub source: String,
    pub origin: TemplateOrigin,
}

impl TemplateText {
    pub fn new(source: impl Into<String>, origin: TemplateOrigin) -> Self {
        Self {
            source: source.into(),
            origin,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Where loaders look for templates.
///
/// Directories are searched in order; the module, if set, is consulted
/// only after every directory missed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
    #[serde(default)]
    pub module: Option<String>,
}

impl TemplateSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Put `dirs` ahead of the configured directories.
    pub fn prepend_dirs(&mut self, dirs: impl IntoIterator<Item = PathBuf>) {
        let mut merged: Vec<PathBuf> = dirs.into_iter().collect();
        merged.append(&mut self.dirs);
        self.dirs = merged;
    }
}
