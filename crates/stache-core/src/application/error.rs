//! Application layer errors.
//!
//! These errors represent failures in loading, rendering and handler
//! lookup. Validation failures on identifiers are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while producing output.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No loader could resolve the template id.
    #[error("Could not locate template: {id}")]
    TemplateNotFound { id: String, searched: Vec<String> },

    /// The template exists but could not be read.
    #[error("Failed to read template {path}: {reason}")]
    TemplateUnreadable { path: PathBuf, reason: String },

    /// The templating engine rejected the template or the data.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// No handler registered under the label.
    #[error("No output handler registered under '{label}'")]
    HandlerNotFound { label: String },

    /// A handler is already registered under the label.
    #[error("Output handler '{label}' is already registered")]
    DuplicateHandler { label: String },

    /// Registry or loader lock poisoned.
    #[error("Handler registry lock poisoned")]
    RegistryLockError,

    /// Writing rendered output failed.
    #[error("Failed to write output: {reason}")]
    OutputFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { id, searched } => {
                let mut out = vec![format!("'{}' was not found in any template location", id)];
                if searched.is_empty() {
                    out.push("No template locations are configured".into());
                } else {
                    out.push("Searched:".into());
                    out.extend(searched.iter().map(|s| format!("  • {s}")));
                }
                out.push("Add a directory with --template-dir or templates.dirs".into());
                out
            }
            Self::TemplateUnreadable { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check file permissions and that the file is UTF-8 text".into(),
            ],
            Self::RenderingFailed { reason } => vec![
                format!("The template engine reported: {}", reason),
                "Check for unclosed tags or sections in the template".into(),
            ],
            Self::HandlerNotFound { label } => vec![
                format!("'{}' is not a registered output handler", label),
                "Try: stache handlers to see what is available".into(),
            ],
            Self::DuplicateHandler { label } => vec![
                format!("A handler named '{}' was registered twice", label),
                "This is likely a plugin loading bug".into(),
            ],
            Self::RegistryLockError => vec![
                "The handler registry is in an inconsistent state".into(),
                "Try again in a moment".into(),
            ],
            Self::OutputFailed { .. } => vec![
                "Check that the output destination is writable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::HandlerNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::DuplicateHandler { .. } => ErrorCategory::Configuration,
            Self::TemplateUnreadable { .. }
            | Self::RegistryLockError
            | Self::OutputFailed { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` for the "template not found" kind, which chained loaders
    /// skip past.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}
