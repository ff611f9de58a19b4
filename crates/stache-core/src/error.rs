//! Unified error handling for Stache Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stache Core operations.
///
/// Output handlers propagate loader and engine failures through this type
/// without rewrapping them.
#[derive(Debug, Error, Clone)]
pub enum StacheError {
    /// Errors from the domain layer (invalid identifiers or data).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading, rendering, registry).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StacheError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stache".into(),
                "Please report this issue at: https://github.com/cosecruz/stache/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when a loader failed to resolve a template id.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_not_found())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StacheResult<T> = Result<T, StacheError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> StacheResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> StacheResult<T> {
        self.map_err(|e| StacheError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_validation() {
        let err: StacheError = DomainError::InvalidData("x".into()).into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn not_found_detection() {
        let err: StacheError = ApplicationError::TemplateNotFound {
            id: "a".into(),
            searched: vec![],
        }
        .into();
        assert!(err.is_template_not_found());
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let other: StacheError = ApplicationError::RenderingFailed {
            reason: "bad".into(),
        }
        .into();
        assert!(!other.is_template_not_found());
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.context("writing output").unwrap_err();
        assert!(matches!(err, StacheError::Internal { message } if message.contains("boom")));
    }
}
