// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (errors cross the registry and service boundaries by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template id '{id}': {reason}")]
    InvalidTemplateId { id: String, reason: String },

    #[error("Invalid handler label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("Invalid render data: {0}")]
    InvalidData(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplateId { id, .. } => vec![
                format!("'{}' is not a usable template path", id),
                "Pass a path relative to a template directory, e.g. 'report.mustache'".into(),
            ],
            Self::InvalidLabel { .. } => vec![
                "Handler labels are lowercase identifiers such as 'mustache'".into(),
                "Try: stache handlers".into(),
            ],
            Self::InvalidData(msg) => vec![
                "Render data must be a mapping (a JSON object or TOML table)".into(),
                format!("Details: {}", msg),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
