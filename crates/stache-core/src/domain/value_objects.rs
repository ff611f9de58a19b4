//! Identifier value objects.
//!
//! Both types validate at construction and are otherwise opaque strings:
//! resolving a [`TemplateId`] is the loader's job, resolving a
//! [`HandlerLabel`] is the registry's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

// ============================================================================
// TemplateId
// ============================================================================

/// Path of a template, relative to a template directory or module.
///
/// Invariant: never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidTemplateId {
                id,
                reason: "template id cannot be empty".into(),
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TemplateId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// HandlerLabel
// ============================================================================

/// Name under which an output handler is registered.
///
/// Invariant: non-empty, made of ASCII lowercase letters, digits, `-` and `_`,
/// starting with a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandlerLabel(String);

impl HandlerLabel {
    pub fn new(label: impl Into<String>) -> Result<Self, DomainError> {
        let label = label.into();

        let Some(first) = label.chars().next() else {
            return Err(DomainError::InvalidLabel {
                label,
                reason: "label cannot be empty".into(),
            });
        };

        if !first.is_ascii_lowercase() {
            return Err(DomainError::InvalidLabel {
                label,
                reason: "label must start with a lowercase letter".into(),
            });
        }

        if let Some(bad) = label
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidLabel {
                reason: format!("unexpected character '{bad}'"),
                label,
            });
        }

        Ok(Self(label))
    }

    /// Build a label from a compile-time constant known to be valid.
    pub fn from_static(label: &'static str) -> Self {
        debug_assert!(Self::new(label).is_ok(), "invalid static label: {label}");
        Self(label.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HandlerLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HandlerLabel {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<HandlerLabel> for String {
    fn from(label: HandlerLabel) -> Self {
        label.0
    }
}

impl fmt::Display for HandlerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
