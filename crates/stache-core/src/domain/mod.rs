//! Core domain layer for Stache.
//!
//! Pure types with no I/O: identifiers, the render data mapping, loaded
//! template text and loader settings. Loading and rendering happen behind
//! the ports in [`crate::application::ports`].

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{RenderData, TemplateOrigin, TemplateSettings, TemplateText};
pub use error::DomainError;
pub use value_objects::{HandlerLabel, TemplateId};
