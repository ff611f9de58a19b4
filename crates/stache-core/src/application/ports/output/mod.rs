//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stache-adapters` crate provides implementations.

use crate::domain::{HandlerLabel, RenderData, TemplateId, TemplateText};
use crate::error::StacheResult;

/// Port for template lookup.
///
/// Implemented by:
/// - `stache_adapters::loader::FilesystemTemplateLoader` (template directories)
/// - `stache_adapters::loader::EmbeddedTemplateLoader` (compiled-in modules)
/// - `stache_adapters::loader::MemoryTemplateLoader` (testing)
/// - `stache_adapters::loader::ChainedTemplateLoader` (search order)
///
/// A miss must be reported as `ApplicationError::TemplateNotFound` so that
/// chained loaders can tell it apart from a real failure.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateLoader: Send + Sync {
    /// Resolve `id` to raw template text.
    fn load_template(&self, id: &TemplateId) -> StacheResult<TemplateText>;

    /// Every template id this loader can resolve, sorted.
    fn list_templates(&self) -> StacheResult<Vec<String>>;

    /// Human-readable description of where this loader looks.
    fn locations(&self) -> Vec<String>;
}

/// Port for a templating engine.
///
/// Implemented by:
/// - `stache_adapters::engine::MustacheEngine`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Render `template` against `data`.
    fn render(&self, template: &str, data: &RenderData) -> StacheResult<String>;
}

/// Port for an output handler: turns a data mapping into text.
///
/// Implemented by:
/// - `stache_adapters::ext_mustache::MustacheOutputHandler`
#[cfg_attr(test, mockall::automock)]
pub trait OutputHandler: Send + Sync {
    /// Label this handler is registered under.
    fn label(&self) -> &HandlerLabel;

    /// Render `data` with the template named by `template`.
    fn render(&self, data: &RenderData, template: &TemplateId) -> StacheResult<String>;
}
