//! Infrastructure adapters for Stache.
//!
//! This crate implements the ports defined in `stache-core::application::ports`:
//! template loaders over directories, compiled-in modules and memory, the
//! Mustache engine binding, and the `mustache` output handler extension.

pub mod engine;
pub mod ext_mustache;
pub mod loader;

// Re-export commonly used adapters
pub use engine::MustacheEngine;
pub use ext_mustache::MustacheOutputHandler;
pub use loader::{
    ChainedTemplateLoader, EmbeddedModule, EmbeddedTemplateLoader, FilesystemTemplateLoader,
    MemoryTemplateLoader,
};
