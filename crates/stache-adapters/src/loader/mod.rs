//! Template loader adapters.

mod chained;
mod embedded;
mod filesystem;
mod memory;

pub use chained::ChainedTemplateLoader;
pub use embedded::{EmbeddedModule, EmbeddedTemplateLoader};
pub use filesystem::FilesystemTemplateLoader;
pub use memory::MemoryTemplateLoader;
