//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stache-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateLoader`: Template lookup
//!   - `TemplateEngine`: Template rendering
//!   - `OutputHandler`: Data-to-text conversion under a label
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `OutputService` (see `crate::application::services`)

pub mod output;

pub use output::{OutputHandler, TemplateEngine, TemplateLoader};
#[cfg(test)]
pub use output::{MockOutputHandler, MockTemplateEngine, MockTemplateLoader};
