//! Application layer for Stache.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (OutputService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Registry**: Label-to-handler lookup used by plugins and the host
//! - **Errors**: Application-specific error types

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

// Re-export main services
pub use services::OutputService;

pub use registry::{HandlerFactory, HandlerRegistry};

// Re-export port traits (for adapter implementation)
pub use ports::{OutputHandler, TemplateEngine, TemplateLoader};

pub use error::ApplicationError;
