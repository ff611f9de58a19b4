//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "render this data through the configured handler".

pub mod output_service;

pub use output_service::OutputService;
