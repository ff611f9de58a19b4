//! Stache Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stache, a
//! pluggable output-handler host whose main handler renders Mustache
//! templates.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stache-cli (CLI)              │
//! │     (Host application, config, I/O)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   OutputService  +  HandlerRegistry     │
//! │   (label → handler, render, write)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (OutputHandler, TemplateLoader, Engine) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stache-adapters (Infrastructure)     │
//! │ (MustacheOutputHandler, loaders, engine)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stache_core::{
//!     application::{HandlerRegistry, OutputService},
//!     domain::{HandlerLabel, RenderData, TemplateId},
//! };
//!
//! // 1. Plugins register themselves
//! stache_adapters::ext_mustache::load(HandlerRegistry::global())?;
//!
//! // 2. Host resolves the configured handler
//! let service = OutputService::from_registry(
//!     HandlerRegistry::global(),
//!     &HandlerLabel::new("mustache")?,
//!     loader,
//! )?;
//!
//! // 3. Render
//! let data = RenderData::new().with("name", "World");
//! let text = service.render(&data, &TemplateId::new("hello.mustache")?)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        HandlerFactory, HandlerRegistry, OutputService,
        ports::{OutputHandler, TemplateEngine, TemplateLoader},
    };
    pub use crate::domain::{
        HandlerLabel, RenderData, TemplateId, TemplateOrigin, TemplateSettings, TemplateText,
    };
    pub use crate::error::{StacheError, StacheResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
