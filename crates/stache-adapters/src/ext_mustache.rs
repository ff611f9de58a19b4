//! Mustache output handler extension.
//!
//! Provides text output from templates written in the
//! [Mustache templating language](http://mustache.github.io).
//!
//! Register it once at startup, then select it by label:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stache_adapters::{ext_mustache, loader::FilesystemTemplateLoader};
//! use stache_core::{
//!     application::{HandlerRegistry, OutputService},
//!     domain::{HandlerLabel, RenderData, TemplateId},
//! };
//!
//! let registry = HandlerRegistry::global();
//! ext_mustache::load(registry)?;
//!
//! let loader = Arc::new(FilesystemTemplateLoader::new(["/usr/lib/myapp/templates"]));
//! let service = OutputService::from_registry(registry, &HandlerLabel::new("mustache")?, loader)?;
//!
//! let data = RenderData::new().with("name", "World");
//! let text = service.render(&data, &TemplateId::new("my_template.mustache")?)?;
//! # Ok::<(), stache_core::error::StacheError>(())
//! ```

use std::sync::Arc;

use tracing::debug;

use stache_core::{
    application::{
        ApplicationError, HandlerRegistry, OutputHandler, TemplateEngine, TemplateLoader,
    },
    domain::{HandlerLabel, RenderData, TemplateId},
    error::{StacheError, StacheResult},
};

use crate::engine::MustacheEngine;

/// Label the handler registers under.
pub const LABEL: &str = "mustache";

/// Output handler that renders Mustache templates found by a
/// [`TemplateLoader`].
pub struct MustacheOutputHandler {
    label: HandlerLabel,
    loader: Arc<dyn TemplateLoader>,
    engine: MustacheEngine,
}

impl MustacheOutputHandler {
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        Self::with_engine(loader, MustacheEngine::new())
    }

    /// Use a specific engine, e.g. one with a partials directory.
    pub fn with_engine(loader: Arc<dyn TemplateLoader>, engine: MustacheEngine) -> Self {
        Self {
            label: HandlerLabel::from_static(LABEL),
            loader,
            engine,
        }
    }

    /// Registry factory.
    pub fn factory(loader: Arc<dyn TemplateLoader>) -> Box<dyn OutputHandler> {
        Box::new(Self::new(loader))
    }
}

impl OutputHandler for MustacheOutputHandler {
    fn label(&self) -> &HandlerLabel {
        &self.label
    }

    /// Load `template` and render `data` with it.
    ///
    /// Loader and engine errors are returned unchanged.
    fn render(&self, data: &RenderData, template: &TemplateId) -> StacheResult<String> {
        debug!("rendering output using '{}' as a template.", template);
        let content = self.loader.load_template(template)?;
        self.engine.render(content.as_str(), data)
    }
}

/// Register [`MustacheOutputHandler`] under [`LABEL`].
///
/// Loading twice is a no-op: exactly one handler stays registered.
pub fn load(registry: &HandlerRegistry) -> StacheResult<()> {
    match registry.register(HandlerLabel::from_static(LABEL), MustacheOutputHandler::factory) {
        Ok(()) => Ok(()),
        Err(StacheError::Application(ApplicationError::DuplicateHandler { .. })) => {
            debug!(label = LABEL, "output handler already registered");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
