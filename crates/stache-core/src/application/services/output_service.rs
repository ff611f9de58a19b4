//! Output Service - the host side of "render this data".
//!
//! Resolves the configured output handler and renders through it,
//! optionally writing the text to a stream as well as returning it.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError, HandlerRegistry,
        ports::{OutputHandler, TemplateLoader},
    },
    domain::{HandlerLabel, RenderData, TemplateId},
    error::StacheResult,
};

/// Renders data through a single output handler.
pub struct OutputService {
    handler: Box<dyn OutputHandler>,
}

impl OutputService {
    /// Wrap an already-built handler.
    pub fn new(handler: Box<dyn OutputHandler>) -> Self {
        Self { handler }
    }

    /// Resolve `label` in `registry` and bind it to `loader`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stache_core::application::{HandlerRegistry, OutputService};
    /// use stache_core::domain::HandlerLabel;
    ///
    /// let service = OutputService::from_registry(
    ///     HandlerRegistry::global(),
    ///     &HandlerLabel::new("mustache")?,
    ///     loader, // Arc<dyn TemplateLoader>
    /// )?;
    /// ```
    pub fn from_registry(
        registry: &HandlerRegistry,
        label: &HandlerLabel,
        loader: Arc<dyn TemplateLoader>,
    ) -> StacheResult<Self> {
        let handler = registry.resolve(label, loader)?;
        Ok(Self::new(handler))
    }

    /// Label of the handler in use.
    pub fn handler_label(&self) -> &HandlerLabel {
        self.handler.label()
    }

    /// Render `data` with `template` and return the text.
    #[instrument(skip_all, fields(handler = %self.handler.label(), template = %template))]
    pub fn render(&self, data: &RenderData, template: &TemplateId) -> StacheResult<String> {
        let text = self.handler.render(data, template)?;
        debug!(bytes = text.len(), "output rendered");
        Ok(text)
    }

    /// Render and write the text to `out`, returning it as well.
    pub fn render_to<W: Write + ?Sized>(
        &self,
        data: &RenderData,
        template: &TemplateId,
        out: &mut W,
    ) -> StacheResult<String> {
        let text = self.render(data, template)?;
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| ApplicationError::OutputFailed {
                reason: e.to_string(),
            })?;
        Ok(text)
    }
}
