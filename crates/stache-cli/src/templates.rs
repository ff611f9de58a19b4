//! Templates shipped inside the `stache` binary.
//!
//! The `builtin` module holds the templates the CLI renders its own
//! listings with, plus a `hello.mustache` starter.  It is the default
//! `templates.module`, so user directories can shadow any of them.

use std::sync::Arc;

use include_dir::{Dir, include_dir};

use stache_adapters::{EmbeddedModule, EmbeddedTemplateLoader, ext_mustache};
use stache_core::{
    application::{HandlerRegistry, OutputService},
    domain::{HandlerLabel, RenderData, TemplateId},
    error::StacheResult,
};

pub const BUILTIN_MODULE: &str = "builtin";

static BUILTIN_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Every module `templates.module` may name.
pub static MODULES: [EmbeddedModule; 1] = [EmbeddedModule::new(BUILTIN_MODULE, &BUILTIN_DIR)];

/// Render one of the built-in templates through the Mustache handler.
pub fn render_builtin(template: &str, data: &RenderData) -> StacheResult<String> {
    let registry = HandlerRegistry::global();
    ext_mustache::load(registry)?;

    let loader = Arc::new(EmbeddedTemplateLoader::new(MODULES[0]));
    let label = HandlerLabel::from_static(ext_mustache::LABEL);
    let service = OutputService::from_registry(registry, &label, loader)?;
    service.render(data, &TemplateId::new(template)?)
}
