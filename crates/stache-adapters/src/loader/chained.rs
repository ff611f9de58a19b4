//! Ordered search across several loaders.

use std::{collections::BTreeSet, sync::Arc};

use tracing::{debug, instrument};

use stache_core::{
    application::TemplateLoader,
    domain::{TemplateId, TemplateSettings, TemplateText},
    error::{StacheError, StacheResult},
};

use super::{
    embedded::{EmbeddedModule, EmbeddedTemplateLoader},
    filesystem::{FilesystemTemplateLoader, not_found},
};

/// Tries each loader in turn.
///
/// A "template not found" answer moves on to the next loader; any other
/// error ends the search and is returned as-is.
#[derive(Clone, Default)]
pub struct ChainedTemplateLoader {
    loaders: Vec<Arc<dyn TemplateLoader>>,
}

impl ChainedTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, loader: impl TemplateLoader + 'static) -> Self {
        self.push(Arc::new(loader));
        self
    }

    pub fn push(&mut self, loader: Arc<dyn TemplateLoader>) {
        self.loaders.push(loader);
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Build the standard search order from settings: every template
    /// directory first, then the named embedded module.
    ///
    /// # Errors
    ///
    /// `StacheError::Configuration` if `settings.module` names a module not
    /// present in `modules`.
    pub fn from_settings(
        settings: &TemplateSettings,
        modules: &[EmbeddedModule],
    ) -> StacheResult<Self> {
        let mut chain = Self::new();

        if !settings.dirs.is_empty() {
            chain.push(Arc::new(FilesystemTemplateLoader::new(
                settings.dirs.iter().cloned(),
            )));
        }

        if let Some(name) = &settings.module {
            let module = modules
                .iter()
                .find(|m| m.name == name.as_str())
                .ok_or_else(|| StacheError::Configuration {
                    message: format!(
                        "unknown template module '{}' (available: {})",
                        name,
                        modules.iter().map(|m| m.name).collect::<Vec<_>>().join(", ")
                    ),
                })?;
            chain.push(Arc::new(EmbeddedTemplateLoader::new(*module)));
        }

        debug!(loaders = chain.len(), "template search path built");
        Ok(chain)
    }
}

impl TemplateLoader for ChainedTemplateLoader {
    #[instrument(skip(self), fields(id = %id))]
    fn load_template(&self, id: &TemplateId) -> StacheResult<TemplateText> {
        for loader in &self.loaders {
            match loader.load_template(id) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_template_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Err(not_found(id, self.locations()))
    }

    fn list_templates(&self) -> StacheResult<Vec<String>> {
        let mut names = BTreeSet::new();
        for loader in &self.loaders {
            names.extend(loader.list_templates()?);
        }
        Ok(names.into_iter().collect())
    }

    fn locations(&self) -> Vec<String> {
        self.loaders.iter().flat_map(|l| l.locations()).collect()
    }
}
