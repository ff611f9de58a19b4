//! Handler registry - label to output-handler factory.
//!
//! Plugins call [`HandlerRegistry::register`] once at load time; the host
//! resolves the configured label into a handler bound to its template
//! loader.

use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock, RwLock},
};

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{OutputHandler, TemplateLoader},
    },
    domain::HandlerLabel,
    error::StacheResult,
};

/// Builds a handler bound to the host's template loader.
pub type HandlerFactory = fn(Arc<dyn TemplateLoader>) -> Box<dyn OutputHandler>;

/// Thread-safe mapping of handler labels to factories.
pub struct HandlerRegistry {
    inner: RwLock<BTreeMap<HandlerLabel, HandlerFactory>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static HandlerRegistry {
        static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(HandlerRegistry::new)
    }

    /// Register `factory` under `label`.
    ///
    /// # Errors
    ///
    /// `ApplicationError::DuplicateHandler` if the label is taken.
    #[instrument(skip(self, factory), fields(label = %label))]
    pub fn register(&self, label: HandlerLabel, factory: HandlerFactory) -> StacheResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::RegistryLockError)?;

        if inner.contains_key(&label) {
            return Err(ApplicationError::DuplicateHandler {
                label: label.to_string(),
            }
            .into());
        }

        inner.insert(label, factory);
        debug!("output handler registered");
        Ok(())
    }

    /// Check whether a handler exists under `label`.
    pub fn is_registered(&self, label: &HandlerLabel) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains_key(label))
            .unwrap_or(false)
    }

    /// All registered labels, sorted.
    pub fn labels(&self) -> StacheResult<Vec<HandlerLabel>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::RegistryLockError)?;
        Ok(inner.keys().cloned().collect())
    }

    /// Build the handler registered under `label`, bound to `loader`.
    pub fn resolve(
        &self,
        label: &HandlerLabel,
        loader: Arc<dyn TemplateLoader>,
    ) -> StacheResult<Box<dyn OutputHandler>> {
        let factory = {
            let inner = self
                .inner
                .read()
                .map_err(|_| ApplicationError::RegistryLockError)?;
            *inner
                .get(label)
                .ok_or_else(|| ApplicationError::HandlerNotFound {
                    label: label.to_string(),
                })?
        };

        Ok(factory(loader))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockOutputHandler, MockTemplateLoader},
        domain::TemplateId,
        error::StacheError,
    };

    fn echo_factory(_loader: Arc<dyn TemplateLoader>) -> Box<dyn OutputHandler> {
        let mut handler = MockOutputHandler::new();
        handler
            .expect_label()
            .return_const(HandlerLabel::from_static("echo"));
        handler
            .expect_render()
            .returning(|_, template| Ok(format!("echo:{template}")));
        Box::new(handler)
    }

    fn loader() -> Arc<dyn TemplateLoader> {
        Arc::new(MockTemplateLoader::new())
    }

    #[test]
    fn register_and_resolve() {
        let registry = HandlerRegistry::new();
        registry
            .register(HandlerLabel::from_static("echo"), echo_factory)
            .unwrap();

        let handler = registry
            .resolve(&HandlerLabel::from_static("echo"), loader())
            .unwrap();
        let out = handler
            .render(&Default::default(), &TemplateId::new("t").unwrap())
            .unwrap();
        assert_eq!(out, "echo:t");
        assert_eq!(handler.label().as_str(), "echo");
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let registry = HandlerRegistry::new();
        let label = HandlerLabel::from_static("echo");
        registry.register(label.clone(), echo_factory).unwrap();

        let err = registry.register(label, echo_factory).unwrap_err();
        assert!(matches!(
            err,
            StacheError::Application(ApplicationError::DuplicateHandler { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_label_is_not_found() {
        let registry = HandlerRegistry::new();
        let err = registry
            .resolve(&HandlerLabel::from_static("nope"), loader())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StacheError::Application(ApplicationError::HandlerNotFound { label }) if label == "nope"
        ));
    }

    #[test]
    fn labels_are_sorted() {
        let registry = HandlerRegistry::new();
        registry
            .register(HandlerLabel::from_static("zeta"), echo_factory)
            .unwrap();
        registry
            .register(HandlerLabel::from_static("alpha"), echo_factory)
            .unwrap();

        let labels: Vec<String> = registry
            .labels()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(labels, vec!["alpha", "zeta"]);
        assert!(registry.is_registered(&HandlerLabel::from_static("alpha")));
        assert!(!registry.is_registered(&HandlerLabel::from_static("beta")));
    }

    #[test]
    fn global_is_a_single_instance() {
        let a = HandlerRegistry::global() as *const HandlerRegistry;
        let b = HandlerRegistry::global() as *const HandlerRegistry;
        assert_eq!(a, b);
    }
}
