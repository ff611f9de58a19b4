//! In-memory template loader for testing and programmatic templates.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use stache_core::{
    application::{ApplicationError, TemplateLoader},
    domain::{TemplateId, TemplateOrigin, TemplateText},
    error::StacheResult,
};

use super::filesystem::{normalize_path, not_found};

/// Thread-safe in-memory template loader.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLoader {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTemplateLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, id: &str, source: impl Into<String>) -> Self {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(normalize_path(id), source.into());
        self
    }

    /// Add or replace a template.
    pub fn insert(&self, id: &str, source: impl Into<String>) -> StacheResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::RegistryLockError)?;
        inner.insert(normalize_path(id), source.into());
        Ok(())
    }

    /// Remove a template, returning whether it existed.
    pub fn remove(&self, id: &str) -> StacheResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::RegistryLockError)?;
        Ok(inner.remove(&normalize_path(id)).is_some())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateLoader for MemoryTemplateLoader {
    fn load_template(&self, id: &TemplateId) -> StacheResult<TemplateText> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::RegistryLockError)?;

        inner
            .get(&normalize_path(id.as_str()))
            .map(|source| TemplateText::new(source.clone(), TemplateOrigin::Memory))
            .ok_or_else(|| not_found(id, self.locations()))
    }

    fn list_templates(&self) -> StacheResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::RegistryLockError)?;
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn locations(&self) -> Vec<String> {
        vec![TemplateOrigin::Memory.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid(s: &str) -> TemplateId {
        TemplateId::new(s).unwrap()
    }

    #[test]
    fn insert_and_load() {
        let loader = MemoryTemplateLoader::new().with("a.mustache", "A");
        let text = loader.load_template(&tid("a.mustache")).unwrap();
        assert_eq!(text.as_str(), "A");
        assert_eq!(text.origin, TemplateOrigin::Memory);
    }

    #[test]
    fn clones_share_state() {
        let loader = MemoryTemplateLoader::new();
        let clone = loader.clone();
        clone.insert("shared.mustache", "S").unwrap();
        assert_eq!(loader.len(), 1);
        assert!(loader.load_template(&tid("shared.mustache")).is_ok());
    }

    #[test]
    fn remove_then_not_found() {
        let loader = MemoryTemplateLoader::new().with("gone.mustache", "x");
        assert!(loader.remove("gone.mustache").unwrap());
        assert!(!loader.remove("gone.mustache").unwrap());
        assert!(loader
            .load_template(&tid("gone.mustache"))
            .unwrap_err()
            .is_template_not_found());
        assert!(loader.is_empty());
    }

    #[test]
    fn builder_inserts_into_poisoned_map() {
        let loader = MemoryTemplateLoader::new();
        let holder = loader.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(loader.inner.is_poisoned());

        let loader = loader.with("late.mustache", "L");
        let inner = loader.inner.read().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(inner.get("late.mustache").map(String::as_str), Some("L"));
    }

    #[test]
    fn list_is_sorted() {
        let loader = MemoryTemplateLoader::new()
            .with("b.mustache", "")
            .with("a.mustache", "");
        assert_eq!(loader.list_templates().unwrap(), vec!["a.mustache", "b.mustache"]);
    }
}
