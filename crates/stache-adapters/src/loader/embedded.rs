//! Templates compiled into the binary.
//!
//! An application bundles a directory of templates with `include_dir!` and
//! exposes it under a module name; the `templates.module` setting then
//! selects it by that name.

use std::collections::BTreeSet;

use include_dir::{Dir, DirEntry};
use tracing::{debug, instrument};

use stache_core::{
    application::{ApplicationError, TemplateLoader},
    domain::{TemplateId, TemplateOrigin, TemplateText},
    error::StacheResult,
};

use super::filesystem::{confine, normalize_path, not_found};

/// A named, compiled-in template directory.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedModule {
    pub name: &'static str,
    pub dir: &'static Dir<'static>,
}

impl EmbeddedModule {
    pub const fn new(name: &'static str, dir: &'static Dir<'static>) -> Self {
        Self { name, dir }
    }
}

/// Loads templates from an [`EmbeddedModule`].
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTemplateLoader {
    module: EmbeddedModule,
}

impl EmbeddedTemplateLoader {
    pub fn new(module: EmbeddedModule) -> Self {
        Self { module }
    }

    pub fn module_name(&self) -> &'static str {
        self.module.name
    }
}

impl TemplateLoader for EmbeddedTemplateLoader {
    #[instrument(skip(self), fields(id = %id, module = self.module.name))]
    fn load_template(&self, id: &TemplateId) -> StacheResult<TemplateText> {
        let Some(relative) = confine(id.as_str()) else {
            return Err(not_found(id, self.locations()));
        };

        let Some(file) = self.module.dir.get_file(&relative) else {
            return Err(not_found(id, self.locations()));
        };

        let source = file
            .contents_utf8()
            .ok_or_else(|| ApplicationError::TemplateUnreadable {
                path: relative.clone(),
                reason: format!("not valid UTF-8 in module '{}'", self.module.name),
            })?;

        debug!("template located in embedded module");
        Ok(TemplateText::new(
            source,
            TemplateOrigin::Module(self.module.name.to_owned()),
        ))
    }

    fn list_templates(&self) -> StacheResult<Vec<String>> {
        let mut names = BTreeSet::new();
        collect_files(self.module.dir, &mut names);
        Ok(names.into_iter().collect())
    }

    fn locations(&self) -> Vec<String> {
        vec![TemplateOrigin::Module(self.module.name.to_owned()).to_string()]
    }
}

fn collect_files(dir: &Dir<'_>, names: &mut BTreeSet<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_files(sub, names),
            DirEntry::File(file) => {
                names.insert(normalize_path(&file.path().to_string_lossy()));
            }
        }
    }
}
