//! Filesystem-based template loader.
//!
//! Searches an ordered list of template directories. The first directory
//! holding a regular file at `<dir>/<template id>` wins.
//!
//! # Directory layout expected
//!
//! ```text
//! /usr/share/myapp/templates/
//! ├── report.mustache
//! └── mail/
//!     └── welcome.mustache       ← id "mail/welcome.mustache"
//! ```
//!
//! Ids are always relative: absolute ids, and ids that climb out of the
//! directory with `..`, never resolve.

use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument, trace, warn};
use walkdir::WalkDir;

use stache_core::{
    application::{ApplicationError, TemplateLoader},
    domain::{TemplateId, TemplateOrigin, TemplateText},
    error::StacheResult,
};

/// Loads templates from an ordered list of directories.
///
/// Directories that do not exist are skipped rather than treated as errors,
/// so a default search path may name locations that are only sometimes
/// present.
///
/// # Example
///
/// ```no_run
/// use stache_adapters::loader::FilesystemTemplateLoader;
/// use stache_core::application::TemplateLoader;
/// use stache_core::domain::TemplateId;
///
/// let loader = FilesystemTemplateLoader::new(["./templates", "/usr/share/myapp/templates"]);
/// let text = loader.load_template(&TemplateId::new("report.mustache")?)?;
/// println!("{}", text.as_str());
/// # Ok::<(), stache_core::error::StacheError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    dirs: Vec<PathBuf>,
}

impl FilesystemTemplateLoader {
    /// Create a loader searching `dirs` in order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl TemplateLoader for FilesystemTemplateLoader {
    #[instrument(skip(self), fields(id = %id))]
    fn load_template(&self, id: &TemplateId) -> StacheResult<TemplateText> {
        let Some(relative) = confine(id.as_str()) else {
            warn!("template id escapes the template root; refusing to resolve");
            return Err(not_found(id, self.locations()));
        };

        for dir in &self.dirs {
            let path = dir.join(&relative);
            if !path.is_file() {
                trace!(path = %path.display(), "no template here");
                continue;
            }

            let source =
                fs::read_to_string(&path).map_err(|e| ApplicationError::TemplateUnreadable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            debug!(path = %path.display(), "template located");
            return Ok(TemplateText::new(source, TemplateOrigin::Directory(path)));
        }

        Err(not_found(id, self.locations()))
    }

    fn list_templates(&self) -> StacheResult<Vec<String>> {
        let mut names = BTreeSet::new();

        for dir in self.dirs.iter().filter(|d| d.is_dir()) {
            for entry in WalkDir::new(dir).min_depth(1) {
                let entry = entry.map_err(|e| ApplicationError::TemplateUnreadable {
                    path: dir.clone(),
                    reason: format!("directory walk error: {e}"),
                })?;

                if !entry.file_type().is_file() {
                    continue;
                }

                // Walk entries always live under `dir`.
                if let Ok(rel) = entry.path().strip_prefix(dir) {
                    names.insert(normalize_path(&rel.to_string_lossy()));
                }
            }
        }

        Ok(names.into_iter().collect())
    }

    fn locations(&self) -> Vec<String> {
        self.dirs.iter().map(|d| d.display().to_string()).collect()
    }
}

/// Turn a template id into a path that stays inside its root.
///
/// Returns `None` for absolute ids or ids with `..` components. `.`
/// components are dropped.
pub(crate) fn confine(id: &str) -> Option<PathBuf> {
    let normalized = normalize_path(id);
    let path = Path::new(&normalized);

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Use forward slashes so ids compare the same on every platform.
pub(crate) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

pub(crate) fn not_found(id: &TemplateId, searched: Vec<String>) -> stache_core::error::StacheError {
    ApplicationError::TemplateNotFound {
        id: id.to_string(),
        searched,
    }
    .into()
}
