//! Mustache templating engine binding.

mod values;

use std::path::{Path, PathBuf};

use mustache::Context as MustacheContext;
use tracing::trace;

use stache_core::{
    application::{ApplicationError, TemplateEngine},
    domain::RenderData,
    error::{Context, StacheResult},
};

/// Renders Mustache templates with the `mustache` crate.
///
/// Partials (`{{> name}}`) are read from `<partials_dir>/name.mustache`;
/// the default directory is the current one, as in the library itself.
///
/// Booleans written by a variable tag render as `true` / `false`. A list or
/// object written by a variable tag is a [`ApplicationError::RenderingFailed`].
pub struct MustacheEngine {
    context: MustacheContext,
}

impl MustacheEngine {
    pub fn new() -> Self {
        Self::with_partials_dir(".")
    }

    pub fn with_partials_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            context: MustacheContext::new(dir.into()),
        }
    }

    pub fn partials_dir(&self) -> &Path {
        &self.context.template_path
    }
}

impl Default for MustacheEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MustacheEngine {
    fn render(&self, template: &str, data: &RenderData) -> StacheResult<String> {
        let compiled =
            self.context
                .compile(template.chars())
                .map_err(|e| ApplicationError::RenderingFailed {
                    reason: e.to_string(),
                })?;

        let values = values::prepare(template, data.as_map(), &self.context)
            .map_err(|reason| ApplicationError::RenderingFailed { reason })?;

        let mut out = Vec::with_capacity(template.len());
        compiled
            .render_data(&mut out, &values)
            .map_err(|e| ApplicationError::RenderingFailed {
                reason: e.to_string(),
            })?;

        trace!(bytes = out.len(), "mustache render finished");
        String::from_utf8(out).context("mustache produced invalid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stache_core::error::StacheError;

    fn render(template: &str, data: serde_json::Value) -> StacheResult<String> {
        MustacheEngine::new().render(template, &RenderData::try_from(data).unwrap())
    }

    #[test]
    fn hello_world() {
        assert_eq!(
            render("Hello {{name}}!", json!({ "name": "World" })).unwrap(),
            "Hello World!"
        );
    }

    #[test]
    fn numbers_and_nested_values() {
        let out = render(
            "{{user.name}} has {{count}} items",
            json!({ "user": { "name": "ada" }, "count": 3 }),
        )
        .unwrap();
        assert_eq!(out, "ada has 3 items");
    }

    #[test]
    fn sections_iterate_sequences() {
        let out = render(
            "{{#items}}[{{label}}]{{/items}}",
            json!({ "items": [{ "label": "a" }, { "label": "b" }, { "label": "c" }] }),
        )
        .unwrap();
        assert_eq!(out, "[a][b][c]");
    }

    #[test]
    fn inverted_section_on_empty_list() {
        let out = render("{{^items}}none{{/items}}", json!({ "items": [] })).unwrap();
        assert_eq!(out, "none");
    }

    #[test]
    fn escapes_html_unless_triple_mustache() {
        let data = json!({ "html": "<b>" });
        assert_eq!(render("{{html}}", data.clone()).unwrap(), "&lt;b&gt;");
        assert_eq!(render("{{{html}}}", data).unwrap(), "<b>");
    }

    #[test]
    fn missing_variables_render_empty() {
        assert_eq!(render("[{{absent}}]", json!({})).unwrap(), "[]");
    }

    #[test]
    fn unclosed_section_is_rendering_failure() {
        let err = render("{{#items}}never closed", json!({ "items": [1] })).unwrap_err();
        assert!(matches!(
            err,
            StacheError::Application(ApplicationError::RenderingFailed { .. })
        ));
    }

    #[test]
    fn booleans_interpolate_as_text() {
        let data = json!({ "on": true, "off": false });
        assert_eq!(render("{{on}}/{{off}}", data.clone()).unwrap(), "true/false");
        assert_eq!(render("{{{on}}}/{{&off}}", data).unwrap(), "true/false");
    }

    #[test]
    fn booleans_still_drive_sections() {
        let data = json!({ "on": true, "off": false });
        let out = render(
            "{{#on}}a{{/on}}{{^on}}b{{/on}}{{#off}}c{{/off}}{{^off}}d{{/off}}",
            data,
        )
        .unwrap();
        assert_eq!(out, "ad");
    }

    #[test]
    fn boolean_used_as_value_and_section() {
        let data = json!({ "on": true, "off": false });
        let out = render("[{{on}}{{#on}}!{{/on}}][{{off}}{{^off}}?{{/off}}]", data).unwrap();
        assert_eq!(out, "[true!][?]");
    }

    #[test]
    fn booleans_in_lists_via_implicit_iterator() {
        let out = render("{{#flags}}{{.}},{{/flags}}", json!({ "flags": [true, false] })).unwrap();
        assert_eq!(out, "true,false,");
    }

    #[test]
    fn interpolated_list_is_rendering_failure() {
        let err = render("{{items}}", json!({ "items": ["a", "b"] })).unwrap_err();
        assert!(matches!(
            err,
            StacheError::Application(ApplicationError::RenderingFailed { ref reason }) if reason.contains("a list")
        ));
    }

    #[test]
    fn interpolated_object_is_rendering_failure() {
        let data = json!({ "user": { "name": "ada" } });
        for template in ["{{user}}", "{{{user}}}", "{{&user}}"] {
            let err = render(template, data.clone()).unwrap_err();
            assert!(matches!(
                err,
                StacheError::Application(ApplicationError::RenderingFailed { ref reason }) if reason.contains("an object")
            ));
        }
        assert_eq!(render("{{user.name}}", data).unwrap(), "ada");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(render("[{{gone}}]{{^gone}}none{{/gone}}", json!({ "gone": null })).unwrap(), "[]none");
    }

    #[test]
    fn partials_come_from_partials_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("footer.mustache"), "-- {{sig}}").unwrap();

        let engine = MustacheEngine::with_partials_dir(dir.path());
        let data = RenderData::new().with("sig", "ops");
        assert_eq!(engine.render("body {{> footer}}", &data).unwrap(), "body -- ops");
        assert_eq!(engine.partials_dir(), dir.path());
    }

    #[test]
    fn identical_inputs_render_identically() {
        let engine = MustacheEngine::new();
        let data = RenderData::new().with("n", 1);
        let a = engine.render("{{n}}", &data).unwrap();
        let b = engine.render("{{n}}", &data).unwrap();
        assert_eq!(a, b);
    }
}
