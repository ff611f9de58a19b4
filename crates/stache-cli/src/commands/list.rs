//! Implementation of the `stache list` command.

use serde::Serialize;
use tracing::debug;

use stache_adapters::ChainedTemplateLoader;
use stache_core::{application::TemplateLoader, domain::RenderData};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::{to_json, to_value},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    templates::{MODULES, render_builtin},
};

#[derive(Debug, Serialize)]
struct TemplateRow {
    name: String,
}

#[derive(Debug, Serialize)]
struct LocationRow {
    path: String,
}

pub fn execute(args: ListArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let mut settings = config.templates;
    settings.prepend_dirs(args.template_dirs);

    let loader = ChainedTemplateLoader::from_settings(&settings, &MODULES)?;
    let names = loader.list_templates()?;
    debug!(count = names.len(), "templates listed");

    match args.format {
        ListFormat::Table => {
            let templates: Vec<TemplateRow> = names
                .into_iter()
                .map(|name| TemplateRow { name })
                .collect();
            let locations: Vec<LocationRow> = loader
                .locations()
                .into_iter()
                .map(|path| LocationRow { path })
                .collect();

            let data = RenderData::new()
                .with("templates", to_value(&templates)?)
                .with("locations", to_value(&locations)?);
            let text = render_builtin("templates.mustache", &data)?;
            output.print(text.trim_end())?;
        }
        ListFormat::List => {
            for name in &names {
                println!("{name}");
            }
        }
        ListFormat::Json => {
            println!("{}", to_json(&names)?);
        }
    }

    Ok(())
}
