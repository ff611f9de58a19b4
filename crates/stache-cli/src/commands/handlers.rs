//! Implementation of the `stache handlers` command.

use serde::Serialize;

use stache_core::{application::HandlerRegistry, domain::RenderData};

use crate::{
    cli::{HandlersArgs, ListFormat},
    commands::{to_json, to_value},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    templates::render_builtin,
};

#[derive(Debug, Serialize)]
struct HandlerRow {
    label: String,
    default: bool,
}

pub fn execute(args: HandlersArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let rows = handler_rows(HandlerRegistry::global(), &config.output.handler)?;

    match args.format {
        ListFormat::Table => {
            let data = RenderData::new().with("handlers", to_value(&rows)?);
            let text = render_builtin("handlers.mustache", &data)?;
            output.print(text.trim_end())?;
        }
        ListFormat::List => {
            for row in &rows {
                println!("{}", row.label);
            }
        }
        ListFormat::Json => {
            // JSON goes straight to stdout so it stays parseable in pipes.
            println!("{}", to_json(&rows)?);
        }
    }

    Ok(())
}

fn handler_rows(registry: &HandlerRegistry, default: &str) -> CliResult<Vec<HandlerRow>> {
    Ok(registry
        .labels()?
        .into_iter()
        .map(|label| HandlerRow {
            default: label.as_str() == default,
            label: label.to_string(),
        })
        .collect())
}
