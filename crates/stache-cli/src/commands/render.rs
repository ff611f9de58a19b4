//! Implementation of the `stache render` command.
//!
//! Responsibility: turn CLI arguments into render data, a template search
//! path and a handler label, then hand off to the core `OutputService`.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    sync::Arc,
};

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use stache_adapters::ChainedTemplateLoader;
use stache_core::{
    application::{HandlerRegistry, OutputService},
    domain::{HandlerLabel, RenderData, TemplateId},
};

use crate::{
    cli::{DataFormat, RenderArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    templates::MODULES,
};

/// Execute the `stache render` command.
///
/// 1. Load the data document and layer `--set` values over it
/// 2. Build the template search path (`-t` dirs, config dirs, module)
/// 3. Resolve the output handler and render
/// 4. Write to stdout or the `--output` file
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: RenderArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let template = TemplateId::new(args.template.as_str())?;

    let mut data = match &args.data {
        Some(path) => load_data(path, args.format)?,
        None => RenderData::new(),
    };
    for pair in &args.set {
        apply_assignment(&mut data, pair)?;
    }
    debug!(keys = data.len(), "render data assembled");

    let mut settings = config.templates;
    settings.prepend_dirs(args.template_dirs);
    let loader = ChainedTemplateLoader::from_settings(&settings, &MODULES)?;

    let label = HandlerLabel::new(args.handler.unwrap_or(config.output.handler))?;
    let service = OutputService::from_registry(HandlerRegistry::global(), &label, Arc::new(loader))?;

    match &args.output {
        Some(path) => {
            // The target is only opened once rendering has succeeded.
            let text = service.render(&data, &template)?;
            fs::write(path, &text).map_err(|source| CliError::OutputFile {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), bytes = text.len(), "output written");
            output.success(&format!("Rendered {} to {}", template, path.display()))?;
        }
        None => {
            service.render_to(&data, &template, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

// ── Data loading ──────────────────────────────────────────────────────────────

/// Read a JSON or TOML document from `path` (`-` is stdin).
fn load_data(path: &Path, format: Option<DataFormat>) -> CliResult<RenderData> {
    let (origin, text) = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "Failed to read data from stdin")?;
        ("stdin".to_owned(), buf)
    } else {
        let text = fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read data file '{}'", path.display()))?;
        (path.display().to_string(), text)
    };

    let format = format.unwrap_or_else(|| infer_format(path));
    let value = parse_data(&text, format).map_err(|reason| CliError::DataParse {
        origin,
        format: match format {
            DataFormat::Json => "JSON",
            DataFormat::Toml => "TOML",
        },
        reason,
    })?;

    Ok(RenderData::try_from(value)?)
}

fn infer_format(path: &Path) -> DataFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => DataFormat::Toml,
        _ => DataFormat::Json,
    }
}

fn parse_data(text: &str, format: DataFormat) -> Result<Value, String> {
    match format {
        DataFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        DataFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    }
}

/// Apply one `KEY=VALUE` pair. Dotted keys create nested objects; the value
/// is always a string.
fn apply_assignment(data: &mut RenderData, pair: &str) -> CliResult<()> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CliError::InvalidAssignment { pair: pair.into() });
    };

    let segments: Vec<&str> = key.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(CliError::InvalidInput {
            message: format!("empty key segment in '{pair}'"),
            source: None,
        });
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| CliError::InvalidAssignment { pair: pair.into() })?;

    let mut map = std::mem::take(data).into_map();
    let mut cursor = &mut map;
    for segment in parents {
        let slot = cursor
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        cursor = slot
            .as_object_mut()
            .ok_or_else(|| CliError::InvalidAssignment { pair: pair.into() })?;
    }
    cursor.insert((*last).to_owned(), Value::String(value.to_owned()));

    *data = RenderData::from(map);
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
