//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stache",
    bin_name = "stache",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render structured data through Mustache templates",
    long_about = "Stache loads a template from the configured template \
                  directories or module and renders JSON or TOML data \
                  through the selected output handler.",
    after_help = "EXAMPLES:\n\
        \x20 stache render hello.mustache --set name=World\n\
        \x20 stache render report.mustache --data report.json -t ./templates\n\
        \x20 cat data.toml | stache render mail/welcome.mustache --data - --format toml\n\
        \x20 stache handlers",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render data with a template.
    #[command(
        visible_alias = "r",
        about = "Render data with a template",
        after_help = "EXAMPLES:\n\
            \x20 stache render hello.mustache -s name=World\n\
            \x20 stache render invoice.mustache -d invoice.toml -o invoice.txt\n\
            \x20 stache render page.mustache -d - --format json < page.json"
    )]
    Render(RenderArgs),

    /// List registered output handlers.
    #[command(
        about = "List output handlers",
        after_help = "EXAMPLES:\n\
            \x20 stache handlers\n\
            \x20 stache handlers --format json"
    )]
    Handlers(HandlersArgs),

    /// List templates reachable through the search path.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stache list\n\
            \x20 stache list -t ./templates --format list"
    )]
    List(ListArgs),

    /// Initialise a Stache configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stache init                      # default location\n\
            \x20 stache --config ./stache.toml init\n\
            \x20 stache init --force              # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stache completions bash > ~/.local/share/bash-completion/completions/stache\n\
            \x20 stache completions zsh  > ~/.zfunc/_stache\n\
            \x20 stache completions fish > ~/.config/fish/completions/stache.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stache configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stache config get output.handler\n\
            \x20 stache config list\n\
            \x20 stache config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command reads the layered configuration.
    ///
    /// `init` creates the file that would otherwise be loaded, and
    /// completions depend on nothing but the argument definitions.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_) | Self::Completions(_))
    }
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `stache render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template id, relative to a template directory or module.
    #[arg(value_name = "TEMPLATE", help = "Template id, e.g. mail/welcome.mustache")]
    pub template: String,

    /// Data file; `-` reads standard input.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "JSON or TOML data file ('-' for stdin)"
    )]
    pub data: Option<PathBuf>,

    /// Data format; inferred from the file extension when omitted.
    #[arg(long = "format", value_enum, help = "Data format")]
    pub format: Option<DataFormat>,

    /// Extra values layered over the data file.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a value (dotted keys nest), may be repeated"
    )]
    pub set: Vec<String>,

    /// Output handler to render with.
    #[arg(
        long = "handler",
        value_name = "LABEL",
        help = "Output handler label (default from config)"
    )]
    pub handler: Option<String>,

    /// Write the rendered text to a file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output file")]
    pub output: Option<PathBuf>,

    /// Template directories searched before the configured ones.
    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        help = "Template directory, may be repeated"
    )]
    pub template_dirs: Vec<PathBuf>,
}

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Json,
    Toml,
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

// ── handlers / list ───────────────────────────────────────────────────────────

/// Arguments for `stache handlers`.
#[derive(Debug, Args)]
pub struct HandlersArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Arguments for `stache list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Template directories searched before the configured ones.
    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        help = "Template directory, may be repeated"
    )]
    pub template_dirs: Vec<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the listing commands.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stache init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stache completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stache config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.handler`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
