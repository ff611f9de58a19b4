//! Command handlers, one module per subcommand.

use serde::Serialize;

use stache_core::error::StacheError;

use crate::error::{CliError, CliResult};

pub mod completions;
pub mod config;
pub mod handlers;
pub mod init;
pub mod list;
pub mod render;

/// Encode a listing for a built-in template.
pub(crate) fn to_value<T: Serialize>(value: &T) -> CliResult<serde_json::Value> {
    serde_json::to_value(value).map_err(encode_error)
}

/// Encode a listing for `--format json`.
pub(crate) fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(encode_error)
}

fn encode_error(e: serde_json::Error) -> CliError {
    CliError::Core(StacheError::Internal {
        message: format!("failed to encode listing: {e}"),
    })
}
