//! Command implementations and dispatch logic.
//!
//! Each command is a plain function taking its arguments and the shared
//! [`CommandContext`].

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use conflux_catalog::{parse_catalog_json, parse_catalog_toml, Catalog, CatalogDocument, CatalogLayering};
use conflux_core::{ConfluxError, ConfluxResult};

pub mod check;
pub mod resolve;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub output: OutputHandler,
    /// `CONFLUX_*` variables applied on top of the merged catalogs
    pub env_overrides: HashMap<String, String>,
}

impl CommandContext {
    /// Create a context from the process environment
    pub fn new() -> Self {
        Self {
            output: OutputHandler::new(),
            env_overrides: CatalogLayering::collect_env_overrides(),
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> ConfluxResult<()> {
    match command {
        Commands::Resolve { catalogs, root, context, format, parallel } => {
            info!("Resolving {} catalog(s) (root: {:?}, format: {:?})", catalogs.len(), root, format);
            let args = resolve::ResolveArgs {
                catalogs,
                root,
                context,
                format,
                parallel,
            };
            resolve::execute(&args, ctx)
        },
        Commands::Check { catalogs, print } => {
            info!("Checking {} catalog(s)", catalogs.len());
            check::execute(&catalogs, print, ctx)
        },
    }
}

/// Read every catalog file and merge them in the order given
pub fn load_catalog(paths: &[Utf8PathBuf], ctx: &CommandContext) -> ConfluxResult<Catalog> {
    let mut layering = CatalogLayering::new().with_env_overrides(ctx.env_overrides.clone());
    for path in paths {
        layering = layering.layer(path.as_str(), read_document(path)?);
    }
    layering.merge()
}

/// Read one catalog file, picking the parser by extension
pub fn read_document(path: &Utf8Path) -> ConfluxResult<CatalogDocument> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfluxError::io(format!("Failed to read catalog {}", path), e))?;
    debug!(path = %path, bytes = content.len(), "read catalog");

    let parsed = match path.extension() {
        Some("json") => parse_catalog_json(&content),
        _ => parse_catalog_toml(&content),
    };

    parsed.map_err(|e| match e {
        ConfluxError::TomlParse { message } => ConfluxError::TomlParse {
            message: format!("{}: {}", path, message),
        },
        ConfluxError::JsonParse { message } => ConfluxError::JsonParse {
            message: format!("{}: {}", path, message),
        },
        other => other,
    })
}
