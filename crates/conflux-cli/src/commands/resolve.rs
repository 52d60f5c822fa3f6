//! `conflux resolve`: build and print a dependency graph

use camino::Utf8PathBuf;
use tracing::debug;

use conflux_catalog::{Catalog, ResolverSettings};
use conflux_core::{ConfluxError, ConfluxResult, Context};
use conflux_resolver::{build_with, to_dot, BuildOptions, Graph};

use super::{load_catalog, CommandContext};
use crate::Format;

/// Arguments of the resolve command
#[derive(Debug, Clone)]
pub struct ResolveArgs {
    pub catalogs: Vec<Utf8PathBuf>,
    pub root: Option<String>,
    pub context: Option<Context>,
    pub format: Format,
    pub parallel: bool,
}

pub fn execute(args: &ResolveArgs, ctx: &CommandContext) -> ConfluxResult<()> {
    let catalog = load_catalog(&args.catalogs, ctx)?;
    let graph = resolve_graph(&catalog, args)?;

    ctx.output.print(&render(&graph, args.format));
    ctx.output.success(&format!(
        "Resolved {} packages ({} sub-graphs)",
        graph.node_count(),
        graph.subgraph_count()
    ));
    Ok(())
}

/// Build the graph of the requested root
pub fn resolve_graph(catalog: &Catalog, args: &ResolveArgs) -> ConfluxResult<Graph> {
    let root = args
        .root
        .as_deref()
        .or(catalog.root.as_deref())
        .ok_or_else(|| ConfluxError::ConfigValidation {
            field: "root".to_string(),
            reason: "no --root given and the catalog does not name one".to_string(),
        })?;

    let options = build_options(&catalog.resolver, args);
    debug!(root, context = %options.context, parallel = options.parallel_subgraphs, "build options");
    build_with(root, catalog, &options)
}

/// Command line flags take precedence over catalog settings
pub fn build_options(settings: &ResolverSettings, args: &ResolveArgs) -> BuildOptions {
    BuildOptions::new()
        .with_context(args.context.unwrap_or(settings.context))
        .with_parallel_subgraphs(args.parallel || settings.parallel_subgraphs)
}

pub fn render(graph: &Graph, format: Format) -> String {
    match format {
        Format::Tree => graph.render_tree(),
        Format::Dot => to_dot(graph),
    }
}
