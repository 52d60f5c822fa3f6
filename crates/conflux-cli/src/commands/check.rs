//! `conflux check`: validate catalogs without building anything

use camino::Utf8PathBuf;

use conflux_catalog::toml::serialize_catalog_toml;
use conflux_core::ConfluxResult;

use super::{load_catalog, CommandContext};

pub fn execute(catalogs: &[Utf8PathBuf], print: bool, ctx: &CommandContext) -> ConfluxResult<()> {
    let catalog = load_catalog(catalogs, ctx)?;

    ctx.output.success(&format!(
        "Catalog is valid: {} packages, {} versions",
        catalog.len(),
        catalog.version_count()
    ));
    match &catalog.root {
        Some(root) => ctx.output.info(&format!("Root package: {}", root)),
        None => ctx.output.warn("No root package; pass --root when resolving"),
    }

    if print {
        ctx.output.print(&serialize_catalog_toml(&catalog)?);
    }
    Ok(())
}
