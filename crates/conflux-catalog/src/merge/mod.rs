//! Catalog layering and environment overrides
//!
//! Several catalog documents can be stacked: each later layer adds packages
//! and versions and shadows the versions, defaults and settings it redefines.
//! Environment overrides are applied last.

use std::collections::HashMap;

use tracing::{debug, warn};

use conflux_core::{ConfluxError, Context};

use crate::catalog::Catalog;
use crate::toml::{CatalogDocument, ResolverSection};
use crate::CatalogResult;

/// Environment variable naming the default root package
pub const ENV_ROOT: &str = "CONFLUX_ROOT";
/// Environment variable selecting the top-level context
pub const ENV_CONTEXT: &str = "CONFLUX_CONTEXT";
/// Environment variable toggling parallel sub-graph builds
pub const ENV_PARALLEL_SUBGRAPHS: &str = "CONFLUX_PARALLEL_SUBGRAPHS";

/// Stack of catalog documents merged in order
#[derive(Debug, Default)]
pub struct CatalogLayering {
    /// Documents with a label naming where they came from
    layers: Vec<(String, CatalogDocument)>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
}

impl CatalogLayering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a document on top of the stack
    pub fn layer(mut self, source: impl Into<String>, document: CatalogDocument) -> Self {
        self.layers.push((source.into(), document));
        self
    }

    pub fn with_env_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.env_overrides = overrides;
        self
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Merge every layer, validate the result and apply environment overrides
    pub fn merge(self) -> CatalogResult<Catalog> {
        let mut merged = CatalogDocument::default();
        for (source, document) in self.layers {
            debug!(source = %source, packages = document.packages.len(), "merging catalog layer");
            merged = Self::merge_documents(merged, document, &source);
        }

        let mut catalog = merged.into_catalog()?;
        Self::apply_env_overrides(&mut catalog, &self.env_overrides)?;
        Ok(catalog)
    }

    /// Merge `layer` on top of `base`
    pub fn merge_documents(
        mut base: CatalogDocument,
        layer: CatalogDocument,
        source: &str,
    ) -> CatalogDocument {
        if let Some(root) = layer.root {
            if base.root.as_ref().is_some_and(|previous| *previous != root) {
                warn!(source, root = %root, "root package redefined");
            }
            base.root = Some(root);
        }

        if let Some(section) = layer.resolver {
            let merged = base.resolver.get_or_insert_with(ResolverSection::default);
            if section.context.is_some() {
                merged.context = section.context;
            }
            if section.parallel_subgraphs.is_some() {
                merged.parallel_subgraphs = section.parallel_subgraphs;
            }
        }

        for (name, package) in layer.packages {
            let target = base.packages.entry(name.clone()).or_default();
            if package.default.is_some() {
                target.default = package.default;
            }
            for (version, section) in package.versions {
                if target.versions.insert(version.clone(), section).is_some() {
                    warn!(source, package = %name, version = %version, "version shadows an earlier layer");
                }
            }
        }

        base
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(
        catalog: &mut Catalog,
        overrides: &HashMap<String, String>,
    ) -> CatalogResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                ENV_ROOT => {
                    catalog.root = Some(value.clone());
                },
                ENV_CONTEXT => {
                    catalog.resolver.context =
                        value.parse::<Context>().map_err(|_| ConfluxError::ConfigValidation {
                            field: ENV_CONTEXT.to_string(),
                            reason: format!("unknown context '{}', expected 'host' or 'build'", value),
                        })?;
                },
                ENV_PARALLEL_SUBGRAPHS => {
                    catalog.resolver.parallel_subgraphs = parse_flag(value).ok_or_else(|| {
                        ConfluxError::ConfigValidation {
                            field: ENV_PARALLEL_SUBGRAPHS.to_string(),
                            reason: format!("expected true or false, found '{}'", value),
                        }
                    })?;
                },
                _ => {
                    // Unknown variable, ignore
                },
            }
        }

        Ok(())
    }

    /// Collect `CONFLUX_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars().filter(|(key, _)| key.starts_with("CONFLUX_")).collect()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::toml::{PackageSection, VersionSection};
    use proptest::prelude::*;

    fn document(entries: &[(u8, u8)]) -> CatalogDocument {
        let mut document = CatalogDocument::default();
        for (package, version) in entries {
            document
                .packages
                .entry(format!("pkg{}", package % 4))
                .or_insert_with(PackageSection::default)
                .versions
                .insert(format!("{}.0", version % 4), VersionSection::default());
        }
        document
    }

    proptest! {
        #[test]
        fn merged_versions_are_the_union(
            base in prop::collection::vec(any::<(u8, u8)>(), 0..12),
            layer in prop::collection::vec(any::<(u8, u8)>(), 0..12)
        ) {
            let base = document(&base);
            let layer = document(&layer);
            let merged = CatalogLayering::merge_documents(base.clone(), layer.clone(), "layer");

            for source in [&base, &layer] {
                for (name, package) in &source.packages {
                    for version in package.versions.keys() {
                        prop_assert!(merged.packages[name].versions.contains_key(version));
                    }
                }
            }

            let expected: usize = merged.packages.keys()
                .map(|name| {
                    let mut versions: Vec<&String> = Vec::new();
                    for source in [&base, &layer] {
                        if let Some(package) = source.packages.get(name) {
                            versions.extend(package.versions.keys());
                        }
                    }
                    versions.sort();
                    versions.dedup();
                    versions.len()
                })
                .sum();
            let actual: usize = merged.packages.values().map(|package| package.versions.len()).sum();
            prop_assert_eq!(expected, actual);
        }

        #[test]
        fn merging_a_document_with_itself_changes_nothing(
            entries in prop::collection::vec(any::<(u8, u8)>(), 0..12)
        ) {
            let doc = document(&entries);
            let merged = CatalogLayering::merge_documents(doc.clone(), doc.clone(), "again");
            prop_assert_eq!(merged, doc);
        }
    }
}
