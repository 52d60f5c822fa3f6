//! In-memory package catalog

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use conflux_core::{ConfluxError, Context, OptionMap, Requirement};

use crate::CatalogResult;

/// Every package a catalog knows about, with the versions available for each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Package to build when none is named explicitly
    pub root: Option<String>,
    /// Build settings carried by the catalog
    pub resolver: ResolverSettings,
    packages: IndexMap<String, CatalogPackage>,
}

/// Available versions of one package, in listing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPackage {
    /// Version picked when nothing constrains the package
    pub default: Option<String>,
    pub versions: IndexMap<String, CatalogVersion>,
}

/// What one version of a package requires and its default options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogVersion {
    pub requires: Vec<Requirement>,
    pub options: OptionMap,
}

/// Graph build settings found in a catalog's `[resolver]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverSettings {
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub parallel_subgraphs: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default root package
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Add a version with the given requirements and no default options
    pub fn with_version(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        requires: impl IntoIterator<Item = Requirement>,
    ) -> Self {
        self.add_version(name, version, CatalogVersion::new(requires));
        self
    }

    /// Add or replace a version. Returns the version it replaced, if any.
    pub fn add_version(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        entry: CatalogVersion,
    ) -> Option<CatalogVersion> {
        self.packages
            .entry(name.into())
            .or_default()
            .versions
            .insert(version.into(), entry)
    }

    /// Mark `version` as the default of `name`; both must already be listed
    pub fn set_default(&mut self, name: &str, version: &str) -> CatalogResult<()> {
        let package = self.packages.get_mut(name).ok_or_else(|| ConfluxError::PackageNotFound {
            name: name.to_string(),
        })?;
        if !package.versions.contains_key(version) {
            return Err(ConfluxError::ConfigValidation {
                field: format!("packages.{}.default", name),
                reason: format!("version '{}' is not listed", version),
            });
        }
        package.default = Some(version.to_string());
        Ok(())
    }

    pub fn package(&self, name: &str) -> Option<&CatalogPackage> {
        self.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = (&str, &CatalogPackage)> {
        self.packages.iter().map(|(name, package)| (name.as_str(), package))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Total number of versions across all packages
    pub fn version_count(&self) -> usize {
        self.packages.values().map(|package| package.versions.len()).sum()
    }
}

impl CatalogPackage {
    /// The `default` version, or else the last one listed
    pub fn default_version(&self) -> Option<&str> {
        self.default
            .as_deref()
            .or_else(|| self.versions.keys().last().map(String::as_str))
    }

    /// Listed versions, comma separated
    pub fn listing(&self) -> String {
        self.versions.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl CatalogVersion {
    pub fn new(requires: impl IntoIterator<Item = Requirement>) -> Self {
        Self {
            requires: requires.into_iter().collect(),
            options: OptionMap::new(),
        }
    }

    /// Set a default option value
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}
