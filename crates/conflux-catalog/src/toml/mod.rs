//! Catalog document parsing and serialization
//!
//! A catalog document lists packages, their versions and what each version
//! requires:
//!
//! ```toml
//! root = "app"
//!
//! [resolver]
//! parallel-subgraphs = true
//!
//! [packages.app.versions."1.0"]
//! requires = ["zlib/1.2", { name = "cmake", version = "3.20", kind = "tool", context = "build" }]
//!
//! [packages.zlib]
//! default = "1.2"
//!
//! [packages.zlib.versions."1.2"]
//! options = { shared = "False" }
//! ```
//!
//! JSON documents use the same shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use conflux_core::{
    ConfluxError, Context, EdgeKind, OptionMap, Requirement, RequirementKind, Visibility,
};

use crate::catalog::{Catalog, CatalogVersion, ResolverSettings};
use crate::CatalogResult;

/// Complete catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Default root package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Graph build settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverSection>,

    /// Packages by name
    #[serde(default)]
    pub packages: IndexMap<String, PackageSection>,
}

/// `[resolver]` section. Unset keys fall through to earlier layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_subgraphs: Option<bool>,
}

/// One package of the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSection {
    /// Version used when nothing constrains the package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Versions in listing order
    #[serde(default)]
    pub versions: IndexMap<String, VersionSection>,
}

/// One version of a package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionSection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequirementSpec>,

    /// Default option values
    #[serde(default, skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
}

/// Requirement entry (`"name/version"` string or detailed table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementSpec {
    /// `name/version` or bare `name`
    Simple(String),

    /// Detailed requirement
    Detailed {
        name: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,

        /// Edge kind: topological (alias requires), override, options
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        edge_type: Option<String>,

        /// Requirement kind: asset, library, tool, plugin
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        visibility: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,

        #[serde(default, skip_serializing_if = "OptionMap::is_empty")]
        options: OptionMap,
    },
}

impl RequirementSpec {
    /// Convert into a requirement, validating every enumeration field
    pub fn to_requirement(&self) -> CatalogResult<Requirement> {
        match self {
            RequirementSpec::Simple(spec) => {
                let (name, version) = match spec.split_once('/') {
                    Some((name, version)) => (name.trim(), version.trim()),
                    None => (spec.trim(), ""),
                };
                Ok(Requirement::new(name, version))
            },
            RequirementSpec::Detailed {
                name,
                version,
                edge_type,
                kind,
                visibility,
                context,
                options,
            } => {
                let mut requirement = Requirement::new(name.as_str(), version.clone().unwrap_or_default());
                if let Some(edge_type) = edge_type {
                    requirement.edge_kind = edge_type.parse::<EdgeKind>()?;
                }
                if let Some(kind) = kind {
                    requirement.requirement_kind = kind.parse::<RequirementKind>()?;
                }
                if let Some(visibility) = visibility {
                    requirement.visibility = visibility.parse::<Visibility>()?;
                }
                if let Some(context) = context {
                    requirement.context = context.parse::<Context>()?;
                }
                requirement.options = options.clone();
                Ok(requirement)
            },
        }
    }

    /// Shortest spec describing `requirement`
    pub fn from_requirement(requirement: &Requirement) -> Self {
        let plain = Requirement::new(requirement.name.as_str(), requirement.version_expr.as_str());
        if *requirement == plain && !requirement.version_expr.is_empty() {
            return RequirementSpec::Simple(format!("{}/{}", requirement.name, requirement.version_expr));
        }

        let non_default = |value: &str, default: &str| (value != default).then(|| value.to_string());
        RequirementSpec::Detailed {
            name: requirement.name.clone(),
            version: (!requirement.version_expr.is_empty()).then(|| requirement.version_expr.clone()),
            edge_type: non_default(requirement.edge_kind.as_str(), EdgeKind::default().as_str()),
            kind: non_default(
                requirement.requirement_kind.as_str(),
                RequirementKind::default().as_str(),
            ),
            visibility: non_default(requirement.visibility.as_str(), Visibility::default().as_str()),
            context: non_default(requirement.context.as_str(), Context::default().as_str()),
            options: requirement.options.clone(),
        }
    }

    /// Target package name
    pub fn name(&self) -> &str {
        match self {
            RequirementSpec::Simple(spec) => spec.split_once('/').map_or(spec.as_str(), |(name, _)| name).trim(),
            RequirementSpec::Detailed { name, .. } => name,
        }
    }
}

impl ResolverSection {
    /// Apply the keys set in this section on top of `settings`
    pub fn apply_to(&self, settings: &mut ResolverSettings) -> CatalogResult<()> {
        if let Some(context) = &self.context {
            settings.context = context.parse::<Context>().map_err(|_| ConfluxError::ConfigValidation {
                field: "resolver.context".to_string(),
                reason: format!("unknown context '{}', expected 'host' or 'build'", context),
            })?;
        }
        if let Some(parallel) = self.parallel_subgraphs {
            settings.parallel_subgraphs = parallel;
        }
        Ok(())
    }
}

impl CatalogDocument {
    /// Validate the document and build the catalog it describes
    pub fn into_catalog(self) -> CatalogResult<Catalog> {
        validate_document(&self)?;

        let mut catalog = Catalog::new();
        catalog.root = self.root;
        if let Some(section) = &self.resolver {
            section.apply_to(&mut catalog.resolver)?;
        }

        for (name, package) in self.packages {
            for (version, section) in package.versions {
                let requires = section
                    .requires
                    .iter()
                    .map(RequirementSpec::to_requirement)
                    .collect::<CatalogResult<Vec<_>>>()?;
                let entry = CatalogVersion {
                    requires,
                    options: section.options,
                };
                catalog.add_version(name.as_str(), version, entry);
            }
            if let Some(default) = package.default {
                catalog.set_default(&name, &default)?;
            }
        }

        Ok(catalog)
    }

    /// Document describing `catalog`
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let packages = catalog
            .packages()
            .map(|(name, package)| {
                let versions = package
                    .versions
                    .iter()
                    .map(|(version, entry)| {
                        let section = VersionSection {
                            requires: entry.requires.iter().map(RequirementSpec::from_requirement).collect(),
                            options: entry.options.clone(),
                        };
                        (version.clone(), section)
                    })
                    .collect();
                let section = PackageSection {
                    default: package.default.clone(),
                    versions,
                };
                (name.to_string(), section)
            })
            .collect();

        let resolver = (catalog.resolver != ResolverSettings::default()).then(|| ResolverSection {
            context: Some(catalog.resolver.context.as_str().to_string()),
            parallel_subgraphs: Some(catalog.resolver.parallel_subgraphs),
        });

        Self {
            root: catalog.root.clone(),
            resolver,
            packages,
        }
    }
}

impl Catalog {
    /// Parse and validate a TOML catalog
    pub fn from_toml_str(content: &str) -> CatalogResult<Catalog> {
        parse_catalog_toml(content)?.into_catalog()
    }
}

/// Parse TOML string to a catalog document
pub fn parse_catalog_toml(content: &str) -> CatalogResult<CatalogDocument> {
    ::toml::from_str(content).map_err(|e| ConfluxError::TomlParse {
        message: e.to_string(),
    })
}

/// Serialize a catalog to TOML
pub fn serialize_catalog_toml(catalog: &Catalog) -> CatalogResult<String> {
    ::toml::to_string_pretty(&CatalogDocument::from_catalog(catalog)).map_err(|e| ConfluxError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate document consistency
pub fn validate_document(document: &CatalogDocument) -> CatalogResult<()> {
    for (name, package) in &document.packages {
        if !is_valid_package_name(name) {
            return Err(ConfluxError::ConfigValidation {
                field: format!("packages.{}", name),
                reason: "package names must start with a letter or digit and contain only letters, digits, '-', '_', '.' or '+'".to_string(),
            });
        }

        if package.versions.is_empty() {
            return Err(ConfluxError::ConfigValidation {
                field: format!("packages.{}.versions", name),
                reason: "a package must list at least one version".to_string(),
            });
        }

        if let Some(default) = &package.default {
            if !package.versions.contains_key(default) {
                return Err(ConfluxError::ConfigValidation {
                    field: format!("packages.{}.default", name),
                    reason: format!("version '{}' is not listed", default),
                });
            }
        }

        for (version, section) in &package.versions {
            for spec in &section.requires {
                let target = spec.name();
                if !document.packages.contains_key(target) {
                    return Err(ConfluxError::ConfigValidation {
                        field: format!("packages.{}.versions.{}.requires", name, version),
                        reason: format!("'{}' is not a package of this catalog", target),
                    });
                }
            }
        }
    }

    if let Some(root) = &document.root {
        if !document.packages.contains_key(root) {
            return Err(ConfluxError::ConfigValidation {
                field: "root".to_string(),
                reason: format!("'{}' is not a package of this catalog", root),
            });
        }
    }

    Ok(())
}

/// Check if a package name is valid
fn is_valid_package_name(name: &str) -> bool {
    if !name.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+'))
}
