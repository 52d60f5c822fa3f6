//! JSON catalog parsing and the flat edge-list import
//!
//! Besides the regular document shape, JSON catalogs may come as an edge
//! list: the versions available for each package, and requirement edges
//! shared by every version of the declaring package.
//!
//! ```json
//! {
//!   "versions": { "app": ["1.0"], "zlib": ["1.2", "1.3"] },
//!   "requires": [
//!     { "from": "app", "to": "zlib", "type": "requires", "version": "1.2", "options": "shared=True;fPIC=False" }
//!   ]
//! }
//! ```

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use conflux_core::{ConfluxError, OptionMap};

use crate::catalog::Catalog;
use crate::toml::{CatalogDocument, PackageSection, RequirementSpec, VersionSection};
use crate::CatalogResult;

/// Edge-list catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeListJson {
    /// Default root package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Available versions per package, in listing order
    pub versions: IndexMap<String, Vec<String>>,

    /// Requirement edges
    #[serde(default)]
    pub requires: Vec<EdgeEntry>,
}

/// One requirement edge of an edge-list catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Options as `key=value` pairs separated by `;`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

/// Just enough structure to tell the two JSON shapes apart
#[derive(Deserialize)]
struct ShapeProbe {
    #[serde(default)]
    versions: Option<IgnoredAny>,
}

/// Parse JSON string to a catalog document, accepting both JSON shapes
pub fn parse_catalog_json(content: &str) -> CatalogResult<CatalogDocument> {
    let probe: ShapeProbe = serde_json::from_str(content).map_err(json_error)?;
    if probe.versions.is_some() {
        let edges: EdgeListJson = serde_json::from_str(content).map_err(json_error)?;
        import_edge_list(&edges)
    } else {
        serde_json::from_str(content).map_err(json_error)
    }
}

/// Serialize a catalog to JSON in the document shape
pub fn serialize_catalog_json(catalog: &Catalog) -> CatalogResult<String> {
    serde_json::to_string_pretty(&CatalogDocument::from_catalog(catalog)).map_err(|e| {
        ConfluxError::JsonParse {
            message: format!("JSON serialization error: {}", e),
        }
    })
}

/// Convert an edge list into a catalog document
pub fn import_edge_list(edges: &EdgeListJson) -> CatalogResult<CatalogDocument> {
    let mut requires: IndexMap<&str, Vec<RequirementSpec>> = IndexMap::new();
    for (i, edge) in edges.requires.iter().enumerate() {
        if !edges.versions.contains_key(&edge.from) {
            return Err(ConfluxError::ConfigValidation {
                field: format!("requires[{}].from", i),
                reason: format!("'{}' has no listed versions", edge.from),
            });
        }

        let options = match &edge.options {
            Some(options) => parse_options(options).map_err(|reason| ConfluxError::ConfigValidation {
                field: format!("requires[{}].options", i),
                reason,
            })?,
            None => OptionMap::new(),
        };

        requires.entry(edge.from.as_str()).or_default().push(RequirementSpec::Detailed {
            name: edge.to.clone(),
            version: edge.version.clone(),
            edge_type: edge.edge_type.clone(),
            kind: edge.kind.clone(),
            visibility: edge.visibility.clone(),
            context: edge.context.clone(),
            options,
        });
    }

    let packages = edges
        .versions
        .iter()
        .map(|(name, versions)| {
            let shared = requires.get(name.as_str()).cloned().unwrap_or_default();
            let versions = versions
                .iter()
                .map(|version| {
                    let section = VersionSection {
                        requires: shared.clone(),
                        options: OptionMap::new(),
                    };
                    (version.clone(), section)
                })
                .collect();
            let package = PackageSection {
                default: None,
                versions,
            };
            (name.clone(), package)
        })
        .collect();

    Ok(CatalogDocument {
        root: edges.root.clone(),
        resolver: None,
        packages,
    })
}

/// Parse `key=value;key=value` into an option map
pub fn parse_options(options: &str) -> Result<OptionMap, String> {
    let mut parsed = OptionMap::new();
    for pair in options.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, found '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty option name in '{}'", pair));
        }
        parsed.insert(key.to_string(), value.trim().to_string());
    }
    Ok(parsed)
}

impl Catalog {
    /// Parse and validate a JSON catalog in either shape
    pub fn from_json_str(content: &str) -> CatalogResult<Catalog> {
        parse_catalog_json(content)?.into_catalog()
    }
}

fn json_error(e: serde_json::Error) -> ConfluxError {
    ConfluxError::JsonParse {
        message: e.to_string(),
    }
}
