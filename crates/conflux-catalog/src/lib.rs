//! Package catalogs for conflux
//!
//! This crate handles parsing and validation of catalog documents (TOML, JSON
//! and the flat edge-list JSON format), layering several documents into one
//! [`Catalog`], and answering definition lookups from it through the
//! [`Provider`](conflux_core::Provider) contract.

pub mod catalog;
pub mod json;
pub mod merge;
pub mod provider;
pub mod toml;

// Re-export main types
pub use catalog::{Catalog, CatalogPackage, CatalogVersion, ResolverSettings};
pub use json::{parse_catalog_json, EdgeListJson};
pub use merge::CatalogLayering;
pub use crate::toml::{
    parse_catalog_toml, CatalogDocument, PackageSection, RequirementSpec, ResolverSection,
    VersionSection,
};

use conflux_core::error::ConfluxError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, ConfluxError>;
