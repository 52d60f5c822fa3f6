//! # conflux-core
//!
//! Core types and utilities shared across all conflux crates.
//!
//! This crate provides:
//! - `Requirement` and its kind enumerations (edge kind, requirement kind,
//!   visibility, context)
//! - `PackageDefinition`, the concrete package a provider resolves a name to
//! - The `Provider` capability consumed by the graph builder
//! - `ConfluxError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Requirement, PackageDefinition, etc.)
//! - `provider`: The package metadata source contract
//! - `error`: Error types and result aliases
//! - `utils`: Hashing helpers

pub mod error;
pub mod provider;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfluxError, ConfluxResult};
pub use provider::{Constraint, Provider};
pub use types::{
    Context, EdgeKind, OptionMap, PackageDefinition, Requirement, RequirementKind, Visibility,
};
