//! Core data types for conflux graph resolution.
//!
//! This module provides the fundamental types used throughout conflux:
//! - Requirements and the enumerations that classify them
//! - Package definitions returned by providers

pub mod package;
pub mod requirement;

use std::collections::BTreeMap;

/// Option name to value mapping, ordered so that hashing and rendering are stable
pub type OptionMap = BTreeMap<String, String>;

// Re-export all public types
pub use package::PackageDefinition;
pub use requirement::{Context, EdgeKind, Requirement, RequirementKind, Visibility};
