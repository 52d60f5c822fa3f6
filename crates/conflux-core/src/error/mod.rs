//! Error types and result aliases for conflux operations.
//!
//! Provides a unified error type that covers every failure a graph build can
//! end with, plus the catalog and configuration errors raised while loading
//! package sources.

use thiserror::Error;

/// Unified error type for all conflux operations
#[derive(Error, Debug)]
pub enum ConfluxError {
    // Provider errors
    #[error("Package '{name}' not found")]
    PackageNotFound { name: String },

    #[error("Cannot satisfy constraints for '{name}': {reason}")]
    Unsatisfiable { name: String, reason: String },

    #[error("Provider failed for '{name}': {message}")]
    Provider {
        name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Resolution errors
    #[error(
        "Ambiguous resolution for '{name}': topological orderings yield different definitions [{}]",
        .definitions.join(", ")
    )]
    AmbiguousResolution {
        name: String,
        definitions: Vec<String>,
    },

    #[error("Cycle detected involving '{vertex}' and '{origin}'")]
    CycleDetected { vertex: String, origin: String },

    #[error("Unsupported {field} '{value}'")]
    UnsupportedRequirementKind { field: String, value: String },

    // Catalog errors
    #[error("Failed to parse catalog TOML: {message}")]
    TomlParse { message: String },

    #[error("Failed to parse catalog JSON: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for conflux operations
pub type ConfluxResult<T> = Result<T, ConfluxError>;

impl ConfluxError {
    /// Create a provider error wrapping any error type
    pub fn provider<E>(name: impl Into<String>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider {
            name: name.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create an unsupported-kind error for an enumeration field
    pub fn unsupported(field: &str, value: &str) -> Self {
        Self::UnsupportedRequirementKind {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether this error was raised while building a graph, as opposed to
    /// while loading catalogs or configuration
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ConfluxError::PackageNotFound { .. }
                | ConfluxError::Unsatisfiable { .. }
                | ConfluxError::Provider { .. }
                | ConfluxError::AmbiguousResolution { .. }
                | ConfluxError::CycleDetected { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ConfluxError::PackageNotFound { .. } => {
                Some("Check the package name spelling or add it to the catalog")
            },
            ConfluxError::Unsatisfiable { .. } => {
                Some("Make sure every requested version is listed for the package")
            },
            ConfluxError::AmbiguousResolution { .. } => Some(
                "Add an override closer to the conflicting requirements so their order no longer matters",
            ),
            ConfluxError::CycleDetected { .. } => {
                Some("Remove circular dependencies by restructuring your packages")
            },
            ConfluxError::UnsupportedRequirementKind { .. } => {
                Some("Valid kinds are listed in the catalog format documentation")
            },
            _ => None,
        }
    }
}
