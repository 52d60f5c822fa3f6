//! Package definition types.
//!
//! A definition is the concrete package a provider resolved a name to:
//! its version, the options it was configured with, and what it requires.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{OptionMap, Requirement};

/// Concrete package resolved by a provider
///
/// Equality only looks at name, version and options: two definitions that
/// agree on those are the same package, whatever requirement list they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDefinition {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    requires: Vec<Requirement>,
}

impl PackageDefinition {
    /// Create a definition with no options and no requirements
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            options: OptionMap::new(),
            requires: Vec::new(),
        }
    }

    /// Append a requirement
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    /// Replace the requirement list
    pub fn with_requirements(mut self, requires: impl IntoIterator<Item = Requirement>) -> Self {
        self.requires = requires.into_iter().collect();
        self
    }

    /// Set an option value
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Outgoing requirements in declaration order
    pub fn requires(&self) -> &[Requirement] {
        &self.requires
    }

    /// `name/version` reference without options
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl PartialEq for PackageDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version && self.options == other.options
    }
}

impl Eq for PackageDefinition {}

impl Hash for PackageDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.options.hash(state);
    }
}

impl fmt::Display for PackageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if !self.options.is_empty() {
            let options: Vec<String> =
                self.options.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(f, " [{}]", options.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_creation() {
        let def = PackageDefinition::new("openssl", "3.0.1")
            .with_requirement(Requirement::new("zlib", "1.2"))
            .with_option("shared", "True");

        assert_eq!(def.name, "openssl");
        assert_eq!(def.reference(), "openssl/3.0.1");
        assert_eq!(def.requires().len(), 1);
        assert_eq!(def.options.get("shared").map(String::as_str), Some("True"));
    }

    #[test]
    fn test_equality_ignores_requirements() {
        let a = PackageDefinition::new("openssl", "3.0.1")
            .with_requirement(Requirement::new("zlib", "1.2"));
        let b = PackageDefinition::new("openssl", "3.0.1");
        assert_eq!(a, b);

        let c = b.clone().with_option("shared", "True");
        assert_ne!(b, c);

        let d = PackageDefinition::new("openssl", "3.0.2");
        assert_ne!(b, d);
    }

    #[test]
    fn test_display_includes_options() {
        let def = PackageDefinition::new("zlib", "1.2")
            .with_option("shared", "True")
            .with_option("fPIC", "False");
        assert_eq!(def.to_string(), "zlib/1.2 [fPIC=False, shared=True]");
        assert_eq!(PackageDefinition::new("zlib", "1.2").to_string(), "zlib/1.2");
    }
}
