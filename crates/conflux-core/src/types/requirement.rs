//! Requirement types.
//!
//! A requirement is what one package declares about another: the target
//! name, a version expression, how the edge participates in the graph and,
//! for topological edges, what kind of dependency it is and in which
//! resolution context it must be satisfied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::OptionMap;
use crate::error::ConfluxError;
use crate::utils::hash::subgraph_key;

/// Requirement declared by a package on another package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    /// Target package name
    pub name: String,
    /// Version constraint, opaque to the graph builder
    #[serde(default, rename = "version")]
    pub version_expr: String,
    /// How the edge participates in traversal
    #[serde(default, rename = "type")]
    pub edge_kind: EdgeKind,
    /// Only meaningful for topological edges
    #[serde(default, rename = "kind")]
    pub requirement_kind: RequirementKind,
    /// Only meaningful for topological edges
    #[serde(default)]
    pub visibility: Visibility,
    /// Only meaningful for topological edges
    #[serde(default)]
    pub context: Context,
    #[serde(default, skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
}

/// Role of an edge in the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// An actual dependency; gates traversal and must form a DAG
    #[default]
    #[serde(alias = "requires")]
    Topological,
    /// Adjusts the version and options of the target
    #[serde(alias = "overrides")]
    Override,
    /// Adjusts only the options of the target
    Options,
}

/// What the dependent package does with the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    Asset,
    #[default]
    Library,
    Tool,
    Plugin,
}

/// How far a requirement propagates to consumers of the dependent package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Interface,
    #[default]
    Public,
    /// Always resolved in an isolated sub-graph
    Private,
}

/// Resolution universe a graph belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Packages linked into the final product
    #[default]
    Host,
    /// Packages executed while building (tools, generators)
    #[serde(alias = "other")]
    Build,
}

impl Requirement {
    /// Create a regular (topological, public, host library) requirement
    pub fn new(name: impl Into<String>, version_expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_expr: version_expr.into(),
            edge_kind: EdgeKind::Topological,
            requirement_kind: RequirementKind::Library,
            visibility: Visibility::Public,
            context: Context::Host,
            options: OptionMap::new(),
        }
    }

    /// Create an override requirement forcing `version_expr` on the target
    pub fn override_version(name: impl Into<String>, version_expr: impl Into<String>) -> Self {
        Self {
            edge_kind: EdgeKind::Override,
            ..Self::new(name, version_expr)
        }
    }

    /// Create an options-only requirement
    pub fn options_for(name: impl Into<String>) -> Self {
        Self {
            edge_kind: EdgeKind::Options,
            ..Self::new(name, "")
        }
    }

    /// Set the requirement kind
    pub fn with_kind(mut self, kind: RequirementKind) -> Self {
        self.requirement_kind = kind;
        self
    }

    /// Set the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the resolution context
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Add an option value
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Check if this requirement is an actual dependency
    pub fn is_topological(&self) -> bool {
        self.edge_kind == EdgeKind::Topological
    }

    /// Check if this requirement overrides the target version
    pub fn is_override(&self) -> bool {
        self.edge_kind == EdgeKind::Override
    }

    /// Whether satisfying this requirement from a graph in `current` context
    /// needs a separate sub-graph.
    ///
    /// Only topological requirements switch context: a private one always
    /// does, a public or interface one does when it names another context.
    pub fn switches_context(&self, current: Context) -> bool {
        self.is_topological() && (self.visibility == Visibility::Private || self.context != current)
    }

    /// Key identifying the sub-graph this requirement spawns
    pub fn subgraph_key(&self) -> String {
        subgraph_key(&self.name, self.context, &self.options)
    }

    /// Label describing the kind of edge, used in renderings
    pub fn kind_label(&self) -> &'static str {
        match self.edge_kind {
            EdgeKind::Topological => self.requirement_kind.as_str(),
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version_expr.is_empty() {
            write!(f, "{} ({})", self.name, self.kind_label())
        } else {
            write!(f, "{}/{} ({})", self.name, self.version_expr, self.kind_label())
        }
    }
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Topological => "topological",
            EdgeKind::Override => "override",
            EdgeKind::Options => "options",
        }
    }
}

impl RequirementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementKind::Asset => "asset",
            RequirementKind::Library => "library",
            RequirementKind::Tool => "tool",
            RequirementKind::Plugin => "plugin",
        }
    }
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Interface => "interface",
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Host => "host",
            Context::Build => "build",
        }
    }
}

impl FromStr for EdgeKind {
    type Err = ConfluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topological" | "requires" => Ok(EdgeKind::Topological),
            "override" | "overrides" => Ok(EdgeKind::Override),
            "options" => Ok(EdgeKind::Options),
            other => Err(ConfluxError::unsupported("edge kind", other)),
        }
    }
}

impl FromStr for RequirementKind {
    type Err = ConfluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(RequirementKind::Asset),
            "library" => Ok(RequirementKind::Library),
            "tool" => Ok(RequirementKind::Tool),
            "plugin" => Ok(RequirementKind::Plugin),
            other => Err(ConfluxError::unsupported("requirement kind", other)),
        }
    }
}

impl FromStr for Visibility {
    type Err = ConfluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interface" => Ok(Visibility::Interface),
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(ConfluxError::unsupported("visibility", other)),
        }
    }
}

impl FromStr for Context {
    type Err = ConfluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Context::Host),
            "build" | "other" => Ok(Context::Build),
            other => Err(ConfluxError::unsupported("context", other)),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_defaults() {
        let req = Requirement::new("zlib", "1.2.11");

        assert_eq!(req.name, "zlib");
        assert_eq!(req.version_expr, "1.2.11");
        assert!(req.is_topological());
        assert!(!req.is_override());
        assert_eq!(req.requirement_kind, RequirementKind::Library);
        assert_eq!(req.visibility, Visibility::Public);
        assert_eq!(req.context, Context::Host);
        assert!(req.options.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Requirement::new("zlib", "1.2").to_string(), "zlib/1.2 (library)");
        assert_eq!(
            Requirement::new("cmake", "3.20").with_kind(RequirementKind::Tool).to_string(),
            "cmake/3.20 (tool)"
        );
        assert_eq!(
            Requirement::override_version("zlib", "2.0").to_string(),
            "zlib/2.0 (override)"
        );
        assert_eq!(Requirement::options_for("zlib").to_string(), "zlib (options)");
    }

    #[test]
    fn test_context_switch_rules() {
        let public = Requirement::new("zlib", "1.0");
        assert!(!public.switches_context(Context::Host));
        assert!(public.switches_context(Context::Build));

        let private = Requirement::new("zlib", "1.0").with_visibility(Visibility::Private);
        assert!(private.switches_context(Context::Host));

        let tool = Requirement::new("cmake", "3.0").with_context(Context::Build);
        assert!(tool.switches_context(Context::Host));
        assert!(!tool.switches_context(Context::Build));

        // Overrides never spawn sub-graphs, whatever their other fields say
        let mut overriding = Requirement::override_version("zlib", "2.0");
        overriding.visibility = Visibility::Private;
        assert!(!overriding.switches_context(Context::Host));
    }

    #[test]
    fn test_subgraph_key_ignores_version() {
        let a = Requirement::new("zlib", "1.0").with_context(Context::Build);
        let b = Requirement::new("zlib", "2.0").with_context(Context::Build);
        let c = Requirement::new("zlib", "1.0").with_context(Context::Build).with_option("shared", "True");

        assert_eq!(a.subgraph_key(), b.subgraph_key());
        assert_ne!(a.subgraph_key(), c.subgraph_key());
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("override".parse::<EdgeKind>().unwrap(), EdgeKind::Override);
        assert_eq!("requires".parse::<EdgeKind>().unwrap(), EdgeKind::Topological);
        assert_eq!("plugin".parse::<RequirementKind>().unwrap(), RequirementKind::Plugin);
        assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);
        assert_eq!("other".parse::<Context>().unwrap(), Context::Build);

        let err = "conditional".parse::<EdgeKind>().unwrap_err();
        assert!(matches!(err, ConfluxError::UnsupportedRequirementKind { .. }));
        assert!(err.to_string().contains("conditional"));
    }

    #[test]
    fn test_serde_field_names() {
        let json = r#"{"name":"cmake","version":"3.20","type":"topological","kind":"tool","context":"build"}"#;
        let req: Requirement = serde_json::from_str(json).unwrap();
        assert_eq!(req.requirement_kind, RequirementKind::Tool);
        assert_eq!(req.context, Context::Build);
        assert_eq!(req.visibility, Visibility::Public);

        let bad = r#"{"name":"cmake","type":"maybe"}"#;
        assert!(serde_json::from_str::<Requirement>(bad).is_err());
    }
}
