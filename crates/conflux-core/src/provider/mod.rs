//! Package metadata source contract.
//!
//! The graph builder never decides versions or options itself. For every
//! node it hands the provider the requirements reaching that node, in one
//! particular topological order, and uses whatever definition comes back.

use std::sync::Arc;

use crate::error::ConfluxResult;
use crate::types::{PackageDefinition, Requirement};

/// A requirement together with the package that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Name of the declaring package
    pub origin: String,
    pub requirement: Requirement,
}

impl Constraint {
    pub fn new(origin: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            origin: origin.into(),
            requirement,
        }
    }
}

/// Resolves package names into concrete definitions
///
/// Implementations may answer differently for different orderings of the
/// same constraints; the builder checks every ordering the graph allows and
/// reports an ambiguity when answers disagree. Any error returned aborts the
/// whole build.
///
/// Providers must be shareable across threads so sibling sub-graphs can be
/// built in parallel.
pub trait Provider: Send + Sync {
    /// Resolve `name` under `constraints`, given in topological order.
    /// An empty slice means `name` is the root of a graph.
    fn get_definition(
        &self,
        name: &str,
        constraints: &[Constraint],
    ) -> ConfluxResult<PackageDefinition>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn get_definition(
        &self,
        name: &str,
        constraints: &[Constraint],
    ) -> ConfluxResult<PackageDefinition> {
        (**self).get_definition(name, constraints)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn get_definition(
        &self,
        name: &str,
        constraints: &[Constraint],
    ) -> ConfluxResult<PackageDefinition> {
        (**self).get_definition(name, constraints)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn get_definition(
        &self,
        name: &str,
        constraints: &[Constraint],
    ) -> ConfluxResult<PackageDefinition> {
        (**self).get_definition(name, constraints)
    }
}
