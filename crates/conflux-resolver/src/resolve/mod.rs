//! Definition lookup for a single vertex
//!
//! Gathers the requirements reaching a vertex from required packages and asks
//! the provider for a definition under every topological ordering of their
//! origins. Disagreeing answers mean the graph alone does not determine the
//! package, which is reported as an ambiguity.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use conflux_core::{ConfluxError, ConfluxResult, Constraint, PackageDefinition, Provider};

use crate::graph::Graph;

/// Resolve the definition of `vertex` against the current graph.
///
/// Returns `Ok(None)` when `vertex` is not part of the requires projection,
/// i.e. nothing actually depends on it yet.
pub fn resolve<P>(vertex: &str, graph: &Graph, provider: &P) -> ConfluxResult<Option<PackageDefinition>>
where
    P: Provider + ?Sized,
{
    let in_edges = graph.in_edges(vertex);
    if in_edges.is_empty() {
        return provider.get_definition(vertex, &[]).map(Some);
    }

    let projection = graph.requires_projection();
    if !projection.contains(vertex) {
        return Ok(None);
    }

    // Override and options edges count whenever their origin is itself
    // required; the origin's own ancestry places it among the others.
    let constraints_by_origin: IndexMap<&str, Constraint> = in_edges
        .into_iter()
        .filter(|(origin, _)| projection.contains(*origin))
        .map(|(origin, edge)| (origin, Constraint::new(origin, edge.requirement.clone())))
        .collect();

    let origins: IndexSet<String> = constraints_by_origin.keys().map(|origin| origin.to_string()).collect();
    let order = projection.reachability_order(&origins);

    let mut definitions: Vec<PackageDefinition> = Vec::new();
    let mut orderings = 0usize;
    for ordering in order.all_topological_orderings() {
        orderings += 1;
        trace!(vertex, ordering = ?ordering, "querying provider");
        let constraints: Vec<Constraint> = ordering
            .iter()
            .filter_map(|origin| constraints_by_origin.get(origin.as_str()).cloned())
            .collect();
        let definition = provider.get_definition(vertex, &constraints)?;
        if !definitions.contains(&definition) {
            definitions.push(definition);
        }
    }

    if orderings == 0 {
        let origin = origins.first().cloned().unwrap_or_default();
        return Err(ConfluxError::CycleDetected {
            vertex: vertex.to_string(),
            origin,
        });
    }

    if definitions.len() > 1 {
        return Err(ConfluxError::AmbiguousResolution {
            name: vertex.to_string(),
            definitions: definitions.iter().map(ToString::to_string).collect(),
        });
    }

    Ok(definitions.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conflux_core::{Context, Requirement};
    use std::sync::Mutex;

    /// Picks the version of the last constraint and records every call
    #[derive(Default)]
    struct LastWins {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Provider for LastWins {
        fn get_definition(
            &self,
            name: &str,
            constraints: &[Constraint],
        ) -> ConfluxResult<PackageDefinition> {
            let origins = constraints.iter().map(|c| c.origin.clone()).collect();
            self.calls.lock().unwrap().push(origins);
            let version = constraints
                .last()
                .map(|c| c.requirement.version_expr.clone())
                .unwrap_or_else(|| "1.0".to_string());
            Ok(PackageDefinition::new(name, version))
        }
    }

    fn diamond(left: &str, right: &str) -> Graph {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "x", Requirement::new("x", "1.0"));
        graph.add_edge("app", "y", Requirement::new("y", "1.0"));
        graph.add_edge("x", "z", Requirement::new("z", left));
        graph.add_edge("y", "z", Requirement::new("z", right));
        graph
    }

    #[test]
    fn test_root_is_resolved_without_constraints() {
        let graph = Graph::with_root("app", Context::Host);
        let provider = LastWins::default();

        let definition = resolve("app", &graph, &provider).unwrap().unwrap();
        assert_eq!(definition.reference(), "app/1.0");
        assert_eq!(provider.calls.lock().unwrap().as_slice(), &[Vec::<String>::new()]);
    }

    #[test]
    fn test_agreeing_orderings_resolve() {
        let graph = diamond("2.0", "2.0");
        let provider = LastWins::default();

        let definition = resolve("z", &graph, &provider).unwrap().unwrap();
        assert_eq!(definition.version, "2.0");
        // x and y are unordered, so both orderings are checked
        assert_eq!(provider.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_disagreeing_orderings_are_ambiguous() {
        let graph = diamond("2.0", "1.0");
        let err = resolve("z", &graph, &LastWins::default()).unwrap_err();

        match err {
            ConfluxError::AmbiguousResolution { name, definitions } => {
                assert_eq!(name, "z");
                assert_eq!(definitions.len(), 2);
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_constraints_follow_dependency_order() {
        // app -> x -> z and app -> z: app always precedes x
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "x", Requirement::new("x", "1.0"));
        graph.add_edge("x", "z", Requirement::new("z", "1.0"));
        graph.add_edge("app", "z", Requirement::new("z", "3.0"));
        let provider = LastWins::default();

        let definition = resolve("z", &graph, &provider).unwrap().unwrap();
        assert_eq!(definition.version, "1.0");
        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec!["app".to_string(), "x".to_string()]]);
    }

    #[test]
    fn test_override_from_required_sibling_counts() {
        // b reaches a only through its override
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", Requirement::new("a", "1.0"));
        graph.add_edge("app", "b", Requirement::new("b", "1.0"));
        graph.add_edge("b", "a", Requirement::override_version("a", "2.0"));
        let provider = LastWins::default();

        let definition = resolve("a", &graph, &provider).unwrap().unwrap();
        assert_eq!(definition.version, "2.0");
        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[vec!["app".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_unordered_override_is_ambiguous() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "x", Requirement::new("x", "1.0"));
        graph.add_edge("app", "y", Requirement::new("y", "1.0"));
        graph.add_edge("x", "z", Requirement::override_version("z", "2.0"));
        graph.add_edge("y", "z", Requirement::new("z", "1.0"));

        let err = resolve("z", &graph, &LastWins::default()).unwrap_err();
        assert!(matches!(err, ConfluxError::AmbiguousResolution { ref name, .. } if name == "z"));
    }

    #[test]
    fn test_override_from_unrequired_origin_is_ignored() {
        // ghost is only reachable through an override, so it is not required
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", Requirement::new("a", "1.0"));
        graph.add_edge("app", "ghost", Requirement::override_version("ghost", "1.0"));
        graph.add_edge("ghost", "a", Requirement::override_version("a", "3.0"));

        let definition = resolve("a", &graph, &LastWins::default()).unwrap().unwrap();
        assert_eq!(definition.version, "1.0");
    }

    #[test]
    fn test_vertex_outside_projection_is_skipped() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "zlib", Requirement::override_version("zlib", "2.0"));

        assert!(resolve("zlib", &graph, &LastWins::default()).unwrap().is_none());
    }

    #[test]
    fn test_provider_errors_propagate() {
        struct Failing;
        impl Provider for Failing {
            fn get_definition(
                &self,
                name: &str,
                _constraints: &[Constraint],
            ) -> ConfluxResult<PackageDefinition> {
                Err(ConfluxError::PackageNotFound {
                    name: name.to_string(),
                })
            }
        }

        let err = resolve("app", &Graph::with_root("app", Context::Host), &Failing).unwrap_err();
        assert!(matches!(err, ConfluxError::PackageNotFound { .. }));
    }
}
