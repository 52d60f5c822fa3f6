//! Requires-only view of a graph.
//!
//! The projection keeps only topological edges (actual dependencies). It is
//! the structure ancestry, override distances and orderings are computed on.

use indexmap::{IndexMap, IndexSet};
use petgraph::algo::{dijkstra, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};

use super::orderings::TopologicalOrderings;

/// Directed graph of package names linked by topological edges
#[derive(Debug, Clone, Default)]
pub struct RequiresProjection {
    graph: DiGraph<String, ()>,
    index: IndexMap<String, NodeIndex>,
}

impl RequiresProjection {
    /// Create an empty projection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning the existing index if already present
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Add an edge, adding missing endpoints
    pub fn add_edge(&mut self, origin: &str, target: &str) {
        let from = self.add_node(origin);
        let to = self.add_node(target);
        self.graph.update_edge(from, to, ());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn has_edge(&self, origin: &str, target: &str) -> bool {
        match (self.index.get(origin), self.index.get(target)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check whether the projection contains a directed cycle
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Nodes with a directed path to `name`, nearest first. Empty when
    /// `name` is not part of the projection.
    pub fn ancestors_of(&self, name: &str) -> IndexSet<String> {
        let Some(&start) = self.index.get(name) else {
            return IndexSet::new();
        };
        let reversed = Reversed(&self.graph);
        let mut bfs = Bfs::new(reversed, start);
        let mut ancestors = IndexSet::new();
        while let Some(idx) = bfs.next(reversed) {
            if idx != start {
                ancestors.insert(self.graph[idx].clone());
            }
        }
        ancestors
    }

    /// Nodes reachable from `name`, nearest first, excluding `name` itself
    pub fn descendants_of(&self, name: &str) -> IndexSet<String> {
        let Some(&start) = self.index.get(name) else {
            return IndexSet::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut descendants = IndexSet::new();
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                descendants.insert(self.graph[idx].clone());
            }
        }
        descendants
    }

    /// Number of edges on the shortest path from `origin` to `target`
    pub fn shortest_path_len(&self, origin: &str, target: &str) -> Option<usize> {
        let from = *self.index.get(origin)?;
        let to = *self.index.get(target)?;
        let distances = dijkstra(&self.graph, from, Some(to), |_| 1usize);
        distances.get(&to).copied()
    }

    /// Projection over `subset` where `a -> b` whenever `b` is reachable
    /// from `a` in this projection.
    ///
    /// Restricting a partial order to a subset this way keeps exactly the
    /// relative orders every full topological ordering can induce on it.
    pub fn reachability_order(&self, subset: &IndexSet<String>) -> RequiresProjection {
        let mut order = RequiresProjection::new();
        for name in self.nodes().filter(|name| subset.contains(*name)) {
            order.add_node(name);
        }
        let members: Vec<String> = order.index.keys().cloned().collect();
        for name in &members {
            for reached in self.descendants_of(name) {
                if subset.contains(&reached) {
                    order.add_edge(name, &reached);
                }
            }
        }
        order
    }

    /// Every total order of the nodes consistent with the edges
    pub fn all_topological_orderings(&self) -> TopologicalOrderings {
        let labels: Vec<String> = self.graph.node_indices().map(|idx| self.graph[idx].clone()).collect();
        let mut successors = vec![Vec::new(); labels.len()];
        for edge in self.graph.raw_edges() {
            successors[edge.source().index()].push(edge.target().index());
        }
        TopologicalOrderings::new(labels, successors)
    }
}
