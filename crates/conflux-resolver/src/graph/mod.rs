//! Resolution graph implementation using petgraph
//!
//! A [`Graph`] is one resolution context: packages keyed by name, edges
//! carrying the requirement that created them, and a registry of isolated
//! sub-graphs spawned by context-switching requirements. Nodes live in a
//! stable arena so pruning a branch never invalidates the remaining indices.

pub mod orderings;
pub mod projection;

use std::collections::HashSet;

use indexmap::IndexMap;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use conflux_core::{Context, PackageDefinition, Requirement};

pub use orderings::TopologicalOrderings;
pub use projection::RequiresProjection;

/// Discovery state of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    /// Not discovered yet
    #[default]
    White,
    /// Queued or being examined
    Gray,
    /// Settled
    Black,
}

/// Node in the graph representing one package
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub name: String,
    pub color: NodeColor,
    /// Attached once the node has been examined, cleared when it is pruned
    pub definition: Option<PackageDefinition>,
    /// Computed by [`Graph::finalize`]
    pub enabled: bool,
}

/// Edge in the graph carrying the requirement that created it
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    pub requirement: Requirement,
    /// Computed by [`Graph::finalize`]; disabled edges stay for diagnostics
    pub enabled: bool,
}

/// Borrowed view of one edge and its endpoints
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub origin: &'a str,
    pub target: &'a str,
    pub edge: &'a DependencyEdge,
}

/// A sub-graph and where it hangs off its parent
#[derive(Debug, Clone)]
pub struct SubgraphAttachment {
    /// Parent vertex whose requirement spawned the sub-graph
    pub vertex: String,
    pub requirement: Requirement,
    pub graph: Graph,
}

/// One resolution context
#[derive(Debug, Clone)]
pub struct Graph {
    graph: StableDiGraph<PackageNode, DependencyEdge>,
    /// Name lookup, kept in discovery order
    index: IndexMap<String, NodeIndex>,
    root: Option<String>,
    context: Context,
    /// Latest attachment for each hash of (name, context, options)
    subgraphs: IndexMap<String, usize>,
    attachments: Vec<SubgraphAttachment>,
}

impl PackageNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: NodeColor::White,
            definition: None,
            enabled: false,
        }
    }
}

impl DependencyEdge {
    pub fn new(requirement: Requirement) -> Self {
        Self {
            requirement,
            enabled: true,
        }
    }
}

impl Graph {
    /// Create an empty graph for `context`
    pub fn new(context: Context) -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: IndexMap::new(),
            root: None,
            context,
            subgraphs: IndexMap::new(),
            attachments: Vec::new(),
        }
    }

    /// Create a graph holding only its root node
    pub fn with_root(root: &str, context: Context) -> Self {
        let mut graph = Self::new(context);
        graph.add_node(root);
        graph.root = Some(root.to_string());
        graph
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Add a white node. Returns false if a node with that name already exists.
    pub fn add_node(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        let idx = self.graph.add_node(PackageNode::new(name));
        self.index.insert(name.to_string(), idx);
        true
    }

    /// Add the edge `origin -> target`, adding missing endpoints. Adding the
    /// same pair again replaces the requirement it carries.
    pub fn add_edge(&mut self, origin: &str, target: &str, requirement: Requirement) {
        self.add_node(origin);
        self.add_node(target);
        let from = self.index[origin];
        let to = self.index[target];
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge] = DependencyEdge::new(requirement),
            None => {
                self.graph.add_edge(from, to, DependencyEdge::new(requirement));
            },
        }
    }

    /// Remove nodes and every edge touching them, along with the sub-graphs
    /// they spawned
    pub fn remove_nodes<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Some(idx) = self.index.shift_remove(name) {
                self.graph.remove_node(idx);
                self.detach_subgraphs(name);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&PackageNode> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    pub(crate) fn node_mut(&mut self, name: &str) -> Option<&mut PackageNode> {
        let idx = *self.index.get(name)?;
        Some(&mut self.graph[idx])
    }

    /// Resolved definition of a node, if any
    pub fn definition(&self, name: &str) -> Option<&PackageDefinition> {
        self.node(name).and_then(|node| node.definition.as_ref())
    }

    /// Attach the definition a node resolved to
    pub fn set_definition(&mut self, name: &str, definition: PackageDefinition) {
        if let Some(node) = self.node_mut(name) {
            node.definition = Some(definition);
        }
    }

    pub fn set_color(&mut self, name: &str, color: NodeColor) {
        if let Some(node) = self.node_mut(name) {
            node.color = color;
        }
    }

    /// Forget what a node resolved to so it can be examined again
    pub(crate) fn reset_node(&mut self, name: &str) {
        if let Some(node) = self.node_mut(name) {
            node.definition = None;
            node.color = NodeColor::White;
        }
        self.detach_subgraphs(name);
    }

    /// All nodes in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.index.values().map(move |&idx| &self.graph[idx])
    }

    /// All edges, grouped by origin in discovery order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.index.values().flat_map(move |&idx| {
            let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
            edges.sort_by_key(|edge| self.discovery_order(edge.target()));
            edges.into_iter().map(move |edge| EdgeView {
                origin: &self.graph[edge.source()].name,
                target: &self.graph[edge.target()].name,
                edge: edge.weight(),
            })
        })
    }

    /// The edge `origin -> target`, if present
    pub fn edge(&self, origin: &str, target: &str) -> Option<&DependencyEdge> {
        let from = *self.index.get(origin)?;
        let to = *self.index.get(target)?;
        self.graph.find_edge(from, to).map(|edge| &self.graph[edge])
    }

    /// Edges pointing at `name`, as (origin, edge) pairs
    pub fn in_edges(&self, name: &str) -> Vec<(&str, &DependencyEdge)> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Incoming).collect();
        edges.sort_by_key(|edge| self.discovery_order(edge.source()));
        edges
            .into_iter()
            .map(|edge| (self.graph[edge.source()].name.as_str(), edge.weight()))
            .collect()
    }

    /// Edges leaving `name`, as (target, edge) pairs
    pub fn out_edges(&self, name: &str) -> Vec<(&str, &DependencyEdge)> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges_directed(idx, Direction::Outgoing).collect();
        edges.sort_by_key(|edge| self.discovery_order(edge.target()));
        edges
            .into_iter()
            .map(|edge| (self.graph[edge.target()].name.as_str(), edge.weight()))
            .collect()
    }

    /// Every node reachable from `name` following edges of any kind. `name`
    /// itself is not included.
    pub fn descendants(&self, name: &str) -> Vec<String> {
        let Some(&start) = self.index.get(name) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached = Vec::new();
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                reached.push(self.graph[idx].name.clone());
            }
        }
        reached
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

    /// The graph restricted to topological edges.
    ///
    /// The root is always part of the projection, so a root without
    /// dependencies still counts as required.
    pub fn requires_projection(&self) -> RequiresProjection {
        let mut required: HashSet<&str> = HashSet::new();
        if let Some(root) = self.root.as_deref().filter(|root| self.contains(root)) {
            required.insert(root);
        }
        for view in self.edges() {
            if view.edge.requirement.is_topological() {
                required.insert(view.origin);
                required.insert(view.target);
            }
        }

        let mut projection = RequiresProjection::new();
        for name in self.index.keys() {
            if required.contains(name.as_str()) {
                projection.add_node(name);
            }
        }
        for view in self.edges() {
            if view.edge.requirement.is_topological() {
                projection.add_edge(view.origin, view.target);
            }
        }
        projection
    }

    /// Nodes with a directed path to `name` through topological edges
    pub fn ancestors_of(&self, name: &str) -> Vec<String> {
        self.requires_projection().ancestors_of(name).into_iter().collect()
    }

    /// Compute which nodes and edges are logically part of the graph.
    ///
    /// A node is enabled iff it belongs to the requires projection. An edge
    /// is disabled when an endpoint is outside the projection. When several
    /// overrides reach the same target only the nearest one stays enabled:
    /// overrides whose origin also requires the target through topological
    /// edges rank by that distance, ahead of overrides that are the origin's
    /// only link to the target. Remaining ties keep the origin discovered
    /// first.
    ///
    /// Running it again on a finalized graph changes nothing.
    pub fn finalize(&mut self) {
        let projection = self.requires_projection();

        let node_indices: Vec<NodeIndex> = self.index.values().copied().collect();
        for idx in node_indices {
            let enabled = projection.contains(&self.graph[idx].name);
            self.graph[idx].enabled = enabled;
        }

        let mut overrides: IndexMap<NodeIndex, Vec<((bool, usize, usize), EdgeIndex)>> = IndexMap::new();
        let edge_indices: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        for edge in edge_indices {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let origin = &self.graph[from].name;
            let target = &self.graph[to].name;

            let enabled = projection.contains(origin) && projection.contains(target);
            if enabled && self.graph[edge].requirement.is_override() {
                let discovered = self.discovery_order(from);
                let rank = match projection.shortest_path_len(origin, target) {
                    Some(distance) => (false, distance, discovered),
                    None => (true, 1, discovered),
                };
                overrides.entry(to).or_default().push((rank, edge));
            }
            self.graph[edge].enabled = enabled;
        }

        for (_, mut sources) in overrides {
            if sources.len() > 1 {
                sources.sort_by_key(|&(rank, _)| rank);
                for &(_, edge) in &sources[1..] {
                    self.graph[edge].enabled = false;
                }
            }
        }
    }

    /// Register a fully built child graph spawned by `requirement` at `vertex`
    pub fn attach_subgraph(&mut self, vertex: &str, child: Graph, requirement: Requirement) {
        self.subgraphs.insert(requirement.subgraph_key(), self.attachments.len());
        self.attachments.push(SubgraphAttachment {
            vertex: vertex.to_string(),
            requirement,
            graph: child,
        });
    }

    /// Latest sub-graph attached for a requirement's (name, context, options)
    pub fn get_subgraph(&self, requirement: &Requirement) -> Option<&Graph> {
        let position = *self.subgraphs.get(&requirement.subgraph_key())?;
        self.attachments.get(position).map(|attachment| &attachment.graph)
    }

    /// Every (vertex, requirement, child graph) attachment in spawn order
    pub fn subgraphs(&self) -> impl Iterator<Item = (&str, &Requirement, &Graph)> {
        self.attachments
            .iter()
            .map(|attachment| (attachment.vertex.as_str(), &attachment.requirement, &attachment.graph))
    }

    /// Number of attached sub-graphs
    pub fn subgraph_count(&self) -> usize {
        self.attachments.len()
    }

    /// Drop the sub-graphs attached at `vertex`
    fn detach_subgraphs(&mut self, vertex: &str) {
        if !self.attachments.iter().any(|attachment| attachment.vertex == vertex) {
            return;
        }
        self.attachments.retain(|attachment| attachment.vertex != vertex);
        self.subgraphs = self
            .attachments
            .iter()
            .enumerate()
            .map(|(position, attachment)| (attachment.requirement.subgraph_key(), position))
            .collect();
    }

    fn discovery_order(&self, idx: NodeIndex) -> usize {
        self.index.get_index_of(&self.graph[idx].name).unwrap_or(usize::MAX)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Context::Host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requires(name: &str) -> Requirement {
        Requirement::new(name, "1.0")
    }

    #[test]
    fn test_graph_creation() {
        let graph = Graph::new(Context::Build);
        assert!(graph.is_empty());
        assert_eq!(graph.context(), Context::Build);
        assert_eq!(graph.root(), None);

        let graph = Graph::with_root("app", Context::Host);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.root(), Some("app"));
        assert_eq!(graph.node("app").unwrap().color, NodeColor::White);
    }

    #[test]
    fn test_add_edge_replaces_requirement() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "zlib", Requirement::new("zlib", "1.0"));
        graph.add_edge("app", "zlib", Requirement::override_version("zlib", "2.0"));

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge("app", "zlib").unwrap();
        assert!(edge.requirement.is_override());
        assert_eq!(edge.requirement.version_expr, "2.0");
        assert!(graph.contains("zlib"));
    }

    #[test]
    fn test_remove_nodes_keeps_other_indices() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("a", "b", requires("b"));
        graph.add_edge("app", "c", requires("c"));

        graph.remove_nodes(["a", "b"]);

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains("c"));
        assert!(graph.edge("app", "c").is_some());
        assert!(graph.in_edges("c").len() == 1);
        assert!(graph.out_edges("app").iter().all(|(target, _)| *target == "c"));
    }

    #[test]
    fn test_descendants_follow_every_edge_kind() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("a", "b", Requirement::override_version("b", "2.0"));
        graph.add_edge("b", "c", requires("c"));

        assert_eq!(graph.descendants("a"), vec!["b".to_string(), "c".to_string()]);
        assert!(graph.descendants("c").is_empty());
    }

    #[test]
    fn test_requires_projection_skips_non_topological_edges() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("a", "b", Requirement::override_version("b", "2.0"));
        graph.add_edge("a", "c", Requirement::options_for("c"));

        let projection = graph.requires_projection();
        assert!(projection.contains("app"));
        assert!(projection.contains("a"));
        assert!(!projection.contains("b"));
        assert!(!projection.contains("c"));
        assert_eq!(graph.ancestors_of("a"), vec!["app".to_string()]);
    }

    #[test]
    fn test_lonely_root_is_enabled() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.finalize();
        assert!(graph.node("app").unwrap().enabled);
    }

    #[test]
    fn test_finalize_disables_edges_outside_projection() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        // Override towards a package nobody depends on
        graph.add_edge("a", "ghost", Requirement::override_version("ghost", "2.0"));
        graph.finalize();

        assert!(graph.node("a").unwrap().enabled);
        assert!(!graph.node("ghost").unwrap().enabled);
        assert!(graph.edge("app", "a").unwrap().enabled);
        assert!(!graph.edge("a", "ghost").unwrap().enabled);
    }

    #[test]
    fn test_finalize_keeps_override_from_required_sibling() {
        // b overrides c but only a depends on c
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("app", "b", requires("b"));
        graph.add_edge("a", "c", requires("c"));
        graph.add_edge("b", "c", Requirement::override_version("c", "2.0"));
        graph.finalize();

        assert!(graph.edge("b", "c").unwrap().enabled);
        assert!(graph.edge("a", "c").unwrap().enabled);
    }

    #[test]
    fn test_finalize_prefers_override_with_requires_path() {
        // a overrides c and also requires it through m; b only overrides it
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "b", requires("b"));
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("a", "m", requires("m"));
        graph.add_edge("m", "c", requires("c"));
        graph.add_edge("b", "c", Requirement::override_version("c", "3.0"));
        graph.add_edge("a", "c", Requirement::override_version("c", "2.0"));
        graph.finalize();

        assert!(graph.edge("a", "c").unwrap().enabled);
        assert!(!graph.edge("b", "c").unwrap().enabled);
    }

    #[test]
    fn test_finalize_nearest_override_wins() {
        // a reaches c in two steps, b in three; both override c
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("app", "b", requires("b"));
        graph.add_edge("a", "m", requires("m"));
        graph.add_edge("m", "c", requires("c"));
        graph.add_edge("b", "n", requires("n"));
        graph.add_edge("n", "p", requires("p"));
        graph.add_edge("p", "c", requires("c"));
        graph.add_edge("b", "c", Requirement::override_version("c", "3.0"));
        graph.add_edge("a", "c", Requirement::override_version("c", "2.0"));
        graph.finalize();

        assert!(graph.edge("a", "c").unwrap().enabled);
        assert!(!graph.edge("b", "c").unwrap().enabled);
    }

    #[test]
    fn test_finalize_equal_distance_keeps_first_discovered_origin() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        graph.add_edge("app", "b", requires("b"));
        graph.add_edge("a", "m", requires("m"));
        graph.add_edge("b", "n", requires("n"));
        graph.add_edge("m", "c", requires("c"));
        graph.add_edge("n", "c", requires("c"));
        graph.add_edge("b", "c", Requirement::override_version("c", "3.0"));
        graph.add_edge("a", "c", Requirement::override_version("c", "2.0"));
        graph.finalize();

        assert!(graph.edge("a", "c").unwrap().enabled);
        assert!(!graph.edge("b", "c").unwrap().enabled);
    }

    #[test]
    fn test_subgraph_registry() {
        let mut graph = Graph::with_root("app", Context::Host);
        let tool = Requirement::new("cmake", "3.20").with_context(Context::Build);
        let child = Graph::with_root("cmake", Context::Build);

        assert!(graph.get_subgraph(&tool).is_none());
        graph.attach_subgraph("app", child, tool.clone());

        let found = graph.get_subgraph(&tool).unwrap();
        assert_eq!(found.root(), Some("cmake"));
        assert!(!graph.contains("cmake"));

        let attached: Vec<_> = graph.subgraphs().collect();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].0, "app");
        assert_eq!(attached[0].1, &tool);
    }

    #[test]
    fn test_colliding_keys_keep_their_own_child() {
        // Same tool, context and options at two versions
        let mut graph = Graph::with_root("app", Context::Host);
        let old = Requirement::new("cmake", "3.18").with_context(Context::Build);
        let new = Requirement::new("cmake", "3.20").with_context(Context::Build);
        assert_eq!(old.subgraph_key(), new.subgraph_key());

        let child = |version: &str| {
            let mut child = Graph::with_root("cmake", Context::Build);
            child.set_definition("cmake", PackageDefinition::new("cmake", version));
            child
        };
        graph.attach_subgraph("a", child("3.18"), old);
        graph.attach_subgraph("b", child("3.20"), new.clone());

        let triples: Vec<_> = graph
            .subgraphs()
            .map(|(vertex, req, child)| {
                let resolved = child.definition("cmake").map(|d| d.version.clone());
                (vertex, req.version_expr.clone(), resolved)
            })
            .collect();
        assert_eq!(
            triples,
            vec![
                ("a", "3.18".to_string(), Some("3.18".to_string())),
                ("b", "3.20".to_string(), Some("3.20".to_string())),
            ]
        );
        assert_eq!(graph.subgraph_count(), 2);
        // Lookup by key returns the latest attachment
        assert_eq!(graph.get_subgraph(&new).unwrap().definition("cmake").unwrap().version, "3.20");

        graph.add_edge("app", "b", requires("b"));
        graph.remove_nodes(["b"]);
        assert_eq!(graph.get_subgraph(&new).unwrap().definition("cmake").unwrap().version, "3.18");
    }

    #[test]
    fn test_removing_vertex_drops_its_subgraphs() {
        let mut graph = Graph::with_root("app", Context::Host);
        graph.add_edge("app", "a", requires("a"));
        let tool = Requirement::new("cmake", "3.20").with_context(Context::Build);
        graph.attach_subgraph("a", Graph::with_root("cmake", Context::Build), tool.clone());
        graph.attach_subgraph("app", Graph::with_root("cmake", Context::Build), tool.clone());

        graph.remove_nodes(["a"]);
        assert_eq!(graph.subgraphs().count(), 1);
        assert_eq!(graph.subgraph_count(), 1);

        graph.reset_node("app");
        assert_eq!(graph.subgraphs().count(), 0);
        assert_eq!(graph.subgraph_count(), 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Random DAG over n0..n{k}, rooted at n0, with a mix of edge kinds
    fn random_graph(num_nodes: usize, edges: Vec<(usize, usize, u8)>) -> Graph {
        let mut graph = Graph::with_root("n0", Context::Host);
        for (from, to, kind) in edges {
            if from < to && to < num_nodes {
                let name = format!("n{}", to);
                let requirement = match kind % 3 {
                    0 => Requirement::override_version(name.as_str(), "2.0"),
                    1 => Requirement::options_for(name.as_str()),
                    _ => Requirement::new(name.as_str(), "1.0"),
                };
                graph.add_edge(&format!("n{}", from), &name, requirement);
            }
        }
        graph
    }

    fn flags(graph: &Graph) -> (Vec<bool>, Vec<bool>) {
        (
            graph.nodes().map(|node| node.enabled).collect(),
            graph.edges().map(|view| view.edge.enabled).collect(),
        )
    }

    proptest! {
        #[test]
        fn finalize_is_idempotent(
            num_nodes in 2usize..8,
            edges in prop::collection::vec((0usize..8, 0usize..8, any::<u8>()), 0..16)
        ) {
            let mut graph = random_graph(num_nodes, edges);
            graph.finalize();
            let first = flags(&graph);
            graph.finalize();
            prop_assert_eq!(first, flags(&graph));
        }

        #[test]
        fn at_most_one_enabled_override_per_target(
            num_nodes in 2usize..8,
            edges in prop::collection::vec((0usize..8, 0usize..8, any::<u8>()), 0..16)
        ) {
            let mut graph = random_graph(num_nodes, edges);
            graph.finalize();
            for node in graph.nodes() {
                let enabled_overrides = graph
                    .in_edges(&node.name)
                    .iter()
                    .filter(|(_, edge)| edge.enabled && edge.requirement.is_override())
                    .count();
                prop_assert!(enabled_overrides <= 1);
            }
        }
    }
}
