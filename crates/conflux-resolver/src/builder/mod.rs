//! Breadth-first graph builder
//!
//! Expands a graph from its root one vertex at a time. Each examined vertex
//! is resolved against the requirements currently reaching it, then its own
//! requirements are added as edges. A requirement reaching a vertex that was
//! already examined invalidates what that vertex resolved to: its branch is
//! pruned and it goes back into the queue. Context-switching requirements
//! are satisfied by separate sub-graphs built with the same provider.

use std::collections::VecDeque;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use conflux_core::{ConfluxError, ConfluxResult, Constraint, Context, EdgeKind, Provider, Requirement};

use crate::graph::{Graph, NodeColor};
use crate::resolve::resolve;


/// Options controlling a graph build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Context of the top-level graph
    #[serde(default)]
    pub context: Context,
    /// Build sibling sub-graphs on the rayon pool
    #[serde(default)]
    pub parallel_subgraphs: bool,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn with_parallel_subgraphs(mut self, parallel: bool) -> Self {
        self.parallel_subgraphs = parallel;
        self
    }
}

/// Build the graph rooted at `root` in the host context
pub fn build<P>(root: &str, provider: &P) -> ConfluxResult<Graph>
where
    P: Provider + ?Sized,
{
    build_with(root, provider, &BuildOptions::default())
}

/// Build the graph rooted at `root` in `context`
pub fn build_in_context<P>(root: &str, provider: &P, context: Context) -> ConfluxResult<Graph>
where
    P: Provider + ?Sized,
{
    build_with(root, provider, &BuildOptions::default().with_context(context))
}

/// Build the graph rooted at `root` with explicit options
pub fn build_with<P>(root: &str, provider: &P, options: &BuildOptions) -> ConfluxResult<Graph>
where
    P: Provider + ?Sized,
{
    info!(root, context = %options.context, "building graph");
    let graph = Graph::with_root(root, options.context);
    let graph = GraphBuilder::new(graph, provider, options.clone(), Vec::new()).run()?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        subgraphs = graph.subgraph_count(),
        "graph built"
    );
    Ok(graph)
}

/// State of one build: the graph under construction and its work queue
struct GraphBuilder<'p, P: ?Sized> {
    graph: Graph,
    provider: &'p P,
    options: BuildOptions,
    queue: VecDeque<String>,
    /// Sub-graph keys of the spawns enclosing this build
    lineage: Vec<String>,
}

impl<'p, P> GraphBuilder<'p, P>
where
    P: Provider + ?Sized,
{
    fn new(graph: Graph, provider: &'p P, options: BuildOptions, lineage: Vec<String>) -> Self {
        let mut builder = Self {
            graph,
            provider,
            options,
            queue: VecDeque::new(),
            lineage,
        };
        if let Some(root) = builder.graph.root().map(str::to_string) {
            builder.enqueue(&root);
        }
        builder
    }

    fn run(mut self) -> ConfluxResult<Graph> {
        while let Some(vertex) = self.queue.pop_front() {
            self.examine(&vertex)?;
        }
        self.graph.finalize();
        Ok(self.graph)
    }

    fn examine(&mut self, vertex: &str) -> ConfluxResult<()> {
        debug!(vertex, context = %self.graph.context(), "examining vertex");

        if self.graph.definition(vertex).is_none() {
            match resolve(vertex, &self.graph, self.provider)? {
                Some(definition) => {
                    debug!(vertex, definition = %definition, "resolved");
                    self.graph.set_definition(vertex, definition);
                },
                None => {
                    debug!(vertex, "not required by any dependency, skipping");
                    return Ok(());
                },
            }
        }

        let requires = match self.graph.definition(vertex) {
            Some(definition) => definition.requires().to_vec(),
            None => return Ok(()),
        };

        let mut spawns = Vec::new();
        for requirement in requires {
            if requirement.switches_context(self.graph.context()) {
                spawns.push(requirement);
            } else {
                self.add_requirement(vertex, requirement)?;
            }
        }
        self.spawn_subgraphs(vertex, spawns)?;

        if self.queue.is_empty() {
            self.graph.set_color(vertex, NodeColor::Black);
        }
        Ok(())
    }

    fn add_requirement(&mut self, vertex: &str, requirement: Requirement) -> ConfluxResult<()> {
        let target = requirement.name.clone();
        if target == vertex {
            return Err(ConfluxError::CycleDetected {
                vertex: target,
                origin: vertex.to_string(),
            });
        }

        let discovered = self.graph.contains(&target);
        let traverses = requirement.edge_kind != EdgeKind::Options;
        self.graph.add_edge(vertex, &target, requirement);

        if !discovered {
            if traverses {
                debug!(origin = vertex, dependency = %target, "tree edge");
                self.enqueue(&target);
            }
            return Ok(());
        }

        if traverses && !self.queue.contains(&target) {
            debug!(origin = vertex, dependency = %target, "non-tree edge");
            self.prune(&target, vertex)?;
            self.enqueue(&target);
        }
        Ok(())
    }

    /// Discard everything `target` contributed so it can be examined again
    /// under the constraints now reaching it
    fn prune(&mut self, target: &str, origin: &str) -> ConfluxResult<()> {
        let branch = self.graph.descendants(target);
        if branch.iter().any(|name| name == origin) {
            return Err(ConfluxError::CycleDetected {
                vertex: target.to_string(),
                origin: origin.to_string(),
            });
        }

        debug!(vertex = target, removed = branch.len(), "pruning branch");
        self.queue.retain(|queued| !branch.contains(queued));
        self.graph.remove_nodes(branch.iter().map(String::as_str));
        self.graph.reset_node(target);
        Ok(())
    }

    fn enqueue(&mut self, vertex: &str) {
        self.graph.set_color(vertex, NodeColor::Gray);
        self.queue.push_back(vertex.to_string());
    }

    fn spawn_subgraphs(&mut self, vertex: &str, requirements: Vec<Requirement>) -> ConfluxResult<()> {
        if requirements.is_empty() {
            return Ok(());
        }

        let provider = self.provider;
        let options = &self.options;
        let lineage = &self.lineage;

        let children: Vec<ConfluxResult<Graph>> =
            if options.parallel_subgraphs && requirements.len() > 1 {
                requirements
                    .par_iter()
                    .map(|requirement| build_subgraph(vertex, requirement, provider, options, lineage))
                    .collect()
            } else {
                let mut children = Vec::with_capacity(requirements.len());
                for requirement in &requirements {
                    children.push(Ok(build_subgraph(vertex, requirement, provider, options, lineage)?));
                }
                children
            };

        for (requirement, child) in requirements.into_iter().zip(children) {
            self.graph.attach_subgraph(vertex, child?, requirement);
        }
        Ok(())
    }
}

/// Build the isolated graph satisfying a context-switching requirement
fn build_subgraph<P>(
    vertex: &str,
    requirement: &Requirement,
    provider: &P,
    options: &BuildOptions,
    lineage: &[String],
) -> ConfluxResult<Graph>
where
    P: Provider + ?Sized,
{
    let key = requirement.subgraph_key();
    if lineage.contains(&key) {
        return Err(ConfluxError::CycleDetected {
            vertex: requirement.name.clone(),
            origin: vertex.to_string(),
        });
    }
    debug!(
        vertex,
        requirement = %requirement,
        context = %requirement.context,
        "spawning sub-graph"
    );

    let constraint = Constraint::new(vertex, requirement.clone());
    let definition = provider.get_definition(&requirement.name, std::slice::from_ref(&constraint))?;

    let mut graph = Graph::with_root(&requirement.name, requirement.context);
    graph.set_definition(&requirement.name, definition);

    let mut lineage = lineage.to_vec();
    lineage.push(key);
    let options = options.clone().with_context(requirement.context);
    GraphBuilder::new(graph, provider, options, lineage).run()
}
