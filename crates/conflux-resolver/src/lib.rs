//! Incremental dependency graph builder for conflux
//!
//! This crate expands a package graph breadth-first from a root, asking a
//! [`Provider`](conflux_core::Provider) for every package definition. It
//! re-resolves packages whose constraints change mid-traversal, rejects
//! cycles, reports constraints whose outcome depends on an arbitrary
//! ordering, and isolates context-switching requirements in sub-graphs.
//!
//! ```no_run
//! # fn demo(provider: &dyn conflux_core::Provider) -> conflux_core::ConfluxResult<()> {
//! let graph = conflux_resolver::build("app", provider)?;
//! println!("{}", graph.render_tree());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod export;
pub mod graph;
pub mod resolve;

// Re-export main types
pub use builder::{build, build_in_context, build_with, BuildOptions};
pub use export::to_dot;
pub use graph::{
    DependencyEdge, EdgeView, Graph, NodeColor, PackageNode, RequiresProjection, SubgraphAttachment,
    TopologicalOrderings,
};
pub use resolve::resolve;
