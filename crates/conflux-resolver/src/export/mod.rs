//! Text renderings of finalized graphs
//!
//! Both views walk the public accessors only: nodes, edges and sub-graph
//! attachments. Nothing here changes a graph.

use conflux_core::Requirement;

use crate::graph::Graph;

/// Child entry in the tree view
enum TreeChild<'a> {
    Node(&'a str),
    Subgraph(&'a Requirement, &'a Graph),
}

impl Graph {
    /// Indented dependency tree of the enabled topological edges, starting at
    /// the root. Sub-graphs are shown under the vertex that spawned them,
    /// tagged with their context.
    ///
    /// Packages reached through several paths are printed once per path.
    pub fn render_tree(&self) -> String {
        let mut output = String::new();
        let Some(root) = self.root() else {
            return output;
        };
        output.push_str(&format!("{}\n", self.node_label(root)));
        self.render_children(&mut output, root, "");
        output
    }

    fn render_children(&self, output: &mut String, vertex: &str, prefix: &str) {
        let mut children: Vec<TreeChild<'_>> = self
            .out_edges(vertex)
            .into_iter()
            .filter(|(_, edge)| edge.enabled && edge.requirement.is_topological())
            .map(|(target, _)| TreeChild::Node(target))
            .collect();
        children.extend(
            self.subgraphs()
                .filter(|(origin, _, _)| *origin == vertex)
                .map(|(_, requirement, child)| TreeChild::Subgraph(requirement, child)),
        );

        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });

            match child {
                TreeChild::Node(name) => {
                    output.push_str(&format!("{prefix}{connector}{}\n", self.node_label(name)));
                    self.render_children(output, name, &child_prefix);
                },
                TreeChild::Subgraph(requirement, graph) => {
                    let Some(root) = graph.root() else {
                        continue;
                    };
                    output.push_str(&format!(
                        "{prefix}{connector}[{}] {} ({})\n",
                        graph.context(),
                        graph.node_label(root),
                        requirement.kind_label()
                    ));
                    graph.render_children(output, root, &child_prefix);
                },
            }
        }
    }

    fn node_label(&self, name: &str) -> String {
        self.definition(name)
            .map(ToString::to_string)
            .unwrap_or_else(|| name.to_string())
    }
}

/// Render a graph and its sub-graphs in Graphviz DOT format.
///
/// Disabled nodes and edges are dotted and enabled overrides are blue.
/// Sub-graph nodes are prefixed with `vertex::` of the spawning vertex and
/// hang off it through a red edge for a foreign context, blue otherwise.
pub fn to_dot(graph: &Graph) -> String {
    let mut output = String::from("digraph {\n    rankdir=BT;\n");
    write_scope(&mut output, graph, "");
    output.push_str("}\n");
    output
}

fn write_scope(output: &mut String, graph: &Graph, scope: &str) {
    for node in graph.nodes() {
        let id = format!("{scope}{}", node.name);
        if node.enabled {
            let label = format!("{scope}{}", graph.node_label(&node.name));
            output.push_str(&format!("    {} [label={}];\n", quote(&id), quote(&label)));
        } else {
            output.push_str(&format!("    {} [style=dotted];\n", quote(&id)));
        }
    }

    for view in graph.edges() {
        let (style, color) = if !view.edge.enabled {
            ("dotted", "black")
        } else if view.edge.requirement.is_override() {
            ("solid", "blue")
        } else {
            ("solid", "black")
        };
        output.push_str(&format!(
            "    {} -> {} [style={style}, color={color}, label={}];\n",
            quote(&format!("{scope}{}", view.origin)),
            quote(&format!("{scope}{}", view.target)),
            quote(&view.edge.requirement.to_string()),
        ));
    }

    for (vertex, requirement, child) in graph.subgraphs() {
        let child_scope = format!("{scope}{vertex}::");
        write_scope(output, child, &child_scope);

        let color = if requirement.context != graph.context() { "red" } else { "blue" };
        output.push_str(&format!(
            "    {} -> {} [color={color}, label={}];\n",
            quote(&format!("{scope}{vertex}")),
            quote(&format!("{child_scope}{}", requirement.name)),
            quote(&requirement.to_string()),
        ));
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
