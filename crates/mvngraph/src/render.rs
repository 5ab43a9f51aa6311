//! Output rendering: PlantUML-wrapped DOT, node-link JSON, flat lists.
//!
//! All renderers iterate the graph in sorted order so output is
//! reproducible across runs.

use serde::Serialize;

use crate::error::Result;
use crate::graph::DepGraph;
use crate::query::{self, DepTree};

/// Node-link form of a graph, shaped for generic graph tooling:
/// `{"directed": true, "nodes": [{"id": …}], "edges": [{"source": …,
/// "target": …}]}`.
#[derive(Debug, Serialize)]
pub struct NodeLinkGraph {
    /// Always `true`; the graph is directed.
    pub directed: bool,
    /// One entry per node.
    pub nodes: Vec<NodeEntry>,
    /// One entry per edge.
    pub edges: Vec<EdgeEntry>,
}

/// A node in [`NodeLinkGraph`].
#[derive(Debug, Serialize)]
pub struct NodeEntry {
    /// Node identifier.
    pub id: String,
}

/// An edge in [`NodeLinkGraph`].
#[derive(Debug, Serialize)]
pub struct EdgeEntry {
    /// Edge source identifier.
    pub source: String,
    /// Edge target identifier.
    pub target: String,
}

impl From<&DepGraph> for NodeLinkGraph {
    fn from(graph: &DepGraph) -> Self {
        Self {
            directed: true,
            nodes: graph
                .sorted_nodes()
                .into_iter()
                .map(|id| NodeEntry { id: id.to_string() })
                .collect(),
            edges: graph
                .sorted_edges()
                .into_iter()
                .map(|(source, target)| EdgeEntry {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }
}

/// Render the graph as pretty-printed node-link JSON.
///
/// # Errors
///
/// Serialization failure only.
pub fn to_node_link_json(graph: &DepGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&NodeLinkGraph::from(graph))?)
}

/// Render the graph as a PlantUML-wrapped DOT diagram with root and leaf
/// clusters.
#[must_use]
pub fn to_plantuml(graph: &DepGraph) -> String {
    let roots = query::roots(graph);
    let leaves = query::leaves(graph);

    let mut lines = vec!["@startuml".to_string(), "digraph G {".to_string()];
    for node in graph.sorted_nodes() {
        lines.push(format!("  \"{node}\" [shape=box, style=rounded]"));
    }

    if !roots.is_empty() {
        lines.push("  subgraph cluster_roots {".to_string());
        lines.push("    label=\"Root Projects\";".to_string());
        for root in &roots {
            lines.push(format!("    \"{root}\";"));
        }
        lines.push("  }".to_string());
    }
    if !leaves.is_empty() {
        lines.push("  subgraph cluster_leaves {".to_string());
        lines.push("    label=\"Leaf Dependencies\";".to_string());
        for leaf in &leaves {
            lines.push(format!("    \"{leaf}\";"));
        }
        lines.push("  }".to_string());
    }

    for (src, dst) in graph.sorted_edges() {
        lines.push(format!("  \"{src}\" -> \"{dst}\";"));
    }
    lines.push("}".to_string());
    lines.push("@enduml".to_string());
    lines.join("\n")
}

/// Render a list of identifiers as a pretty-printed JSON array.
///
/// # Errors
///
/// Serialization failure only.
pub fn to_json_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Render a list of identifiers one per line.
#[must_use]
pub fn to_flat_list(items: &[String]) -> String {
    items.join("\n")
}

/// Render a nested reachability tree as pretty-printed JSON.
///
/// # Errors
///
/// Serialization failure only.
pub fn to_tree_json(tree: &DepTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DepGraph {
        let mut g = DepGraph::new();
        g.add_edge("root", "b");
        g.add_edge("b", "c");
        g
    }

    #[test]
    fn plantuml_has_markers_and_clusters() {
        let uml = to_plantuml(&sample());
        assert!(uml.starts_with("@startuml"));
        assert!(uml.ends_with("@enduml"));
        assert!(uml.contains("digraph G {"));
        assert!(uml.contains("subgraph cluster_roots"));
        assert!(uml.contains("label=\"Root Projects\";"));
        assert!(uml.contains("subgraph cluster_leaves"));
        assert!(uml.contains("label=\"Leaf Dependencies\";"));
    }

    #[test]
    fn plantuml_declares_every_node_and_edge() {
        let g = sample();
        let uml = to_plantuml(&g);
        for node in g.sorted_nodes() {
            assert!(uml.contains(&format!("\"{node}\" [shape=box, style=rounded]")));
        }
        assert!(uml.contains("\"root\" -> \"b\";"));
        assert!(uml.contains("\"b\" -> \"c\";"));
    }

    #[test]
    fn plantuml_of_empty_graph_omits_clusters() {
        let uml = to_plantuml(&DepGraph::new());
        assert!(!uml.contains("subgraph"));
    }

    #[test]
    fn node_link_json_shape() {
        let json = to_node_link_json(&sample()).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["directed"], serde_json::Value::Bool(true));
        let nodes = value["nodes"].as_array().expect("nodes array");
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n.get("id").is_some()));
        let edges = value["edges"].as_array().expect("edges array");
        assert_eq!(edges.len(), 2);
        assert!(edges
            .iter()
            .all(|e| e.get("source").is_some() && e.get("target").is_some()));
    }

    #[test]
    fn tree_json_nests_children() {
        let g = sample();
        let tree = crate::query::dependencies_tree(&g, "root", false);
        let json = to_tree_json(&tree).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert!(value["b"]["c"].is_object());
    }

    #[test]
    fn flat_list_is_newline_joined() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(to_flat_list(&items), "a\nb");
    }
}
