//! Directed dependency graph storage and construction.
//!
//! Nodes are identifier strings (`artifactId` or `groupId:artifactId`),
//! edges point from a project to a dependency it declares. The graph is a
//! simple directed graph: parallel declarations collapse to one edge, and
//! cycles are legal data (cross-module A↔B declarations occur in the wild),
//! so every traversal in [`crate::query`] carries a visited guard.
//!
//! Once built, a graph is never mutated; [`DepGraph::reversed`] returns a
//! fresh edge-inverted copy.

use std::collections::HashMap;
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::info;

use crate::error::Result;
use crate::extract::{discover_poms, extract_dependencies, GraphOptions};

/// A directed graph over project/dependency identifiers.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, deduplicating by identifier.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&ix) = self.indices.get(id) {
            return ix;
        }
        let ix = self.graph.add_node(id.to_string());
        self.indices.insert(id.to_string(), ix);
        ix
    }

    /// Insert an edge `from → to`, inserting both endpoints as needed.
    /// A repeated insertion is a no-op (edges form a set).
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        self.graph.update_edge(a, b, ());
    }

    /// Is this identifier a node of the graph?
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All node identifiers, lexicographically sorted.
    #[must_use]
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.graph.node_weights().map(String::as_str).collect();
        nodes.sort_unstable();
        nodes
    }

    /// All edges as identifier pairs, lexicographically sorted.
    #[must_use]
    pub fn sorted_edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].as_str(),
                    self.graph[e.target()].as_str(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Out-neighbors of a node, lexicographically sorted. Absent node → empty.
    #[must_use]
    pub fn sorted_successors(&self, id: &str) -> Vec<&str> {
        let Some(&ix) = self.indices.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(ix, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// Number of incoming edges, or `None` for an absent node.
    #[must_use]
    pub fn in_degree(&self, id: &str) -> Option<usize> {
        let &ix = self.indices.get(id)?;
        Some(
            self.graph
                .neighbors_directed(ix, Direction::Incoming)
                .count(),
        )
    }

    /// Number of outgoing edges, or `None` for an absent node.
    #[must_use]
    pub fn out_degree(&self, id: &str) -> Option<usize> {
        let &ix = self.indices.get(id)?;
        Some(
            self.graph
                .neighbors_directed(ix, Direction::Outgoing)
                .count(),
        )
    }

    /// Does the graph contain the edge `from → to`?
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.indices.get(from), self.indices.get(to)) else {
            return false;
        };
        self.graph.find_edge(a, b).is_some()
    }

    /// A fresh copy with every edge inverted. The original is untouched.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut graph = self.graph.clone();
        graph.reverse();
        Self {
            graph,
            // petgraph keeps node indices stable across reverse()
            indices: self.indices.clone(),
        }
    }
}

/// Build the dependency graph for every `pom.xml` under `directory`.
///
/// Descriptors are processed in sorted-path order. Projects whose own group
/// is filtered out contribute nothing; surviving projects contribute a node
/// plus one edge per surviving declared dependency.
///
/// # Errors
///
/// The build aborts on the first descriptor that cannot be parsed or that
/// lacks an `<artifactId>` (fail-fast; no partial output).
pub fn build_dependency_graph(directory: &Path, options: &GraphOptions) -> Result<DepGraph> {
    let mut graph = DepGraph::new();
    for pom_path in discover_poms(directory) {
        let Some((project, deps)) = extract_dependencies(&pom_path, options)? else {
            continue;
        };
        graph.add_node(&project);
        for dep in &deps {
            graph.add_edge(&project, dep);
        }
    }
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    Ok(graph)
}
