//! Pure query operations over a built [`DepGraph`].
//!
//! Every operation is a read-only transform. Traversals expand a node's
//! out-neighbors in lexicographic order, which makes layering, tie-breaks,
//! and path choices deterministic.
//!
//! Absent-module policy: the closure functions return empty collections for
//! a module that is not in the graph. Strict validation happens at the CLI
//! boundary, not here.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::DepGraph;

/// Nodes with no incoming edges, sorted.
#[must_use]
pub fn roots(graph: &DepGraph) -> Vec<String> {
    filtered_nodes(graph, |g, n| g.in_degree(n) == Some(0))
}

/// Nodes with no outgoing edges, sorted.
#[must_use]
pub fn leaves(graph: &DepGraph) -> Vec<String> {
    filtered_nodes(graph, |g, n| g.out_degree(n) == Some(0))
}

/// Sorted nodes satisfying a predicate.
fn filtered_nodes(graph: &DepGraph, predicate: impl Fn(&DepGraph, &str) -> bool) -> Vec<String> {
    graph
        .sorted_nodes()
        .into_iter()
        .filter(|n| predicate(graph, n))
        .map(str::to_string)
        .collect()
}

/// All nodes reachable from `module` along dependency edges, excluding
/// `module` itself, sorted. Absent module → empty.
///
/// Cycle-safe: the start node is seeded into the visited set, so even a
/// cycle back to `module` never re-adds it.
#[must_use]
pub fn transitive_dependencies(graph: &DepGraph, module: &str) -> Vec<String> {
    if !graph.contains(module) {
        return Vec::new();
    }
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    visited.insert(module.to_string());
    queue.push_back(module.to_string());

    while let Some(current) = queue.pop_front() {
        for next in graph.sorted_successors(&current) {
            if visited.insert(next.to_string()) {
                queue.push_back(next.to_string());
            }
        }
    }

    visited.remove(module);
    visited.into_iter().collect()
}

/// All nodes that reach `module` along dependency edges, excluding
/// `module` itself, sorted. Absent module → empty.
#[must_use]
pub fn transitive_dependents(graph: &DepGraph, module: &str) -> Vec<String> {
    transitive_dependencies(&graph.reversed(), module)
}

/// A nested reachability tree: each key is a child identifier, each value
/// the tree of its own children. Keys are always sorted (`BTreeMap`).
///
/// The root module is not a key of its own tree; callers that want an outer
/// wrapper add it themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DepTree(pub BTreeMap<String, DepTree>);

impl DepTree {
    /// Is the tree empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All identifiers appearing anywhere in the tree.
    #[must_use]
    pub fn flatten(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut BTreeSet<String>) {
        for (key, sub) in &self.0 {
            out.insert(key.clone());
            sub.collect_into(out);
        }
    }
}

/// Dependency tree rooted at `module`.
///
/// Default mode is the shortest-path tree: every reachable node appears
/// exactly once, under the lexicographically smallest of its
/// minimal-distance predecessors. With `all_paths`, every distinct
/// non-revisiting path is materialized instead: a node may appear under
/// several parents, and dense graphs can blow up exponentially (accepted:
/// the use case is small build trees).
#[must_use]
pub fn dependencies_tree(graph: &DepGraph, module: &str, all_paths: bool) -> DepTree {
    if !graph.contains(module) {
        return DepTree::default();
    }
    if all_paths {
        let mut on_path = HashSet::new();
        on_path.insert(module.to_string());
        all_paths_tree(graph, module, &mut on_path)
    } else {
        shortest_path_tree(graph, module)
    }
}

/// Dependents tree rooted at `module`: the dependency tree in the
/// edge-reversed graph.
#[must_use]
pub fn dependents_tree(graph: &DepGraph, module: &str, all_paths: bool) -> DepTree {
    dependencies_tree(&graph.reversed(), module, all_paths)
}

/// BFS shortest-path tree with deterministic alphabetical tie-break.
///
/// Records, for every reachable node, the set of predecessors achieving its
/// minimal distance; the tree parent is the lexicographically smallest of
/// them.
fn shortest_path_tree(graph: &DepGraph, module: &str) -> DepTree {
    let mut distances: HashMap<String, usize> = HashMap::new();
    let mut min_parents: HashMap<String, Vec<String>> = HashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    distances.insert(module.to_string(), 0);
    queue.push_back(module.to_string());

    while let Some(current) = queue.pop_front() {
        let current_dist = distances[&current];
        for next in graph.sorted_successors(&current) {
            match distances.get(next) {
                None => {
                    distances.insert(next.to_string(), current_dist + 1);
                    min_parents.insert(next.to_string(), vec![current.clone()]);
                    queue.push_back(next.to_string());
                }
                Some(&d) if d == current_dist + 1 => {
                    if let Some(parents) = min_parents.get_mut(next) {
                        parents.push(current.clone());
                    }
                }
                Some(_) => {}
            }
        }
    }

    // Assign each node to its alphabetically smallest minimal-distance parent.
    let mut children: HashMap<String, BTreeSet<String>> = HashMap::new();
    for (node, parents) in &min_parents {
        if let Some(parent) = parents.iter().min() {
            children
                .entry(parent.clone())
                .or_default()
                .insert(node.clone());
        }
    }

    build_from_children(module, &children)
}

fn build_from_children(node: &str, children: &HashMap<String, BTreeSet<String>>) -> DepTree {
    let mut tree = BTreeMap::new();
    if let Some(kids) = children.get(node) {
        for child in kids {
            tree.insert(child.clone(), build_from_children(child, children));
        }
    }
    DepTree(tree)
}

/// Full reachability tree without revisits along the current branch.
///
/// The guard is the set of ancestors on the recursion path, not a global
/// visited set: a node reachable via multiple non-overlapping paths appears
/// once per path.
fn all_paths_tree(graph: &DepGraph, node: &str, on_path: &mut HashSet<String>) -> DepTree {
    let mut tree = BTreeMap::new();
    for child in graph.sorted_successors(node) {
        if on_path.contains(child) {
            continue;
        }
        on_path.insert(child.to_string());
        let subtree = all_paths_tree(graph, child, on_path);
        on_path.remove(child);
        tree.insert(child.to_string(), subtree);
    }
    DepTree(tree)
}

/// Directed shortest path `from → to` via BFS over sorted successors.
///
/// Returns the node sequence including both endpoints, or `None` when `to`
/// is unreachable. Sorted expansion plus first-discovery parents makes the
/// returned path deterministic.
fn shortest_path(graph: &DepGraph, from: &str, to: &str) -> Option<Vec<String>> {
    if !graph.contains(from) || !graph.contains(to) {
        return None;
    }
    if from == to {
        return Some(vec![from.to_string()]);
    }

    let mut prev: HashMap<String, String> = HashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(from.to_string());

    'search: while let Some(current) = queue.pop_front() {
        for next in graph.sorted_successors(&current) {
            if next == from || prev.contains_key(next) {
                continue;
            }
            prev.insert(next.to_string(), current.clone());
            if next == to {
                break 'search;
            }
            queue.push_back(next.to_string());
        }
    }

    if !prev.contains_key(to) {
        return None;
    }
    let mut path = vec![to.to_string()];
    let mut cursor = to;
    while let Some(p) = prev.get(cursor) {
        path.push(p.clone());
        cursor = p;
    }
    path.reverse();
    Some(path)
}

/// Minimal subgraph connecting the requested identifiers.
///
/// For every ordered pair of distinct requested nodes the directed shortest
/// path is added (pairs with no path are skipped silently). Path edges are
/// inserted **inverted** — dependency → dependent — because the subgraph
/// shows what connects to what from the consumer's perspective. With zero
/// or one requested identifiers the result is just those nodes.
///
/// # Errors
///
/// [`Error::ArtifactsNotFound`] listing every missing identifier, sorted;
/// nothing is processed in that case.
pub fn minimal_subgraph(graph: &DepGraph, artifacts: &[String]) -> Result<DepGraph> {
    let missing: BTreeSet<String> = artifacts
        .iter()
        .filter(|a| !graph.contains(a))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(Error::ArtifactsNotFound(missing.into_iter().collect()));
    }

    // Dedupe, preserving first-seen order.
    let mut seen = HashSet::new();
    let unique: Vec<&String> = artifacts.iter().filter(|a| seen.insert(a.as_str())).collect();

    let mut subgraph = DepGraph::new();
    for artifact in &unique {
        subgraph.add_node(artifact);
    }
    if unique.len() <= 1 {
        return Ok(subgraph);
    }

    for &u in &unique {
        for &v in &unique {
            if u == v {
                continue;
            }
            let Some(path) = shortest_path(graph, u, v) else {
                continue;
            };
            for node in &path {
                subgraph.add_node(node);
            }
            for step in path.windows(2) {
                // Invert: dependency → dependent.
                subgraph.add_edge(&step[1], &step[0]);
            }
        }
    }

    Ok(subgraph)
}
