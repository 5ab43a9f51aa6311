//! Integration tests for graph queries over a built workspace.
//!
//! Fixture layout:
//!
//! ```text
//! app -> lib-core -> lib-util
//! app -> lib-util
//! lib-core -> junit
//! ```

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use mvngraph::{build_dependency_graph, query, render, DepGraph, Error, GraphOptions};

fn write_pom(root: &Path, rel: &str, xml: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, xml).unwrap();
}

fn pom(group: &str, artifact: &str, deps: &[&str]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\"?>\n<project>\n  <groupId>{group}</groupId>\n  <artifactId>{artifact}</artifactId>\n"
    );
    if !deps.is_empty() {
        xml.push_str("  <dependencies>\n");
        for dep in deps {
            xml.push_str(&format!(
                "    <dependency>\n      <groupId>{group}</groupId>\n      <artifactId>{dep}</artifactId>\n    </dependency>\n"
            ));
        }
        xml.push_str("  </dependencies>\n");
    }
    xml.push_str("</project>\n");
    xml
}

fn workspace_graph() -> (TempDir, DepGraph) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_pom(
        dir.path(),
        "app/pom.xml",
        &pom("com.acme", "app", &["lib-core", "lib-util"]),
    );
    write_pom(
        dir.path(),
        "core/pom.xml",
        &pom("com.acme", "lib-core", &["lib-util", "junit"]),
    );
    write_pom(dir.path(), "util/pom.xml", &pom("com.acme", "lib-util", &[]));
    let graph = build_dependency_graph(dir.path(), &GraphOptions::default())
        .expect("graph should build");
    (dir, graph)
}

#[test]
fn roots_and_leaves() {
    let (_dir, graph) = workspace_graph();
    assert_eq!(query::roots(&graph), vec!["app"]);
    assert_eq!(query::leaves(&graph), vec!["junit", "lib-util"]);
}

#[test]
fn transitive_dependencies_are_sorted_and_exclude_self() {
    let (_dir, graph) = workspace_graph();
    assert_eq!(
        query::transitive_dependencies(&graph, "app"),
        vec!["junit", "lib-core", "lib-util"]
    );
    assert_eq!(
        query::transitive_dependencies(&graph, "lib-core"),
        vec!["junit", "lib-util"]
    );
    assert!(query::transitive_dependencies(&graph, "lib-util").is_empty());
}

#[test]
fn transitive_dependents_of_leaf() {
    let (_dir, graph) = workspace_graph();
    assert_eq!(
        query::transitive_dependents(&graph, "lib-util"),
        vec!["app", "lib-core"]
    );
    assert_eq!(query::transitive_dependents(&graph, "junit"), vec!["app", "lib-core"]);
}

#[test]
fn absent_module_yields_empty_results_at_library_level() {
    let (_dir, graph) = workspace_graph();
    assert!(query::transitive_dependencies(&graph, "no-such").is_empty());
    assert!(query::transitive_dependents(&graph, "no-such").is_empty());
    assert!(query::dependencies_tree(&graph, "no-such", false).is_empty());
}

#[test]
fn shortest_tree_places_each_module_once_at_minimal_depth() {
    let (_dir, graph) = workspace_graph();
    let tree = query::dependencies_tree(&graph, "app", false);
    // lib-util is reachable at depth 1 directly, so it does not repeat
    // under lib-core.
    assert!(tree.0.contains_key("lib-util"));
    assert!(!tree.0["lib-core"].0.contains_key("lib-util"));
    assert!(tree.0["lib-core"].0.contains_key("junit"));
}

#[test]
fn all_paths_tree_repeats_shared_modules_per_branch() {
    let (_dir, graph) = workspace_graph();
    let tree = query::dependencies_tree(&graph, "app", true);
    assert!(tree.0.contains_key("lib-util"));
    assert!(tree.0["lib-core"].0.contains_key("lib-util"));
}

#[test]
fn dependents_tree_walks_reverse_edges() {
    let (_dir, graph) = workspace_graph();
    let tree = query::dependents_tree(&graph, "lib-util", false);
    assert!(tree.0.contains_key("app"));
    assert!(tree.0.contains_key("lib-core"));
}

#[test]
fn minimal_subgraph_inverts_path_edges() {
    let (_dir, graph) = workspace_graph();
    let artifacts = vec!["app".to_string(), "lib-util".to_string()];
    let sub = query::minimal_subgraph(&graph, &artifacts).unwrap();

    // The dependency path app -> lib-util appears as dependency-to-
    // dependent edges in the subgraph.
    assert!(sub.has_edge("lib-util", "app"));
    assert!(!sub.has_edge("app", "lib-util"));
    assert!(sub.contains("app") && sub.contains("lib-util"));
}

#[test]
fn minimal_subgraph_rejects_unknown_artifacts_sorted() {
    let (_dir, graph) = workspace_graph();
    let artifacts = vec![
        "zz".to_string(),
        "app".to_string(),
        "aa".to_string(),
    ];
    let err = query::minimal_subgraph(&graph, &artifacts).unwrap_err();
    match err {
        Error::ArtifactsNotFound(missing) => {
            assert_eq!(missing, vec!["aa".to_string(), "zz".to_string()]);
        }
        other => panic!("expected ArtifactsNotFound, got {other}"),
    }
    assert_eq!(
        Error::ArtifactsNotFound(vec!["aa".to_string(), "zz".to_string()]).to_string(),
        "artifacts not found in graph: aa, zz"
    );
}

#[test]
fn plantuml_render_of_built_graph() {
    let (_dir, graph) = workspace_graph();
    let uml = render::to_plantuml(&graph);
    assert!(uml.contains("\"app\";"));
    assert!(uml.contains("label=\"Root Projects\";"));
    assert!(uml.contains("label=\"Leaf Dependencies\";"));
    assert!(uml.contains("\"app\" -> \"lib-core\";"));
}

#[test]
fn node_link_json_round_trips_through_serde() {
    let (_dir, graph) = workspace_graph();
    let json = render::to_node_link_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["directed"], serde_json::Value::Bool(true));
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["edges"].as_array().unwrap().len(), 4);
}
