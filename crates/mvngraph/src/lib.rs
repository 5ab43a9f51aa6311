//! # mvngraph: dependency graphs over Maven multi-module trees
//!
//! Scans a directory for `pom.xml` descriptors, builds a directed graph of
//! project/dependency identifiers, and answers structural queries over it:
//! roots, leaves, transitive closures, shortest-path and all-paths
//! reachability trees, and minimal connecting subgraphs. Graphs render as
//! PlantUML-wrapped DOT, generic node-link JSON, or flat lists.
//!
//! ## Design
//!
//! - **Library first, CLI second** — every operation is callable without
//!   the binary.
//! - **Fail fast** — a descriptor without an `<artifactId>` aborts the run
//!   before any output is written. The one best-effort subsystem is
//!   build-log evaluation ([`logs`]), which records unreadable files and
//!   continues.
//! - **Deterministic** — traversals expand neighbors in lexicographic
//!   order; equal-length shortest-path parents tie-break alphabetically;
//!   output iterates sorted.
//!
//! ```no_run
//! use std::path::Path;
//! use mvngraph::{build_dependency_graph, query, GraphOptions};
//!
//! let graph = build_dependency_graph(Path::new("."), &GraphOptions::default())?;
//! for root in query::roots(&graph) {
//!     println!("{root}");
//! }
//! println!("{:?}", query::transitive_dependencies(&graph, "my-module"));
//! # Ok::<(), mvngraph::Error>(())
//! ```

mod error;
mod extract;
mod graph;
pub mod logs;
pub mod query;
pub mod render;

pub use error::{Error, Result};
pub use extract::{discover_poms, extract_dependencies, GraphOptions};
pub use graph::{build_dependency_graph, DepGraph};
pub use query::DepTree;
