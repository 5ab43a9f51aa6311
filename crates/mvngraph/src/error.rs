//! Error types for graph construction and queries.
//!
//! The graph pipeline is fail-fast: a descriptor that cannot be parsed or
//! that lacks an `<artifactId>` aborts the whole run before any output is
//! produced. The one exception is build-log evaluation, which records
//! unreadable files and keeps going (see [`crate::logs`]).
//!
//! Two validations deliberately stay separate even though they look alike:
//! the CLI-boundary check that a queried module exists
//! ([`Error::ModuleNotFound`]) and the subgraph precondition that every
//! requested artifact exists ([`Error::ArtifactsNotFound`]). Library-level
//! closure queries on an absent module return empty instead of failing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mvngraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for mvngraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or rewriting a POM failed.
    #[error(transparent)]
    Pom(#[from] mvnpom::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A descriptor has no `<artifactId>`; fatal for the whole build.
    #[error("no <artifactId> found in {}", .0.display())]
    MissingArtifactId(PathBuf),

    /// A queried module is not a node of the graph (CLI-boundary check).
    #[error("module '{0}' not found in the graph")]
    ModuleNotFound(String),

    /// Requested subgraph members missing from the graph, sorted.
    #[error("artifacts not found in graph: {}", .0.join(", "))]
    ArtifactsNotFound(Vec<String>),

    /// Invalid arguments or directory layout.
    #[error("configuration error: {0}")]
    Config(String),
}
