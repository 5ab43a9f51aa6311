//! Error types for POM reading and editing.

use thiserror::Error;

/// Result type for POM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for POM operations.
///
/// Parse failures are fatal: a POM that cannot be read is never silently
/// skipped, the caller decides whether the whole run aborts.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML reader or writer reported a failure.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not well-formed in a way we detect ourselves
    /// (mismatched end tag, undecodable entity, stray content).
    #[error("malformed POM: {0}")]
    Malformed(String),

    /// An edit named dependencies the POM does not declare.
    ///
    /// Nothing is modified when this is returned.
    #[error("specified artifactIds not found in POM: {}", .0.join(", "))]
    MissingDependencies(Vec<String>),

    /// A scope change was not in `artifactId:scope` form.
    #[error("invalid scope change '{0}', expected 'artifactId:newScope'")]
    InvalidScopeChange(String),
}
