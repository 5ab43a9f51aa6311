//! Descriptor discovery and dependency extraction.
//!
//! Walks a directory tree for `pom.xml` files and turns each one into a
//! project identifier plus the set of dependency identifiers it declares,
//! applying group-based include/exclude filtering along the way.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use mvnpom::Pom;

/// Display and filter options for graph construction.
///
/// Exclusion wins over inclusion. Filtering always consults the underlying
/// group metadata, even when `include_group_id` is off and the group is not
/// part of the displayed identifier.
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Qualify identifiers as `groupId:artifactId` when the group is known.
    pub include_group_id: bool,
    /// When set, only artifacts from these groups are kept.
    pub included_groups: Option<BTreeSet<String>>,
    /// When set, artifacts from these groups are dropped. Takes precedence
    /// over `included_groups`.
    pub excluded_groups: Option<BTreeSet<String>>,
}

impl GraphOptions {
    /// Should an artifact with this group be dropped?
    ///
    /// `None` means the descriptor declared no group; such artifacts pass
    /// every filter.
    fn group_filtered_out(&self, group: Option<&str>) -> bool {
        let Some(group) = group else { return false };
        if let Some(excluded) = &self.excluded_groups {
            if excluded.contains(group) {
                return true;
            }
        }
        if let Some(included) = &self.included_groups {
            if !included.contains(group) {
                return true;
            }
        }
        false
    }

    /// Compute the display identifier for an artifact.
    fn identifier(&self, group: Option<&str>, artifact: &str) -> String {
        match group {
            Some(group) if self.include_group_id => format!("{group}:{artifact}"),
            _ => artifact.to_string(),
        }
    }
}

/// Find all `pom.xml` files under `root`, sorted by path.
///
/// The sort gives reproducible construction order. A missing or empty
/// directory yields an empty list, not an error; unreadable directory
/// entries are skipped with a log line.
#[must_use]
pub fn discover_poms(root: &Path) -> Vec<PathBuf> {
    let mut poms: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == "pom.xml")
        .map(walkdir::DirEntry::into_path)
        .collect();
    poms.sort();
    poms
}

/// Extract the project identifier and the declared dependency identifiers
/// from one descriptor.
///
/// Returns `Ok(None)` when the project's own group is filtered out: the
/// project contributes nothing to the graph, which is not an error. A
/// dependency without an `<artifactId>` is skipped silently; duplicate
/// declarations collapse into the set.
///
/// # Errors
///
/// - the descriptor cannot be parsed
/// - the descriptor has no `<artifactId>` ([`Error::MissingArtifactId`]);
///   this aborts the whole graph build
pub fn extract_dependencies(
    pom_path: &Path,
    options: &GraphOptions,
) -> Result<Option<(String, BTreeSet<String>)>> {
    let pom = Pom::from_path(pom_path)?;

    let Some(artifact) = pom.artifact_id() else {
        return Err(Error::MissingArtifactId(pom_path.to_path_buf()));
    };
    let group = pom.group_id();
    let project_id = options.identifier(group, artifact);

    if options.group_filtered_out(group) {
        debug!(project = %project_id, "project group filtered out, dropping");
        return Ok(None);
    }

    let mut dependency_ids = BTreeSet::new();
    for dep in pom.dependencies() {
        let Some(dep_artifact) = dep.artifact_id() else {
            continue;
        };
        let dep_group = dep.group_id();
        if options.group_filtered_out(dep_group) {
            continue;
        }
        dependency_ids.insert(options.identifier(dep_group, dep_artifact));
    }

    Ok(Some((project_id, dependency_ids)))
}
