//! `set-parent` subcommand: rewrite `<parent><version>` across a tree.
//!
//! Unlike graph construction this is deliberately tolerant: a POM that
//! fails to parse is reported and skipped so one broken descriptor does
//! not block a tree-wide version bump.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::warn;

use mvngraph::{discover_poms, Error, Result};
use mvnpom::{ParentVersionOutcome, Pom};

pub fn run(root: &Path, version: &str, matching_parents: Option<&str>, write: bool) -> Result<()> {
    if !root.is_dir() {
        return Err(Error::Config(format!(
            "directory '{}' does not exist or is not a directory",
            root.display()
        )));
    }

    let filter: Option<BTreeSet<String>> = matching_parents.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });

    let mut updated: Vec<(std::path::PathBuf, String)> = Vec::new();
    for path in discover_poms(root) {
        let mut pom = match Pom::from_path(&path) {
            Ok(pom) => pom,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unparseable POM");
                continue;
            }
        };
        match pom.set_parent_version(version, filter.as_ref()) {
            ParentVersionOutcome::Updated(old) => {
                if write {
                    let backup = format!("{}.bak", path.display());
                    fs::copy(&path, &backup)?;
                    fs::write(&path, pom.to_xml_string()?)?;
                }
                updated.push((path, old));
            }
            ParentVersionOutcome::NoParent
            | ParentVersionOutcome::NotMatched
            | ParentVersionOutcome::AlreadyCurrent(_) => {}
        }
    }

    if updated.is_empty() {
        println!("No parent versions needed updating.");
        return Ok(());
    }

    let verb = if write { "Updated" } else { "Would update" };
    println!("{verb} parent version to {version} in {} POM(s):", updated.len());
    for (path, old) in &updated {
        println!("  {} : {old} -> {version}", path.display());
    }
    if !write {
        println!("Re-run with --write to persist these changes.");
    }
    Ok(())
}
