//! Maven POM semantics on top of the element tree.
//!
//! A [`Pom`] wraps a parsed `pom.xml` and exposes the project coordinates,
//! declared dependencies, and the edit operations: dependency removal, scope
//! changes, and parent version rewriting. Edits verify their targets first
//! and mutate nothing when a requested artifact is absent.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{self, Element, Node};

/// A parsed Maven project descriptor.
#[derive(Debug, Clone)]
pub struct Pom {
    root: Element,
}

/// Read-only view of one `<dependency>` entry.
#[derive(Debug, Clone, Copy)]
pub struct Dependency<'a> {
    element: &'a Element,
}

impl<'a> Dependency<'a> {
    /// The `<artifactId>` text, if present and non-empty.
    #[must_use]
    pub fn artifact_id(&self) -> Option<&'a str> {
        self.element.child_text("artifactId")
    }

    /// The `<groupId>` text, if present and non-empty.
    #[must_use]
    pub fn group_id(&self) -> Option<&'a str> {
        self.element.child_text("groupId")
    }

    /// The `<scope>` text, if present.
    #[must_use]
    pub fn scope(&self) -> Option<&'a str> {
        self.element.child_text("scope")
    }

    /// The `<version>` text, if present.
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        self.element.child_text("version")
    }
}

/// Outcome of a parent version rewrite on one POM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentVersionOutcome {
    /// The POM has no `<parent>` section, or the parent has no `<version>`.
    NoParent,
    /// A parent artifactId filter was given and did not match.
    NotMatched,
    /// The parent version already equals the requested version.
    AlreadyCurrent(String),
    /// The version was replaced; carries the previous value.
    Updated(String),
}

impl Pom {
    /// Parse a POM from a file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_str(&xml)
    }

    /// Parse a POM from XML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &str) -> Result<Self> {
        let root = model::parse(xml)?;
        Ok(Self { root })
    }

    /// The root element of the document.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The project's own `<groupId>`, if declared.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.root.child_text("groupId")
    }

    /// The project's own `<artifactId>`, if declared and non-empty.
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        self.root.child_text("artifactId")
    }

    /// Every `<dependency>` entry in every `<dependencies>` container,
    /// document order. Includes `<dependencyManagement>` sections, matching
    /// the descriptor-wide extraction the graph builder expects.
    #[must_use]
    pub fn dependencies(&self) -> Vec<Dependency<'_>> {
        self.root
            .descendants_named("dependencies")
            .into_iter()
            .flat_map(|container| container.children_named("dependency"))
            .map(|element| Dependency { element })
            .collect()
    }

    /// Set of all declared dependency artifactIds.
    #[must_use]
    pub fn dependency_artifact_ids(&self) -> BTreeSet<String> {
        self.dependencies()
            .iter()
            .filter_map(Dependency::artifact_id)
            .map(str::to_string)
            .collect()
    }

    /// Verify that every requested artifactId is declared as a dependency.
    ///
    /// # Errors
    ///
    /// [`Error::MissingDependencies`] listing the absent ids sorted; callers
    /// rely on nothing having been modified when this fails.
    pub fn verify_dependencies_declared(&self, requested: &BTreeSet<String>) -> Result<()> {
        let present = self.dependency_artifact_ids();
        let missing: Vec<String> = requested.difference(&present).cloned().collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingDependencies(missing))
        }
    }

    /// Remove every `<dependency>` whose artifactId is in `requested`.
    ///
    /// Returns the number of removed entries.
    ///
    /// # Errors
    ///
    /// Fails without modifying anything when a requested artifactId is not
    /// declared.
    pub fn remove_dependencies(&mut self, requested: &BTreeSet<String>) -> Result<usize> {
        self.verify_dependencies_declared(requested)?;

        let mut removed = 0;
        self.root
            .for_each_descendant_named_mut("dependencies", &mut |container| {
                container.children.retain(|node| {
                    let Node::Element(e) = node else { return true };
                    if e.local_name() != "dependency" {
                        return true;
                    }
                    let matches = e
                        .child_text("artifactId")
                        .is_some_and(|id| requested.contains(id));
                    if matches {
                        removed += 1;
                    }
                    !matches
                });
            });

        debug!(removed, "removed dependencies");
        Ok(removed)
    }

    /// Apply `artifactId:newScope` changes, creating `<scope>` elements
    /// where absent. Returns the number of modified dependencies.
    ///
    /// # Errors
    ///
    /// A malformed spec or an undeclared artifactId fails the whole call
    /// before anything is modified.
    pub fn change_dependency_scopes(&mut self, changes: &[String]) -> Result<usize> {
        let mut scope_map: HashMap<String, String> = HashMap::new();
        for change in changes {
            match change.split_once(':') {
                Some((artifact, scope)) if !artifact.is_empty() && !scope.is_empty() => {
                    scope_map.insert(artifact.to_string(), scope.to_string());
                }
                _ => return Err(Error::InvalidScopeChange(change.clone())),
            }
        }
        self.verify_dependencies_declared(&scope_map.keys().cloned().collect())?;

        let mut modified = 0;
        self.root
            .for_each_descendant_named_mut("dependencies", &mut |container| {
                for node in &mut container.children {
                    let Node::Element(dep) = node else { continue };
                    if dep.local_name() != "dependency" {
                        continue;
                    }
                    let Some(new_scope) = dep
                        .child_text("artifactId")
                        .and_then(|id| scope_map.get(id))
                        .cloned()
                    else {
                        continue;
                    };
                    if let Some(scope) = dep.child_mut("scope") {
                        scope.set_text(new_scope);
                    } else {
                        dep.children
                            .push(Node::Element(Element::with_text("scope", new_scope)));
                    }
                    modified += 1;
                }
            });

        debug!(modified, "changed dependency scopes");
        Ok(modified)
    }

    /// Replace the `<parent><version>` value when present (and, if a filter
    /// is given, when the parent artifactId is in it).
    pub fn set_parent_version(
        &mut self,
        new_version: &str,
        matching_artifact_ids: Option<&BTreeSet<String>>,
    ) -> ParentVersionOutcome {
        let Some(parent) = self.root.child_mut("parent") else {
            return ParentVersionOutcome::NoParent;
        };

        if let Some(filter) = matching_artifact_ids {
            let matches = parent
                .child_text("artifactId")
                .is_some_and(|id| filter.contains(id));
            if !matches {
                return ParentVersionOutcome::NotMatched;
            }
        }

        let Some(version) = parent.child_mut("version") else {
            return ParentVersionOutcome::NoParent;
        };
        let Some(old) = version.text().map(str::to_string) else {
            return ParentVersionOutcome::NoParent;
        };
        if old == new_version {
            return ParentVersionOutcome::AlreadyCurrent(old);
        }
        version.set_text(new_version);
        ParentVersionOutcome::Updated(old)
    }

    /// Serialize the (possibly edited) document back to XML text.
    pub fn to_xml_string(&self) -> Result<String> {
        model::write(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <groupId>org.example</groupId>
  <artifactId>demo</artifactId>
  <version>1.0.0</version>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>demo-parent</artifactId>
    <version>1.0.0</version>
  </parent>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
    </dependency>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
    </dependency>
  </dependencies>
</project>"#;

    fn requested(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn coordinates_are_exposed() {
        let pom = Pom::from_str(POM).expect("parse");
        assert_eq!(pom.group_id(), Some("org.example"));
        assert_eq!(pom.artifact_id(), Some("demo"));
    }

    #[test]
    fn from_path_reads_a_file_on_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pom.xml");
        std::fs::write(&path, POM).expect("write fixture");
        let pom = Pom::from_path(&path).expect("parse from path");
        assert_eq!(pom.artifact_id(), Some("demo"));
    }

    #[rstest]
    #[case::colon_missing("junit")]
    #[case::empty_scope("junit:")]
    #[case::empty_artifact(":test")]
    fn scope_change_spec_must_be_artifact_colon_scope(#[case] change: &str) {
        let mut pom = Pom::from_str(POM).expect("parse");
        let err = pom
            .change_dependency_scopes(&[change.to_string()])
            .expect_err("should fail");
        assert!(matches!(err, Error::InvalidScopeChange(_)));
    }

    #[test]
    fn dependencies_lists_all_entries() {
        let pom = Pom::from_str(POM).expect("parse");
        let deps = pom.dependencies();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].artifact_id(), Some("junit"));
        assert_eq!(deps[0].group_id(), Some("junit"));
        assert_eq!(deps[1].artifact_id(), Some("slf4j-api"));
        assert_eq!(deps[1].version(), None);
    }

    #[test]
    fn remove_dependencies_deletes_matching_entries() {
        let mut pom = Pom::from_str(POM).expect("parse");
        let removed = pom.remove_dependencies(&requested(&["junit"])).expect("remove");
        assert_eq!(removed, 1);
        assert_eq!(pom.dependency_artifact_ids(), requested(&["slf4j-api"]));
    }

    #[test]
    fn remove_dependencies_rejects_unknown_artifact_and_modifies_nothing() {
        let mut pom = Pom::from_str(POM).expect("parse");
        let err = pom
            .remove_dependencies(&requested(&["junit", "nope", "also-nope"]))
            .expect_err("should fail");
        // Missing ids are listed sorted, comma-joined.
        assert_eq!(
            err.to_string(),
            "specified artifactIds not found in POM: also-nope, nope"
        );
        assert_eq!(pom.dependencies().len(), 2, "nothing may be removed");
    }

    #[test]
    fn change_scope_updates_existing_element() {
        let mut pom = Pom::from_str(POM).expect("parse");
        // junit has no scope yet; one is created.
        let modified = pom
            .change_dependency_scopes(&["junit:test".to_string()])
            .expect("change");
        assert_eq!(modified, 1);
        let deps = pom.dependencies();
        assert_eq!(deps[0].scope(), Some("test"));

        // A second change overwrites rather than duplicating.
        pom.change_dependency_scopes(&["junit:provided".to_string()])
            .expect("change again");
        assert_eq!(pom.dependencies()[0].scope(), Some("provided"));
    }

    #[test]
    fn set_parent_version_replaces_and_reports_old() {
        let mut pom = Pom::from_str(POM).expect("parse");
        let outcome = pom.set_parent_version("2.0.0", None);
        assert_eq!(outcome, ParentVersionOutcome::Updated("1.0.0".to_string()));
        let text = pom.to_xml_string().expect("write");
        assert!(text.contains("2.0.0"));
    }

    #[test]
    fn set_parent_version_is_noop_when_current() {
        let mut pom = Pom::from_str(POM).expect("parse");
        let outcome = pom.set_parent_version("1.0.0", None);
        assert_eq!(
            outcome,
            ParentVersionOutcome::AlreadyCurrent("1.0.0".to_string())
        );
    }

    #[test]
    fn set_parent_version_honors_artifact_filter() {
        let mut pom = Pom::from_str(POM).expect("parse");
        let filter = requested(&["some-other-parent"]);
        assert_eq!(
            pom.set_parent_version("2.0.0", Some(&filter)),
            ParentVersionOutcome::NotMatched
        );

        let filter = requested(&["demo-parent"]);
        assert_eq!(
            pom.set_parent_version("2.0.0", Some(&filter)),
            ParentVersionOutcome::Updated("1.0.0".to_string())
        );
    }

    #[test]
    fn set_parent_version_without_parent_section() {
        let mut pom =
            Pom::from_str("<project><artifactId>standalone</artifactId></project>").expect("parse");
        assert_eq!(
            pom.set_parent_version("2.0.0", None),
            ParentVersionOutcome::NoParent
        );
    }
}
