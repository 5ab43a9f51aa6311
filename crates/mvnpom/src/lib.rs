//! # mvnpom: Maven POM reading and editing
//!
//! A small namespace-aware model of `pom.xml` files. Documents are parsed
//! into an owned element tree with lookup by local tag name, so POMs with
//! and without the default Maven namespace behave identically. On top of
//! that sit the descriptor operations the graph tooling and the edit
//! commands need:
//!
//! - project coordinates (`groupId`, `artifactId`)
//! - dependency iteration across every `<dependencies>` container
//! - dependency removal and scope changes, verified before mutation
//! - parent version rewriting
//! - serialization back to XML, preserving the single default namespace
//!   declaration on the root element
//!
//! ```no_run
//! use std::path::Path;
//! use mvnpom::Pom;
//!
//! let pom = Pom::from_path(Path::new("pom.xml"))?;
//! for dep in pom.dependencies() {
//!     println!("{:?}:{:?}", dep.group_id(), dep.artifact_id());
//! }
//! # Ok::<(), mvnpom::Error>(())
//! ```

mod error;
mod model;
mod pom;

pub use error::{Error, Result};
pub use model::{Element, Node};
pub use pom::{Dependency, ParentVersionOutcome, Pom};
