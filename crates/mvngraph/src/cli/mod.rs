//! CLI command implementations.
//!
//! Each submodule owns one subcommand and stays thin: parse-adjacent
//! plumbing here, the actual work in the library crate.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use mvngraph::{build_dependency_graph, DepGraph, GraphOptions, Result};

pub mod dependents;
pub mod deps;
pub mod edit;
pub mod graph;
pub mod leaves;
pub mod logs;
pub mod output;
pub mod roots;
pub mod set_parent;
pub mod subgraph;

/// Arguments shared by every graph-building subcommand.
#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Root directory to search recursively for pom.xml files
    pub directory: PathBuf,

    /// Qualify identifiers as groupId:artifactId where the group is known
    #[arg(long = "group-ids")]
    pub group_ids: bool,

    /// Keep only artifacts from these groupIds
    #[arg(long = "include-groups", value_name = "GROUP_ID", num_args = 1..)]
    pub include_groups: Vec<String>,

    /// Drop artifacts from these groupIds (wins over --include-groups)
    #[arg(long = "exclude-groups", value_name = "GROUP_ID", num_args = 1..)]
    pub exclude_groups: Vec<String>,
}

impl GraphArgs {
    fn options(&self) -> GraphOptions {
        let to_set = |groups: &[String]| -> Option<BTreeSet<String>> {
            if groups.is_empty() {
                None
            } else {
                Some(groups.iter().cloned().collect())
            }
        };
        GraphOptions {
            include_group_id: self.group_ids,
            included_groups: to_set(&self.include_groups),
            excluded_groups: to_set(&self.exclude_groups),
        }
    }

    /// Build the dependency graph for this invocation.
    pub fn build_graph(&self) -> Result<DepGraph> {
        build_dependency_graph(&self.directory, &self.options())
    }
}

/// Whole-graph output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Node-link JSON
    Json,
    /// PlantUML-wrapped DOT
    Plantuml,
}

/// Node-list output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// JSON array
    Json,
    /// One identifier per line
    Flat,
}

/// Build-log report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// Structured JSON
    Json,
}
