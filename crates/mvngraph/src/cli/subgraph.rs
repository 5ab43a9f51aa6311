//! `subgraph` subcommand: minimal subgraph connecting a set of artifacts.

use std::path::Path;

use mvngraph::{query, render, Error, Result};

use super::{output, GraphArgs, GraphFormat};

pub fn run(
    args: &GraphArgs,
    artifacts: &str,
    format: GraphFormat,
    outfile: Option<&Path>,
) -> Result<()> {
    let requested: Vec<String> = artifacts
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if requested.is_empty() {
        return Err(Error::Config(
            "no artifacts given; pass a comma-separated list".to_string(),
        ));
    }

    let graph = args.build_graph()?;
    let subgraph = query::minimal_subgraph(&graph, &requested)?;
    let rendered = match format {
        GraphFormat::Json => render::to_node_link_json(&subgraph)?,
        GraphFormat::Plantuml => render::to_plantuml(&subgraph),
    };
    output::emit(&rendered, outfile)
}
