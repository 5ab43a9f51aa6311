//! `graph` subcommand: serialize the whole dependency graph.

use std::path::Path;

use mvngraph::{render, Result};

use super::{output, GraphArgs, GraphFormat};

pub fn run(args: &GraphArgs, format: GraphFormat, outfile: Option<&Path>) -> Result<()> {
    let graph = args.build_graph()?;
    let rendered = match format {
        GraphFormat::Json => render::to_node_link_json(&graph)?,
        GraphFormat::Plantuml => render::to_plantuml(&graph),
    };
    output::emit(&rendered, outfile)
}
