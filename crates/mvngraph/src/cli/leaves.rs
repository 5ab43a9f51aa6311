//! `leaves` subcommand: modules that declare nothing further.

use std::path::Path;

use mvngraph::{query, render, Result};

use super::{output, GraphArgs, ListFormat};

pub fn run(args: &GraphArgs, format: ListFormat, outfile: Option<&Path>) -> Result<()> {
    let graph = args.build_graph()?;
    let leaves = query::leaves(&graph);
    let rendered = match format {
        ListFormat::Json => render::to_json_list(&leaves)?,
        ListFormat::Flat => render::to_flat_list(&leaves),
    };
    output::emit(&rendered, outfile)
}
