//! `roots` subcommand: modules nothing depends on.

use std::path::Path;

use mvngraph::{query, render, Result};

use super::{output, GraphArgs, ListFormat};

pub fn run(args: &GraphArgs, format: ListFormat, outfile: Option<&Path>) -> Result<()> {
    let graph = args.build_graph()?;
    let roots = query::roots(&graph);
    let rendered = match format {
        ListFormat::Json => render::to_json_list(&roots)?,
        ListFormat::Flat => render::to_flat_list(&roots),
    };
    output::emit(&rendered, outfile)
}
