//! `dependents` subcommand: transitive dependents of one module.

use std::path::Path;

use mvngraph::{query, render, Error, Result};

use super::{output, GraphArgs};

pub fn run(
    args: &GraphArgs,
    module: &str,
    all_paths: bool,
    flat: bool,
    outfile: Option<&Path>,
) -> Result<()> {
    let graph = args.build_graph()?;
    if !graph.contains(module) {
        return Err(Error::ModuleNotFound(module.to_string()));
    }
    let rendered = if flat {
        render::to_flat_list(&query::transitive_dependents(&graph, module))
    } else {
        render::to_tree_json(&query::dependents_tree(&graph, module, all_paths))?
    };
    output::emit(&rendered, outfile)
}
