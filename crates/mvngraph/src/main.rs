//! mvngraph CLI - Maven dependency graphs from the command line.
//!
//! Builds a directed dependency graph from every `pom.xml` under a
//! directory and answers structural queries over it; also evaluates build
//! logs and applies verified POM edits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{GraphArgs, GraphFormat, ListFormat, ReportFormat};

/// mvngraph: dependency graph construction and queries over Maven trees.
#[derive(Parser)]
#[command(name = "mvngraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Output the whole dependency graph
    Graph {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format
        #[arg(short = 'm', long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// List root projects (modules nothing depends on)
    Roots {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format
        #[arg(short = 'm', long, value_enum, default_value_t = ListFormat::Json)]
        format: ListFormat,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// List leaf dependencies (modules that declare nothing further)
    Leaves {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format
        #[arg(short = 'm', long, value_enum, default_value_t = ListFormat::Json)]
        format: ListFormat,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// Transitive dependencies of a module, as a tree or flat list
    Deps {
        #[command(flatten)]
        graph: GraphArgs,

        /// Module identifier to query
        module: String,

        /// Show every path to each module, not just the shortest
        #[arg(long)]
        all_paths: bool,

        /// Output a sorted flat list instead of a tree
        #[arg(long)]
        flat: bool,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// Transitive dependents of a module, as a tree or flat list
    Dependents {
        #[command(flatten)]
        graph: GraphArgs,

        /// Module identifier to query
        module: String,

        /// Show every path to each module, not just the shortest
        #[arg(long)]
        all_paths: bool,

        /// Output a sorted flat list instead of a tree
        #[arg(long)]
        flat: bool,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// Minimal subgraph connecting a set of artifacts
    Subgraph {
        #[command(flatten)]
        graph: GraphArgs,

        /// Comma-separated artifact identifiers to connect
        artifacts: String,

        /// Output format
        #[arg(short = 'm', long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,

        /// Write output to this file instead of stdout
        #[arg(short = 'f', long)]
        outfile: Option<PathBuf>,
    },

    /// Evaluate Maven build logs in a directory
    Logs {
        /// Directory containing *.log files
        log_dir: PathBuf,

        /// Output format
        #[arg(short = 'm', long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Write the report to this file instead of stdout
        #[arg(short = 'o', long)]
        outfile: Option<PathBuf>,
    },

    /// Remove dependencies or change scopes in one POM
    Edit {
        /// Path to the pom.xml to edit
        pom: PathBuf,

        /// artifactIds to remove from dependencies
        #[arg(short = 'd', long = "delete", value_name = "ARTIFACT", num_args = 1..)]
        delete: Vec<String>,

        /// Scope changes as artifactId:newScope (e.g. junit:test)
        #[arg(short = 's', long = "scope", value_name = "ARTIFACT:SCOPE", num_args = 1..)]
        scope: Vec<String>,

        /// Overwrite the input POM (a .bak copy is created first)
        #[arg(short = 'w', long)]
        write: bool,
    },

    /// Rewrite the parent version across every POM under a directory
    SetParent {
        /// Root directory to search recursively for pom.xml files
        root: PathBuf,

        /// New parent version to set
        version: String,

        /// Comma-separated parent artifactIds to match exactly
        #[arg(long)]
        matching_parents: Option<String>,

        /// Persist changes (otherwise show a dry-run summary)
        #[arg(short = 'w', long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Graph {
            graph,
            format,
            outfile,
        } => cli::graph::run(&graph, format, outfile.as_deref()),
        Commands::Roots {
            graph,
            format,
            outfile,
        } => cli::roots::run(&graph, format, outfile.as_deref()),
        Commands::Leaves {
            graph,
            format,
            outfile,
        } => cli::leaves::run(&graph, format, outfile.as_deref()),
        Commands::Deps {
            graph,
            module,
            all_paths,
            flat,
            outfile,
        } => cli::deps::run(&graph, &module, all_paths, flat, outfile.as_deref()),
        Commands::Dependents {
            graph,
            module,
            all_paths,
            flat,
            outfile,
        } => cli::dependents::run(&graph, &module, all_paths, flat, outfile.as_deref()),
        Commands::Subgraph {
            graph,
            artifacts,
            format,
            outfile,
        } => cli::subgraph::run(&graph, &artifacts, format, outfile.as_deref()),
        Commands::Logs {
            log_dir,
            format,
            outfile,
        } => cli::logs::run(&log_dir, format, outfile.as_deref()),
        Commands::Edit {
            pom,
            delete,
            scope,
            write,
        } => cli::edit::run(&pom, &delete, &scope, write),
        Commands::SetParent {
            root,
            version,
            matching_parents,
            write,
        } => cli::set_parent::run(&root, &version, matching_parents.as_deref(), write),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
