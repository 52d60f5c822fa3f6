//! # conflux-cli
//!
//! Command line front end for conflux.
//!
//! Loads one or more catalog files, builds the dependency graph of a root
//! package and prints it as an indented tree or as Graphviz DOT. Logging goes
//! to stderr so the rendered graph can be piped.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conflux_core::{ConfluxError, Context};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Incremental package dependency graph resolver
#[derive(Parser)]
#[command(name = "conflux", version, about = "Incremental package dependency graph resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dependency graph of a root package
    Resolve {
        /// Catalog files (.toml or .json), later files shadow earlier ones
        #[arg(required = true, value_name = "CATALOG")]
        catalogs: Vec<Utf8PathBuf>,

        /// Root package, defaults to the catalog's root
        #[arg(long)]
        root: Option<String>,

        /// Context of the top-level graph (host or build)
        #[arg(long, value_parser = parse_context)]
        context: Option<Context>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Tree)]
        format: Format,

        /// Build independent sub-graphs in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Validate catalog files
    Check {
        /// Catalog files (.toml or .json), later files shadow earlier ones
        #[arg(required = true, value_name = "CATALOG")]
        catalogs: Vec<Utf8PathBuf>,

        /// Print the merged catalog as TOML
        #[arg(long)]
        print: bool,
    },
}

/// Rendering of a built graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented dependency tree
    Tree,
    /// Graphviz DOT
    Dot,
}

fn parse_context(value: &str) -> Result<Context, ConfluxError> {
    value.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting conflux v{}", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext::new();
    match commands::dispatch_command(cli.command, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "conflux={level},conflux_core={level},conflux_catalog={level},conflux_resolver={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("conflux encountered an unexpected error: {}", panic_info);
        eprintln!("conflux crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/conflux-rs/conflux/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
