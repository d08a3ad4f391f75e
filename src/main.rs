//! @dose
//! purpose: This is the CLI entry point for outliner. It parses command-line arguments using
//!     clap, sets up logging, determines the project root directory, and dispatches to the
//!     appropriate command handler (outline, read, or watch).
//!
//! when-editing:
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! invariants:
//!     - One and only one subcommand is executed per invocation
//!     - Logs go to stderr so stdout carries only outline output
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules

use anyhow::Context;
use clap::Parser;
use outliner::cli::{Cli, Commands};
use outliner::commands::{run_outline, run_read, run_watch};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Outline(args) => run_outline(&args, &root, cli.verbose),
        Commands::Read(args) => run_read(&args, &root, cli.verbose),
        Commands::Watch(args) => run_watch(&args, &root, cli.verbose),
    }
}

/// RUST_LOG wins; otherwise warnings only, or debug for our own crate with --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,outliner=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
