//! @dose
//! purpose: This module defines the command-line interface for outliner using the clap derive
//!     macros. It specifies all commands (outline, read, watch) and their arguments.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!
//! invariants:
//!     - PathBuf is used for all file/directory path arguments
//!     - Options that also exist in outliner.toml override the config when given
//!
//! gotchas:
//!     - The --root flag is global but optional; defaults to current directory in main.rs
//!     - --ext replaces the configured extension list rather than extending it

use crate::config::Config;
use crate::exclusion::ExclusionConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outliner")]
#[command(author, version, about = "Outline top-level Rust declarations with line ranges")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the declaration outline of source files
    Outline(OutlineArgs),

    /// Print a file, or its outline if the file is large
    Read(ReadArgs),

    /// Watch for file changes and re-print outlines
    Watch(WatchArgs),
}

/// Output format for the outline command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by commands that discover files
#[derive(Args, Clone, Debug, Default)]
pub struct CommonOptions {
    /// Follow symlinks that resolve outside of the project root
    #[arg(long)]
    pub unsafe_follow: bool,

    /// Exclude files/directories matching glob pattern (can be repeated)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Don't respect .gitignore files
    #[arg(long)]
    pub no_gitignore: bool,

    /// File extension to outline (can be repeated; replaces the configured list)
    #[arg(long, value_name = "EXT")]
    pub ext: Vec<String>,
}

impl CommonOptions {
    /// Create an ExclusionConfig from these options, merging with config file patterns
    pub fn exclusion_config(&self, config_patterns: &[String]) -> ExclusionConfig {
        let mut patterns = config_patterns.to_vec();
        patterns.extend(self.exclude.iter().cloned());
        ExclusionConfig {
            patterns,
            respect_gitignore: !self.no_gitignore,
        }
    }

    /// Apply command-line overrides to a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if !self.ext.is_empty() {
            config.extensions = self
                .ext
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
    }
}

#[derive(Args, Default)]
pub struct OutlineArgs {
    /// Specific files or directories to outline
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Only show entries whose summary matches this regex
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Skip this many entries per file
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Show at most this many entries per file
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Source file to read
    pub input: PathBuf,

    /// Always print the outline, whatever the file size
    #[arg(long)]
    pub force_outline: bool,
}

#[derive(Args, Default)]
pub struct WatchArgs {
    /// Specific files or directories to watch
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Debounce delay in milliseconds
    #[arg(long, default_value_t = 100)]
    pub debounce: u64,

    /// Clear screen before each update
    #[arg(long)]
    pub clear: bool,

    #[command(flatten)]
    pub common: CommonOptions,
}
