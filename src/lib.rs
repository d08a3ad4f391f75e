//! @dose
//! purpose: This is the library crate root for outliner, exposing the line-based declaration
//!     outline (classifier + scanner) and the commands built on it, for use both as a CLI tool
//!     and as a library.
//!
//! when-editing:
//!     - !All public modules must be declared here with pub mod
//!     - Re-exports should include the types a library user needs to outline text
//!
//! invariants:
//!     - The outline module has no filesystem or CLI dependencies beyond outline_file
//!
//! gotchas:
//!     - The lib.rs is separate from main.rs - library consumers get lib, CLI gets main

pub mod cli;
pub mod commands;
pub mod config;
pub mod exclusion;
pub mod formatter;
pub mod outline;

// Re-export main types for convenience
pub use cli::{Cli, Commands, OutlineArgs, ReadArgs, WatchArgs};
pub use config::Config;
pub use outline::{
    classify_line, outline_file, outline_lines, outline_source, source_lines, LineClass,
    Outline, OutlineEntry, OutlineError, Scanner, SourceLine,
};
