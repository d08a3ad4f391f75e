//! @dose
//! purpose: Core of outliner. Holds the value types shared by the classifier and the scanner
//!     (SourceLine, OutlineEntry) and the entry points that turn source text or a file on disk
//!     into an ordered list of outline entries.
//!
//! when-editing:
//!     - !Extraction never fails; only reading a file from disk can return an error
//!     - OutlineEntry's Display output is the text rendering used everywhere
//!
//! invariants:
//!     - Line numbers are 1-based and taken in original source order
//!     - Line text never includes the line terminator
//!
//! flows:
//!     - Split: source_lines turns text into numbered lines
//!     - Scan: Outline feeds them through a fresh Scanner, lazily
//!     - Collect: outline_source / outline_file gather the entries

pub mod classify;
pub mod extract;
pub mod normalize;
pub mod tokens;

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use classify::{classify_line, strip_qualifier, LineClass};
pub use extract::{DeclKind, Outline, Scanner};

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid filter pattern: {0}")]
    InvalidFilter(#[from] regex::Error),
}

/// One numbered line of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// A recognized declaration: inclusive line range plus normalized summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub start_line: usize,
    pub end_line: usize,
    pub summary: String,
}

impl OutlineEntry {
    pub fn new(start_line: usize, end_line: usize, summary: String) -> Self {
        Self {
            start_line,
            end_line,
            summary,
        }
    }
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[L{}:L{}]{}", self.start_line, self.end_line, self.summary)
    }
}

/// Split source text into 1-indexed lines (`\n` and `\r\n` terminators removed).
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(idx, text)| SourceLine::new(idx + 1, text))
}

/// Lazily outline an ordered sequence of lines with a fresh scanner.
pub fn outline_lines<'a, I>(lines: I) -> Outline<I::IntoIter>
where
    I: IntoIterator<Item = SourceLine<'a>>,
{
    Outline::new(lines.into_iter())
}

/// Outline a whole source text.
pub fn outline_source(source: &str) -> Vec<OutlineEntry> {
    outline_lines(source_lines(source)).collect()
}

/// Read a file and outline it. The returned source is kept for callers that need it.
pub fn outline_file(path: &Path) -> Result<(String, Vec<OutlineEntry>), OutlineError> {
    let source = fs::read_to_string(path).map_err(|source| OutlineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = outline_source(&source);
    Ok((source, entries))
}
