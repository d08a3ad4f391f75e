//! @dose
//! purpose: Implements the read command. Small files are printed whole; files above the
//!     auto-outline size are replaced by their outline so the output stays short. A large file
//!     with nothing to outline falls back to its first bytes.
//!
//! when-editing:
//!     - !The size check is in bytes of the file content, not lines
//!     - The fallback excerpt is cut on a char boundary, never mid-codepoint
//!
//! invariants:
//!     - is_outline is true only when the text is an outline
//!     - --force-outline outlines even small files
//!
//! gotchas:
//!     - A forced outline of a file with no declarations is just the header

use super::collect::{display_path, resolve_path};
use crate::cli::ReadArgs;
use crate::config::{Config, ReadConfig};
use crate::formatter::{fallback_header, outline_header, render_entries};
use crate::outline::outline_source;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Content produced by `read`: either the file itself or an outline of it
#[derive(Debug)]
pub struct ReadContent {
    pub text: String,
    pub is_outline: bool,
}

pub fn run_read(args: &ReadArgs, root: &Path, _verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let path = resolve_path(root, &args.input);
    let label = display_path(root, &path);

    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let content = read_content(&source, &label, args.force_outline, &config.read);

    tracing::debug!(
        "{}: {} bytes, showing {}",
        label,
        source.len(),
        if content.is_outline { "outline" } else { "content" }
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.text.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.text.ends_with('\n') {
        writeln!(stdout).context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Decide between full content, outline, or a leading excerpt for `source`
pub fn read_content(
    source: &str,
    label: &str,
    force_outline: bool,
    config: &ReadConfig,
) -> ReadContent {
    let too_large = source.len() > config.auto_outline_size;

    if !too_large && !force_outline {
        return ReadContent {
            text: source.to_string(),
            is_outline: false,
        };
    }

    let entries = outline_source(source);

    if entries.is_empty() && too_large {
        let end = floor_char_boundary(source, config.fallback_bytes);
        return ReadContent {
            text: format!(
                "{}\n\n{}",
                fallback_header(label, config.fallback_bytes),
                &source[..end]
            ),
            is_outline: false,
        };
    }

    let mut text = format!("{}\n\n", outline_header(label));
    render_entries(&mut text, &entries);

    ReadContent {
        text,
        is_outline: true,
    }
}

/// Largest char boundary not after `index`
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut idx = index;
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn small_config() -> ReadConfig {
        ReadConfig {
            auto_outline_size: 64,
            fallback_bytes: 16,
        }
    }

    #[test]
    fn test_small_file_returned_whole() {
        let source = "fn main() {}\n";
        let content = read_content(source, "main.rs", false, &ReadConfig::default());
        assert!(!content.is_outline);
        assert_eq!(content.text, source);
    }

    #[test]
    fn test_large_file_outlined() {
        let mut source = String::from("/// Entry point\npub fn run() {\n");
        for _ in 0..20 {
            source.push_str("    let value = compute();\n");
        }
        source.push_str("}\n");

        let content = read_content(&source, "src/run.rs", false, &small_config());
        assert!(content.is_outline);
        assert_eq!(
            content.text,
            "# File outline for src/run.rs\n\n[L1:L23]fn run()\n"
        );
    }

    #[test]
    fn test_force_outline_small_file() {
        let content = read_content("struct A;\n", "a.rs", true, &ReadConfig::default());
        assert!(content.is_outline);
        assert_eq!(content.text, "# File outline for a.rs\n\n[L1:L1]struct A;\n");
    }

    #[test]
    fn test_large_file_fallback_to_subset() {
        let source = "⚡".repeat(100 * 1024);
        let content = read_content(&source, "bolt.rs", false, &ReadConfig::default());

        assert!(!content.is_outline);
        assert!(content.text.starts_with("# First 1KB of bolt.rs"));
        assert!(content.text.contains("⚡⚡⚡⚡⚡⚡⚡"));
        assert!(content.text.len() < source.len() / 10);
    }

    #[test]
    fn test_floor_char_boundary() {
        let text = "a⚡b"; // '⚡' is 3 bytes at 1..4
        assert_eq!(floor_char_boundary(text, 0), 0);
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 4), 4);
        assert_eq!(floor_char_boundary(text, 100), text.len());
    }

    #[test]
    fn test_run_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let args = ReadArgs {
            input: "missing.rs".into(),
            force_outline: false,
        };
        let err = run_read(&args, temp_dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_run_read_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("lib.rs"), "pub fn a() {}\n").unwrap();
        let args = ReadArgs {
            input: "lib.rs".into(),
            force_outline: true,
        };
        assert!(run_read(&args, temp_dir.path(), false).is_ok());
    }
}
