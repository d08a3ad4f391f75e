//! @dose
//! purpose: Implements the outline command. Collects the requested files, outlines each one
//!     independently (in parallel), applies the filter and page window, and renders one section
//!     per file as text or a single JSON document.
//!
//! when-editing:
//!     - !Each file gets its own scanner; no state is shared between files
//!     - !Output order follows the sorted file list, not completion order
//!     - An unreadable file is reported and skipped; the command fails only after printing the rest
//!
//! invariants:
//!     - An invalid --filter regex fails before any file is read
//!     - --limit on the command line wins over [outline].limit in outliner.toml
//!
//! flows:
//!     - Collect: collect_files walks the paths with exclusions applied
//!     - Outline: rayon par_iter reads and scans every file
//!     - Render: paginate each file, then text sections or JSON

use super::collect::{collect_files, display_path};
use crate::cli::{OutlineArgs, OutputFormat};
use crate::config::Config;
use crate::formatter::{paginate, render_json, render_section, FileOutline, Page};
use crate::outline::tokens::{count_tokens, savings_percent};
use crate::outline::{outline_file, OutlineEntry, OutlineError};
use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::Regex;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rendered result of an outline run
#[derive(Debug)]
pub struct OutlineReport {
    /// Text or JSON ready to print
    pub output: String,
    /// Files outlined successfully
    pub files: usize,
    /// Entries shown across all files
    pub entries: usize,
    /// Files that could not be read
    pub errors: usize,
}

pub fn run_outline(args: &OutlineArgs, root: &Path, verbose: bool) -> Result<()> {
    let report = outline_project(args, root, verbose)?;

    io::stdout()
        .lock()
        .write_all(report.output.as_bytes())
        .context("Failed to write to stdout")?;

    tracing::info!(
        "Outlined: {}, Entries: {}, Errors: {}",
        report.files,
        report.entries,
        report.errors
    );

    if report.errors > 0 {
        anyhow::bail!("{} files failed to outline", report.errors);
    }

    Ok(())
}

/// Outline every file selected by `args` and render the result
pub fn outline_project(args: &OutlineArgs, root: &Path, verbose: bool) -> Result<OutlineReport> {
    let mut config = Config::load(root);
    args.common.apply_to(&mut config);

    let filter = args
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(OutlineError::from)?;
    let limit = args.limit.or(config.outline.limit);

    let files = collect_files(&args.paths, root, &config, &args.common);
    tracing::debug!("Outlining {} files", files.len());

    let results: Vec<(PathBuf, Result<Vec<OutlineEntry>, OutlineError>)> = files
        .par_iter()
        .map(|path| (path.clone(), outline_one(path, root, verbose)))
        .collect();

    let mut pages: Vec<(String, Page)> = Vec::with_capacity(results.len());
    let mut errors = 0;

    for (path, result) in results {
        match result {
            Ok(entries) => {
                let page = paginate(entries, filter.as_ref(), args.offset, limit);
                pages.push((display_path(root, &path), page));
            }
            Err(e) => {
                tracing::warn!("{}", e);
                errors += 1;
            }
        }
    }

    let entries = pages.iter().map(|(_, page)| page.entries.len()).sum();

    let output = match args.format {
        OutputFormat::Text => pages
            .iter()
            .map(|(label, page)| render_section(label, page))
            .collect::<String>(),
        OutputFormat::Json => {
            let outlines: Vec<FileOutline<'_>> = pages
                .iter()
                .map(|(label, page)| FileOutline::new(label, page))
                .collect();
            let mut json = render_json(&outlines).context("Failed to serialize outline")?;
            json.push('\n');
            json
        }
    };

    Ok(OutlineReport {
        output,
        files: pages.len(),
        entries,
        errors,
    })
}

fn outline_one(path: &Path, root: &Path, verbose: bool) -> Result<Vec<OutlineEntry>, OutlineError> {
    let (source, entries) = outline_file(path)?;

    if verbose {
        let rendered: String = entries.iter().map(|e| format!("{}\n", e)).collect();
        let source_tokens = count_tokens(&source);
        let outline_tokens = count_tokens(&rendered);
        tracing::debug!(
            "{}: {} entries, ~{} tokens (source ~{}, {}% smaller)",
            display_path(root, path),
            entries.len(),
            outline_tokens,
            source_tokens,
            savings_percent(source_tokens, outline_tokens)
        );
    }

    Ok(entries)
}
