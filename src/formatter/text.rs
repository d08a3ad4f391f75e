//! @dose
//! purpose: Markdown-like text rendering of outlines. One section per file: a `# path` header,
//!     one `[L<start>:L<end>]<summary>` line per entry, an optional pagination footer, and a
//!     blank separator line.
//!
//! invariants:
//!     - Entries are written in the order given (the scanner's line order)
//!     - Every section ends with exactly one blank line
//!
//! gotchas:
//!     - Multi-line summaries (struct bodies, wrapped signatures) span several output lines

use super::page::Page;
use crate::outline::OutlineEntry;
use std::fmt::Write;

/// Write each entry on its own line, returning how many were written.
pub fn render_entries(output: &mut String, entries: &[OutlineEntry]) -> usize {
    for entry in entries {
        writeln!(output, "{}", entry).ok();
    }
    entries.len()
}

/// Render one file section.
pub fn render_section(label: &str, page: &Page) -> String {
    let mut output = String::new();
    writeln!(output, "# {}", label).ok();
    render_entries(&mut output, &page.entries);

    if page.paginated {
        writeln!(output).ok();
        writeln!(output, "{}", page.footer()).ok();
    }

    output.push('\n');
    output
}

/// Header used by `read` when it shows an outline instead of the file.
pub fn outline_header(label: &str) -> String {
    format!("# File outline for {label}")
}

/// Header used by `read` when a large file has no outline.
pub fn fallback_header(label: &str, bytes: usize) -> String {
    let size = if bytes % 1024 == 0 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    };
    format!(
        "# First {size} of {label} (file too large to show full content, and no outline available)"
    )
}
