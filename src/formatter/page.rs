//! Filtering and pagination of one file's outline entries.

use crate::outline::OutlineEntry;
use regex::Regex;

/// A window into a file's (filtered) entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub entries: Vec<OutlineEntry>,
    /// Number of filtered entries skipped before this page
    pub offset: usize,
    /// Number of entries after filtering
    pub total: usize,
    /// Whether entries remain after this page
    pub has_more: bool,
    /// Whether the caller asked for a window at all (controls the footer)
    pub paginated: bool,
}

/// Keep entries whose summary matches `filter`, then cut out `offset..offset+limit`.
pub fn paginate(
    entries: Vec<OutlineEntry>,
    filter: Option<&Regex>,
    offset: usize,
    limit: Option<usize>,
) -> Page {
    let matching: Vec<OutlineEntry> = entries
        .into_iter()
        .filter(|entry| filter.is_none_or(|re| re.is_match(&entry.summary)))
        .collect();
    let total = matching.len();

    let page: Vec<OutlineEntry> = matching
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    let has_more = offset.saturating_add(page.len()) < total;

    Page {
        entries: page,
        offset,
        total,
        has_more,
        paginated: offset > 0 || limit.is_some(),
    }
}

impl Page {
    /// Footer line describing which entries were shown.
    pub fn footer(&self) -> String {
        if self.entries.is_empty() {
            return format!(
                "No symbols at offset {} (total symbols: {})",
                self.offset, self.total
            );
        }

        let page_start = self.offset + 1;
        let page_end = self.offset + self.entries.len();

        if self.has_more {
            format!(
                "Showing symbols {page_start}-{page_end} (there were more symbols found; use offset: {page_end} to see next page)"
            )
        } else {
            format!(
                "Showing symbols {page_start}-{page_end} (total symbols: {})",
                self.total
            )
        }
    }
}
