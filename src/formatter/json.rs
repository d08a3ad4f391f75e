//! JSON rendering of outlines (`--format json`).

use super::page::Page;
use crate::outline::OutlineEntry;
use serde::Serialize;

/// Serialized form of one file's outline page.
#[derive(Debug, Serialize)]
pub struct FileOutline<'a> {
    pub path: &'a str,
    pub entries: &'a [OutlineEntry],
    pub total: usize,
    pub has_more: bool,
}

impl<'a> FileOutline<'a> {
    pub fn new(path: &'a str, page: &'a Page) -> Self {
        Self {
            path,
            entries: &page.entries,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// Render all files as a pretty-printed JSON array.
pub fn render_json(files: &[FileOutline<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::paginate;

    #[test]
    fn test_render_json() {
        let page = paginate(
            vec![OutlineEntry::new(2, 4, "fn run()".to_string())],
            None,
            0,
            None,
        );
        let files = vec![FileOutline::new("src/main.rs", &page)];
        let json = render_json(&files).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["path"], "src/main.rs");
        assert_eq!(value[0]["total"], 1);
        assert_eq!(value[0]["has_more"], false);
        assert_eq!(value[0]["entries"][0]["start_line"], 2);
        assert_eq!(value[0]["entries"][0]["end_line"], 4);
        assert_eq!(value[0]["entries"][0]["summary"], "fn run()");
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
