//! @dose
//! purpose: The outline scanner. A single-pass state machine over the lines of one file that
//!     recognizes top-level declaration starts, accumulates multi-line declarations by brace
//!     balance, attaches a preceding doc-comment block to the next declaration, and emits
//!     normalized outline entries.
//!
//! when-editing:
//!     - !A Scanner is per file; never reuse one across files
//!     - !While capturing, lines are only appended or discarded, never re-classified as starts
//!     - Doc/comment/attribute lines inside a capture are dropped before brace counting
//!
//! invariants:
//!     - At most one capture is active at a time
//!     - Every emitted entry has start_line <= end_line
//!     - Entries come out in non-decreasing start_line order
//!     - A capture still open at end of input is dropped without an entry
//!
//! gotchas:
//!     - Braces inside string or char literals are counted like any other brace
//!     - Blank lines and plain comments between a doc block and its declaration keep the
//!       association; any other line clears it
//!     - Static and public items are always single-line and ignore the pending doc block's
//!       start line (the block is cleared)

use super::classify::{classify_line, LineClass};
use super::normalize::{normalize_function, normalize_item, normalize_struct};
use super::{OutlineEntry, SourceLine};

/// Kind of multi-line declaration being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    StructOrEnum,
}

/// In-progress capture of one declaration.
#[derive(Debug)]
struct Capture {
    kind: DeclKind,
    start_line: usize,
    lines: Vec<String>,
    balance: i64,
    saw_open: bool,
}

impl Capture {
    fn new(kind: DeclKind, start_line: usize) -> Self {
        Self {
            kind,
            start_line,
            lines: Vec::new(),
            balance: 0,
            saw_open: false,
        }
    }

    fn push(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '{' => {
                    self.balance += 1;
                    self.saw_open = true;
                }
                '}' => self.balance -= 1,
                _ => {}
            }
        }
        self.lines.push(text.to_string());
    }

    /// Completion test against the line just pushed.
    fn is_complete(&self, text: &str) -> bool {
        let closed = self.balance == 0 && self.saw_open;
        match self.kind {
            DeclKind::Function => closed,
            // `;` ends the capture at any depth, so `[u8; 4]` in a body cuts it short
            DeclKind::StructOrEnum => text.contains(';') || (closed && text.contains('}')),
        }
    }

    fn finish(self, end_line: usize) -> OutlineEntry {
        let text = self.lines.join("\n");
        let summary = match self.kind {
            DeclKind::Function => normalize_function(&text),
            DeclKind::StructOrEnum => normalize_struct(&text),
        };
        OutlineEntry::new(self.start_line, end_line, summary)
    }
}

/// Per-file scanner state. Feed lines in order; each call may yield one entry.
#[derive(Debug, Default)]
pub struct Scanner {
    doc_start: Option<usize>,
    capture: Option<Capture>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next line of the file.
    pub fn feed(&mut self, line: SourceLine<'_>) -> Option<OutlineEntry> {
        match self.capture.take() {
            Some(capture) => self.continue_capture(capture, line),
            None => self.scan_idle(line),
        }
    }

    /// Whether a declaration is currently being accumulated.
    #[cfg(test)]
    fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Line number where the pending doc block began, if any.
    #[cfg(test)]
    fn pending_doc_line(&self) -> Option<usize> {
        self.doc_start
    }

    fn scan_idle(&mut self, line: SourceLine<'_>) -> Option<OutlineEntry> {
        match classify_line(line.text) {
            LineClass::DocComment => {
                self.doc_start.get_or_insert(line.number);
                None
            }
            LineClass::FunctionStart => self.begin(DeclKind::Function, line),
            LineClass::StructOrEnumStart => self.begin(DeclKind::StructOrEnum, line),
            LineClass::StaticItem | LineClass::PublicItem => {
                self.doc_start = None;
                Some(OutlineEntry::new(
                    line.number,
                    line.number,
                    normalize_item(line.text),
                ))
            }
            LineClass::Blank | LineClass::LineComment => None,
            LineClass::Other => {
                self.doc_start = None;
                None
            }
        }
    }

    fn begin(&mut self, kind: DeclKind, line: SourceLine<'_>) -> Option<OutlineEntry> {
        let start_line = self.doc_start.take().unwrap_or(line.number);
        let mut capture = Capture::new(kind, start_line);
        capture.push(line.text);

        if capture.is_complete(line.text) {
            Some(capture.finish(line.number))
        } else {
            self.capture = Some(capture);
            None
        }
    }

    fn continue_capture(
        &mut self,
        mut capture: Capture,
        line: SourceLine<'_>,
    ) -> Option<OutlineEntry> {
        if classify_line(line.text).is_embedded_comment() {
            self.capture = Some(capture);
            return None;
        }

        capture.push(line.text);
        if capture.is_complete(line.text) {
            self.doc_start = None;
            Some(capture.finish(line.number))
        } else {
            self.capture = Some(capture);
            None
        }
    }
}

/// Lazy outline over an ordered sequence of source lines.
pub struct Outline<I> {
    lines: I,
    scanner: Scanner,
}

impl<I> Outline<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            scanner: Scanner::new(),
        }
    }
}

impl<'a, I> Iterator for Outline<I>
where
    I: Iterator<Item = SourceLine<'a>>,
{
    type Item = OutlineEntry;

    fn next(&mut self) -> Option<OutlineEntry> {
        for line in self.lines.by_ref() {
            if let Some(entry) = self.scanner.feed(line) {
                return Some(entry);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::outline::{outline_source, OutlineEntry};

    fn entry(start: usize, end: usize, summary: &str) -> OutlineEntry {
        OutlineEntry::new(start, end, summary.to_string())
    }

    // ==================== Functions ====================

    #[test]
    fn test_single_line_function() {
        let entries = outline_source("pub fn add(a: i32, b: i32) -> i32 { a + b }\n");
        assert_eq!(entries, vec![entry(1, 1, "fn add(a: i32, b: i32) -> i32")]);
        assert!(!entries[0].summary.contains('{'));
    }

    #[test]
    fn test_multi_line_function() {
        let mut source = String::new();
        for _ in 1..10 {
            source.push_str("use std::fmt;\n");
        }
        // Signature on lines 10-12, body closes on line 20
        source.push_str("pub fn render(\n");
        source.push_str("    value: &str,\n");
        source.push_str(") -> String {\n");
        for _ in 13..20 {
            source.push_str("    let _x = 1;\n");
        }
        source.push_str("}\n");

        let entries = outline_source(&source);
        assert_eq!(
            entries,
            vec![entry(10, 20, "fn render(\n    value: &str,\n) -> String")]
        );
    }

    #[test]
    fn test_function_with_nested_blocks() {
        let source = "fn run() {\n    if x {\n        y();\n    }\n}\nfn after() {}\n";
        let entries = outline_source(source);
        assert_eq!(
            entries,
            vec![entry(1, 5, "fn run()"), entry(6, 6, "fn after()")]
        );
    }

    #[test]
    fn test_function_brace_on_next_line() {
        let source = "fn spaced()\nwhere\n    T: Clone,\n{\n    todo!()\n}\n";
        let entries = outline_source(source);
        assert_eq!(
            entries,
            vec![entry(1, 6, "fn spaced()\nwhere\n    T: Clone,")]
        );
    }

    // ==================== Doc blocks ====================

    #[test]
    fn test_doc_block_sets_start_line() {
        let source = "use a;\n\nuse b;\n\n/// One\n/// Two\n/// Three\nfn documented() {}\n";
        let entries = outline_source(source);
        assert_eq!(entries, vec![entry(5, 8, "fn documented()")]);
    }

    #[test]
    fn test_blank_line_keeps_doc_association() {
        let source = "use a;\n\nuse b;\n\n/// One\n/// Two\n/// Three\n\nfn documented() {}\n";
        let entries = outline_source(source);
        assert_eq!(entries, vec![entry(5, 9, "fn documented()")]);
    }

    #[test]
    fn test_attribute_and_comment_keep_doc_association() {
        let source = "/// Doc\n#[inline]\n// note\nfn f() {}\n";
        assert_eq!(outline_source(source), vec![entry(1, 4, "fn f()")]);
    }

    #[test]
    fn test_unrelated_statement_clears_doc_association() {
        let source = "/// Orphan doc\nuse std::fs;\nfn plain() {}\n";
        assert_eq!(outline_source(source), vec![entry(3, 3, "fn plain()")]);
    }

    #[test]
    fn test_static_item_clears_doc_block() {
        let source = "/// Doc\nstatic A: u8 = 1;\nfn f() {}\n";
        assert_eq!(
            outline_source(source),
            vec![entry(2, 2, "static A: u8 = 1;"), entry(3, 3, "fn f()")]
        );
    }

    // ==================== Structs and enums ====================

    #[test]
    fn test_single_line_struct_keeps_body() {
        let entries = outline_source("struct Point { x: i32, y: i32 }\n");
        assert_eq!(entries, vec![entry(1, 1, "struct Point { x: i32, y: i32 }")]);
    }

    #[test]
    fn test_struct_versus_function_body() {
        let source = "struct Point { x: i32, y: i32 }\nfn origin() -> Point { Point { x: 0, y: 0 } }\n";
        let entries = outline_source(source);
        assert!(entries[0].summary.contains('{'));
        assert_eq!(entries[1].summary, "fn origin() -> Point");
    }

    #[test]
    fn test_unit_and_tuple_structs() {
        let source = "pub struct Unit;\npub(crate) struct Wrapper(u32);\n";
        assert_eq!(
            outline_source(source),
            vec![
                entry(1, 1, "struct Unit;"),
                entry(2, 2, "struct Wrapper(u32);")
            ]
        );
    }

    #[test]
    fn test_multi_line_tuple_struct() {
        let source = "pub struct Pair(\n    u32,\n    u32,\n);\n";
        assert_eq!(
            outline_source(source),
            vec![entry(1, 4, "struct Pair(\n    u32,\n    u32,\n);")]
        );
    }

    #[test]
    fn test_multi_line_struct_drops_docs_attributes_and_comments() {
        let source = "\
/// A config
#[derive(Debug)]
pub struct Config {
    /// The name { with a brace
    #[serde(default)]
    pub name: String, // trailing
    // full-line comment }
    flag: bool,
}
";
        assert_eq!(
            outline_source(source),
            vec![entry(
                1,
                9,
                "struct Config {\n    pub name: String,\n    flag: bool,\n}"
            )]
        );
    }

    #[test]
    fn test_semicolon_in_struct_body_ends_capture() {
        let source = "struct S {\n    buf: [u8; 4],\n    x: u8,\n}\nfn after() {}\n";
        assert_eq!(
            outline_source(source),
            vec![
                entry(1, 2, "struct S {\n    buf: [u8; 4],"),
                entry(5, 5, "fn after()"),
            ]
        );
    }

    #[test]
    fn test_semicolon_on_struct_start_line() {
        let source = "struct S { buf: [u8; 4],\n    x: u8,\n}\n";
        assert_eq!(
            outline_source(source),
            vec![entry(1, 1, "struct S { buf: [u8; 4],")]
        );
    }

    #[test]
    fn test_enum_with_struct_variants() {
        let source = "enum Shape {\n    Circle { r: f64 },\n    Square(f64),\n}\n";
        assert_eq!(
            outline_source(source),
            vec![entry(
                1,
                4,
                "enum Shape {\n    Circle { r: f64 },\n    Square(f64),\n}"
            )]
        );
    }

    // ==================== Single-line items ====================

    #[test]
    fn test_public_items() {
        let source = "pub const MAX: usize = 8;\npub use crate::x;\npub trait Shape {\n    fn area(&self) -> f64;\n}\n";
        assert_eq!(
            outline_source(source),
            vec![
                entry(1, 1, "const MAX: usize = 8;"),
                entry(3, 3, "trait Shape {")
            ]
        );
    }

    // ==================== Robustness ====================

    #[test]
    fn test_unterminated_declaration_is_dropped() {
        let source = "fn ok() {}\nfn broken() {\n    if x {\n";
        assert_eq!(outline_source(source), vec![entry(1, 1, "fn ok()")]);

        let source = "struct Open {\n    a: u8,\n";
        assert!(outline_source(source).is_empty());
    }

    #[test]
    fn test_inner_declarations_do_not_restart_capture() {
        let source = "\
fn outer() {
fn inner() {}
struct Local { a: u8 }
pub const X: u8 = 1;
}
fn next() {}
";
        assert_eq!(
            outline_source(source),
            vec![entry(1, 5, "fn outer()"), entry(6, 6, "fn next()")]
        );
    }

    #[test]
    fn test_methods_in_impl_are_ignored() {
        let source = "impl Foo {\n    pub fn new() -> Self {\n        Foo\n    }\n}\n";
        assert!(outline_source(source).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(outline_source("").is_empty());
        assert!(outline_source("\n\n// just comments\n").is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let source = "/// Doc\r\nfn windows() {\r\n}\r\n";
        assert_eq!(outline_source(source), vec![entry(1, 3, "fn windows()")]);
    }

    // ==================== Properties ====================

    #[test]
    fn test_entries_ordered_and_ranges_valid() {
        let source = "\
/// a
fn a() {
}
static S: u8 = 0;
pub struct P {
    x: u8,
}

/// b
pub fn b(
    x: u8,
) {}
";
        let entries = outline_source(source);
        assert_eq!(entries.len(), 4);
        for e in &entries {
            assert!(e.start_line <= e.end_line);
        }
        for pair in entries.windows(2) {
            assert!(pair[0].start_line <= pair[1].start_line);
        }
    }

    #[test]
    fn test_repeatable() {
        let source = "/// x\npub fn x() {\n}\nstruct Y;\n";
        let first: Vec<String> = outline_source(source).iter().map(|e| e.to_string()).collect();
        let second: Vec<String> = outline_source(source).iter().map(|e| e.to_string()).collect();
        assert_eq!(first, second);
    }

    // ==================== Scanner API ====================

    #[test]
    fn test_scanner_state_transitions() {
        use super::Scanner;
        use crate::outline::SourceLine;

        let mut scanner = Scanner::new();
        assert!(scanner.feed(SourceLine::new(1, "/// doc")).is_none());
        assert_eq!(scanner.pending_doc_line(), Some(1));
        assert!(scanner.feed(SourceLine::new(2, "/// more")).is_none());
        assert_eq!(scanner.pending_doc_line(), Some(1));

        assert!(scanner.feed(SourceLine::new(3, "fn f(")).is_none());
        assert!(scanner.is_capturing());
        assert_eq!(scanner.pending_doc_line(), None);

        let done = scanner.feed(SourceLine::new(4, ") {}"));
        assert_eq!(done, Some(entry(1, 4, "fn f(\n)")));
        assert!(!scanner.is_capturing());
    }
}
