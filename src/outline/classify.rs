//! @dose
//! purpose: Line classifier for the outline scanner. Looks at one line in isolation and
//!     decides which of the fixed categories it belongs to (doc comment, declaration start,
//!     static item, public item, blank, comment/attribute, other).
//!
//! when-editing:
//!     - !Rules are evaluated in priority order, first match wins
//!     - !Declaration starts are only recognized at column 0 (top-level items)
//!     - Comment and attribute detection ignores leading whitespace so embedded lines
//!       inside a struct body are still recognized
//!
//! invariants:
//!     - classify_line is a pure function of the line text
//!     - `pub use` lines are never PublicItem
//!
//! gotchas:
//!     - `////` is an ordinary comment, not a doc comment
//!     - `//!` is inner module documentation and does not open a doc block

use once_cell::sync::Lazy;
use regex::Regex;

/// Visibility qualifier: `pub`, `pub(crate)`, `pub(super)`, `pub(in path)`.
static QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^pub(?:\([^)]*\))?\s+").unwrap());

static FUNCTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:pub(?:\([^)]*\))?\s+)?(?:(?:const|async|unsafe|default|extern(?:\s+"[^"]*")?)\s+)*fn\b"#,
    )
    .unwrap()
});

static STRUCT_OR_ENUM_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum)\b").unwrap());

static STATIC_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^static\b").unwrap());

static PUBLIC_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^pub(?:\([^)]*\))?\s+\S").unwrap());

static PUBLIC_USE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^pub(?:\([^)]*\))?\s+use\b").unwrap());

/// Category of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    DocComment,
    FunctionStart,
    StructOrEnumStart,
    StaticItem,
    PublicItem,
    Blank,
    LineComment,
    Other,
}

impl LineClass {
    /// Lines dropped from an in-progress capture: never collected, never brace-counted.
    pub fn is_embedded_comment(self) -> bool {
        matches!(self, LineClass::DocComment | LineClass::LineComment)
    }
}

/// Classify one line of source text.
pub fn classify_line(line: &str) -> LineClass {
    let trimmed = line.trim_start();

    if is_doc_comment(trimmed) {
        LineClass::DocComment
    } else if FUNCTION_START.is_match(line) {
        LineClass::FunctionStart
    } else if STRUCT_OR_ENUM_START.is_match(line) {
        LineClass::StructOrEnumStart
    } else if STATIC_ITEM.is_match(line) {
        LineClass::StaticItem
    } else if PUBLIC_ITEM.is_match(line) && !PUBLIC_USE.is_match(line) {
        LineClass::PublicItem
    } else if trimmed.is_empty() {
        LineClass::Blank
    } else if is_comment_or_attribute(trimmed) {
        LineClass::LineComment
    } else {
        LineClass::Other
    }
}

/// Remove a single leading visibility qualifier, if present.
pub fn strip_qualifier(text: &str) -> &str {
    match QUALIFIER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn is_doc_comment(trimmed: &str) -> bool {
    trimmed.starts_with("///") && !trimmed.starts_with("////")
}

fn is_comment_or_attribute(trimmed: &str) -> bool {
    if trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with("#[")
        || trimmed.starts_with("#!")
    {
        return true;
    }

    // Block comment continuation (` * text`, ` */`), not a dereference like `*ptr = 1;`
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.is_empty() || rest.starts_with(' ') || rest.starts_with('/'),
        None => false,
    }
}
