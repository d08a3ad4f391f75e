//! Text normalization applied to every emitted outline entry.

use super::classify::strip_qualifier;

/// Signature of a function: qualifier stripped, body cut at the first `{`.
pub fn normalize_function(text: &str) -> String {
    let text = strip_qualifier(text);
    let signature = match text.find('{') {
        Some(idx) => &text[..idx],
        None => text,
    };
    collapse_lines(signature.lines())
}

/// Struct or enum with its body: qualifier stripped, `//` fragments removed per line.
pub fn normalize_struct(text: &str) -> String {
    collapse_lines(strip_qualifier(text).lines().map(strip_inline_comment))
}

/// Single-line item (static, public const, trait header, ...).
pub fn normalize_item(text: &str) -> String {
    collapse_lines(strip_qualifier(text).lines())
}

/// Trim trailing whitespace per line and drop blank lines entirely.
fn collapse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_cut_at_brace() {
        assert_eq!(
            normalize_function("pub fn add(a: i32, b: i32) -> i32 { a + b }"),
            "fn add(a: i32, b: i32) -> i32"
        );
    }

    #[test]
    fn test_function_multiline_signature() {
        let text = "pub fn long(\n    a: u8,\n\n    b: u8,   \n) -> u8\n{\n    a + b\n}";
        assert_eq!(normalize_function(text), "fn long(\n    a: u8,\n    b: u8,\n) -> u8");
    }

    #[test]
    fn test_function_without_brace_is_kept_whole() {
        assert_eq!(normalize_function("fn decl();"), "fn decl();");
    }

    #[test]
    fn test_struct_keeps_body_and_drops_comments() {
        let text = "pub struct Point { // a point\n    x: i32, // horizontal\n    // \n    y: i32,\n}";
        assert_eq!(normalize_struct(text), "struct Point {\n    x: i32,\n    y: i32,\n}");
    }

    #[test]
    fn test_struct_single_line() {
        assert_eq!(
            normalize_struct("struct Point { x: i32, y: i32 }"),
            "struct Point { x: i32, y: i32 }"
        );
    }

    #[test]
    fn test_item_strips_qualifier_and_trailing_space() {
        assert_eq!(normalize_item("pub const MAX: u8 = 3;   "), "const MAX: u8 = 3;");
        assert_eq!(normalize_item("static X: u8 = 1;"), "static X: u8 = 1;");
    }

    #[test]
    fn test_no_leading_or_trailing_blank_lines() {
        let out = normalize_function("fn a()\n\n   \n{");
        assert_eq!(out, "fn a()");
        assert!(!out.contains("\n\n"));
    }
}
