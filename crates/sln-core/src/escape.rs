//! Path normalization and markup escaping.

use sln_fs::NormalizedPath;

/// Escape `&`, `<`, `>`, `"` and `'` for embedding in XML text or attributes.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Root-relative, backslash-separated, escaped form of `path`.
///
/// Paths outside `root` keep their full form but are still separator
/// normalized and escaped.
pub fn relative_escaped_path(path: &str, root: &NormalizedPath) -> String {
    let normalized = NormalizedPath::new(path);
    let relative = normalized.strip_root(root).unwrap_or(normalized.as_str());
    escape_markup(&relative.replace('/', "\\"))
}

/// Forward-slash, escaped form of a reference hint path.
pub fn escaped_reference_path(path: &NormalizedPath) -> String {
    escape_markup(path.as_str())
}
