//! Frontmatter removal for note bodies.

use regex::Regex;
use std::sync::LazyLock;

/// A `---` block at the very start of the text, up to the next `---`.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\A---.*?---").unwrap());

/// Removes a leading frontmatter block and trims the result.
///
/// The block starts with `---` at the very beginning of the text and ends at
/// the next `---`, wherever it occurs. Text without a leading block is only
/// trimmed. Frontmatter contents are not interpreted.
///
/// # Examples
///
/// ```
/// use noteshelf::infra::strip_frontmatter;
///
/// let text = "---\ntags: [a]\n---\n\n# Title\nBody\n";
/// assert_eq!(strip_frontmatter(text), "# Title\nBody");
/// assert_eq!(strip_frontmatter("  plain  "), "plain");
/// ```
pub fn strip_frontmatter(text: &str) -> &str {
    let body = match FRONTMATTER_RE.find(text) {
        Some(block) => &text[block.end()..],
        None => text,
    };
    body.trim()
}
