//! Extraction of structured note records from raw markdown.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{Category, NoteRecord};
use crate::infra::strip_frontmatter;
use crate::source::RepoRef;

/// Maximum number of characters kept in an excerpt before the ellipsis.
pub const MAX_EXCERPT_LENGTH: usize = 200;

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*`_~]").unwrap());
static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[A-Za-z0-9_-]+").unwrap());

/// Turns raw markdown files into [`NoteRecord`]s.
///
/// The extractor only needs to know where the notes live so it can build a
/// link back to each source file.
#[derive(Debug, Clone)]
pub struct NoteExtractor {
    repo: RepoRef,
}

impl NoteExtractor {
    pub fn new(repo: RepoRef) -> Self {
        Self { repo }
    }

    /// Extracts a record, stamping it with the current time.
    pub fn extract(&self, raw: &str, path: &str, file_name: &str) -> NoteRecord {
        self.extract_at(raw, path, file_name, Utc::now())
    }

    /// Extracts a record with an explicit processing time.
    pub fn extract_at(
        &self,
        raw: &str,
        path: &str,
        file_name: &str,
        processed_at: DateTime<Utc>,
    ) -> NoteRecord {
        let content = strip_frontmatter(raw);

        NoteRecord::builder(path, extract_title(raw, file_name))
            .excerpt(make_excerpt(content))
            .content(content)
            .tags(extract_tags(raw))
            .category(Category::from_path(path))
            .filename(file_name)
            .last_modified(processed_at)
            .url(self.repo.blob_url(path))
            .build()
    }
}

/// Returns the first level-1 heading, or a title made from the file name.
///
/// # Examples
///
/// ```
/// use noteshelf::infra::extract_title;
///
/// assert_eq!(extract_title("intro\n# Real Title\n", "x.md"), "Real Title");
/// assert_eq!(extract_title("no heading", "my-first-note.md"), "my first note");
/// ```
pub fn extract_title(raw: &str, file_name: &str) -> String {
    raw.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::to_string)
        .unwrap_or_else(|| {
            file_name
                .strip_suffix(".md")
                .unwrap_or(file_name)
                .replace('-', " ")
        })
}

/// Builds a plain-text preview of a note body.
///
/// Images are dropped, links reduced to their text, markup characters
/// removed and line breaks folded into spaces. The result is cut at
/// [`MAX_EXCERPT_LENGTH`] characters and always ends with `...`, even when
/// nothing was cut.
pub fn make_excerpt(content: &str) -> String {
    let text = IMAGE_RE.replace_all(content, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = MARKUP_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");

    let mut excerpt: String = text.trim().chars().take(MAX_EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

/// Collects `#tag` tokens in order of appearance, duplicates included.
pub fn extract_tags(raw: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(raw)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn extractor() -> NoteExtractor {
        NoteExtractor::new(RepoRef::new("alice/notes", "main"))
    }

    // ===========================================
    // Title
    // ===========================================

    #[test]
    fn title_from_first_h1() {
        let raw = "## Sub\n# First\n# Second";
        assert_eq!(extract_title(raw, "x.md"), "First");
    }

    #[test]
    fn title_ignores_deeper_headings() {
        assert_eq!(extract_title("## Only h2", "only-h2.md"), "only h2");
    }

    #[test]
    fn title_requires_space_after_hash() {
        assert_eq!(extract_title("#tag line", "tagged.md"), "tagged");
    }

    #[test]
    fn title_fallback_keeps_other_extensions() {
        assert_eq!(extract_title("", "notes.markdown"), "notes.markdown");
    }

    // ===========================================
    // Excerpt
    // ===========================================

    #[test]
    fn short_excerpt_still_gets_ellipsis() {
        assert_eq!(make_excerpt("Hello world"), "Hello world...");
    }

    #[test]
    fn excerpt_strips_markup() {
        let content = "# Title\n\nSome **bold** and `code` ~~gone~~ _it_.";
        assert_eq!(make_excerpt(content), "Title Some bold and code gone it....");
    }

    #[test]
    fn excerpt_drops_images_and_keeps_link_text() {
        let content = "See ![diagram](img.png) and [the docs](https://example.com).";
        assert_eq!(make_excerpt(content), "See  and the docs....");
    }

    #[test]
    fn excerpt_is_truncated_to_limit() {
        let content = "a".repeat(500);
        let excerpt = make_excerpt(&content);
        assert_eq!(excerpt.chars().count(), MAX_EXCERPT_LENGTH + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn excerpt_truncates_on_characters_not_bytes() {
        let content = "é".repeat(300);
        let excerpt = make_excerpt(&content);
        assert_eq!(excerpt.chars().count(), 203);
    }

    #[test]
    fn excerpt_collapses_newline_runs() {
        assert_eq!(make_excerpt("one\n\n\ntwo\nthree"), "one two three...");
    }

    // ===========================================
    // Tags
    // ===========================================

    #[test]
    fn tags_in_order() {
        assert_eq!(
            extract_tags("Some #foo and #bar-baz text"),
            vec!["foo", "bar-baz"]
        );
    }

    #[test]
    fn tags_keep_duplicates() {
        assert_eq!(extract_tags("#a #b #a"), vec!["a", "b", "a"]);
    }

    #[test]
    fn headings_are_not_tags() {
        assert!(extract_tags("# Title\n## Sub\n").is_empty());
    }

    #[test]
    fn tags_read_from_frontmatter_too() {
        let raw = "---\nkind: #private\n---\nbody #public";
        assert_eq!(extract_tags(raw), vec!["private", "public"]);
    }

    // ===========================================
    // Whole record
    // ===========================================

    #[test]
    fn extract_full_record() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let raw = "---\nalias: x\n---\n# Sockets\n\nBerkeley sockets #networking #c\n";
        let note = extractor().extract_at(raw, "Computing/sockets.md", "sockets.md", at);

        assert_eq!(note.title(), "Sockets");
        assert_eq!(note.content(), "# Sockets\n\nBerkeley sockets #networking #c");
        assert_eq!(note.excerpt(), "Sockets Berkeley sockets networking c...");
        assert_eq!(note.tags(), &["networking".to_string(), "c".to_string()]);
        assert_eq!(note.category(), Category::Computing);
        assert_eq!(note.path(), "Computing/sockets.md");
        assert_eq!(note.filename(), "sockets.md");
        assert_eq!(note.last_modified(), at);
        assert_eq!(
            note.url(),
            "https://github.com/alice/notes/blob/main/Computing%2Fsockets.md"
        );
    }

    #[test]
    fn content_never_contains_frontmatter() {
        let raw = "---\nsecret: yes\n---\nVisible";
        let note = extractor().extract(raw, "misc/a.md", "a.md");
        assert!(!note.content().contains("secret"));
        assert!(!note.content().contains("---"));
    }

    #[test]
    fn excerpt_never_exceeds_limit() {
        let raw = format!("# Long\n{}", "word ".repeat(200));
        let note = extractor().extract(&raw, "long.md", "long.md");
        assert!(note.excerpt().chars().count() <= 203);
    }
}
