//! Markdown to HTML conversion.
//!
//! This is a small line-oriented renderer, not a CommonMark implementation.
//! It applies a fixed sequence of substitutions and the order matters: each
//! rule assumes the previous ones already ran.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap());

static H3_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());

static BOLD_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.*?)\*\*\*").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static WIKI_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

static STAR_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\* (.*)$").unwrap());
static DASH_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static NUMBERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\d+)\. (.*)$").unwrap());
static LIST_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^<li>.*</li>(?:\n<li>.*</li>)*$").unwrap());
static LEGACY_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(<li>.*</li>)").unwrap());

static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^> (.*)$").unwrap());
static HEADING_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</h([1-6])></p>").unwrap());

/// Escapes the five HTML-significant characters.
///
/// ```
/// use noteshelf::export::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// How runs of list items are wrapped in `<ul>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListWrapping {
    /// Each contiguous run of items becomes its own list.
    #[default]
    EveryRun,
    /// One greedy wrap from the first item to the last, swallowing anything
    /// between separate lists.
    Legacy,
}

/// Resolves `[[Name]]` references to page links.
pub trait WikiLinkTarget {
    /// Returns the href for the named note, or `None` when nothing matches.
    fn href(&self, name: &str) -> Option<String>;
}

/// Options for [`markdown_to_html_with`].
#[derive(Default, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub lists: ListWrapping,
    /// Unresolved wiki links point at `#`.
    pub wiki_links: Option<&'a dyn WikiLinkTarget>,
}

/// Converts markdown text to HTML with default options.
///
/// # Example
///
/// ```
/// use noteshelf::export::markdown_to_html;
///
/// let html = markdown_to_html("# Title\n\nSome **bold** text.");
/// assert_eq!(html, "<h1>Title</h1><p>Some <strong>bold</strong> text.</p>");
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    markdown_to_html_with(markdown, &RenderOptions::default())
}

/// Converts markdown text to HTML.
///
/// Fenced code blocks are escaped and set aside before any other rule runs,
/// so nothing inside a fence is treated as markup. Raw HTML elsewhere passes
/// through untouched.
pub fn markdown_to_html_with(markdown: &str, options: &RenderOptions<'_>) -> String {
    let source = markdown.replace("\r\n", "\n");

    // Fences become `\u{E000}n\u{E001}` placeholders; the same characters in
    // the surrounding text are written as character references instead.
    let mut blocks = Vec::new();
    let mut text = String::with_capacity(source.len());
    let mut last = 0;
    for fence in FENCE_RE.find_iter(&source) {
        text.push_str(&escape_markers(&source[last..fence.start()]));
        let code = fence.as_str().replace("```", "");
        blocks.push(format!("<pre><code>{}</code></pre>", escape_html(code.trim())));
        text.push_str(&format!("\u{E000}{}\u{E001}", blocks.len() - 1));
        last = fence.end();
    }
    text.push_str(&escape_markers(&source[last..]));

    let text = H3_RE.replace_all(&text, "<h3>${1}</h3>");
    let text = H2_RE.replace_all(&text, "<h2>${1}</h2>");
    let text = H1_RE.replace_all(&text, "<h1>${1}</h1>");

    let text = BOLD_ITALIC_RE.replace_all(&text, "<strong><em>${1}</em></strong>");
    let text = BOLD_RE.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>${1}</em>");
    let text = INLINE_CODE_RE.replace_all(&text, "<code>${1}</code>");

    let text = LINK_RE.replace_all(
        &text,
        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    );
    let text = WIKI_LINK_RE.replace_all(&text, |caps: &Captures| {
        wiki_anchor(&caps[1], options.wiki_links)
    });

    let text = STAR_ITEM_RE.replace_all(&text, "<li>${1}</li>");
    let text = DASH_ITEM_RE.replace_all(&text, "<li>${1}</li>");
    let text = NUMBERED_ITEM_RE.replace_all(&text, "<li>${1}. ${2}</li>");
    let text = match options.lists {
        ListWrapping::EveryRun => LIST_RUN_RE.replace_all(&text, |caps: &Captures| {
            format!("<ul>{}</ul>", caps[0].replace('\n', ""))
        }),
        ListWrapping::Legacy => LEGACY_LIST_RE.replace(&text, "<ul>${1}</ul>"),
    };

    let text = QUOTE_RE.replace_all(&text, "<blockquote>${1}</blockquote>");

    let text = text.replace("\n\n", "</p><p>").replace('\n', "<br>");
    let text = format!("<p>{text}</p>")
        .replace("<p></p>", "")
        .replace("<p><h", "<h");
    let text = HEADING_CLOSE_RE.replace_all(&text, "</h${1}>");

    PLACEHOLDER_RE
        .replace_all(&text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| blocks.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

fn escape_markers(text: &str) -> String {
    text.replace('\u{E000}', "&#xE000;")
        .replace('\u{E001}', "&#xE001;")
}

fn wiki_anchor(name: &str, target: Option<&dyn WikiLinkTarget>) -> String {
    let href = target
        .and_then(|t| t.href(name))
        .unwrap_or_else(|| "#".to_string());
    format!(
        r#"<a href="{}" class="wiki-link" data-note="{}">{}</a>"#,
        escape_html(&href),
        escape_html(name),
        name
    )
}
