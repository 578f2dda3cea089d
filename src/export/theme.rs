//! CSS themes for the static site.

use std::path::Path;

use anyhow::{Result, anyhow};

/// Layout shared by every built-in theme. Colours come from the palette.
const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem;
    background: var(--color-bg);
    color: var(--color-text);
}
a { color: var(--color-link); text-decoration: none; }
a:hover { text-decoration: underline; }
header h1 { margin-bottom: 0.25rem; }
.note-count, .metadata { color: var(--color-muted); font-size: 0.9em; }

.categories { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 1rem 0 2rem; }
.categories a {
    padding: 0.3rem 0.8rem;
    border: 1px solid var(--color-border);
    border-radius: 999px;
}
.categories a.active { background: var(--color-link); color: var(--color-bg); }

.notes-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 1rem;
}
.note-card {
    display: block;
    padding: 1rem 1.25rem;
    border: 1px solid var(--color-border);
    border-radius: 8px;
    background: var(--color-surface);
    color: inherit;
}
.note-card:hover { border-color: var(--color-link); text-decoration: none; }
.note-card h3 { margin: 0.25rem 0 0.5rem; font-size: 1.1em; }
.note-card .excerpt { color: var(--color-muted); font-size: 0.9em; margin: 0 0 0.75rem; }
.note-meta { display: flex; justify-content: space-between; font-size: 0.8em; color: var(--color-muted); }
.category-indicator { font-family: monospace; font-size: 0.8em; color: var(--color-muted); }
.empty-state { text-align: center; color: var(--color-muted); padding: 3rem 0; }

.tags { display: inline-flex; gap: 0.25rem; }
.tag {
    background: var(--color-code-bg);
    padding: 0.1rem 0.4rem;
    border-radius: 3px;
}

article { max-width: 800px; margin: 0 auto; }
article h1 { border-bottom: 1px solid var(--color-border); padding-bottom: 0.5rem; }
pre {
    background: var(--color-code-bg);
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
}
code { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 0.9em; }
:not(pre) > code { background: var(--color-code-bg); padding: 0.1rem 0.3rem; border-radius: 3px; }
blockquote {
    border-left: 3px solid var(--color-border);
    margin: 0.5rem 0;
    padding-left: 1rem;
    color: var(--color-muted);
}
.wiki-link {
    background: var(--color-code-bg);
    padding: 0.2rem 0.4rem;
    border-radius: 4px;
}
img { max-width: 100%; height: auto; }
footer { margin-top: 3rem; font-size: 0.9em; }
"#;

/// Light palette.
pub const THEME_DEFAULT: &str = r#"
:root {
    --color-bg: #ffffff;
    --color-surface: #fafafa;
    --color-text: #333333;
    --color-muted: #666666;
    --color-border: #e0e0e0;
    --color-link: #0066cc;
    --color-code-bg: #f0f0f0;
}
"#;

/// Dark palette.
pub const THEME_DARK: &str = r#"
:root {
    --color-bg: #0d1117;
    --color-surface: #161b22;
    --color-text: #e6edf3;
    --color-muted: #8b949e;
    --color-border: #30363d;
    --color-link: #58a6ff;
    --color-code-bg: #21262d;
}
"#;

/// Gets CSS for the specified theme.
///
/// # Arguments
///
/// * `theme` - Theme name ("default", "dark") or path to a custom CSS file.
///   If None, returns the default theme.
///
/// # Errors
///
/// Returns an error if the theme name is unknown or the CSS file cannot be read.
pub fn get_theme_css(theme: Option<&str>) -> Result<String> {
    let palette = match theme {
        None | Some("default") => THEME_DEFAULT,
        Some("dark") => THEME_DARK,
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                return Err(anyhow!(
                    "Unknown theme: '{}'. Use 'default', 'dark', or a path to a CSS file.",
                    path.display()
                ));
            }
            return Ok(std::fs::read_to_string(path)?);
        }
    };
    Ok(format!("{palette}{BASE_CSS}"))
}
