//! Text processing: frontmatter, note extraction, slugs

mod extract;
mod frontmatter;
mod slug;

pub use extract::{MAX_EXCERPT_LENGTH, NoteExtractor, extract_tags, extract_title, make_excerpt};
pub use frontmatter::strip_frontmatter;
pub use slug::{PageSlugs, page_slug, slugify};
