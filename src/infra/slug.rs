//! URL-friendly slugs for exported note pages.

use std::collections::{HashMap, HashSet};

/// Longest slug produced, in bytes.
const MAX_SLUG_LENGTH: usize = 80;

/// Converts text to a lower-case, hyphen-separated slug.
///
/// Runs of whitespace, slashes and hyphens become a single hyphen; other
/// characters outside `[a-z0-9_]` are dropped. Returns `"untitled"` when
/// nothing survives.
///
/// # Examples
///
/// ```
/// use noteshelf::infra::slugify;
///
/// assert_eq!(slugify("Group Theory"), "group-theory");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '/' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }
    slug
}

/// Slug for a note page, derived from its repository path.
///
/// Distinct paths can still share a slug (`math/sets.md` and
/// `math-sets.md`, or two names with no ASCII letters). Use [`PageSlugs`]
/// when the slugs must name separate pages.
///
/// ```
/// use noteshelf::infra::page_slug;
///
/// assert_eq!(page_slug("Computing/Networks/TCP.md"), "computing-networks-tcp");
/// ```
pub fn page_slug(path: &str) -> String {
    slugify(path.strip_suffix(".md").unwrap_or(path))
}

/// Page slugs for a whole set of notes, unique across the set.
///
/// The first path to claim a slug keeps it; later paths with the same slug
/// get `-2`, `-3` and so on, in input order.
#[derive(Debug, Clone, Default)]
pub struct PageSlugs {
    by_path: HashMap<String, String>,
}

impl PageSlugs {
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut taken = HashSet::new();
        let mut by_path = HashMap::new();

        for path in paths {
            if by_path.contains_key(path) {
                continue;
            }
            let base = page_slug(path);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            by_path.insert(path.to_string(), slug);
        }

        Self { by_path }
    }

    /// Slug for `path`, or its plain [`page_slug`] if it was not in the set.
    pub fn get(&self, path: &str) -> String {
        self.by_path
            .get(path)
            .cloned()
            .unwrap_or_else(|| page_slug(path))
    }
}
