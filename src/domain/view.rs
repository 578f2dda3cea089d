//! Category and search filtering over a note collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::{Category, NoteRecord, ParseCategoryError};

/// Sentinel accepted wherever a category filter is parsed.
pub const ALL_CATEGORIES: &str = "all";

/// Which categories are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, note: &NoteRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => note.category() == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Returns the visible subset of `notes`, sorted by title.
///
/// The category filter and the search term apply together. The search term
/// is trimmed and compared case-insensitively against each note's title and
/// excerpt; an empty term matches everything.
///
/// # Examples
///
/// ```
/// use noteshelf::domain::{view, CategoryFilter, NoteRecord};
///
/// let notes = vec![
///     NoteRecord::builder("z.md", "Zebra").build(),
///     NoteRecord::builder("a.md", "Apple").build(),
/// ];
/// let titles: Vec<_> = view(&notes, CategoryFilter::All, "")
///     .iter()
///     .map(|n| n.title())
///     .collect();
/// assert_eq!(titles, ["Apple", "Zebra"]);
/// ```
pub fn view<'a>(
    notes: &'a [NoteRecord],
    category: CategoryFilter,
    search: &str,
) -> Vec<&'a NoteRecord> {
    let term = search.trim().to_lowercase();

    let mut visible: Vec<&NoteRecord> = notes
        .iter()
        .filter(|note| category.matches(note))
        .filter(|note| term.is_empty() || matches_term(note, &term))
        .collect();

    visible.sort_by(|a, b| compare_titles(a.title(), b.title()));
    visible
}

fn matches_term(note: &NoteRecord, term: &str) -> bool {
    note.title().to_lowercase().contains(term) || note.excerpt().to_lowercase().contains(term)
}

/// Orders titles the way a reader expects rather than by byte value.
///
/// Titles compare on three levels, as locale collation does: base letters
/// with accents and case folded away, then accents, then case. On the last
/// level lower case sorts first, so `apple` comes before `Apple` and
/// `resume` before `Résumé`.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn base_letters(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Finds the note a wiki-style `[[name]]` reference points at.
///
/// Returns the first note, in collection order, whose title or filename
/// contains `name` case-insensitively.
pub fn find_by_name<'a>(notes: &'a [NoteRecord], name: &str) -> Option<&'a NoteRecord> {
    let needle = name.to_lowercase();
    notes.iter().find(|note| {
        note.title().to_lowercase().contains(&needle)
            || note.filename().to_lowercase().contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(path: &str, title: &str, excerpt: &str) -> NoteRecord {
        NoteRecord::builder(path, title).excerpt(excerpt).build()
    }

    fn titles<'a>(notes: &[&'a NoteRecord]) -> Vec<&'a str> {
        notes.iter().map(|n| n.title()).collect()
    }

    fn sample() -> Vec<NoteRecord> {
        vec![
            note("computing/tcp.md", "TCP Handshake", "Three packets..."),
            note("math/groups.md", "Groups", "A set with an operation..."),
            note("philosophy/hume.md", "Hume", "Induction and habit..."),
            note("computing/udp.md", "UDP", "No handshake at all..."),
            note("journal.md", "Journal", "Today I read about groups..."),
        ]
    }

    #[test]
    fn sorts_by_title() {
        let notes = vec![note("z.md", "Zebra", ""), note("a.md", "Apple", "")];
        assert_eq!(titles(&view(&notes, CategoryFilter::All, "")), ["Apple", "Zebra"]);
    }

    #[test]
    fn sort_ignores_case() {
        let notes = vec![
            note("b.md", "banana", ""),
            note("a.md", "Apple", ""),
            note("c.md", "Cherry", ""),
        ];
        assert_eq!(
            titles(&view(&notes, CategoryFilter::All, "")),
            ["Apple", "banana", "Cherry"]
        );
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        let notes = vec![
            note("z.md", "Zebra", ""),
            note("e.md", "Éclair", ""),
            note("a.md", "apple", ""),
            note("o.md", "Ökonomie", ""),
        ];
        assert_eq!(
            titles(&view(&notes, CategoryFilter::All, "")),
            ["apple", "Éclair", "Ökonomie", "Zebra"]
        );
    }

    #[test]
    fn unaccented_title_precedes_accented_twin() {
        assert_eq!(compare_titles("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("résumé", "rest"), Ordering::Less);
    }

    #[test]
    fn lower_case_precedes_upper_case_on_ties() {
        let notes = vec![
            note("b.md", "Apple", ""),
            note("a.md", "apple", ""),
        ];
        assert_eq!(titles(&view(&notes, CategoryFilter::All, "")), ["apple", "Apple"]);
        assert_eq!(compare_titles("Apple", "Apple"), Ordering::Equal);
    }

    #[test]
    fn category_filter_is_exact() {
        let notes = sample();
        let visible = view(&notes, CategoryFilter::Only(Category::Computing), "");
        assert_eq!(titles(&visible), ["TCP Handshake", "UDP"]);
    }

    #[test]
    fn search_matches_title_or_excerpt() {
        let notes = sample();
        let visible = view(&notes, CategoryFilter::All, "handshake");
        assert_eq!(titles(&visible), ["TCP Handshake", "UDP"]);
    }

    #[test]
    fn search_is_trimmed_and_case_folded() {
        let notes = sample();
        let visible = view(&notes, CategoryFilter::All, "  GROUPS ");
        assert_eq!(titles(&visible), ["Groups", "Journal"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let notes = sample();
        let visible = view(&notes, CategoryFilter::Only(Category::Math), "groups");
        assert_eq!(titles(&visible), ["Groups"]);
    }

    #[test]
    fn no_match_is_empty() {
        let notes = sample();
        assert!(view(&notes, CategoryFilter::All, "quaternion").is_empty());
    }

    #[test]
    fn parse_filter() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "misc".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Misc)
        );
        assert!("Computing".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn find_by_name_uses_title_then_filename() {
        let notes = sample();
        assert_eq!(find_by_name(&notes, "hume").unwrap().title(), "Hume");
        assert_eq!(find_by_name(&notes, "udp.md").unwrap().title(), "UDP");
        assert!(find_by_name(&notes, "Kant").is_none());
    }

    #[test]
    fn find_by_name_returns_first_in_collection_order() {
        let notes = sample();
        // Both "Groups" and the journal excerpt mention groups, but only the
        // title and filename are consulted.
        assert_eq!(find_by_name(&notes, "group").unwrap().path(), "math/groups.md");
    }
}
