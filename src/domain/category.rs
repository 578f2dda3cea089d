//! Coarse note classification derived from the file path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category a note belongs to.
///
/// Categories are derived from the note's repository path, never from its
/// content. Every note has exactly one category; notes whose path matches
/// none of the known folders fall into [`Category::Note`].
///
/// # Examples
///
/// ```
/// use noteshelf::domain::Category;
///
/// assert_eq!(Category::from_path("Computing/networks.md"), Category::Computing);
/// assert_eq!(Category::from_path("journal.md"), Category::Note);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Computing,
    Math,
    Philosophy,
    Misc,
    Note,
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone)]
pub struct ParseCategoryError(String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}': expected one of computing, math, philosophy, misc, note",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}

/// Path keywords checked in order; the first hit wins.
const PATH_RULES: &[(&str, Category)] = &[
    ("computing", Category::Computing),
    ("math", Category::Math),
    ("philosophy", Category::Philosophy),
    ("misc", Category::Misc),
];

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Computing,
        Category::Math,
        Category::Philosophy,
        Category::Misc,
        Category::Note,
    ];

    /// Derives a category from a repository path.
    ///
    /// The check is a case-insensitive substring match, so `Mathematics/` and
    /// `old-math-notes/` both land in [`Category::Math`].
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        PATH_RULES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Note)
    }

    /// Returns the lower-case name used in filters and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Computing => "computing",
            Category::Math => "math",
            Category::Philosophy => "philosophy",
            Category::Misc => "misc",
            Category::Note => "note",
        }
    }

    /// Returns the short marker shown on note cards.
    pub fn indicator(&self) -> &'static str {
        match self {
            Category::Computing => "[C]",
            Category::Math => "[M]",
            Category::Philosophy => "[P]",
            Category::Misc | Category::Note => "[N]",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Parses an exact, case-sensitive category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn computing_path() {
        assert_eq!(
            Category::from_path("Computing/networks.md"),
            Category::Computing
        );
    }

    #[test]
    fn misc_path_is_case_insensitive() {
        assert_eq!(Category::from_path("random/Misc Stuff.md"), Category::Misc);
    }

    #[test]
    fn unmatched_path_is_note() {
        assert_eq!(Category::from_path("journal.md"), Category::Note);
    }

    #[test]
    fn first_rule_wins() {
        // Contains both "math" and "computing"; computing is checked first.
        assert_eq!(
            Category::from_path("math/computing-history.md"),
            Category::Computing
        );
        assert_eq!(
            Category::from_path("philosophy/misc.md"),
            Category::Philosophy
        );
    }

    #[test]
    fn substring_inside_word_matches() {
        assert_eq!(
            Category::from_path("Mathematics/groups.md"),
            Category::Math
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("math".parse::<Category>().unwrap(), Category::Math);
        assert!("Math".parse::<Category>().is_err());
        assert!("all".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Philosophy).unwrap();
        assert_eq!(json, "\"philosophy\"");
        let parsed: Category = serde_json::from_str("\"misc\"").unwrap();
        assert_eq!(parsed, Category::Misc);
    }

    #[test]
    fn indicators() {
        assert_eq!(Category::Computing.indicator(), "[C]");
        assert_eq!(Category::Misc.indicator(), "[N]");
        assert_eq!(Category::Note.indicator(), "[N]");
    }

    #[test]
    fn display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
