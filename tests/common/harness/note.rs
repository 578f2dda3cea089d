//! Builder for test notes with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};
use noteshelf::domain::{Category, NoteRecord};

/// Builder for creating test notes with sensible defaults.
///
/// The path is derived from the category and title, and the modification
/// date is fixed so output is stable.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    category: Category,
    excerpt: String,
    body: String,
    tags: Vec<String>,
    modified: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given title, filed under `note`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Category::Note,
            excerpt: String::new(),
            body: String::new(),
            tags: Vec::new(),
            modified: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
        }
    }

    /// Sets the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the excerpt shown on cards and searched.
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Sets the markdown body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Repository path, e.g. `math/Group Theory.md`.
    pub fn path(&self) -> String {
        format!("{}/{}.md", self.category, self.title)
    }

    /// Converts this TestNote to a domain record.
    pub fn to_record(&self) -> NoteRecord {
        NoteRecord::builder(self.path(), &self.title)
            .category(self.category)
            .excerpt(&self.excerpt)
            .content(&self.body)
            .tags(self.tags.clone())
            .last_modified(self.modified)
            .url(format!("https://github.com/alice/notes/blob/main/{}", self.path()))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("Group Theory")
            .category(Category::Math)
            .tag("algebra")
            .excerpt("Sets with an operation.")
            .body("A **group** is...");

        let record = note.to_record();
        assert_eq!(record.title(), "Group Theory");
        assert_eq!(record.path(), "math/Group Theory.md");
        assert_eq!(record.filename(), "Group Theory.md");
        assert_eq!(record.category(), Category::Math);
        assert_eq!(record.tags(), ["algebra"]);
    }
}
