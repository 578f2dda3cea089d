//! The structured record produced for each markdown source file.

use crate::domain::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A note extracted from a markdown file in the source repository.
///
/// Records are created once per source file during ingestion and never
/// mutated afterwards. A reload replaces the whole collection.
///
/// The serialized form uses camelCase keys so that a collection can be
/// written to, and read back from, the `notes-data.json` artifact.
///
/// # Examples
///
/// ```
/// use noteshelf::domain::{Category, NoteRecord};
///
/// let note = NoteRecord::builder("math/groups.md", "Groups")
///     .content("A group is a set with an operation.")
///     .build();
/// assert_eq!(note.filename(), "groups.md");
/// assert_eq!(note.category(), Category::Math);
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    title: String,
    excerpt: String,
    content: String,
    tags: Vec<String>,
    category: Category,
    path: String,
    filename: String,
    last_modified: DateTime<Utc>,
    url: String,
}

impl NoteRecord {
    /// Creates a builder for a record at `path` with the given title.
    ///
    /// The filename and category are derived from `path` unless set
    /// explicitly.
    pub fn builder(path: impl Into<String>, title: impl Into<String>) -> NoteRecordBuilder {
        NoteRecordBuilder::new(path, title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    /// Body text with the frontmatter block removed.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Hashtags in order of appearance, duplicates included.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Repository-relative path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// When the record was produced. This is the processing time, not the
    /// file's modification time in the source repository.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Link back to the note in the hosted repository.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.path)
    }
}

impl fmt::Debug for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteRecord")
            .field("title", &self.title)
            .field("path", &self.path)
            .field("category", &self.category)
            .field("tags", &self.tags)
            .field("content_len", &self.content.len())
            .field("last_modified", &self.last_modified)
            .finish()
    }
}

/// Builder for constructing a [`NoteRecord`].
pub struct NoteRecordBuilder {
    title: String,
    excerpt: String,
    content: String,
    tags: Vec<String>,
    category: Option<Category>,
    path: String,
    filename: Option<String>,
    last_modified: Option<DateTime<Utc>>,
    url: String,
}

impl NoteRecordBuilder {
    fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: String::new(),
            content: String::new(),
            tags: Vec::new(),
            category: None,
            path: path.into(),
            filename: None,
            last_modified: None,
            url: String::new(),
        }
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builds the record, filling in derived fields that were not set.
    pub fn build(self) -> NoteRecord {
        let filename = self.filename.unwrap_or_else(|| {
            self.path
                .rsplit('/')
                .next()
                .unwrap_or(&self.path)
                .to_string()
        });
        let category = self
            .category
            .unwrap_or_else(|| Category::from_path(&self.path));

        NoteRecord {
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            tags: self.tags,
            category,
            path: self.path,
            filename,
            last_modified: self.last_modified.unwrap_or_else(Utc::now),
            url: self.url,
        }
    }
}
