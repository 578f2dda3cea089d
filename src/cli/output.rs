//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::NoteRecord;
use crate::export::format_card_date;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain source paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub title: String,
    pub category: &'static str,
    pub path: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub date: String,
    pub url: String,
}

impl From<&NoteRecord> for NoteListing {
    fn from(note: &NoteRecord) -> Self {
        Self {
            title: note.title().to_string(),
            category: note.category().as_str(),
            path: note.path().to_string(),
            excerpt: note.excerpt().to_string(),
            tags: note.tags().to_vec(),
            date: format_card_date(note.last_modified()),
            url: note.url().to_string(),
        }
    }
}

/// Summary of a fetch run.
#[derive(Debug, Serialize)]
pub struct FetchSummary {
    pub artifact: String,
    pub files: usize,
    pub extracted: usize,
    pub published: usize,
    pub skipped: usize,
}
