//! Rules deciding which notes are published.

use std::collections::HashSet;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::NoteRecord;

/// Tags excluded by the restrictive preset.
const RESTRICTIVE_TAGS: &[&str] = &["private", "draft", "personal", "hide"];

/// Filename/path patterns excluded by the restrictive preset.
const RESTRICTIVE_PATTERNS: &[&str] = &[r"(?i)private", r"(?i)draft", r"(?i)\.private\."];

/// Minimum content length (in characters) under the restrictive preset.
const RESTRICTIVE_MIN_LENGTH: usize = 50;

/// Named starting points for publish criteria.
///
/// Browsing and batch fetching default to different presets; both are named
/// so a caller or config file can pick either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PublishPreset {
    /// Publish everything.
    Permissive,
    /// Hide private, draft, personal and hidden notes, and very short ones.
    Restrictive,
}

/// Errors building publish criteria.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Exclusion rules applied to extracted notes.
///
/// A note is published unless one of the rules rejects it. The default value
/// has no rules and publishes everything.
#[derive(Debug, Clone, Default)]
pub struct PublishCriteria {
    exclude_tags: HashSet<String>,
    exclude_patterns: Vec<Regex>,
    exclude_files: HashSet<String>,
    min_content_length: usize,
}

impl PublishCriteria {
    /// Returns the criteria for a named preset.
    pub fn preset(preset: PublishPreset) -> Self {
        match preset {
            PublishPreset::Permissive => Self::default(),
            PublishPreset::Restrictive => Self {
                exclude_tags: RESTRICTIVE_TAGS.iter().map(|t| t.to_string()).collect(),
                exclude_patterns: RESTRICTIVE_PATTERNS
                    .iter()
                    .map(|p| Regex::new(p).expect("built-in pattern is valid"))
                    .collect(),
                exclude_files: HashSet::new(),
                min_content_length: RESTRICTIVE_MIN_LENGTH,
            },
        }
    }

    /// Adds tags that exclude a note.
    pub fn exclude_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds regex patterns tested against each note's filename and path.
    ///
    /// # Errors
    ///
    /// Returns `CriteriaError::InvalidPattern` for the first pattern that
    /// does not compile.
    pub fn exclude_patterns<I, S>(mut self, patterns: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|source| CriteriaError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.exclude_patterns.push(regex);
        }
        Ok(self)
    }

    /// Adds exact filenames that are never published.
    pub fn exclude_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_files.extend(files.into_iter().map(Into::into));
        self
    }

    /// Sets the minimum content length. Zero disables the check.
    pub fn min_content_length(mut self, min: usize) -> Self {
        self.min_content_length = min;
        self
    }

    /// Returns true if the criteria can never reject a note.
    pub fn is_permissive(&self) -> bool {
        self.exclude_tags.is_empty()
            && self.exclude_patterns.is_empty()
            && self.exclude_files.is_empty()
            && self.min_content_length == 0
    }
}

/// Decides whether a note passes the publish criteria.
///
/// # Examples
///
/// ```
/// use noteshelf::domain::{should_publish, NoteRecord, PublishCriteria, PublishPreset};
///
/// let note = NoteRecord::builder("notes/idea.md", "Idea")
///     .content("short")
///     .build();
/// assert!(should_publish(&note, &PublishCriteria::preset(PublishPreset::Permissive)));
/// assert!(!should_publish(&note, &PublishCriteria::preset(PublishPreset::Restrictive)));
/// ```
pub fn should_publish(note: &NoteRecord, criteria: &PublishCriteria) -> bool {
    if note
        .tags()
        .iter()
        .any(|tag| criteria.exclude_tags.contains(tag))
    {
        return false;
    }

    if criteria
        .exclude_patterns
        .iter()
        .any(|re| re.is_match(note.filename()) || re.is_match(note.path()))
    {
        return false;
    }

    if criteria.exclude_files.contains(note.filename()) {
        return false;
    }

    if criteria.min_content_length > 0
        && note.content().chars().count() < criteria.min_content_length
    {
        return false;
    }

    true
}
