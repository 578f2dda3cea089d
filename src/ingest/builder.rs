//! Batch ingestion: walk the repository, extract every note, filter.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{NoteRecord, PublishCriteria, should_publish};
use crate::infra::NoteExtractor;
use crate::source::{ContentSource, Paced, Pacing, SourceError, markdown_files};

// ===========================================
// Error Types
// ===========================================

/// Fatal outcomes of an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no markdown files found in repository")]
    NoMarkdownFiles,

    #[error(
        "no notes passed filtering criteria: found {found} valid notes but all were filtered out"
    )]
    NothingPublished { found: usize },
}

/// A file that yielded no note.
#[derive(Debug)]
pub struct FetchError {
    pub path: String,
    pub source: SourceError,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.source)
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ===========================================
// Result Types
// ===========================================

/// Result of a successful ingestion run.
#[derive(Debug)]
pub struct IngestResult {
    /// Published notes, in walk order.
    pub notes: Vec<NoteRecord>,
    /// Markdown files found by the walk.
    pub files: usize,
    /// Notes extracted before filtering.
    pub extracted: usize,
    /// Files skipped because they could not be fetched or decoded.
    pub errors: Vec<FetchError>,
}

// ===========================================
// Progress Reporting
// ===========================================

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub enum FileResult {
    /// Note extracted and published.
    Published,
    /// Note extracted but rejected by the publish criteria.
    Excluded,
    /// File could not be fetched or decoded.
    Error(String),
}

/// Receives progress updates during ingestion.
pub trait ProgressReporter {
    /// Called when a file is processed.
    fn on_file(&mut self, path: &str, result: FileResult);
    /// Called when the run is complete.
    fn on_complete(&mut self, published: usize, errors: usize);
}

/// A no-op progress reporter.
#[derive(Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_file(&mut self, _path: &str, _result: FileResult) {}
    fn on_complete(&mut self, _published: usize, _errors: usize) {}
}

// ===========================================
// IngestBuilder
// ===========================================

/// Fetches, extracts and filters every markdown note in a repository.
///
/// Files are fetched one at a time, with a short pause after every batch of
/// files. A file that cannot be fetched or decoded is recorded in
/// [`IngestResult::errors`] and the run continues.
pub struct IngestBuilder<'a, S> {
    source: S,
    extractor: &'a NoteExtractor,
    criteria: &'a PublishCriteria,
    pacing: Pacing,
}

impl<'a, S: ContentSource> IngestBuilder<'a, S> {
    pub fn new(source: S, extractor: &'a NoteExtractor, criteria: &'a PublishCriteria) -> Self {
        Self {
            source,
            extractor,
            criteria,
            pacing: Pacing::default(),
        }
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Runs the ingestion without progress reporting.
    pub fn run(&self) -> Result<IngestResult, IngestError> {
        self.run_with_progress(&mut NoopReporter)
    }

    /// Runs the ingestion.
    ///
    /// # Errors
    ///
    /// - `IngestError::NoMarkdownFiles` if the walk finds no markdown files
    /// - `IngestError::NothingPublished` if every extracted note is filtered out
    pub fn run_with_progress<P: ProgressReporter>(
        &self,
        progress: &mut P,
    ) -> Result<IngestResult, IngestError> {
        let files = Paced::new(markdown_files(&self.source, ""), self.pacing);

        let mut seen = 0;
        let mut extracted = 0;
        let mut notes = Vec::new();
        let mut errors = Vec::new();

        for file in files {
            seen += 1;
            let text = match self.source.get_file(&file.path).and_then(|b| b.decode()) {
                Ok(text) => text,
                Err(source) => {
                    warn!(path = %file.path, error = %source, "skipping file");
                    progress.on_file(&file.path, FileResult::Error(source.to_string()));
                    errors.push(FetchError {
                        path: file.path,
                        source,
                    });
                    continue;
                }
            };

            let note = self.extractor.extract(&text, &file.path, &file.name);
            extracted += 1;

            if should_publish(&note, self.criteria) {
                debug!(path = %file.path, title = note.title(), "published");
                progress.on_file(&file.path, FileResult::Published);
                notes.push(note);
            } else {
                debug!(path = %file.path, "excluded by publish criteria");
                progress.on_file(&file.path, FileResult::Excluded);
            }
        }

        if seen == 0 {
            return Err(IngestError::NoMarkdownFiles);
        }

        progress.on_complete(notes.len(), errors.len());

        if notes.is_empty() {
            return Err(IngestError::NothingPublished { found: extracted });
        }

        info!(
            files = seen,
            extracted,
            published = notes.len(),
            skipped = errors.len(),
            "ingestion complete"
        );

        Ok(IngestResult {
            notes,
            files: seen,
            extracted,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublishPreset;
    use crate::source::RepoRef;
    use crate::source::testing::MemorySource;
    use pretty_assertions::assert_eq;

    const LONG: &str = "This body is comfortably longer than fifty characters in total.";

    fn extractor() -> NoteExtractor {
        NoteExtractor::new(RepoRef::new("alice/notes", "main"))
    }

    fn titles(result: &IngestResult) -> Vec<&str> {
        result.notes.iter().map(|n| n.title()).collect()
    }

    #[derive(Default)]
    struct Recording {
        files: Vec<(String, String)>,
        completed: Option<(usize, usize)>,
    }

    impl ProgressReporter for Recording {
        fn on_file(&mut self, path: &str, result: FileResult) {
            let tag = match result {
                FileResult::Published => "published".to_string(),
                FileResult::Excluded => "excluded".to_string(),
                FileResult::Error(_) => "error".to_string(),
            };
            self.files.push((path.to_string(), tag));
        }

        fn on_complete(&mut self, published: usize, errors: usize) {
            self.completed = Some((published, errors));
        }
    }

    #[test]
    fn ingests_all_notes_permissively() {
        let source = MemorySource::new([
            ("computing/tcp.md", "# TCP\nhandshake"),
            ("math/groups.md", "# Groups\nsets"),
        ]);
        let criteria = PublishCriteria::default();
        let extractor = extractor();

        let result = IngestBuilder::new(&source, &extractor, &criteria)
            .pacing(Pacing::none())
            .run()
            .unwrap();

        assert_eq!(titles(&result), ["TCP", "Groups"]);
        assert_eq!(result.files, 2);
        assert_eq!(result.extracted, 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn broken_files_are_skipped() {
        let source = MemorySource::new([
            ("a.md", "# A\nfine"),
            ("b.md", "# B\nunreachable"),
            ("c.md", "# C\ncorrupt"),
        ])
        .failing("b.md")
        .corrupt("c.md");
        let criteria = PublishCriteria::default();
        let extractor = extractor();
        let mut progress = Recording::default();

        let result = IngestBuilder::new(&source, &extractor, &criteria)
            .pacing(Pacing::none())
            .run_with_progress(&mut progress)
            .unwrap();

        assert_eq!(titles(&result), ["A"]);
        let failed: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(failed, ["b.md", "c.md"]);
        assert_eq!(progress.completed, Some((1, 2)));
    }

    #[test]
    fn restrictive_preset_filters() {
        let draft = format!("# Plan\n#draft {LONG}");
        let keep = format!("# Keep\n{LONG}");
        let source = MemorySource::new([
            ("notes/plan.md", draft.as_str()),
            ("notes/keep.md", keep.as_str()),
            ("notes/short.md", "# Short\ntiny"),
            ("private/secret.md", keep.as_str()),
        ]);
        let criteria = PublishCriteria::preset(PublishPreset::Restrictive);
        let extractor = extractor();
        let mut progress = Recording::default();

        let result = IngestBuilder::new(&source, &extractor, &criteria)
            .pacing(Pacing::none())
            .run_with_progress(&mut progress)
            .unwrap();

        assert_eq!(titles(&result), ["Keep"]);
        assert_eq!(result.extracted, 4);
        let excluded = progress
            .files
            .iter()
            .filter(|(_, tag)| tag == "excluded")
            .count();
        assert_eq!(excluded, 3);
    }

    #[test]
    fn empty_repository_is_fatal() {
        let source = MemorySource::new([("readme.txt", "hello")]);
        let criteria = PublishCriteria::default();
        let extractor = extractor();

        let err = IngestBuilder::new(&source, &extractor, &criteria)
            .run()
            .unwrap_err();
        assert!(matches!(err, IngestError::NoMarkdownFiles));
    }

    #[test]
    fn everything_filtered_is_fatal() {
        let source = MemorySource::new([("a.md", "#draft"), ("b.md", "#private")]);
        let criteria = PublishCriteria::preset(PublishPreset::Restrictive);
        let extractor = extractor();

        let err = IngestBuilder::new(&source, &extractor, &criteria)
            .pacing(Pacing::none())
            .run()
            .unwrap_err();
        assert!(matches!(err, IngestError::NothingPublished { found: 2 }));
        assert!(err.to_string().contains("found 2 valid notes"));
    }

    #[test]
    fn files_are_fetched_in_walk_order() {
        let source = MemorySource::new([("a.md", "# A"), ("sub/b.md", "# B"), ("z.md", "# Z")]);
        let criteria = PublishCriteria::default();
        let extractor = extractor();

        IngestBuilder::new(&source, &extractor, &criteria)
            .pacing(Pacing::none())
            .run()
            .unwrap();

        assert_eq!(
            *source.requests.borrow(),
            ["", "a.md", "sub", "sub/b.md", "z.md"]
        );
    }
}
