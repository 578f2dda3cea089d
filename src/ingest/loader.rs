//! Interactive load sequence: artifact first, live API as a fallback.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{NoteRecord, PublishCriteria};
use crate::infra::NoteExtractor;
use crate::ingest::{IngestBuilder, NotesArtifact};
use crate::source::{ContentSource, Pacing, SourceError};

/// Placeholder token shipped in example configs; treated as no token.
const PLACEHOLDER_TOKEN: &str = "your_token_here";

/// Where the program is running, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunContext {
    /// A developer's machine.
    Local,
    /// A CI or deployment pipeline.
    Pipeline,
}

impl RunContext {
    /// Detects a pipeline by the conventional `CI` environment variable.
    pub fn detect() -> Self {
        match std::env::var("CI") {
            Ok(value) if !value.is_empty() && value != "false" => RunContext::Pipeline,
            _ => RunContext::Local,
        }
    }
}

/// Errors from the interactive load sequence.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "local development requires a GitHub token: set NOTESHELF_TOKEN or GITHUB_TOKEN, \
         or add `token` to the config file (or run `noteshelf fetch` to create {})",
        .artifact.display()
    )]
    LocalMisconfiguration { artifact: PathBuf },

    #[error(
        "notes data not available at {}: this appears to be a deployment issue, \
         the build pipeline may have failed to generate the notes artifact",
        .artifact.display()
    )]
    PipelineFailure { artifact: PathBuf },

    #[error("failed to connect to the content API: {0}")]
    Connect(#[from] SourceError),
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesOrigin {
    Artifact { generated_at: DateTime<Utc> },
    Live,
}

/// A freshly loaded note collection.
#[derive(Debug)]
pub struct LoadedNotes {
    pub notes: Vec<NoteRecord>,
    pub origin: NotesOrigin,
}

/// Returns the token unless it is missing, blank or the example placeholder.
pub fn usable_token(token: Option<&str>) -> Option<&str> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != PLACEHOLDER_TOKEN)
}

/// Loads the note collection for browsing.
///
/// The pre-generated artifact is preferred. When it is missing, unreadable or
/// empty, the notes are fetched live, which needs a token. Without a token
/// the error says whether local setup or the deployment pipeline is at fault.
pub struct Loader<'a> {
    artifact: &'a Path,
    token: Option<&'a str>,
    context: RunContext,
    extractor: &'a NoteExtractor,
    criteria: &'a PublishCriteria,
    pacing: Pacing,
}

impl<'a> Loader<'a> {
    pub fn new(
        artifact: &'a Path,
        extractor: &'a NoteExtractor,
        criteria: &'a PublishCriteria,
    ) -> Self {
        Self {
            artifact,
            token: None,
            context: RunContext::Local,
            extractor,
            criteria,
            pacing: Pacing::default(),
        }
    }

    pub fn token(mut self, token: Option<&'a str>) -> Self {
        self.token = usable_token(token);
        self
    }

    pub fn context(mut self, context: RunContext) -> Self {
        self.context = context;
        self
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Runs the load sequence.
    ///
    /// `connect` builds the live content source from the token; it is only
    /// called when the artifact cannot be used.
    pub fn load<S, F>(&self, connect: F) -> Result<LoadedNotes, LoadError>
    where
        S: ContentSource,
        F: FnOnce(&str) -> Result<S, SourceError>,
    {
        if let Some(loaded) = self.load_artifact() {
            return Ok(loaded);
        }

        let Some(token) = self.token else {
            let artifact = self.artifact.to_path_buf();
            return Err(match self.context {
                RunContext::Local => LoadError::LocalMisconfiguration { artifact },
                RunContext::Pipeline => LoadError::PipelineFailure { artifact },
            });
        };

        let source = connect(token)?;
        let notes = match IngestBuilder::new(source, self.extractor, self.criteria)
            .pacing(self.pacing)
            .run()
        {
            Ok(result) => result.notes,
            Err(err) => {
                warn!(error = %err, "no notes to show");
                Vec::new()
            }
        };

        info!(count = notes.len(), "loaded notes from the content API");
        Ok(LoadedNotes {
            notes,
            origin: NotesOrigin::Live,
        })
    }

    fn load_artifact(&self) -> Option<LoadedNotes> {
        match NotesArtifact::read(self.artifact) {
            Ok(artifact) if !artifact.notes.is_empty() => {
                debug!(
                    path = %self.artifact.display(),
                    count = artifact.notes.len(),
                    "loaded notes artifact"
                );
                Some(LoadedNotes {
                    origin: NotesOrigin::Artifact {
                        generated_at: artifact.generated_at,
                    },
                    notes: artifact.notes,
                })
            }
            Ok(_) => {
                debug!(path = %self.artifact.display(), "notes artifact is empty");
                None
            }
            Err(err) => {
                debug!(error = %err, "notes artifact unavailable");
                None
            }
        }
    }
}
