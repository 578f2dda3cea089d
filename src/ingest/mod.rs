//! Batch ingestion, the notes artifact, and the interactive load sequence

mod artifact;
mod builder;
mod loader;

pub use artifact::{ARTIFACT_FILE_NAME, ArtifactError, NotesArtifact};
pub use builder::{
    FetchError, FileResult, IngestBuilder, IngestError, IngestResult, NoopReporter,
    ProgressReporter,
};
pub use loader::{LoadError, LoadedNotes, Loader, NotesOrigin, RunContext, usable_token};
