//! The pre-generated `notes-data.json` artifact.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::NoteRecord;

/// Default artifact file name.
pub const ARTIFACT_FILE_NAME: &str = "notes-data.json";

/// Errors reading or writing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A published note collection with generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesArtifact {
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub total_notes: usize,
}

impl NotesArtifact {
    pub fn new(notes: Vec<NoteRecord>, generated_at: DateTime<Utc>) -> Self {
        let total_notes = notes.len();
        Self {
            notes,
            generated_at,
            total_notes,
        }
    }

    /// Reads an artifact from disk.
    pub fn read(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the artifact as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), ArtifactError> {
        let io_err = |source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> NotesArtifact {
        let at = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        NotesArtifact::new(
            vec![
                NoteRecord::builder("math/a.md", "A").last_modified(at).build(),
                NoteRecord::builder("misc/b.md", "B").last_modified(at).build(),
            ],
            at,
        )
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join(ARTIFACT_FILE_NAME);

        sample().write(&path).unwrap();
        let loaded = NotesArtifact::read(&path).unwrap();

        assert_eq!(loaded.total_notes, 2);
        assert_eq!(loaded.notes, sample().notes);
    }

    #[test]
    fn json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["generatedAt"], "2024-02-02T10:00:00Z");
        assert_eq!(value["totalNotes"], 2);
        assert_eq!(value["notes"][0]["title"], "A");
    }

    #[test]
    fn missing_notes_key_reads_as_empty() {
        let artifact: NotesArtifact =
            serde_json::from_str(r#"{"generatedAt": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert!(artifact.notes.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = NotesArtifact::read(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            NotesArtifact::read(&path).unwrap_err(),
            ArtifactError::Json { .. }
        ));
    }
}
