//! Isolated test environment with temp directory.

use super::{ShelfCommand, TestNote};
use chrono::{TimeZone, Utc};
use noteshelf::ingest::NotesArtifact;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// Holds an empty config file so the developer's own config is never read.
/// The directory is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let env = Self {
            _temp_dir: temp_dir,
            root,
        };
        env.write_config("");
        env
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.root.join("notes-data.json")
    }

    /// Replaces the config file contents.
    pub fn write_config(&self, toml: &str) {
        std::fs::write(self.config_path(), toml).expect("Failed to write config");
    }

    /// Writes the notes artifact from test notes.
    pub fn write_artifact(&self, notes: &[TestNote]) -> PathBuf {
        let records = notes.iter().map(TestNote::to_record).collect();
        let generated_at = Utc.with_ymd_and_hms(2024, 3, 6, 8, 30, 0).unwrap();
        let path = self.artifact_path();
        NotesArtifact::new(records, generated_at)
            .write(&path)
            .expect("Failed to write artifact");
        path
    }

    /// Creates a ShelfCommand configured for this test environment.
    pub fn cmd(&self) -> ShelfCommand {
        ShelfCommand::new()
            .config(&self.config_path())
            .artifact(&self.artifact_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            assert!(env.config_path().exists());
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_writes_readable_artifact() {
        let env = TestEnv::new();
        let path = env.write_artifact(&[TestNote::new("One"), TestNote::new("Two")]);

        let artifact = NotesArtifact::read(&path).unwrap();
        assert_eq!(artifact.total_notes, 2);
        assert_eq!(artifact.notes[1].title(), "Two");
    }
}
