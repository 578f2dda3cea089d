//! Remote content access: the repository contents API and traversal over it.
//!
//! The API is treated as a key-value store addressed by repository-relative
//! path. Listing a directory yields [`DirEntry`] values; fetching a file yields
//! a [`FileBlob`] holding base64-encoded content.

mod github;
mod pace;
mod walk;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use thiserror::Error;

pub use github::{DEFAULT_API_BASE, GithubClient};
pub use pace::{Paced, Pacing, Sleeper, ThreadSleeper};
pub use walk::{MarkdownFiles, markdown_files};

/// Errors talking to the content API.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request for '{path}' failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("no repository configured: set `repo = \"owner/name\"` in the config file")]
    MissingRepository,
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules and anything else the walk ignores.
    #[serde(other)]
    Other,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
}

impl DirEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(EntryKind::File, path)
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(EntryKind::Dir, path)
    }

    fn new(kind: EntryKind, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self { kind, name, path }
    }

    /// Hidden entries start with a dot and are never visited.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// A file's content as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct FileBlob {
    pub content: String,
}

impl FileBlob {
    /// Wraps plain text, encoding it the way the API does.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: STANDARD.encode(text),
        }
    }

    /// Decodes the base64 payload as UTF-8 text.
    ///
    /// The API wraps base64 at 60 columns, so whitespace is removed before
    /// decoding. Invalid UTF-8 sequences become replacement characters.
    pub fn decode(&self) -> Result<String, SourceError> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = STANDARD.decode(compact)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Read access to a repository's files.
///
/// Implemented by [`GithubClient`] for the real API; tests use in-memory
/// implementations.
pub trait ContentSource {
    /// Lists the entries of a directory. The empty path is the root.
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError>;

    /// Fetches a single file.
    fn get_file(&self, path: &str) -> Result<FileBlob, SourceError>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        (**self).list_dir(path)
    }

    fn get_file(&self, path: &str) -> Result<FileBlob, SourceError> {
        (**self).get_file(path)
    }
}

/// A repository and branch on the hosting site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    repo: String,
    branch: String,
}

impl RepoRef {
    /// `repo` is `owner/name`.
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Browser link to a file. The whole path is one encoded component.
    pub fn blob_url(&self, path: &str) -> String {
        format!(
            "https://github.com/{}/blob/{}/{}",
            self.repo,
            self.branch,
            urlencoding::encode(path)
        )
    }
}
