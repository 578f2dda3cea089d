//! GitHub contents API client.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ContentSource, DirEntry, FileBlob, SourceError};

/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Blocking client for `GET /repos/{repo}/contents/{path}`.
pub struct GithubClient {
    api_base: String,
    repo: String,
    client: Client,
}

impl GithubClient {
    /// Creates a client authenticated with `token`.
    ///
    /// # Arguments
    ///
    /// * `api_base` - API root, e.g. [`DEFAULT_API_BASE`]
    /// * `repo` - Repository as `owner/name`
    /// * `token` - Personal access token sent as `Authorization: token …`
    pub fn new(
        api_base: impl Into<String>,
        repo: impl Into<String>,
        token: &str,
    ) -> Result<Self, SourceError> {
        let repo = repo.into();
        if repo.trim().is_empty() {
            return Err(SourceError::MissingRepository);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("noteshelf/", env!("CARGO_PKG_VERSION"))),
        );
        if let Ok(mut value) = HeaderValue::from_str(&format!("token {token}")) {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            repo,
            client,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<_> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/repos/{}/contents/{}",
            self.api_base,
            self.repo,
            encoded.join("/")
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.contents_url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }
}

impl ContentSource for GithubClient {
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        self.get_json(path)
    }

    fn get_file(&self, path: &str) -> Result<FileBlob, SourceError> {
        // Directory paths answer with an array.
        let value: serde_json::Value = self.get_json(path)?;
        match value.get("content").and_then(|c| c.as_str()) {
            Some(content) => Ok(FileBlob {
                content: content.to_string(),
            }),
            None => Err(SourceError::NotAFile(path.to_string())),
        }
    }
}
