//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{PublishCriteria, PublishPreset};
use crate::ingest::{ARTIFACT_FILE_NAME, usable_token};
use crate::source::{DEFAULT_API_BASE, RepoRef};

/// Environment variables checked for an API token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["NOTESHELF_TOKEN", "GITHUB_TOKEN"];

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Source repository as `owner/name`
    pub repo: Option<String>,

    /// Branch used for source links (default "main")
    pub branch: Option<String>,

    /// Content API root
    pub api_base: Option<String>,

    /// API token, used when no token environment variable is set
    pub token: Option<String>,

    /// Notes artifact path
    pub artifact: Option<PathBuf>,

    /// Title of the generated site
    pub site_title: Option<String>,

    /// Publish rules
    #[serde(default)]
    pub publish: PublishConfig,
}

/// The `[publish]` table.
///
/// Lists extend the chosen preset rather than replace it.
#[derive(Debug, Default, Deserialize)]
pub struct PublishConfig {
    pub preset: Option<PublishPreset>,
    #[serde(default)]
    pub exclude_tags: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_files: Vec<String>,
    pub min_content_length: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/noteshelf/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noteshelf")
            .join("config.toml")
    }

    /// Resolve the artifact path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--artifact` argument
    /// 2. Config file `artifact` setting
    /// 3. `notes-data.json` in the current directory
    pub fn artifact_path(&self, cli_artifact: Option<&PathBuf>) -> PathBuf {
        cli_artifact
            .cloned()
            .or_else(|| self.artifact.clone())
            .unwrap_or_else(|| PathBuf::from(ARTIFACT_FILE_NAME))
    }

    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(
            self.repo.clone().unwrap_or_default(),
            self.branch.as_deref().unwrap_or("main"),
        )
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn site_title(&self) -> &str {
        self.site_title.as_deref().unwrap_or("Notes")
    }

    /// Resolve the API token.
    ///
    /// Precedence order:
    /// 1. $NOTESHELF_TOKEN
    /// 2. $GITHUB_TOKEN
    /// 3. Config file `token` setting
    ///
    /// Blank values and the `your_token_here` placeholder are skipped.
    pub fn token(&self) -> Option<String> {
        self.token_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn token_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .chain(self.token.clone())
            .find_map(|token| usable_token(Some(token.as_str())).map(String::from))
    }

    /// Build publish criteria.
    ///
    /// The preset comes from the CLI, then the config file, then
    /// `default_preset`; the config lists are added on top.
    pub fn criteria(
        &self,
        cli_preset: Option<PublishPreset>,
        default_preset: PublishPreset,
    ) -> Result<PublishCriteria> {
        let preset = cli_preset
            .or(self.publish.preset)
            .unwrap_or(default_preset);

        let mut criteria = PublishCriteria::preset(preset)
            .exclude_tags(&self.publish.exclude_tags)
            .exclude_patterns(&self.publish.exclude_patterns)
            .context("invalid [publish] exclude_patterns")?
            .exclude_files(&self.publish.exclude_files);

        if let Some(min) = self.publish.min_content_length {
            criteria = criteria.min_content_length(min);
        }
        Ok(criteria)
    }
}
