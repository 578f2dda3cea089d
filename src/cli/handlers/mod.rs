//! Command handlers for the CLI.

mod browse;
mod fetch;
mod list;
mod show;
mod site;

use std::path::PathBuf;

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::config::Config;
use crate::cli::{Cli, CompletionsArgs};
use crate::domain::PublishPreset;
use crate::infra::NoteExtractor;
use crate::ingest::{FileResult, LoadedNotes, Loader, ProgressReporter, RunContext};
use crate::source::GithubClient;

// Re-export public items
pub use browse::handle_browse;
pub use fetch::handle_fetch;
pub use list::handle_list;
pub use show::handle_show;
pub use site::handle_site;

// ===========================================
// Shared Utilities
// ===========================================

/// Settings shared by every command that reads notes.
pub struct Session<'a> {
    pub config: &'a Config,
    pub artifact: PathBuf,
    pub preset: Option<PublishPreset>,
    pub verbose: bool,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config, cli: &Cli) -> Self {
        Self {
            config,
            artifact: config.artifact_path(cli.artifact.as_ref()),
            preset: cli.preset,
            verbose: cli.verbose > 0,
        }
    }

    /// Loads the collection for browsing: the artifact if usable, else the
    /// live API.
    pub(crate) fn load(&self) -> Result<LoadedNotes> {
        let criteria = self.config.criteria(self.preset, PublishPreset::Permissive)?;
        let extractor = NoteExtractor::new(self.config.repo_ref());
        let token = self.config.token();
        let repo = self.config.repo_ref();

        let loaded = Loader::new(&self.artifact, &extractor, &criteria)
            .token(token.as_deref())
            .context(RunContext::detect())
            .load(|token| GithubClient::new(self.config.api_base(), repo.repo(), token))?;
        Ok(loaded)
    }
}

/// Progress reporter that prints to stdout.
pub(crate) struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_file(&mut self, path: &str, result: FileResult) {
        if self.verbose {
            match result {
                FileResult::Published => println!("  published: {path}"),
                FileResult::Excluded => println!("  excluded: {path}"),
                FileResult::Error(msg) => eprintln!("  error: {path}: {msg}"),
            }
        }
    }

    fn on_complete(&mut self, published: usize, errors: usize) {
        if errors > 0 {
            eprintln!("Published {published} notes with {errors} errors");
        } else {
            println!("Published {published} notes");
        }
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "noteshelf", &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncate_short_strings_unchanged() {
        assert_eq!(truncate_str("TCP", 10), "TCP");
    }

    #[test]
    fn truncate_long_strings_with_ellipsis() {
        assert_eq!(truncate_str("Group Theory", 6), "Group…");
    }
}
