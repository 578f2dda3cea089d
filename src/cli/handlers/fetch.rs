//! Fetch command handler.

use anyhow::{Context, Result, bail};
use chrono::Utc;

use super::{ConsoleReporter, Session};
use crate::cli::FetchArgs;
use crate::cli::output::{FetchSummary, Output, OutputFormat};
use crate::domain::PublishPreset;
use crate::infra::NoteExtractor;
use crate::ingest::{IngestBuilder, NotesArtifact};
use crate::source::GithubClient;

pub fn handle_fetch(args: &FetchArgs, session: &Session) -> Result<()> {
    let config = session.config;
    let Some(token) = config.token() else {
        bail!(
            "fetch requires a GitHub token: set NOTESHELF_TOKEN or GITHUB_TOKEN, \
             or add `token` to the config file"
        );
    };

    let criteria = config.criteria(session.preset, PublishPreset::Restrictive)?;
    let repo = config.repo_ref();
    let extractor = NoteExtractor::new(repo.clone());
    let client = GithubClient::new(config.api_base(), repo.repo(), &token)?;
    let builder = IngestBuilder::new(client, &extractor, &criteria);

    let result = match args.format {
        OutputFormat::Human => {
            println!("Fetching notes from {}...", repo.repo());
            builder.run_with_progress(&mut ConsoleReporter::new(session.verbose))?
        }
        OutputFormat::Json | OutputFormat::Paths => builder.run()?,
    };

    let output = args.output.clone().unwrap_or_else(|| session.artifact.clone());
    let published = result.notes.len();
    let skipped = result.errors.len();
    let artifact = NotesArtifact::new(result.notes, Utc::now());
    artifact
        .write(&output)
        .with_context(|| format!("failed to write artifact to {}", output.display()))?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Wrote {} of {} notes to {}",
                published,
                result.extracted,
                output.display()
            );
            if skipped > 0 {
                eprintln!("Skipped {skipped} file(s) that could not be fetched");
            }
        }
        OutputFormat::Json => {
            let summary = FetchSummary {
                artifact: output.display().to_string(),
                files: result.files,
                extracted: result.extracted,
                published,
                skipped,
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(summary))?);
        }
        OutputFormat::Paths => {
            for note in &artifact.notes {
                println!("{}", note.path());
            }
        }
    }

    Ok(())
}
