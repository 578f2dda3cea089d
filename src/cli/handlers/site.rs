//! Site command handler.

use anyhow::Result;
use chrono::Utc;

use super::Session;
use crate::cli::SiteArgs;
use crate::export::{ListWrapping, SiteConfig, generate_site};
use crate::ingest::{NotesArtifact, NotesOrigin};

pub fn handle_site(args: &SiteArgs, session: &Session) -> Result<()> {
    let loaded = session.load()?;
    let generated_at = match loaded.origin {
        NotesOrigin::Artifact { generated_at } => generated_at,
        NotesOrigin::Live => Utc::now(),
    };
    let artifact = NotesArtifact::new(loaded.notes, generated_at);

    let config = SiteConfig {
        site_title: args
            .title
            .as_deref()
            .unwrap_or_else(|| session.config.site_title()),
        theme: args.theme.as_deref(),
        lists: if args.legacy_lists {
            ListWrapping::Legacy
        } else {
            ListWrapping::EveryRun
        },
    };

    let result = generate_site(&artifact, &args.output, &config)?;

    println!(
        "Exported {} notes and {} category pages to {}",
        result.notes_exported,
        result.category_pages,
        args.output.display()
    );
    if result.broken_links > 0 {
        eprintln!("{} wiki link(s) matched no note", result.broken_links);
    }

    Ok(())
}
