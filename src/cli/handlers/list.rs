//! List command handler.

use anyhow::Result;

use super::{Session, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::view;
use crate::export::{EMPTY_STATE_MESSAGE, format_card_date};

pub fn handle_list(args: &ListArgs, session: &Session) -> Result<()> {
    let loaded = session.load()?;
    let search = args.search.as_deref().unwrap_or("");
    let notes = view(&loaded.notes, args.category, search);

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("{EMPTY_STATE_MESSAGE}");
            } else {
                for note in &notes {
                    let title = truncate_str(note.title(), 50);
                    let date = format_card_date(note.last_modified());
                    println!(
                        "{:<4} {:<50}  {:>12}",
                        note.category().indicator(),
                        title,
                        date
                    );
                }

                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for note in &notes {
                println!("{}", note.path());
            }
        }
    }

    Ok(())
}
