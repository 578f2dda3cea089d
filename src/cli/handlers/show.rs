//! Show command handler.

use anyhow::Result;

use super::Session;
use crate::cli::ShowArgs;
use crate::domain::{CategoryFilter, find_by_name, view};
use crate::export::{
    EMPTY_STATE_MESSAGE, LinkResolver, LinkResolverOptions, ListWrapping, RenderOptions,
    format_card_date, markdown_to_html_with,
};

pub fn handle_show(args: &ShowArgs, session: &Session) -> Result<()> {
    let loaded = session.load()?;

    let Some(note) = find_by_name(&loaded.notes, &args.name) else {
        // Same fallback as following an unknown wiki link: search for it
        let matches = view(&loaded.notes, CategoryFilter::All, &args.name);
        println!("No note named '{}'.", args.name);
        println!();
        if matches.is_empty() {
            println!("{EMPTY_STATE_MESSAGE}");
        } else {
            for note in matches {
                println!("  {} {}", note.category().indicator(), note.title());
                if !note.excerpt().is_empty() {
                    println!("      {}", note.excerpt());
                }
            }
        }
        return Ok(());
    };

    if args.raw {
        println!("{}", note.content());
        return Ok(());
    }

    println!("# {}", note.title());
    println!(
        "{} {}  {}",
        note.category().indicator(),
        note.category(),
        format_card_date(note.last_modified())
    );
    if !note.tags().is_empty() {
        println!("Tags: {}", note.tags().join(", "));
    }
    if !note.url().is_empty() {
        println!("Source: {}", note.url());
    }
    println!();

    let link_options = LinkResolverOptions::default();
    let resolver = LinkResolver::new(&loaded.notes, &link_options);
    let options = RenderOptions {
        lists: if args.legacy_lists {
            ListWrapping::Legacy
        } else {
            ListWrapping::EveryRun
        },
        wiki_links: Some(&resolver),
    };
    println!("{}", markdown_to_html_with(note.content(), &options));

    Ok(())
}
