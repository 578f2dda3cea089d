//! Browse command handler: a line-driven interactive session.
//!
//! Each input line is a command. Search text is debounced so a burst of
//! `search` lines only applies the last one.

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::{Session, truncate_str};
use crate::app::{AppState, Debouncer, Effect, SEARCH_DEBOUNCE, UiEvent, apply};
use crate::cli::BrowseArgs;
use crate::domain::{CategoryFilter, NoteRecord};
use crate::export::{EMPTY_STATE_MESSAGE, format_card_date, markdown_to_html};
use crate::ingest::NotesOrigin;

const HELP: &str = "\
Commands:
  cat <name>      show a category (all, computing, math, philosophy, misc, note)
  search [text]   filter by title or excerpt; no text clears the search
  open <n>        read the note at position n
  link <name>     follow a [[name]] reference
  close           return to the list
  refresh         reload every note
  ls              show the list again
  help            show this help
  quit            leave";

pub fn handle_browse(args: &BrowseArgs, session: &Session) -> Result<()> {
    let loaded = session.load()?;
    match loaded.origin {
        NotesOrigin::Artifact { generated_at } => println!(
            "Loaded {} notes (generated {})",
            loaded.notes.len(),
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        NotesOrigin::Live => println!("Loaded {} notes from the API", loaded.notes.len()),
    }

    let mut state = AppState::new(loaded.notes);
    state = apply(state, UiEvent::SelectCategory(args.category)).0;
    if let Some(search) = &args.search {
        state = apply(state, UiEvent::SearchChanged(search.clone())).0;
    }

    let input = BufReader::new(std::io::stdin());
    let mut out = std::io::stdout();
    browse_loop(input, &mut out, state, SEARCH_DEBOUNCE, || {
        Ok(session.load()?.notes)
    })
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Category(CategoryFilter),
    Search(String),
    /// 1-based position in the visible list.
    Open(usize),
    Link(String),
    Close,
    Refresh,
    List,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl BrowseCommand {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => BrowseCommand::Empty,
            "cat" | "category" => match rest.parse() {
                Ok(filter) => BrowseCommand::Category(filter),
                Err(err) => BrowseCommand::Invalid(format!("{err}")),
            },
            "search" | "/" => BrowseCommand::Search(rest.to_string()),
            "open" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => BrowseCommand::Open(n),
                _ => BrowseCommand::Invalid(format!("expected a note number, got '{rest}'")),
            },
            "link" if !rest.is_empty() => BrowseCommand::Link(rest.to_string()),
            "link" => BrowseCommand::Invalid("link needs a note name".to_string()),
            "close" | "back" => BrowseCommand::Close,
            "refresh" => BrowseCommand::Refresh,
            "ls" | "list" => BrowseCommand::List,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "q" | "exit" => BrowseCommand::Quit,
            other => BrowseCommand::Invalid(format!("unknown command '{other}', try 'help'")),
        }
    }
}

/// Runs the session until `quit` or end of input.
///
/// `reload` runs the load sequence for `refresh`. A failed reload is reported
/// and the session continues with an empty collection.
pub(crate) fn browse_loop<R, W, F>(
    input: R,
    out: &mut W,
    mut state: AppState,
    delay: Duration,
    mut reload: F,
) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
    F: FnMut() -> Result<Vec<NoteRecord>>,
{
    let lines = spawn_reader(input);
    let mut search = Debouncer::new(delay);
    render(out, &state)?;

    loop {
        let received = match search.deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let line = match received {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => {
                if let Some(term) = search.poll(Instant::now()) {
                    state = dispatch(state, UiEvent::SearchChanged(term), &mut reload, out)?;
                    render(out, &state)?;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(term) = search.flush() {
                    state = dispatch(state, UiEvent::SearchChanged(term), &mut reload, out)?;
                    render(out, &state)?;
                }
                break;
            }
        };

        let command = match BrowseCommand::parse(&line) {
            BrowseCommand::Search(term) => {
                search.push(term, Instant::now());
                continue;
            }
            command => command,
        };

        // Any other command sees the settled search text
        if let Some(term) = search.flush() {
            state = dispatch(state, UiEvent::SearchChanged(term), &mut reload, out)?;
        }

        let event = match command {
            BrowseCommand::Category(filter) => UiEvent::SelectCategory(filter),
            BrowseCommand::Open(n) => UiEvent::OpenNote(n - 1),
            BrowseCommand::Link(name) => UiEvent::FollowWikiLink(name),
            BrowseCommand::Close => UiEvent::CloseReader,
            BrowseCommand::Refresh => UiEvent::ForceRefresh,
            BrowseCommand::List => {
                render(out, &state)?;
                continue;
            }
            BrowseCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Search(_) | BrowseCommand::Empty => continue,
            BrowseCommand::Invalid(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let opening = matches!(event, UiEvent::OpenNote(_));
        state = dispatch(state, event, &mut reload, out)?;
        if opening && state.reader().is_none() {
            writeln!(out, "No note at that position.")?;
            continue;
        }
        render(out, &state)?;
    }

    Ok(())
}

/// Applies an event and carries out its effect.
fn dispatch<W, F>(
    state: AppState,
    event: UiEvent,
    reload: &mut F,
    out: &mut W,
) -> Result<AppState>
where
    W: Write,
    F: FnMut() -> Result<Vec<NoteRecord>>,
{
    let (state, effect) = apply(state, event);
    match effect {
        Effect::None => Ok(state),
        Effect::Reload => match reload() {
            Ok(notes) => {
                writeln!(out, "Reloaded {} notes", notes.len())?;
                Ok(apply(state, UiEvent::Loaded(notes)).0)
            }
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                Ok(state)
            }
        },
    }
}

fn spawn_reader<R: BufRead + Send + 'static>(input: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn render<W: Write>(out: &mut W, state: &AppState) -> std::io::Result<()> {
    match state.reader() {
        Some(note) => render_reader(out, note),
        None => render_list(out, state),
    }
}

fn render_list<W: Write>(out: &mut W, state: &AppState) -> std::io::Result<()> {
    write!(out, "\n[{}]", state.category())?;
    if !state.search().is_empty() {
        write!(out, " search: \"{}\"", state.search())?;
    }
    writeln!(out)?;

    let visible = state.visible();
    if visible.is_empty() {
        return writeln!(out, "{EMPTY_STATE_MESSAGE}");
    }

    for (i, note) in visible.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} {:<50}  {}",
            i + 1,
            note.category().indicator(),
            truncate_str(note.title(), 50),
            format_card_date(note.last_modified())
        )?;
    }
    writeln!(out, "{} note(s)", visible.len())
}

fn render_reader<W: Write>(out: &mut W, note: &NoteRecord) -> std::io::Result<()> {
    writeln!(out, "\n# {}", note.title())?;
    writeln!(
        out,
        "{} {}  {}",
        note.category().indicator(),
        note.category(),
        format_card_date(note.last_modified())
    )?;
    if !note.tags().is_empty() {
        writeln!(out, "Tags: {}", note.tags().join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", markdown_to_html(note.content()))?;
    writeln!(out, "(close to return, link <name> to follow a reference)")
}
