//! Browsing state and the reducer that drives it.

use crate::domain::{CategoryFilter, NoteRecord, find_by_name, view};

/// Everything the browsing surface shows.
///
/// The visible list is never stored; [`AppState::visible`] recomputes it in
/// full from the collection and the current filters.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    notes: Vec<NoteRecord>,
    category: CategoryFilter,
    search: String,
    /// Path of the note open in the reader.
    selected: Option<String>,
}

/// Input to [`apply`].
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A freshly loaded collection replaces the current one.
    Loaded(Vec<NoteRecord>),
    SelectCategory(CategoryFilter),
    /// The search text settled on a new value.
    SearchChanged(String),
    /// Open the note at this position in the visible list.
    OpenNote(usize),
    /// Open the note a `[[name]]` reference points at, or search for it.
    FollowWikiLink(String),
    CloseReader,
    /// Drop everything and load again.
    ForceRefresh,
}

/// Work the caller must do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run the load sequence and feed the result back as [`UiEvent::Loaded`].
    Reload,
}

impl AppState {
    pub fn new(notes: Vec<NoteRecord>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }

    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The filtered, sorted notes.
    pub fn visible(&self) -> Vec<&NoteRecord> {
        view(&self.notes, self.category, &self.search)
    }

    /// The note open in the reader, if any.
    pub fn reader(&self) -> Option<&NoteRecord> {
        let path = self.selected.as_deref()?;
        self.notes.iter().find(|note| note.path() == path)
    }
}

/// Computes the next state for an event.
pub fn apply(mut state: AppState, event: UiEvent) -> (AppState, Effect) {
    match event {
        UiEvent::Loaded(notes) => {
            state.notes = notes;
            if state.reader().is_none() {
                state.selected = None;
            }
        }
        UiEvent::SelectCategory(category) => state.category = category,
        UiEvent::SearchChanged(search) => state.search = search,
        UiEvent::OpenNote(position) => {
            let chosen = state.visible().get(position).map(|n| n.path().to_string());
            state.selected = chosen;
        }
        UiEvent::FollowWikiLink(name) => match find_by_name(&state.notes, &name) {
            Some(note) => state.selected = Some(note.path().to_string()),
            None => {
                state.search = name;
                state.selected = None;
            }
        },
        UiEvent::CloseReader => state.selected = None,
        UiEvent::ForceRefresh => {
            state.notes.clear();
            state.selected = None;
            return (state, Effect::Reload);
        }
    }
    (state, Effect::None)
}
