//! Wiki-link resolution for exported pages.
//!
//! Resolves `[[Name]]` references against the published collection so that
//! rendered notes link to each other's pages.

use std::cell::Cell;

use crate::domain::{NoteRecord, find_by_name};
use crate::export::html::WikiLinkTarget;
use crate::infra::PageSlugs;

/// Options for link resolution.
#[derive(Debug, Clone, Default)]
pub struct LinkResolverOptions {
    /// Base path prefix for resolved links (e.g., "" for same directory, "../" for parent).
    pub base_path: String,
}

/// Resolves wiki-link names to note page paths.
///
/// A name matches the first note whose title or filename contains it,
/// ignoring case. Unmatched names are counted as broken.
pub struct LinkResolver<'a> {
    notes: &'a [NoteRecord],
    options: &'a LinkResolverOptions,
    slugs: PageSlugs,
    resolved: Cell<usize>,
    broken: Cell<usize>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(notes: &'a [NoteRecord], options: &'a LinkResolverOptions) -> Self {
        Self {
            notes,
            options,
            slugs: PageSlugs::new(notes.iter().map(NoteRecord::path)),
            resolved: Cell::new(0),
            broken: Cell::new(0),
        }
    }

    /// Looks up the note a name refers to.
    pub fn lookup(&self, name: &str) -> Option<&'a NoteRecord> {
        find_by_name(self.notes, name)
    }

    /// Page slugs of the notes links resolve to.
    pub fn slugs(&self) -> &PageSlugs {
        &self.slugs
    }

    /// Number of links resolved so far.
    pub fn resolved(&self) -> usize {
        self.resolved.get()
    }

    /// Number of links that matched no note.
    pub fn broken(&self) -> usize {
        self.broken.get()
    }
}

impl WikiLinkTarget for LinkResolver<'_> {
    fn href(&self, name: &str) -> Option<String> {
        match self.lookup(name) {
            Some(note) => {
                self.resolved.set(self.resolved.get() + 1);
                Some(format!(
                    "{}{}.html",
                    self.options.base_path,
                    self.slugs.get(note.path())
                ))
            }
            None => {
                self.broken.set(self.broken.get() + 1);
                None
            }
        }
    }
}
