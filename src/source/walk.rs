//! Lazy depth-first traversal of a repository's markdown files.

use tracing::warn;

use super::{ContentSource, DirEntry, EntryKind};

/// Iterator over every visible `.md` file under a directory.
///
/// Entries are yielded in listing order; a subdirectory is descended into as
/// soon as it is encountered, so a directory's files interleave with its
/// subtrees exactly as they appear in the listings. Directories are listed
/// on demand, one request at a time.
///
/// A listing that fails is logged and treated as empty; the walk carries on
/// with the remaining entries.
pub struct MarkdownFiles<S> {
    source: S,
    stack: Vec<std::vec::IntoIter<DirEntry>>,
    pending_root: Option<String>,
}

/// Starts a walk at `root` (the empty string for the repository root).
pub fn markdown_files<S: ContentSource>(source: S, root: &str) -> MarkdownFiles<S> {
    MarkdownFiles {
        source,
        stack: Vec::new(),
        pending_root: Some(root.to_string()),
    }
}

impl<S: ContentSource> MarkdownFiles<S> {
    fn descend(&mut self, path: &str) {
        match self.source.list_dir(path) {
            Ok(entries) => self.stack.push(entries.into_iter()),
            Err(err) => warn!(path, error = %err, "skipping directory"),
        }
    }
}

impl<S: ContentSource> Iterator for MarkdownFiles<S> {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        if let Some(root) = self.pending_root.take() {
            self.descend(&root);
        }

        loop {
            let entry = match self.stack.last_mut()?.next() {
                Some(entry) => entry,
                None => {
                    self.stack.pop();
                    continue;
                }
            };

            if entry.is_hidden() {
                continue;
            }

            match entry.kind {
                EntryKind::File if entry.name.ends_with(".md") => return Some(entry),
                EntryKind::Dir => self.descend(&entry.path),
                _ => {}
            }
        }
    }
}
