//! Flattened preorder sequence of materialised entries.
//!
//! Index 0 is always the root. For every expanded directory, the
//! contiguous run of following entries that are deeper than it is exactly
//! its visible descendants.

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::tree::kind::Kind;

/// Stable entry identifier. Never reused within one store, even across
/// [`EntryStore::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({})", self.0)
    }
}

/// One filesystem node currently shown in the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    parent: Option<EntryId>,
    path: PathBuf,
    name: String,
    kind: Kind,
    depth: usize,
    expanded: bool,
    prefix_width: usize,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The owning directory, resolved with [`EntryStore::parent_of`].
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// `0` for the root, `1` for its children, and so on.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn prefix_width(&self) -> usize {
        self.prefix_width
    }

}

/// A child about to be spliced under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: Kind,
    pub prefix_width: usize,
}

/// Index-addressed entry sequence. Performs no I/O.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    next_id: u64,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Discards everything and installs a fresh, collapsed root.
    pub fn init_root(&mut self, path: PathBuf, name: String) {
        self.entries.clear();
        let id = self.alloc_id();
        self.entries.push(Entry {
            id,
            parent: None,
            path,
            name,
            kind: Kind::Directory,
            depth: 0,
            expanded: false,
            prefix_width: 1,
        });
    }

    /// Drops every entry, root included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn root(&self) -> Option<&Entry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Index range of every current descendant of the entry at `index`.
    ///
    /// Empty when the entry is collapsed, childless, or out of range.
    pub fn child_range(&self, index: usize) -> Range<usize> {
        let Some(entry) = self.entries.get(index) else {
            return index..index;
        };
        let start = index + 1;
        let len = self.entries[start..]
            .iter()
            .take_while(|e| e.depth > entry.depth)
            .count();
        start..start + len
    }

    /// Inserts `children` immediately after the entry at `index`, assigning
    /// fresh ids, parent linkage and `depth + 1`. Returns the inserted range.
    ///
    /// The entry at `index` must currently have no visible descendants.
    pub fn splice_children(&mut self, index: usize, children: Vec<NewEntry>) -> Range<usize> {
        let Some(parent) = self.entries.get(index) else {
            return index..index;
        };
        debug_assert!(
            self.child_range(index).is_empty(),
            "splice into a directory that already shows children"
        );
        let parent_id = parent.id;
        let depth = parent.depth + 1;

        let mut built = Vec::with_capacity(children.len());
        for child in children {
            let id = self.alloc_id();
            built.push(Entry {
                id,
                parent: Some(parent_id),
                path: child.path,
                name: child.name,
                kind: child.kind,
                depth,
                expanded: false,
                prefix_width: child.prefix_width,
            });
        }

        let start = index + 1;
        let end = start + built.len();
        self.entries.splice(start..start, built);
        start..end
    }

    /// Removes `start..end` and returns the removed entries. Index 0 (the
    /// root) is never removed; the range is clamped to the sequence.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Vec<Entry> {
        let start = start.max(1).min(self.entries.len());
        let end = end.min(self.entries.len()).max(start);
        self.entries.drain(start..end).collect()
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.expanded = expanded && entry.kind.is_dir();
        }
    }

    pub fn set_prefix_width(&mut self, index: usize, prefix_width: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.prefix_width = prefix_width;
        }
    }

    pub fn position_of_path(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    /// Index of the entry's parent. Parents always precede their children,
    /// so the search walks backwards from `index`.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        let parent_id = self.entries.get(index)?.parent()?;
        self.entries[..index].iter().rposition(|e| e.id == parent_id)
    }

    /// Paths of every expanded directory, in preorder.
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|e| e.expanded)
            .map(|e| e.path.clone())
            .collect()
    }

    /// Checks the structural invariants; used by tests and debug builds.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(root) = self.entries.first() else {
            return Ok(());
        };
        if !root.is_root() || root.depth != 0 {
            return Err("index 0 is not a root".to_string());
        }
        for (i, entry) in self.entries.iter().enumerate().skip(1) {
            let Some(p) = self.parent_of(i) else {
                return Err(format!("{} at {i} has no parent in the store", entry.id));
            };
            let parent = &self.entries[p];
            if !parent.expanded {
                return Err(format!("{} at {i} sits under a collapsed parent", entry.id));
            }
            if entry.depth != parent.depth + 1 {
                return Err(format!("{} at {i} has depth {}", entry.id, entry.depth));
            }
            if !self.child_range(p).contains(&i) {
                return Err(format!("{} at {i} is outside its parent's run", entry.id));
            }
            if entry.expanded && !entry.kind.is_dir() {
                return Err(format!("non-directory {} at {i} is expanded", entry.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(name: &str, kind: Kind) -> NewEntry {
        NewEntry {
            path: PathBuf::from(format!("./{name}")),
            name: name.to_string(),
            kind,
            prefix_width: 6,
        }
    }

    fn store_with_root() -> EntryStore {
        let mut store = EntryStore::new();
        store.init_root(PathBuf::from("."), ".".to_string());
        store
    }

    fn names(store: &EntryStore) -> Vec<&str> {
        store.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn init_root_creates_single_collapsed_root() {
        let store = store_with_root();
        assert_eq!(store.len(), 1);
        let root = store.entry_at(0).unwrap();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.kind(), Kind::Directory);
        assert!(!root.is_expanded());
    }

    #[test]
    fn splice_assigns_depth_and_parent() {
        let mut store = store_with_root();
        let range = store.splice_children(0, vec![child("a", Kind::Directory), child("b", Kind::File)]);
        store.set_expanded(0, true);

        assert_eq!(range, 1..3);
        assert_eq!(names(&store), vec![".", "a", "b"]);
        let root_id = store.entry_at(0).unwrap().id();
        for i in 1..3 {
            let e = store.entry_at(i).unwrap();
            assert_eq!(e.depth(), 1);
            assert_eq!(e.parent(), Some(root_id));
            assert_eq!(store.parent_of(i), Some(0));
        }
        store.check_invariants().unwrap();
    }

    #[test]
    fn child_range_covers_nested_descendants() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::Directory), child("b", Kind::File)]);
        store.set_expanded(0, true);
        store.splice_children(1, vec![child("a1", Kind::File), child("a2", Kind::File)]);
        store.set_expanded(1, true);

        assert_eq!(names(&store), vec![".", "a", "a1", "a2", "b"]);
        assert_eq!(store.child_range(1), 2..4);
        assert_eq!(store.child_range(0), 1..5);
        assert!(store.child_range(4).is_empty());
        assert!(store.child_range(99).is_empty());
        store.check_invariants().unwrap();
    }

    #[test]
    fn remove_range_returns_removed_entries() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::Directory), child("b", Kind::File)]);
        store.set_expanded(0, true);
        store.splice_children(1, vec![child("a1", Kind::File)]);
        store.set_expanded(1, true);

        let range = store.child_range(1);
        let removed = store.remove_range(range.start, range.end);
        store.set_expanded(1, false);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name(), "a1");
        assert_eq!(names(&store), vec![".", "a", "b"]);
        store.check_invariants().unwrap();
    }

    #[test]
    fn remove_range_never_removes_root() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::File)]);
        let removed = store.remove_range(0, 10);
        assert_eq!(removed.len(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.entry_at(0).unwrap().is_root());
    }

    #[test]
    fn set_expanded_ignores_non_directories() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("f", Kind::File)]);
        store.set_expanded(1, true);
        assert!(!store.entry_at(1).unwrap().is_expanded());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = store_with_root();
        let first_root = store.entry_at(0).unwrap().id();
        store.init_root(PathBuf::from("."), ".".to_string());
        assert_ne!(store.entry_at(0).unwrap().id(), first_root);
        assert!(store.iter().all(|e| e.id() != first_root));
    }

    #[test]
    fn expanded_paths_in_preorder() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::Directory), child("b", Kind::Directory)]);
        store.set_expanded(0, true);
        store.set_expanded(2, true);
        store.splice_children(1, vec![child("a1", Kind::Directory)]);
        store.set_expanded(1, true);

        // a1 stays collapsed
        assert_eq!(
            store.expanded_paths(),
            vec![
                PathBuf::from("."),
                PathBuf::from("./a"),
                PathBuf::from("./b"),
            ]
        );
    }

    #[test]
    fn position_of_path_finds_entry() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::Directory)]);
        assert_eq!(store.position_of_path(Path::new("./a")), Some(1));
        assert_eq!(store.position_of_path(Path::new("./zz")), None);
    }

    #[test]
    fn invariant_check_flags_collapsed_parent() {
        let mut store = store_with_root();
        store.splice_children(0, vec![child("a", Kind::File)]);
        assert!(store.check_invariants().is_err());
        store.set_expanded(0, true);
        assert!(store.check_invariants().is_ok());
    }
}
