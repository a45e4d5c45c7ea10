//! The tree view context: expansion engine and reconciler.
//!
//! [`TreeView`] owns the entry store, the mirrored line buffer and the
//! collaborators. Every public operation runs to completion and leaves
//! the store and buffer aligned line-for-line. Filesystem failures are
//! logged and degrade to empty or default results; nothing here returns
//! an error to the caller.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::buffer::{LineBuffer, Writable};
use crate::config::settings::{Config, TreeConfig};
use crate::event::{Navigator, RowStyle, TreeEvents};
use crate::fs::entry::DirEntry;
use crate::fs::Filesystem;
use crate::tree::kind::Classifier;
use crate::tree::render::RowRenderer;
use crate::tree::sort::{sort_siblings, SortKey};
use crate::tree::store::{Entry, EntryStore, NewEntry};

/// Listed children whose full path is longer than this are skipped.
pub const MAX_PATH_BYTES: usize = 4096;

/// A classified child and its precomputed sort key.
struct PreparedRow {
    key: SortKey,
    entry: NewEntry,
}

/// A collapsible view of one filesystem subtree.
pub struct TreeView<F, B, N> {
    root_path: PathBuf,
    config: Config,
    fs: F,
    buffer: B,
    navigator: N,
    store: EntryStore,
    last_refresh: Instant,
}

impl<F, B, N> TreeView<F, B, N>
where
    F: Filesystem,
    B: LineBuffer,
    N: Navigator,
{
    /// Creates an uninitialised view. Nothing is read from disk until
    /// [`TreeView::show`].
    pub fn new(
        root_path: impl Into<PathBuf>,
        config: Config,
        fs: F,
        buffer: B,
        navigator: N,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            config,
            fs,
            buffer,
            navigator,
            store: EntryStore::new(),
            last_refresh: Instant::now(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration. Takes effect at the next operation;
    /// rows already on screen keep their old rendering until re-expanded
    /// or refreshed.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.store.entry_at(index)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// `true` once [`TreeView::show`] has built the root.
    pub fn is_initialized(&self) -> bool {
        self.store.root().is_some()
    }

    /// Initialises the view on first use and expands the root. Calling it
    /// again is a no-op apart from re-asserting the buffer's read-only flag.
    pub fn show(&mut self) {
        if !self.is_initialized() {
            tracing::info!("building tree view for {}", self.root_path.display());
            self.rebuild_root();
            self.expand(0);
            self.last_refresh = Instant::now();
        }
        self.buffer.set_read_only(true);
    }

    /// Drops every entry and clears the buffer. A later [`TreeView::show`]
    /// starts from scratch.
    pub fn teardown(&mut self) {
        self.store.clear();
        let mut buffer = Writable::new(&mut self.buffer);
        buffer.clear();
    }

    fn rebuild_root(&mut self) {
        let name = self.root_path.display().to_string();
        let renderer = self.renderer(&self.config.tree.normalized());
        let row = renderer.render_root(&name);

        self.store.init_root(self.root_path.clone(), name);
        self.store.set_prefix_width(0, row.prefix_width);

        let mut buffer = Writable::new(&mut self.buffer);
        buffer.clear();
        buffer.insert_line(0, &row.text);
    }

    fn renderer(&self, cfg: &TreeConfig) -> RowRenderer {
        RowRenderer::new(cfg.indent_width, cfg.glyphs.clone())
    }

    /// Filters, classifies, sorts and renders a directory listing.
    fn prepare_children(
        &self,
        listed: Vec<DirEntry>,
        depth: usize,
        cfg: &TreeConfig,
    ) -> (Vec<NewEntry>, Vec<String>) {
        let classifier = Classifier::from_config(cfg);
        let renderer = self.renderer(cfg);

        let mut rows: Vec<PreparedRow> = listed
            .into_iter()
            .filter(|child| !cfg.is_hidden(child.name()))
            .filter(|child| {
                let len = child.path().as_os_str().len();
                if len > MAX_PATH_BYTES {
                    tracing::warn!("skipping {}: path is {len} bytes", child.name());
                    return false;
                }
                true
            })
            .map(|child| {
                let (path, name, metadata) = child.into_parts();
                let metadata = metadata.or_else(|| match self.fs.stat(&path) {
                    Ok(meta) => Some(meta),
                    Err(e) => {
                        tracing::debug!("no metadata for {}: {e}", path.display());
                        None
                    }
                });
                let kind = classifier.classify(&name, metadata.as_ref(), || {
                    self.fs.open_for_read(&path)
                });
                PreparedRow {
                    key: SortKey::new(&name, kind.is_dir()),
                    entry: NewEntry {
                        path,
                        name,
                        kind,
                        prefix_width: 0,
                    },
                }
            })
            .collect();

        sort_siblings(&mut rows, |row| &row.key);

        let last = rows.len().saturating_sub(1);
        let mut texts = Vec::with_capacity(rows.len());
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut entry = row.entry;
                let rendered = renderer.render(&entry.name, depth, i == last);
                entry.prefix_width = rendered.prefix_width;
                texts.push(rendered.text);
                entry
            })
            .collect();

        (entries, texts)
    }

    /// Shows the children of the directory at `index`.
    ///
    /// No-op for out-of-range indices, non-directories and directories
    /// that are already expanded. A listing failure is logged and the
    /// directory is still marked expanded, with no rows beneath it; the
    /// same holds when every child is hidden.
    pub fn expand(&mut self, index: usize) {
        let Some(entry) = self.store.entry_at(index) else {
            return;
        };
        if !entry.kind().is_dir() || entry.is_expanded() {
            return;
        }
        let dir = entry.path().to_path_buf();
        let depth = entry.depth() + 1;
        let cfg = self.config.tree.normalized();

        let (children, texts) = match self.fs.list_directory(&dir) {
            Ok(listed) => self.prepare_children(listed, depth, &cfg),
            Err(e) => {
                tracing::warn!("failed to list {}: {e}", dir.display());
                (Vec::new(), Vec::new())
            }
        };

        if !children.is_empty() {
            let range = self.store.splice_children(index, children);
            let mut buffer = Writable::new(&mut self.buffer);
            for (line, text) in range.zip(texts.iter()) {
                buffer.insert_line(line, text);
            }
        }
        self.store.set_expanded(index, true);

        tracing::debug!("expanded {} ({} rows)", dir.display(), texts.len());
    }

    /// Hides every descendant of the directory at `index`.
    ///
    /// No-op unless the entry is an expanded directory.
    pub fn collapse(&mut self, index: usize) {
        let Some(entry) = self.store.entry_at(index) else {
            return;
        };
        if !entry.kind().is_dir() || !entry.is_expanded() {
            return;
        }

        let range = self.store.child_range(index);
        if !range.is_empty() {
            let mut buffer = Writable::new(&mut self.buffer);
            for _ in range.clone() {
                buffer.delete_line(range.start);
            }
            drop(buffer);
            self.store.remove_range(range.start, range.end);
        }
        self.store.set_expanded(index, false);

        tracing::debug!("collapsed row {index} ({} rows removed)", range.len());
    }

    /// Toggles a directory or asks the navigator to open anything else.
    pub fn select(&mut self, index: usize) {
        let Some(entry) = self.store.entry_at(index) else {
            return;
        };
        if entry.kind().is_dir() {
            if entry.is_expanded() {
                self.collapse(index);
            } else {
                self.expand(index);
            }
        } else {
            let path = entry.path().to_path_buf();
            self.navigator.open_path(&path);
        }
    }

    /// Rebuilds the whole tree from disk, re-expanding every directory
    /// that was expanded before and still exists.
    ///
    /// The root is always expanded afterwards and the polling timer starts
    /// over. Does nothing before [`TreeView::show`].
    pub fn refresh(&mut self) {
        if !self.is_initialized() {
            return;
        }
        let expanded = self.store.expanded_paths();

        self.rebuild_root();
        self.expand(0);

        // preorder: parents are re-expanded before their children are looked up
        let mut restored = 0;
        for path in &expanded {
            if let Some(index) = self.store.position_of_path(path) {
                self.expand(index);
                restored += 1;
            }
        }
        self.last_refresh = Instant::now();

        tracing::debug!(
            "refreshed {}: {restored}/{} expanded paths restored, {} rows",
            self.root_path.display(),
            expanded.len(),
            self.store.len()
        );
    }

    /// Runs [`TreeView::refresh`] when more than the configured interval
    /// has passed since the last one. Returns `true` if it refreshed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let interval = self.config.tree.refresh_interval_secs;
        if interval == 0 || !self.is_initialized() {
            return false;
        }
        if now.saturating_duration_since(self.last_refresh) <= Duration::from_secs(interval) {
            return false;
        }
        self.refresh();
        self.last_refresh = now;
        true
    }

    /// Styling for the row at `index`.
    pub fn row_style(&self, index: usize) -> Option<RowStyle> {
        let entry = self.store.entry_at(index)?;
        Some(RowStyle {
            kind: entry.kind(),
            prefix_width: entry.prefix_width(),
            style: self.config.theme.style_for(entry.kind()).clone(),
        })
    }
}

impl<F, B, N> TreeEvents for TreeView<F, B, N>
where
    F: Filesystem,
    B: LineBuffer,
    N: Navigator,
{
    fn on_select(&mut self, row: usize) {
        self.select(row);
    }

    fn on_render_row(&self, row: usize) -> Option<RowStyle> {
        self.row_style(row)
    }

    fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }
}
