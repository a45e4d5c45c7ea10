use std::path::{Path, PathBuf};

use twig_core::config::settings::{Config, TreeConfig};
use twig_core::config::theme::KindTheme;
use twig_core::{Entry, LocalFs, Navigator, TreeEvents, TreeView, VecBuffer};

use crate::input::InputAction;

/// Environment variable overriding `tree.hidden_items` (space-separated).
pub const HIDDEN_ENV: &str = "TWIG_HIDDEN";

/// Holds the file the tree asked to open until the main loop can suspend
/// the terminal and launch the editor.
#[derive(Debug, Default)]
pub struct OpenQueue {
    pending: Option<PathBuf>,
}

impl Navigator for OpenQueue {
    fn open_path(&mut self, path: &Path) {
        self.pending = Some(path.to_path_buf());
    }
}

pub type Tree = TreeView<LocalFs, VecBuffer, OpenQueue>;

/// Returns the path to the config directory.
fn config_dir() -> PathBuf {
    // Check for project-local config directory first, then fall back
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    // Fall back to ~/.config/twig
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("twig")
}

/// Loads `default.toml` (and an optional `theme.toml` on top of it) from
/// `dir`, then applies the hidden-items environment override.
pub fn load_config(dir: &Path, hidden_override: Option<&str>) -> Config {
    let mut config = match Config::load(&dir.join("default.toml")) {
        Ok(config) => config,
        Err(e) if e.is_not_found() => Config::default(),
        Err(e) => {
            tracing::warn!("ignoring config in {}: {e}", dir.display());
            Config::default()
        }
    };

    let theme_path = dir.join("theme.toml");
    match KindTheme::load(&theme_path) {
        Ok(theme) => config.theme = theme,
        Err(e) if e.is_not_found() => {}
        Err(e) => tracing::warn!("ignoring {}: {e}", theme_path.display()),
    }

    if let Some(raw) = hidden_override {
        config.tree.hidden_items = TreeConfig::parse_hidden_items(raw);
    }
    config
}

/// Loads configuration from the default locations and the environment.
pub fn load_default_config() -> Config {
    let hidden = std::env::var(HIDDEN_ENV).ok();
    load_config(&config_dir(), hidden.as_deref())
}

/// Application state: the tree view plus a cursor over its rows.
pub struct App {
    tree: Tree,
    cursor: usize,
    should_quit: bool,
    status_message: Option<String>,
}

impl App {
    /// Creates the app and shows the tree rooted at `root`.
    pub fn new(root: &Path, config: Config) -> Self {
        let mut tree = TreeView::new(
            root,
            config,
            LocalFs,
            VecBuffer::new(),
            OpenQueue::default(),
        );
        tree.show();
        Self {
            tree,
            cursor: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.tree.entry_at(self.cursor)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Takes the file queued by the last select, if any.
    pub fn take_pending_open(&mut self) -> Option<PathBuf> {
        self.tree.navigator_mut().pending.take()
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::CursorDown => self.move_cursor(self.cursor.saturating_add(1)),
            InputAction::CursorUp => self.move_cursor(self.cursor.saturating_sub(1)),
            InputAction::CursorTop => self.move_cursor(0),
            InputAction::CursorBottom => self.move_cursor(self.tree.len().saturating_sub(1)),
            InputAction::Select => self.select(),
            InputAction::CollapseOrParent => self.collapse_or_parent(),
            InputAction::Refresh => {
                self.refresh();
                self.set_status("Refreshed");
            }
            InputAction::Quit => self.should_quit = true,
            InputAction::None => {}
        }
    }

    fn move_cursor(&mut self, row: usize) {
        self.cursor = row.min(self.tree.len().saturating_sub(1));
    }

    fn select(&mut self) {
        self.status_message = None;
        self.tree.on_select(self.cursor);
        self.move_cursor(self.cursor);
    }

    /// Collapses an expanded directory, otherwise moves to the parent row.
    fn collapse_or_parent(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if entry.kind().is_dir() && entry.is_expanded() {
            self.tree.collapse(self.cursor);
        } else if let Some(parent) = self.tree.store().parent_of(self.cursor) {
            self.cursor = parent;
        }
    }

    /// Rebuilds the tree, keeping the cursor on the same path when it
    /// still exists.
    pub fn refresh(&mut self) {
        let selected = self.selected_path();
        self.tree.refresh();
        self.restore_cursor(selected);
    }

    /// Forwards a main-loop tick to the tree.
    pub fn tick(&mut self) {
        let selected = self.selected_path();
        self.tree.on_tick();
        self.restore_cursor(selected);
    }

    fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry().map(|e| e.path().to_path_buf())
    }

    fn restore_cursor(&mut self, selected: Option<PathBuf>) {
        let found = selected.and_then(|p| self.tree.store().position_of_path(&p));
        match found {
            Some(row) => self.cursor = row,
            None => self.move_cursor(self.cursor),
        }
    }

    /// Drops the tree before exit.
    pub fn teardown(&mut self) {
        self.tree.teardown();
        self.cursor = 0;
    }
}
