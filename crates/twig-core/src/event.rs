//! Host-facing hooks.
//!
//! A host (the TUI, or an editor plugin adapter) forwards three kinds of
//! events to the tree view: a row was selected, a row is about to be
//! drawn, and the main loop ticked. It also supplies a [`Navigator`] that
//! performs the "open this file" action the view never does itself.

use std::path::Path;

use crate::config::theme::KindStyle;
use crate::tree::kind::Kind;

/// Styling information for one row, produced just before it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStyle {
    pub kind: Kind,
    /// 1-based column where kind styling starts; earlier columns are
    /// structural glyphs drawn plain.
    pub prefix_width: usize,
    pub style: KindStyle,
}

impl RowStyle {
    /// Returns `true` if the 1-based `column` should be drawn in the kind style.
    pub fn styles_column(&self, column: usize) -> bool {
        column >= self.prefix_width
    }
}

/// The three narrow hooks a host dispatches into.
pub trait TreeEvents {
    /// The user activated the row at `row`.
    fn on_select(&mut self, row: usize);
    /// Line pre-draw: how should `row` be styled?
    fn on_render_row(&self, row: usize) -> Option<RowStyle>;
    /// Periodic main-loop tick; may trigger a refresh.
    fn on_tick(&mut self);
}

/// Opens a non-directory entry in the host.
pub trait Navigator {
    fn open_path(&mut self, path: &Path);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn open_path(&mut self, path: &Path) {
        (**self).open_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_column_starts_at_prefix_width() {
        let row = RowStyle {
            kind: Kind::File,
            prefix_width: 6,
            style: KindStyle {
                fg: "gray".to_string(),
                bg: "reset".to_string(),
                bold: false,
            },
        };
        assert!(!row.styles_column(1));
        assert!(!row.styles_column(5));
        assert!(row.styles_column(6));
        assert!(row.styles_column(40));
    }
}
