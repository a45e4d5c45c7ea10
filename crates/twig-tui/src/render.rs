use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};
use crate::ui::tree_panel::render_tree_panel;

/// Main render function: tree panel above a one-line status bar.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    render_tree_panel(f, chunks[0], app);

    let props = StatusBarProps {
        entry_count: app.tree().len(),
        selected_index: app.cursor(),
        selected_entry: app.selected_entry(),
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[1], &props);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;
    use twig_core::Config;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_rows_and_status() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        let app = App::new(tmp.path(), Config::default());

        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("│   ├src"));
        assert!(text.contains("│   └notes.txt"));
        assert!(text.contains(" 1/3"));
    }
}
