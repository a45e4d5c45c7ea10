//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected entry's kind and path, and an
//! optional status message.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use twig_core::Entry;

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub selected_index: usize,
    pub selected_entry: Option<&'a Entry>,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let bg = Color::DarkGray;

    let line = Line::from(vec![
        Span::styled(
            position_text(props),
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            entry_text(props.selected_entry),
            Style::default().fg(Color::Gray).bg(bg),
        ),
        props
            .status_message
            .map(|msg| {
                Span::styled(
                    format!("  {msg}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .bg(bg)
                        .add_modifier(Modifier::ITALIC),
                )
            })
            .unwrap_or_default(),
    ]);

    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn position_text(props: &StatusBarProps<'_>) -> String {
    if props.entry_count > 0 {
        format!(" {}/{}", props.selected_index + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    }
}

fn entry_text(entry: Option<&Entry>) -> String {
    entry
        .map(|e| format!("  [{}] {}", e.kind(), e.path().display()))
        .unwrap_or_default()
}
