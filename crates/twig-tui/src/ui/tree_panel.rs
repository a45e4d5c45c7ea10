//! Tree panel rendering.
//!
//! Draws the tree view's line buffer as a scrollable `List`. Each row is
//! split at its prefix width: the connector glyphs before it are drawn
//! plain, the name from there on in the style registered for its kind.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use twig_core::{RowStyle, TreeEvents};

use crate::app::App;

/// Renders the tree rows with the cursor row highlighted.
pub fn render_tree_panel(f: &mut Frame, area: Rect, app: &App) {
    let tree = app.tree();

    let items: Vec<ListItem> = tree
        .buffer()
        .lines()
        .iter()
        .enumerate()
        .map(|(row, text)| ListItem::new(styled_row(text, tree.on_render_row(row).as_ref())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", tree.root_path().display()))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !tree.is_empty() {
        state.select(Some(app.cursor()));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Splits `text` into a plain prefix and a kind-styled remainder.
fn styled_row(text: &str, style: Option<&RowStyle>) -> Line<'static> {
    let Some(style) = style else {
        return Line::from(text.to_owned());
    };

    // columns are 1-based
    let split = text
        .char_indices()
        .enumerate()
        .find(|(col, _)| style.styles_column(col + 1))
        .map(|(_, (i, _))| i)
        .unwrap_or(text.len());
    let (prefix, name) = text.split_at(split);

    Line::from(vec![
        Span::raw(prefix.to_owned()),
        Span::styled(name.to_owned(), style.style.to_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use twig_core::{Kind, KindTheme};

    fn row_style(kind: Kind, prefix_width: usize) -> RowStyle {
        RowStyle {
            kind,
            prefix_width,
            style: KindTheme::default().style_for(kind).clone(),
        }
    }

    #[test]
    fn splits_at_prefix_width() {
        let style = row_style(Kind::Directory, 6);
        let line = styled_row("│   └src", Some(&style));

        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "│   └");
        assert_eq!(line.spans[0].style, Style::default());
        assert_eq!(line.spans[1].content, "src");
        assert_eq!(line.spans[1].style, style.style.to_style());
    }

    #[test]
    fn root_row_is_fully_styled() {
        let style = row_style(Kind::Directory, 1);
        let line = styled_row("/home/me", Some(&style));

        assert_eq!(line.spans[0].content, "");
        assert_eq!(line.spans[1].content, "/home/me");
    }

    #[test]
    fn missing_style_is_plain() {
        let line = styled_row("│   ├a", None);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "│   ├a");
    }

    #[test]
    fn prefix_past_end_styles_nothing() {
        let style = row_style(Kind::File, 40);
        let line = styled_row("short", Some(&style));
        assert_eq!(line.spans[0].content, "short");
        assert_eq!(line.spans[1].content, "");
    }
}
