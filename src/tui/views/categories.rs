//! Category tree view
//!
//! Categories are listed in tree order, children indented under their parent.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{highlight_style, list_block};
use crate::tui::app::App;

/// Render the category tree
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = list_block(" Categories ");
    let rows = app.category_rows();

    if rows.is_empty() {
        let text = Paragraph::new("No categories. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|(depth, category)| {
            let branch = if *depth == 0 { "" } else { "└ " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<4} ", category.pk),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  ".repeat(*depth)),
                Span::styled(branch, Style::default().fg(Color::DarkGray)),
                Span::raw(category.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_category_index));

    frame.render_stateful_widget(list, area, &mut state);
}
