//! Budget list view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{header_style, highlight_style, list_block};
use crate::display::report::truncate;
use crate::services::category_tree::label;
use crate::tui::app::App;

/// Render the budget table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = list_block(" Budgets ");

    if app.budgets.is_empty() {
        let text = Paragraph::new("No budgets. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(5),  // Key
        Constraint::Length(7),  // Period
        Constraint::Length(10), // Amount
        Constraint::Min(16),    // Category
    ];

    let header = Row::new(vec!["Key", "Period", "Amount", "Category"])
        .style(header_style())
        .height(1);

    let rows: Vec<Row> = app
        .budgets
        .iter()
        .map(|budget| {
            Row::new(vec![
                Cell::from(format!("#{}", budget.pk)),
                Cell::from(budget.period.label()),
                Cell::from(format!("{:>10}", app.settings.format_amount(budget.amount))),
                Cell::from(truncate(&label(&app.categories, budget.category), 30)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_budget_index));

    frame.render_stateful_widget(table, area, &mut state);
}
