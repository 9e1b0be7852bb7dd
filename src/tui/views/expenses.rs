//! Expense list view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{header_style, highlight_style, list_block};
use crate::display::report::truncate;
use crate::services::category_tree::{find, label};
use crate::tui::app::App;

/// Render the expense table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = list_block(" Expenses ");

    if app.expenses.is_empty() {
        let text = Paragraph::new("No expenses. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(5),  // Key
        Constraint::Length(16), // Date
        Constraint::Length(10), // Amount
        Constraint::Length(16), // Category
        Constraint::Min(10),    // Comment
    ];

    let header = Row::new(vec!["Key", "Date", "Amount", "Category", "Comment"])
        .style(header_style())
        .height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .map(|expense| {
            let category_style = if find(&app.categories, expense.category).is_some() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            Row::new(vec![
                Cell::from(format!("#{}", expense.pk)),
                Cell::from(
                    expense
                        .expense_date
                        .format(&app.settings.date_format)
                        .to_string(),
                ),
                Cell::from(format!(
                    "{:>10}",
                    app.settings.format_amount(expense.amount)
                )),
                Cell::from(truncate(&label(&app.categories, expense.category), 16))
                    .style(category_style),
                Cell::from(truncate(&expense.comment, 40)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_expense_index));

    frame.render_stateful_widget(table, area, &mut state);
}
