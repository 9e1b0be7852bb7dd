//! TUI Views module
//!
//! The three list tabs, the analysis panel and the status bar.

pub mod analysis;
pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Expenses => expenses::render(frame, app, layout.main),
        ActiveView::Categories => categories::render(frame, app, layout.main),
        ActiveView::Budgets => budgets::render(frame, app, layout.main),
    }

    analysis::render(frame, app, layout.analysis);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = ActiveView::all()
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .block(
            Block::default()
                .title(" Bookkeeper ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(pending) => dialogs::confirm::render(frame, pending),
        ActiveDialog::Expense => dialogs::expense::render(frame, &app.expense_form),
        ActiveDialog::Category => dialogs::category::render(frame, &app.category_form),
        ActiveDialog::Budget => dialogs::budget::render(frame, &app.budget_form),
        ActiveDialog::None => {}
    }
}

/// Bordered block for a list tab
pub(crate) fn list_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Style for the highlighted row
pub(crate) fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
