//! Help dialog
//!
//! Shows keyboard shortcuts for the active tab

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Help lines for the active tab
fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1/2/3", "Expenses / Categories / Budgets"),
        key_line("Tab", "Next tab"),
        key_line("j/k", "Move selection down/up"),
        key_line("g/G", "First / last row"),
        Line::from(""),
    ];

    let (title, noun) = match view {
        ActiveView::Expenses => ("Expenses", "expense"),
        ActiveView::Categories => ("Categories", "category"),
        ActiveView::Budgets => ("Budgets", "budget"),
    };
    lines.push(heading(title));
    lines.push(Line::from(""));
    lines.push(key_line("a/n", &format!("Add {}", noun)));
    lines.push(key_line("e/Enter", &format!("Edit selected {}", noun)));
    lines.push(key_line("d/Del", &format!("Delete selected {}", noun)));

    if view == ActiveView::Categories {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Deleting a category keeps its expenses and budgets.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
