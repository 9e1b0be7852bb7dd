//! Spend vs budget panel
//!
//! One row per period with a usage bar; overspent periods are shown in red.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::report::format_bar;
use crate::tui::app::App;

const BAR_WIDTH: usize = 10;

/// Render the analysis panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.analysis.any_over() {
        Color::Red
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Spent / Budget ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut lines = Vec::new();
    for row in app.analysis.rows() {
        let budget = if row.budget > 0 {
            app.settings.format_amount(row.budget)
        } else {
            "-".to_string()
        };

        let spent_style = if row.is_over() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<6}", row.period.label()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("{:>9}", app.settings.format_amount(row.spent)),
                spent_style,
            ),
            Span::raw(" / "),
            Span::raw(format!("{:<9}", budget)),
            Span::styled(
                format_bar(row.spent as f64, row.budget as f64, BAR_WIDTH),
                spent_style,
            ),
        ]));

        if row.budget > 0 {
            let remaining = row.remaining();
            let (text, color) = if remaining < 0 {
                (
                    format!("      over by {}", app.settings.format_amount(-remaining)),
                    Color::Red,
                )
            } else {
                (
                    format!("      {} left", app.settings.format_amount(remaining)),
                    Color::DarkGray,
                )
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
