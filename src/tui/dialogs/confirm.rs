//! Delete confirmation dialog
//!
//! Shows what is about to be removed before the intent is sent.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::PendingDelete;
use crate::tui::layout::centered_rect_fixed;

const WIDTH: u16 = 54;

pub fn render(frame: &mut Frame, pending: &PendingDelete) {
    let lines = dialog_lines(pending);
    // Borders plus one spare row
    let height = lines.len() as u16 + 3;
    let area = centered_rect_fixed(WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {}? ", pending.title))
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn dialog_lines(pending: &PendingDelete) -> Vec<Line<'static>> {
    let label_width = pending
        .details
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::from("")];
    for (label, value) in &pending.details {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}  ", label, width = label_width),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(value.clone(), Style::default().fg(Color::White)),
        ]));
    }

    if let Some(note) = &pending.note {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", note),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" [Y]", Style::default().fg(Color::Red)),
        Span::raw(" Delete  "),
        Span::styled("[N/Esc]", Style::default().fg(Color::Green)),
        Span::raw(" Keep"),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetPk;
    use crate::view::Intent;

    fn pending() -> PendingDelete {
        PendingDelete {
            title: "Delete budget #4".into(),
            details: vec![("Period", "Week".into()), ("Amount", "$700".into())],
            note: None,
            intent: Intent::DeleteBudget(BudgetPk::new(4)),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_details_are_aligned() {
        let lines = dialog_lines(&pending());
        assert_eq!(text(&lines[1]), " Period  Week");
        assert_eq!(text(&lines[2]), " Amount  $700");
        assert!(text(lines.last().unwrap()).contains("[Y] Delete"));
    }

    #[test]
    fn test_note_is_shown() {
        let mut pending = pending();
        pending.note = Some("Nothing else changes.".into());
        let lines = dialog_lines(&pending);
        assert!(lines.iter().any(|l| text(l) == " Nothing else changes."));
    }
}
