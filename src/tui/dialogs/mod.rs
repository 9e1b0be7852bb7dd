//! Modal dialogs: entity forms, delete confirmation and help

pub mod budget;
pub mod category;
pub mod confirm;
pub mod expense;
pub mod help;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{Category, CategoryPk};
use crate::services::category_tree::tree_order;
use crate::tui::widgets::TextInput;

/// What a form wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// Keys shared by every form; `None` means the form should handle the key
pub(crate) fn form_navigation(key: KeyEvent) -> Option<FormNav> {
    match key.code {
        KeyCode::Esc => Some(FormNav::Action(FormAction::Cancel)),
        KeyCode::Enter => Some(FormNav::Action(FormAction::Submit)),
        KeyCode::Tab | KeyCode::Down => Some(FormNav::Next),
        KeyCode::BackTab | KeyCode::Up => Some(FormNav::Prev),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormNav {
    Action(FormAction),
    Next,
    Prev,
}

/// Apply an editing key to a text input
pub(crate) fn edit_text(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

/// Category choices in tree order, indented by depth
pub fn category_choices(categories: &[Category]) -> Vec<(CategoryPk, String)> {
    tree_order(categories)
        .into_iter()
        .map(|(depth, category)| (category.pk, format!("{}{}", "  ".repeat(depth), category.name)))
        .collect()
}

/// Step a selector index forwards or backwards with wrap-around
pub(crate) fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

/// Standard bordered block for dialogs
pub(crate) fn dialog_block(title: &str) -> Block<'_> {
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

/// Render a `< value >` selector field
pub(crate) fn render_selector_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let line = Line::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::styled(format!("< {} >", value.trim_start()), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the error line and the key hints at the bottom of a form
pub(crate) fn render_form_footer(
    frame: &mut Frame,
    error_area: Rect,
    hints_area: Rect,
    error: Option<&str>,
) {
    if let Some(error) = error {
        let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(error_line), error_area);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Choose  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), hints_area);
}

/// Parse a whole-number amount typed into a form
pub(crate) fn parse_amount(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Amount is required".to_string());
    }
    raw.parse()
        .map_err(|_| format!("Amount must be a whole number, got '{}'", raw))
}
