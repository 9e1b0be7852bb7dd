//! Key handling for the TUI
//!
//! Routes key presses to the open dialog or to the active tab. A key press
//! that completes a form or confirms a delete yields the intent to dispatch;
//! everything else only changes `App` state.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs::FormAction;
use crate::view::Intent;

/// Handle a key press, returning the intent it completed (if any)
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key)
    } else {
        handle_normal_key(app, key);
        None
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Option<Intent> {
    match &app.active_dialog {
        ActiveDialog::None => None,
        ActiveDialog::Help => {
            app.close_dialog();
            None
        }
        ActiveDialog::Confirm(pending) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let intent = pending.intent.clone();
                app.close_dialog();
                Some(intent)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                None
            }
            _ => None,
        },
        ActiveDialog::Expense => {
            let action = app.expense_form.handle_key(key);
            let built = app.expense_form.build_intent();
            finish_form(app, action, built)
        }
        ActiveDialog::Category => {
            let action = app.category_form.handle_key(key);
            let built = app.category_form.build_intent();
            finish_form(app, action, built)
        }
        ActiveDialog::Budget => {
            let action = app.budget_form.handle_key(key);
            let built = app.budget_form.build_intent();
            finish_form(app, action, built)
        }
    }
}

/// Close, submit or keep a form open after a key press
fn finish_form(app: &mut App, action: FormAction, built: Result<Intent, String>) -> Option<Intent> {
    match action {
        FormAction::None => None,
        FormAction::Cancel => {
            app.close_dialog();
            None
        }
        FormAction::Submit => match built {
            Ok(intent) => Some(intent),
            Err(message) => {
                app.report_error(message);
                None
            }
        },
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Char('1') => app.switch_view(ActiveView::Expenses),
        KeyCode::Char('2') => app.switch_view(ActiveView::Categories),
        KeyCode::Char('3') => app.switch_view(ActiveView::Budgets),
        KeyCode::Tab => app.next_view(),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete(),

        _ => {}
    }
}
