//! Expense entry dialog
//!
//! Adds a new expense or edits the amount, category and comment of an
//! existing one. The date of an edited expense is kept.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Clear,
    Frame,
};

use super::{
    category_choices, cycle, dialog_block, edit_text, form_navigation, parse_amount,
    render_form_footer, render_selector_field, FormAction, FormNav,
};
use crate::models::{Category, CategoryPk, Expense};
use crate::services::category_tree::label;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;
use crate::view::Intent;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Amount,
    Category,
    Comment,
}

/// State for the expense form dialog
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormState {
    /// Expense being edited (None for a new expense)
    pub editing: Option<Expense>,
    pub amount_input: TextInput,
    pub comment_input: TextInput,
    pub categories: Vec<(CategoryPk, String)>,
    pub selected_category_index: usize,
    pub focused_field: ExpenseField,
    pub error_message: Option<String>,
}

impl ExpenseFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the form for a new expense
    pub fn init_for_add(&mut self, categories: &[Category]) {
        *self = Self {
            amount_input: TextInput::new().label("Amount").placeholder("e.g. 250"),
            comment_input: TextInput::new().label("Comment").placeholder("optional"),
            categories: category_choices(categories),
            ..Self::default()
        };
    }

    /// Load an existing expense into the form
    pub fn init_for_edit(&mut self, expense: &Expense, categories: &[Category]) {
        self.init_for_add(categories);
        self.amount_input = self.amount_input.clone().content(expense.amount.to_string());
        self.comment_input = self.comment_input.clone().content(expense.comment.clone());

        // Keep a dangling category selectable so the form shows what is stored.
        self.selected_category_index = match self
            .categories
            .iter()
            .position(|(pk, _)| *pk == expense.category)
        {
            Some(index) => index,
            None => {
                self.categories
                    .push((expense.category, label(categories, expense.category)));
                self.categories.len() - 1
            }
        };
        self.editing = Some(expense.clone());
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            ExpenseField::Amount => ExpenseField::Category,
            ExpenseField::Category => ExpenseField::Comment,
            ExpenseField::Comment => ExpenseField::Amount,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            ExpenseField::Amount => ExpenseField::Comment,
            ExpenseField::Category => ExpenseField::Amount,
            ExpenseField::Comment => ExpenseField::Category,
        };
    }

    /// Handle a key press while the dialog is open
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match form_navigation(key) {
            Some(FormNav::Action(action)) => return action,
            Some(FormNav::Next) => self.next_field(),
            Some(FormNav::Prev) => self.prev_field(),
            None => match self.focused_field {
                ExpenseField::Amount => edit_text(&mut self.amount_input, key),
                ExpenseField::Comment => edit_text(&mut self.comment_input, key),
                ExpenseField::Category => match key.code {
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        self.selected_category_index =
                            cycle(self.selected_category_index, self.categories.len(), true);
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.selected_category_index =
                            cycle(self.selected_category_index, self.categories.len(), false);
                    }
                    _ => {}
                },
            },
        }
        self.error_message = None;
        FormAction::None
    }

    pub fn selected_category(&self) -> Option<CategoryPk> {
        self.categories
            .get(self.selected_category_index)
            .map(|(pk, _)| *pk)
    }

    /// Build the create or update intent from the form
    pub fn build_intent(&self) -> Result<Intent, String> {
        let amount = parse_amount(self.amount_input.value())?;
        let category = self
            .selected_category()
            .ok_or_else(|| "Add a category first".to_string())?;
        let comment = self.comment_input.value().trim().to_string();

        Ok(match &self.editing {
            Some(original) => {
                let mut expense = original.clone();
                expense.amount = amount;
                expense.category = category;
                expense.comment = comment;
                Intent::UpdateExpense(expense)
            }
            None => Intent::CreateExpense(Expense::new(amount, category).with_comment(comment)),
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the expense dialog
pub fn render(frame: &mut Frame, form: &ExpenseFormState) {
    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let title = match &form.editing {
        Some(expense) => format!(" Edit Expense #{} ", expense.pk),
        None => " Add Expense ".to_string(),
    };
    let block = dialog_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Comment
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        form.amount_input
            .clone()
            .focused(form.focused_field == ExpenseField::Amount),
        chunks[0],
    );

    let category_name = form
        .categories
        .get(form.selected_category_index)
        .map(|(_, name)| name.as_str())
        .unwrap_or("(no categories)");
    render_selector_field(
        frame,
        chunks[1],
        "Category",
        category_name,
        form.focused_field == ExpenseField::Category,
    );

    frame.render_widget(
        form.comment_input
            .clone()
            .focused(form.focused_field == ExpenseField::Comment),
        chunks[2],
    );

    render_form_footer(frame, chunks[4], chunks[5], form.error_message.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        let mut food = Category::new("food");
        food.pk = CategoryPk::new(1);
        let mut books = Category::new("books");
        books.pk = CategoryPk::new(2);
        vec![food, books]
    }

    fn type_text(form: &mut ExpenseFormState, text: &str) {
        for c in text.chars() {
            form.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_build_new_expense() {
        let mut form = ExpenseFormState::new();
        form.init_for_add(&categories());
        type_text(&mut form, "250");
        form.handle_key(KeyEvent::from(KeyCode::Tab));
        form.handle_key(KeyEvent::from(KeyCode::Right));
        form.handle_key(KeyEvent::from(KeyCode::Tab));
        type_text(&mut form, "novel");

        match form.build_intent().unwrap() {
            Intent::CreateExpense(expense) => {
                assert_eq!(expense.amount, 250);
                assert_eq!(expense.category, CategoryPk::new(2));
                assert_eq!(expense.comment, "novel");
                assert!(!expense.pk.is_assigned());
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_edit_keeps_key_and_date() {
        let mut original = Expense::new(40, CategoryPk::new(1));
        original.pk = crate::models::ExpensePk::new(7);

        let mut form = ExpenseFormState::new();
        form.init_for_edit(&original, &categories());
        form.handle_key(KeyEvent::from(KeyCode::Backspace));
        form.handle_key(KeyEvent::from(KeyCode::Backspace));
        type_text(&mut form, "45");

        match form.build_intent().unwrap() {
            Intent::UpdateExpense(expense) => {
                assert_eq!(expense.pk, original.pk);
                assert_eq!(expense.expense_date, original.expense_date);
                assert_eq!(expense.amount, 45);
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_dangling_category_stays_selected() {
        let original = Expense::new(40, CategoryPk::new(9));
        let mut form = ExpenseFormState::new();
        form.init_for_edit(&original, &categories());
        assert_eq!(form.selected_category(), Some(CategoryPk::new(9)));
        assert_eq!(form.categories.last().unwrap().1, "<deleted #9>");
    }

    #[test]
    fn test_bad_amount_and_no_categories() {
        let mut form = ExpenseFormState::new();
        form.init_for_add(&categories());
        type_text(&mut form, "abc");
        assert!(form.build_intent().unwrap_err().contains("whole number"));

        let mut empty = ExpenseFormState::new();
        empty.init_for_add(&[]);
        type_text(&mut empty, "5");
        assert_eq!(empty.build_intent().unwrap_err(), "Add a category first");
    }

    #[test]
    fn test_escape_and_enter() {
        let mut form = ExpenseFormState::new();
        assert_eq!(form.handle_key(KeyEvent::from(KeyCode::Esc)), FormAction::Cancel);
        assert_eq!(form.handle_key(KeyEvent::from(KeyCode::Enter)), FormAction::Submit);
    }
}
