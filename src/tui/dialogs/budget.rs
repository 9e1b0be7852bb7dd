//! Budget entry dialog
//!
//! Sets a spend limit for one category over a day, week or month.

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
use crate::models::{Budget, BudgetPeriod, Category, CategoryPk};
use crate::services::category_tree::label;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;
use crate::view::Intent;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetField {
    #[default]
    Period,
    Amount,
    Category,
}

/// State for the budget form dialog
#[derive(Debug, Clone)]
pub struct BudgetFormState {
    pub editing: Option<Budget>,
    pub period: BudgetPeriod,
    pub amount_input: TextInput,
    pub categories: Vec<(CategoryPk, String)>,
    pub selected_category_index: usize,
    pub focused_field: BudgetField,
    pub error_message: Option<String>,
}

impl Default for BudgetFormState {
    fn default() -> Self {
        Self {
            editing: None,
            period: BudgetPeriod::Month,
            amount_input: TextInput::new().label("Amount").placeholder("limit per period"),
            categories: Vec::new(),
            selected_category_index: 0,
            focused_field: BudgetField::Period,
            error_message: None,
        }
    }
}

impl BudgetFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the form for a new budget
    pub fn init_for_add(&mut self, categories: &[Category]) {
        *self = Self {
            categories: category_choices(categories),
            ..Self::default()
        };
    }

    /// Load an existing budget into the form
    pub fn init_for_edit(&mut self, budget: &Budget, categories: &[Category]) {
        self.init_for_add(categories);
        self.period = budget.period;
        self.amount_input = self.amount_input.clone().content(budget.amount.to_string());
        self.selected_category_index = match self
            .categories
            .iter()
            .position(|(pk, _)| *pk == budget.category)
        {
            Some(index) => index,
            None => {
                self.categories
                    .push((budget.category, label(categories, budget.category)));
                self.categories.len() - 1
            }
        };
        self.editing = Some(budget.clone());
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            BudgetField::Period => BudgetField::Amount,
            BudgetField::Amount => BudgetField::Category,
            BudgetField::Category => BudgetField::Period,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            BudgetField::Period => BudgetField::Category,
            BudgetField::Amount => BudgetField::Period,
            BudgetField::Category => BudgetField::Amount,
        };
    }

    /// Handle a key press while the dialog is open
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match form_navigation(key) {
            Some(FormNav::Action(action)) => return action,
            Some(FormNav::Next) => self.next_field(),
            Some(FormNav::Prev) => self.prev_field(),
            None => match self.focused_field {
                BudgetField::Amount => edit_text(&mut self.amount_input, key),
                BudgetField::Period => match key.code {
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        self.period = self.period.next();
                    }
                    KeyCode::Left | KeyCode::Char('h') => self.period = self.period.prev(),
                    _ => {}
                },
                BudgetField::Category => match key.code {
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

        Ok(match &self.editing {
            Some(original) => {
                let mut budget = original.clone();
                budget.period = self.period;
                budget.amount = amount;
                budget.category = category;
                Intent::UpdateBudget(budget)
            }
            None => Intent::CreateBudget(Budget::new(self.period, category, amount)),
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the budget dialog
pub fn render(frame: &mut Frame, form: &BudgetFormState) {
    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let title = match &form.editing {
        Some(budget) => format!(" Edit Budget #{} ", budget.pk),
        None => " Add Budget ".to_string(),
    };
    let block = dialog_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Period
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    render_selector_field(
        frame,
        chunks[0],
        "Period",
        form.period.label(),
        form.focused_field == BudgetField::Period,
    );

    frame.render_widget(
        form.amount_input
            .clone()
            .focused(form.focused_field == BudgetField::Amount),
        chunks[1],
    );

    let category_name = form
        .categories
        .get(form.selected_category_index)
        .map(|(_, name)| name.as_str())
        .unwrap_or("(no categories)");
    render_selector_field(
        frame,
        chunks[2],
        "Category",
        category_name,
        form.focused_field == BudgetField::Category,
    );

    render_form_footer(frame, chunks[4], chunks[5], form.error_message.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetPk;

    fn categories() -> Vec<Category> {
        let mut food = Category::new("food");
        food.pk = CategoryPk::new(1);
        vec![food]
    }

    #[test]
    fn test_new_budget_defaults_to_month() {
        let mut form = BudgetFormState::new();
        form.init_for_add(&categories());
        form.handle_key(KeyEvent::from(KeyCode::Tab));
        for c in "3000".chars() {
            form.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }

        assert_eq!(
            form.build_intent().unwrap(),
            Intent::CreateBudget(Budget::new(BudgetPeriod::Month, CategoryPk::new(1), 3000))
        );
    }

    #[test]
    fn test_period_selector_cycles() {
        let mut form = BudgetFormState::new();
        form.init_for_add(&categories());
        form.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(form.period, BudgetPeriod::Day);
        form.handle_key(KeyEvent::from(KeyCode::Left));
        form.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(form.period, BudgetPeriod::Week);
    }

    #[test]
    fn test_edit_keeps_key() {
        let mut budget = Budget::new(BudgetPeriod::Week, CategoryPk::new(1), 700);
        budget.pk = BudgetPk::new(3);

        let mut form = BudgetFormState::new();
        form.init_for_edit(&budget, &categories());
        form.handle_key(KeyEvent::from(KeyCode::Right));

        match form.build_intent().unwrap() {
            Intent::UpdateBudget(updated) => {
                assert_eq!(updated.pk, BudgetPk::new(3));
                assert_eq!(updated.period, BudgetPeriod::Month);
                assert_eq!(updated.amount, 700);
            }
            other => panic!("unexpected intent {:?}", other),
        }
    }
}
