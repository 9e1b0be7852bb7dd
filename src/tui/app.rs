//! Application state for the TUI
//!
//! The App struct holds everything needed for rendering: the last snapshot
//! the presenter pushed, selections, the open dialog and the status line.
//! It never touches storage; mutations leave it as intents.

use crate::config::Settings;
use crate::models::{Budget, Category, Expense};
use crate::services::category_tree::{children, label, tree_order};
use crate::services::BudgetAnalysis;
use crate::view::Intent;

use super::dialogs::budget::BudgetFormState;
use super::dialogs::category::CategoryFormState;
use super::dialogs::expense::ExpenseFormState;

/// Which tab is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Expenses,
    Categories,
    Budgets,
}

impl ActiveView {
    pub fn all() -> &'static [Self] {
        &[Self::Expenses, Self::Categories, Self::Budgets]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Expenses => "Expenses",
            Self::Categories => "Categories",
            Self::Budgets => "Budgets",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Expenses => 0,
            Self::Categories => 1,
            Self::Budgets => 2,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Expenses => Self::Categories,
            Self::Categories => Self::Budgets,
            Self::Budgets => Self::Expenses,
        }
    }
}

/// A delete waiting for the user to confirm
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub title: String,
    /// Label/value rows describing what goes away
    pub details: Vec<(&'static str, String)>,
    pub note: Option<String>,
    pub intent: Intent,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(PendingDelete),
    Expense,
    Category,
    Budget,
}

/// Main application state
#[derive(Debug, Default)]
pub struct App {
    pub settings: Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,
    pub active_dialog: ActiveDialog,

    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub analysis: BudgetAnalysis,

    pub selected_expense_index: usize,
    /// Index into the category tree order, not store order
    pub selected_category_index: usize,
    pub selected_budget_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    pub expense_form: ExpenseFormState,
    pub category_form: CategoryFormState,
    pub budget_form: BudgetFormState,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub fn next_view(&mut self) {
        self.active_view = self.active_view.next();
    }

    /// Categories in the order the category tab shows them
    pub fn category_rows(&self) -> Vec<(usize, &Category)> {
        tree_order(&self.categories)
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.selected_expense_index)
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.category_rows()
            .get(self.selected_category_index)
            .map(|(_, category)| *category)
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.selected_budget_index)
    }

    fn row_count(&self) -> usize {
        match self.active_view {
            ActiveView::Expenses => self.expenses.len(),
            ActiveView::Categories => self.categories.len(),
            ActiveView::Budgets => self.budgets.len(),
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.active_view {
            ActiveView::Expenses => &mut self.selected_expense_index,
            ActiveView::Categories => &mut self.selected_category_index,
            ActiveView::Budgets => &mut self.selected_budget_index,
        }
    }

    pub fn move_up(&mut self) {
        let index = self.selected_index_mut();
        *index = index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.row_count();
        let index = self.selected_index_mut();
        if *index + 1 < count {
            *index += 1;
        }
    }

    pub fn select_first(&mut self) {
        *self.selected_index_mut() = 0;
    }

    pub fn select_last(&mut self) {
        let count = self.row_count();
        *self.selected_index_mut() = count.saturating_sub(1);
    }

    /// Keep every selection inside its list after the data changed
    pub fn clamp_selection(&mut self) {
        let clamp = |index: usize, len: usize| index.min(len.saturating_sub(1));
        self.selected_expense_index = clamp(self.selected_expense_index, self.expenses.len());
        self.selected_category_index = clamp(self.selected_category_index, self.categories.len());
        self.selected_budget_index = clamp(self.selected_budget_index, self.budgets.len());
    }

    /// Open the add form for the active tab
    pub fn open_add(&mut self) {
        let dialog = match self.active_view {
            ActiveView::Expenses => {
                self.expense_form.init_for_add(&self.categories);
                ActiveDialog::Expense
            }
            ActiveView::Categories => {
                self.category_form.init_for_add(&self.categories);
                ActiveDialog::Category
            }
            ActiveView::Budgets => {
                self.budget_form.init_for_add(&self.categories);
                ActiveDialog::Budget
            }
        };
        self.open_dialog(dialog);
    }

    /// Open the edit form for the selected row
    pub fn open_edit(&mut self) {
        let dialog = match self.active_view {
            ActiveView::Expenses => self.selected_expense().cloned().map(|expense| {
                self.expense_form.init_for_edit(&expense, &self.categories);
                ActiveDialog::Expense
            }),
            ActiveView::Categories => self.selected_category().cloned().map(|category| {
                self.category_form.init_for_edit(&category, &self.categories);
                ActiveDialog::Category
            }),
            ActiveView::Budgets => self.selected_budget().cloned().map(|budget| {
                self.budget_form.init_for_edit(&budget, &self.categories);
                ActiveDialog::Budget
            }),
        };

        match dialog {
            Some(dialog) => self.open_dialog(dialog),
            None => self.set_status("Nothing selected"),
        }
    }

    /// Ask for confirmation before deleting the selected row
    pub fn open_delete(&mut self) {
        let pending = match self.active_view {
            ActiveView::Expenses => self.selected_expense().map(|e| self.expense_delete(e)),
            ActiveView::Categories => self.selected_category().map(|c| self.category_delete(c)),
            ActiveView::Budgets => self.selected_budget().map(|b| self.budget_delete(b)),
        };

        match pending {
            Some(pending) => self.open_dialog(ActiveDialog::Confirm(pending)),
            None => self.set_status("Nothing selected"),
        }
    }

    /// A dispatched intent went through
    pub fn finish(&mut self, description: &str) {
        self.close_dialog();
        self.set_status(format!("Done: {}", description));
    }

    fn expense_delete(&self, expense: &Expense) -> PendingDelete {
        let mut details = vec![
            ("Amount", self.settings.format_amount(expense.amount)),
            ("Category", label(&self.categories, expense.category)),
            (
                "Date",
                expense
                    .expense_date
                    .format(&self.settings.date_format)
                    .to_string(),
            ),
        ];
        if !expense.comment.is_empty() {
            details.push(("Comment", expense.comment.clone()));
        }

        PendingDelete {
            title: format!("Delete expense #{}", expense.pk),
            details,
            note: None,
            intent: Intent::DeleteExpense(expense.pk),
        }
    }

    fn category_delete(&self, category: &Category) -> PendingDelete {
        let expenses = self
            .expenses
            .iter()
            .filter(|e| e.category == category.pk)
            .count();
        let budgets = self
            .budgets
            .iter()
            .filter(|b| b.category == category.pk)
            .count();
        let subcategories = children(&self.categories, category.pk).len();

        PendingDelete {
            title: format!("Delete category #{}", category.pk),
            details: vec![
                ("Name", category.name.clone()),
                ("Subcategories", subcategories.to_string()),
                ("Expenses", expenses.to_string()),
                ("Budgets", budgets.to_string()),
            ],
            note: Some("Expenses, budgets and subcategories are kept.".into()),
            intent: Intent::DeleteCategory(category.pk),
        }
    }

    fn budget_delete(&self, budget: &Budget) -> PendingDelete {
        PendingDelete {
            title: format!("Delete budget #{}", budget.pk),
            details: vec![
                ("Period", budget.period.label().to_string()),
                ("Amount", self.settings.format_amount(budget.amount)),
                ("Category", label(&self.categories, budget.category)),
            ],
            note: None,
            intent: Intent::DeleteBudget(budget.pk),
        }
    }

    /// Show a rejected intent in the open form, or on the status line
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self.active_dialog {
            ActiveDialog::Expense => self.expense_form.set_error(message),
            ActiveDialog::Category => self.category_form.set_error(message),
            ActiveDialog::Budget => self.budget_form.set_error(message),
            _ => {
                self.close_dialog();
                self.set_status(message);
            }
        }
    }
}
