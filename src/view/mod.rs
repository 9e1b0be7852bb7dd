//! View contract
//!
//! A view renders snapshots pushed by the presenter and raises mutation
//! intents through handlers the presenter registered on it. The presenter
//! never looks inside a view; it only calls this trait.
//!
//! Handlers receive the view that raised the intent, so the presenter can
//! push the fresh snapshot straight back into it while the view's own event
//! loop is running.

use std::fmt;
use std::rc::Rc;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Budget, BudgetPk, Category, CategoryPk, Expense, ExpensePk};
use crate::services::{BudgetAnalysis, PeriodSums};

/// Full copy of the model handed to the view after every change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub budgets: Vec<Budget>,
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub budget_sums: PeriodSums,
    pub expense_sums: PeriodSums,
}

impl Snapshot {
    /// Spend vs budget derived from the two sums
    pub fn analysis(&self) -> BudgetAnalysis {
        BudgetAnalysis::new(self.budget_sums, self.expense_sums)
    }
}

/// Callback the presenter registers for one kind of mutation
pub type Handler<T> = Rc<dyn Fn(&mut dyn View, T) -> BookkeeperResult<()>>;

/// The nine mutation handlers a view can invoke
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    pub expense_create: Option<Handler<Expense>>,
    pub expense_update: Option<Handler<Expense>>,
    pub expense_delete: Option<Handler<ExpensePk>>,
    pub category_create: Option<Handler<Category>>,
    pub category_update: Option<Handler<Category>>,
    pub category_delete: Option<Handler<CategoryPk>>,
    pub budget_create: Option<Handler<Budget>>,
    pub budget_update: Option<Handler<Budget>>,
    pub budget_delete: Option<Handler<BudgetPk>>,
}

impl HandlerRegistry {
    /// Number of registered handlers
    pub fn registered_count(&self) -> usize {
        [
            self.expense_create.is_some(),
            self.expense_update.is_some(),
            self.expense_delete.is_some(),
            self.category_create.is_some(),
            self.category_update.is_some(),
            self.category_delete.is_some(),
            self.budget_create.is_some(),
            self.budget_update.is_some(),
            self.budget_delete.is_some(),
        ]
        .iter()
        .filter(|registered| **registered)
        .count()
    }

    /// Whether every intent has a handler
    pub fn is_complete(&self) -> bool {
        self.registered_count() == 9
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("registered", &self.registered_count())
            .finish()
    }
}

/// Everything a concrete UI must provide
pub trait View {
    /// Show expenses; categories are passed to resolve names
    fn show_expenses(&mut self, expenses: &[Expense], categories: &[Category]);

    /// Show the category tree
    fn show_categories(&mut self, categories: &[Category]);

    /// Show budgets; categories are passed to resolve names
    fn show_budgets(&mut self, budgets: &[Budget], categories: &[Category]);

    /// Show spend vs budget per period
    fn show_budget_analysis(&mut self, analysis: &BudgetAnalysis);

    /// Replace everything the view shows with the snapshot
    fn update_data(&mut self, snapshot: &Snapshot) {
        self.show_expenses(&snapshot.expenses, &snapshot.categories);
        self.show_categories(&snapshot.categories);
        self.show_budgets(&snapshot.budgets, &snapshot.categories);
        self.show_budget_analysis(&snapshot.analysis());
    }

    /// Enter the view's event loop; returns when the user closes the UI
    fn run(&mut self) -> BookkeeperResult<()>;

    fn handlers(&self) -> &HandlerRegistry;

    fn handlers_mut(&mut self) -> &mut HandlerRegistry;

    fn add_expense_create_handler(&mut self, handler: Handler<Expense>) {
        self.handlers_mut().expense_create = Some(handler);
    }

    fn add_expense_update_handler(&mut self, handler: Handler<Expense>) {
        self.handlers_mut().expense_update = Some(handler);
    }

    fn add_expense_delete_handler(&mut self, handler: Handler<ExpensePk>) {
        self.handlers_mut().expense_delete = Some(handler);
    }

    fn add_category_create_handler(&mut self, handler: Handler<Category>) {
        self.handlers_mut().category_create = Some(handler);
    }

    fn add_category_update_handler(&mut self, handler: Handler<Category>) {
        self.handlers_mut().category_update = Some(handler);
    }

    fn add_category_delete_handler(&mut self, handler: Handler<CategoryPk>) {
        self.handlers_mut().category_delete = Some(handler);
    }

    fn add_budget_create_handler(&mut self, handler: Handler<Budget>) {
        self.handlers_mut().budget_create = Some(handler);
    }

    fn add_budget_update_handler(&mut self, handler: Handler<Budget>) {
        self.handlers_mut().budget_update = Some(handler);
    }

    fn add_budget_delete_handler(&mut self, handler: Handler<BudgetPk>) {
        self.handlers_mut().budget_delete = Some(handler);
    }
}

/// A mutation a user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CreateExpense(Expense),
    UpdateExpense(Expense),
    DeleteExpense(ExpensePk),
    CreateCategory(Category),
    UpdateCategory(Category),
    DeleteCategory(CategoryPk),
    CreateBudget(Budget),
    UpdateBudget(Budget),
    DeleteBudget(BudgetPk),
}

impl Intent {
    /// Short description for logs and error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Self::CreateExpense(_) => "create expense",
            Self::UpdateExpense(_) => "update expense",
            Self::DeleteExpense(_) => "delete expense",
            Self::CreateCategory(_) => "create category",
            Self::UpdateCategory(_) => "update category",
            Self::DeleteCategory(_) => "delete category",
            Self::CreateBudget(_) => "create budget",
            Self::UpdateBudget(_) => "update budget",
            Self::DeleteBudget(_) => "delete budget",
        }
    }
}

fn required<T>(slot: &Option<Handler<T>>, intent: &str) -> BookkeeperResult<Handler<T>> {
    slot.clone()
        .ok_or_else(|| BookkeeperError::View(format!("No handler registered for {}", intent)))
}

/// Invoke the handler registered for an intent
pub fn dispatch(view: &mut dyn View, intent: Intent) -> BookkeeperResult<()> {
    let name = intent.describe();
    match intent {
        Intent::CreateExpense(expense) => {
            let handler = required(&view.handlers().expense_create, name)?;
            handler(view, expense)
        }
        Intent::UpdateExpense(expense) => {
            let handler = required(&view.handlers().expense_update, name)?;
            handler(view, expense)
        }
        Intent::DeleteExpense(pk) => {
            let handler = required(&view.handlers().expense_delete, name)?;
            handler(view, pk)
        }
        Intent::CreateCategory(category) => {
            let handler = required(&view.handlers().category_create, name)?;
            handler(view, category)
        }
        Intent::UpdateCategory(category) => {
            let handler = required(&view.handlers().category_update, name)?;
            handler(view, category)
        }
        Intent::DeleteCategory(pk) => {
            let handler = required(&view.handlers().category_delete, name)?;
            handler(view, pk)
        }
        Intent::CreateBudget(budget) => {
            let handler = required(&view.handlers().budget_create, name)?;
            handler(view, budget)
        }
        Intent::UpdateBudget(budget) => {
            let handler = required(&view.handlers().budget_update, name)?;
            handler(view, budget)
        }
        Intent::DeleteBudget(pk) => {
            let handler = required(&view.handlers().budget_delete, name)?;
            handler(view, pk)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct NullView {
        handlers: HandlerRegistry,
        shown: Vec<&'static str>,
    }

    impl View for NullView {
        fn show_expenses(&mut self, _: &[Expense], _: &[Category]) {
            self.shown.push("expenses");
        }
        fn show_categories(&mut self, _: &[Category]) {
            self.shown.push("categories");
        }
        fn show_budgets(&mut self, _: &[Budget], _: &[Category]) {
            self.shown.push("budgets");
        }
        fn show_budget_analysis(&mut self, _: &BudgetAnalysis) {
            self.shown.push("analysis");
        }
        fn run(&mut self) -> BookkeeperResult<()> {
            Ok(())
        }
        fn handlers(&self) -> &HandlerRegistry {
            &self.handlers
        }
        fn handlers_mut(&mut self) -> &mut HandlerRegistry {
            &mut self.handlers
        }
    }

    #[test]
    fn test_update_data_fans_out() {
        let mut view = NullView::default();
        view.update_data(&Snapshot::default());
        assert_eq!(
            view.shown,
            vec!["expenses", "categories", "budgets", "analysis"]
        );
    }

    #[test]
    fn test_dispatch_without_handler_fails() {
        let mut view = NullView::default();
        let err = dispatch(&mut view, Intent::DeleteExpense(ExpensePk::new(1))).unwrap_err();
        assert!(matches!(err, BookkeeperError::View(_)));
        assert!(err.to_string().contains("delete expense"));
    }

    #[test]
    fn test_dispatch_reaches_registered_handler() {
        let mut view = NullView::default();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in_handler = Rc::clone(&seen);
        view.add_budget_delete_handler(Rc::new(move |view: &mut dyn View, pk: BudgetPk| {
            seen_in_handler.set(pk.get());
            view.update_data(&Snapshot::default());
            Ok(())
        }));
        assert_eq!(view.handlers().registered_count(), 1);
        assert!(!view.handlers().is_complete());

        dispatch(&mut view, Intent::DeleteBudget(BudgetPk::new(5))).unwrap();
        assert_eq!(seen.get(), 5);
        assert_eq!(view.shown.len(), 4);
    }
}
