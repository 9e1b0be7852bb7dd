//! Presenter
//!
//! Mediates between the repositories and a view. Every mutation handler
//! validates its input, performs exactly one repository operation, then
//! pushes a complete fresh snapshot into the view. A failing handler
//! returns before the resync, so the view never shows half-applied state.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Budget, BudgetPk, Category, CategoryPk, Expense, ExpensePk};
use crate::services::category_tree::would_create_cycle;
use crate::services::{budget_sums, expense_sums};
use crate::storage::{Repository, Storage};
use crate::view::{Handler, Snapshot, View};

/// Source of the current time used for expense windows
pub type Clock = Rc<dyn Fn() -> DateTime<Utc>>;

/// Shared state captured by every registered handler
struct Core {
    storage: Rc<Storage>,
    clock: Clock,
}

impl Core {
    fn snapshot(&self) -> BookkeeperResult<Snapshot> {
        let budgets = self.storage.budgets.get_all(None)?;
        let categories = self.storage.categories.get_all(None)?;
        let expenses = self.storage.expenses.get_all(None)?;
        let now = (self.clock)();

        Ok(Snapshot {
            budget_sums: budget_sums(&budgets),
            expense_sums: expense_sums(&expenses, now),
            budgets,
            categories,
            expenses,
        })
    }

    fn resync(&self, view: &mut dyn View) -> BookkeeperResult<()> {
        let snapshot = self.snapshot()?;
        debug!(
            expenses = snapshot.expenses.len(),
            categories = snapshot.categories.len(),
            budgets = snapshot.budgets.len(),
            "Pushing snapshot to view"
        );
        view.update_data(&snapshot);
        Ok(())
    }

    fn require_category(&self, pk: CategoryPk) -> BookkeeperResult<()> {
        if self.storage.categories.contains(pk)? {
            Ok(())
        } else {
            Err(BookkeeperError::Validation(format!(
                "Category {} does not exist",
                pk
            )))
        }
    }

    fn validate_expense(&self, expense: &Expense) -> BookkeeperResult<()> {
        expense
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;
        self.require_category(expense.category)
    }

    fn validate_budget(&self, budget: &Budget) -> BookkeeperResult<()> {
        budget
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;
        self.require_category(budget.category)
    }

    fn validate_category(&self, category: &Category) -> BookkeeperResult<()> {
        category
            .validate()
            .map_err(|e| BookkeeperError::Validation(e.to_string()))?;

        let Some(parent) = category.parent else {
            return Ok(());
        };
        self.require_category(parent)?;

        if category.pk.is_assigned() {
            let categories = self.storage.categories.get_all(None)?;
            if would_create_cycle(&categories, category.pk, parent) {
                return Err(BookkeeperError::Validation(format!(
                    "Moving '{}' under category {} would create a cycle",
                    category.name, parent
                )));
            }
        }
        Ok(())
    }

    fn create_expense(&self, mut expense: Expense) -> BookkeeperResult<()> {
        self.validate_expense(&expense)?;
        let pk = self.storage.expenses.add(&mut expense)?;
        debug!(pk = %pk, amount = expense.amount, "Created expense");
        Ok(())
    }

    fn update_expense(&self, expense: Expense) -> BookkeeperResult<()> {
        self.validate_expense(&expense)?;
        let pk = expense.pk;
        self.storage.expenses.update(expense)?;
        debug!(pk = %pk, "Updated expense");
        Ok(())
    }

    fn delete_expense(&self, pk: ExpensePk) -> BookkeeperResult<()> {
        self.storage.expenses.delete(pk)?;
        debug!(pk = %pk, "Deleted expense");
        Ok(())
    }

    fn create_category(&self, mut category: Category) -> BookkeeperResult<()> {
        self.validate_category(&category)?;
        let pk = self.storage.categories.add(&mut category)?;
        debug!(pk = %pk, name = %category.name, "Created category");
        Ok(())
    }

    fn update_category(&self, category: Category) -> BookkeeperResult<()> {
        self.validate_category(&category)?;
        let pk = category.pk;
        self.storage.categories.update(category)?;
        debug!(pk = %pk, "Updated category");
        Ok(())
    }

    // Expenses and budgets that reference the category are left in place.
    fn delete_category(&self, pk: CategoryPk) -> BookkeeperResult<()> {
        self.storage.categories.delete(pk)?;
        debug!(pk = %pk, "Deleted category");
        Ok(())
    }

    fn create_budget(&self, mut budget: Budget) -> BookkeeperResult<()> {
        self.validate_budget(&budget)?;
        let pk = self.storage.budgets.add(&mut budget)?;
        debug!(pk = %pk, period = %budget.period, "Created budget");
        Ok(())
    }

    fn update_budget(&self, budget: Budget) -> BookkeeperResult<()> {
        self.validate_budget(&budget)?;
        let pk = budget.pk;
        self.storage.budgets.update(budget)?;
        debug!(pk = %pk, "Updated budget");
        Ok(())
    }

    fn delete_budget(&self, pk: BudgetPk) -> BookkeeperResult<()> {
        self.storage.budgets.delete(pk)?;
        debug!(pk = %pk, "Deleted budget");
        Ok(())
    }
}

/// Wrap a single repository operation as a view handler that resyncs on success
fn wire<T: 'static>(core: &Rc<Core>, op: fn(&Core, T) -> BookkeeperResult<()>) -> Handler<T> {
    let core = Rc::clone(core);
    Rc::new(move |view: &mut dyn View, item: T| {
        op(&core, item)?;
        core.resync(view)
    })
}

/// Connects a store to one view
pub struct Presenter<V: View> {
    core: Rc<Core>,
    view: V,
}

impl<V: View> Presenter<V> {
    /// Wire a view to the store using the system clock
    pub fn new(storage: Rc<Storage>, view: V) -> BookkeeperResult<Self> {
        let clock: Clock = Rc::new(Utc::now);
        Self::with_clock(storage, view, clock)
    }

    /// Wire a view to the store with an explicit time source
    ///
    /// The view receives the initial snapshot before any handler is
    /// registered.
    pub fn with_clock(storage: Rc<Storage>, view: V, clock: Clock) -> BookkeeperResult<Self> {
        let mut presenter = Self {
            core: Rc::new(Core { storage, clock }),
            view,
        };
        presenter.core.resync(&mut presenter.view)?;
        presenter.register_handlers();
        info!("Presenter wired to view");
        Ok(presenter)
    }

    fn register_handlers(&mut self) {
        let core = &self.core;
        let view = &mut self.view;

        view.add_expense_create_handler(wire(core, Core::create_expense));
        view.add_expense_update_handler(wire(core, Core::update_expense));
        view.add_expense_delete_handler(wire(core, Core::delete_expense));
        view.add_category_create_handler(wire(core, Core::create_category));
        view.add_category_update_handler(wire(core, Core::update_category));
        view.add_category_delete_handler(wire(core, Core::delete_category));
        view.add_budget_create_handler(wire(core, Core::create_budget));
        view.add_budget_update_handler(wire(core, Core::update_budget));
        view.add_budget_delete_handler(wire(core, Core::delete_budget));
    }

    /// Hand control to the view's event loop
    pub fn run(&mut self) -> BookkeeperResult<()> {
        self.view.run()
    }

    /// Current state of the store, as the view would receive it
    pub fn snapshot(&self) -> BookkeeperResult<Snapshot> {
        self.core.snapshot()
    }

    pub fn storage(&self) -> &Storage {
        &self.core.storage
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
