//! Line-oriented client
//!
//! Reads commands from any `BufRead`, writes listings to any `Write`. The
//! snapshot pushed by the presenter is cached and printed on request.

pub mod command;

use std::io::{BufRead, Write};

use tracing::warn;

use crate::config::Settings;
use crate::display::{
    format_budget_analysis, format_budget_list, format_category_tree, format_expense_list,
    format_expense_row,
};
use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{Budget, BudgetPk, Category, CategoryPk, Expense, ExpensePk};
use crate::services::category_tree::find;
use crate::services::BudgetAnalysis;
use crate::view::{dispatch, HandlerRegistry, Intent, View};

pub use command::{parse_command, Command, DeleteTarget, Listing, HELP};

/// Whether the read loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Shell client state
pub struct ShellView<R, W> {
    input: R,
    output: W,
    settings: Settings,
    prompt: bool,
    handlers: HandlerRegistry,
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    analysis: BudgetAnalysis,
}

impl<R: BufRead, W: Write> ShellView<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
            prompt: false,
            handlers: HandlerRegistry::default(),
            expenses: Vec::new(),
            categories: Vec::new(),
            budgets: Vec::new(),
            analysis: BudgetAnalysis::default(),
        }
    }

    /// Print a `> ` prompt before each read (interactive terminals)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Parse and execute one line of input
    pub fn execute_line(&mut self, line: &str) -> BookkeeperResult<LoopControl> {
        match parse_command(line)? {
            Some(command) => self.execute(command),
            None => Ok(LoopControl::Continue),
        }
    }

    fn execute(&mut self, command: Command) -> BookkeeperResult<LoopControl> {
        match command {
            Command::List(listing) => {
                let text = self.render(listing);
                write!(self.output, "{}", text)?;
            }
            Command::AddExpense {
                amount,
                category,
                comment,
            } => {
                let category = self.resolve_category(&category)?;
                let expense = Expense::new(amount, category).with_comment(comment);
                dispatch(self, Intent::CreateExpense(expense))?;
                if let Some(added) = self.expenses.last() {
                    let row = format_expense_row(added, &self.categories, &self.settings);
                    writeln!(self.output, "Recorded {}", row)?;
                }
            }
            Command::AddBudget {
                period,
                amount,
                category,
            } => {
                let category = self.resolve_category(&category)?;
                dispatch(self, Intent::CreateBudget(Budget::new(period, category, amount)))?;
                if let Some(added) = self.budgets.last() {
                    writeln!(self.output, "Added budget #{}", added.pk)?;
                }
            }
            Command::AddCategory { name, parent } => {
                let parent = parent
                    .map(|parent| self.resolve_category(&parent))
                    .transpose()?;
                dispatch(self, Intent::CreateCategory(Category::with_parent(name, parent)))?;
                if let Some(added) = self.categories.last() {
                    writeln!(self.output, "Added category #{} {}", added.pk, added.name)?;
                }
            }
            Command::EditExpense { pk, amount } => {
                let mut expense = self.cached_expense(pk)?;
                expense.amount = amount;
                dispatch(self, Intent::UpdateExpense(expense))?;
                writeln!(self.output, "Updated expense #{}", pk)?;
            }
            Command::EditBudget { pk, amount } => {
                let mut budget = self.cached_budget(pk)?;
                budget.amount = amount;
                dispatch(self, Intent::UpdateBudget(budget))?;
                writeln!(self.output, "Updated budget #{}", pk)?;
            }
            Command::RenameCategory { pk, name } => {
                let mut category = self.cached_category(pk)?;
                category.name = name;
                dispatch(self, Intent::UpdateCategory(category))?;
                writeln!(self.output, "Renamed category #{}", pk)?;
            }
            Command::MoveCategory { pk, parent } => {
                let mut category = self.cached_category(pk)?;
                category.parent = parent
                    .map(|parent| self.resolve_category(&parent))
                    .transpose()?;
                dispatch(self, Intent::UpdateCategory(category))?;
                writeln!(self.output, "Moved category #{}", pk)?;
            }
            Command::Delete(target) => {
                let (intent, what) = match target {
                    DeleteTarget::Expense(pk) => (Intent::DeleteExpense(pk), format!("expense #{}", pk)),
                    DeleteTarget::Budget(pk) => (Intent::DeleteBudget(pk), format!("budget #{}", pk)),
                    DeleteTarget::Category(pk) => {
                        (Intent::DeleteCategory(pk), format!("category #{}", pk))
                    }
                };
                dispatch(self, intent)?;
                writeln!(self.output, "Deleted {}", what)?;
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(LoopControl::Exit),
        }
        Ok(LoopControl::Continue)
    }

    fn render(&self, listing: Listing) -> String {
        match listing {
            Listing::Expenses => format_expense_list(&self.expenses, &self.categories, &self.settings),
            Listing::Categories => format_category_tree(&self.categories),
            Listing::Budgets => format_budget_list(&self.budgets, &self.categories, &self.settings),
            Listing::Analysis => format_budget_analysis(&self.analysis, &self.settings),
        }
    }

    /// Resolve `#key` or a category name (case-insensitive, must be unique)
    fn resolve_category(&self, reference: &str) -> BookkeeperResult<CategoryPk> {
        if reference.starts_with('#') {
            return reference
                .parse()
                .map_err(|_| BookkeeperError::Validation(format!("Invalid key '{}'", reference)));
        }

        let wanted = reference.to_lowercase();
        let matches: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase() == wanted)
            .collect();

        match matches.as_slice() {
            [single] => Ok(single.pk),
            [] => Err(BookkeeperError::Validation(format!(
                "Unknown category '{}'",
                reference
            ))),
            _ => Err(BookkeeperError::Validation(format!(
                "Category name '{}' is ambiguous; use its key, e.g. #{}",
                reference, matches[0].pk
            ))),
        }
    }

    fn cached_expense(&self, pk: ExpensePk) -> BookkeeperResult<Expense> {
        self.expenses
            .iter()
            .find(|e| e.pk == pk)
            .cloned()
            .ok_or_else(|| BookkeeperError::not_found("Expense", pk))
    }

    fn cached_budget(&self, pk: BudgetPk) -> BookkeeperResult<Budget> {
        self.budgets
            .iter()
            .find(|b| b.pk == pk)
            .cloned()
            .ok_or_else(|| BookkeeperError::not_found("Budget", pk))
    }

    fn cached_category(&self, pk: CategoryPk) -> BookkeeperResult<Category> {
        find(&self.categories, pk)
            .cloned()
            .ok_or_else(|| BookkeeperError::not_found("Category", pk))
    }
}

impl<R: BufRead, W: Write> View for ShellView<R, W> {
    fn show_expenses(&mut self, expenses: &[Expense], _categories: &[Category]) {
        self.expenses = expenses.to_vec();
    }

    fn show_categories(&mut self, categories: &[Category]) {
        self.categories = categories.to_vec();
    }

    fn show_budgets(&mut self, budgets: &[Budget], _categories: &[Category]) {
        self.budgets = budgets.to_vec();
    }

    fn show_budget_analysis(&mut self, analysis: &BudgetAnalysis) {
        self.analysis = *analysis;
    }

    fn run(&mut self) -> BookkeeperResult<()> {
        writeln!(self.output, "Bookkeeper shell. Type 'help' for commands.")?;

        let mut line = String::new();
        loop {
            if self.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match self.execute_line(&line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => {
                    warn!(error = %err, "Command rejected");
                    writeln!(self.output, "error: {}", err)?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Presenter;
    use crate::storage::{initialize_storage, Storage, DEMO_CATEGORY_OUTLINE};
    use std::io::Cursor;
    use std::rc::Rc;

    type TestShell = ShellView<Cursor<Vec<u8>>, Vec<u8>>;

    fn run_script(script: &str) -> String {
        let storage = Storage::new();
        initialize_storage(&storage, DEMO_CATEGORY_OUTLINE).unwrap();
        let view: TestShell = ShellView::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            Settings::default(),
        );
        let mut presenter = Presenter::new(Rc::new(storage), view).unwrap();
        presenter.run().unwrap();
        String::from_utf8(presenter.view().output().clone()).unwrap()
    }

    #[test]
    fn test_categories_listing_shows_seeded_tree() {
        let output = run_script("categories\n");
        assert!(output.contains("#1    food"));
        assert!(output.contains("    #3    raw meat"));
        assert!(output.contains("#7    clothes"));
    }

    #[test]
    fn test_record_and_list_expense() {
        let output = run_script("250 \"meat products\" ; weekly shop\nexpenses\n");
        assert!(output.contains("Recorded #1"));
        assert!(output.contains("$250"));
        assert!(output.contains("meat products"));
        assert!(output.contains("weekly shop"));
    }

    #[test]
    fn test_rejected_command_keeps_loop_alive() {
        let output = run_script("0 food\n10 nowhere\nbudgets\n");
        assert!(output.contains("error: Validation error"));
        assert!(output.contains("Unknown category 'nowhere'"));
        assert!(output.contains("No budgets set."));
    }

    #[test]
    fn test_budget_and_analysis() {
        let output = run_script("budget day 100 food\nbudget week 700 books\nanalysis\n");
        assert!(output.contains("Added budget #1"));
        assert!(output.contains("Added budget #2"));
        assert!(output.contains("$100"));
        assert!(output.contains("$700"));
    }

    #[test]
    fn test_delete_missing_expense_reports_not_found() {
        let output = run_script("delete expense 5\n");
        assert!(output.contains("error: Expense not found: 5"));
    }

    #[test]
    fn test_edit_expense_amount() {
        let output = run_script("20 books\nedit expense 1 35\nexpenses\n");
        assert!(output.contains("Updated expense #1"));
        assert!(output.contains("$35"));
    }

    #[test]
    fn test_category_cycle_reported() {
        let output = run_script("move category 1 under meat\ncategories\n");
        assert!(output.contains("would create a cycle"));
        assert!(output.contains("#1    food"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let output = run_script("quit\ncategories\n");
        assert!(!output.contains("food"));
    }

    #[test]
    fn test_deleted_category_shows_placeholder() {
        let output = run_script("30 clothes\ndelete category 7\nexpenses\n");
        assert!(output.contains("Deleted category #7"));
        assert!(output.contains("<deleted #7>"));
    }

    #[test]
    fn test_expense_for_category_key() {
        let output = run_script("250 #3\nexpenses\n");
        assert!(output.contains("Recorded #1"));
        assert!(output.contains("raw meat"));
        assert!(!output.contains("error:"));
    }

    #[test]
    fn test_key_references_in_every_command() {
        let output = run_script(
            "40 #6\nedit expense #1 45\nbudget month 900 #1\nedit budget #1 950\n\
             delete expense #1\nexpenses\nbudgets\n",
        );
        assert!(!output.contains("error:"));
        assert!(output.contains("Updated expense #1"));
        assert!(output.contains("Updated budget #1"));
        assert!(output.contains("Deleted expense #1"));
        assert!(output.contains("$950"));
    }

    #[test]
    fn test_rename_and_move_category() {
        let output = run_script(
            "rename category #7 garments\nmove category #4 under #1\nmove category 5\ncategories\n",
        );
        assert!(!output.contains("error:"));
        assert!(output.contains("Renamed category #7"));
        assert!(output.contains("Moved category #4"));
        assert!(output.contains("Moved category #5"));
        assert!(output.contains("garments"));
        assert!(output.contains("\n  #4    meat products"));
        assert!(output.contains("\n#5    sweets"));
    }

    #[test]
    fn test_quoted_name_containing_under_with_parent() {
        let output = run_script("category \"down under\" under #6\ncategories\n");
        assert!(!output.contains("error:"));
        assert!(output.contains("Added category #8 down under"));
        assert!(output.contains("\n  #8    down under"));
    }
}
