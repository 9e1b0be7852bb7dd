//! Expense display formatting

use crate::config::Settings;
use crate::models::{Category, Expense};
use crate::services::category_tree::label;

use super::report::truncate;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, categories: &[Category], settings: &Settings) -> String {
    let row = format!(
        "#{:<4} {:16} {:>10}  {:20}",
        expense.pk,
        expense.expense_date.format(&settings.date_format).to_string(),
        settings.format_amount(expense.amount),
        truncate(&label(categories, expense.category), 20),
    );

    if expense.comment.is_empty() {
        row.trim_end().to_string()
    } else {
        format!("{}  {}", row, expense.comment)
    }
}

/// Format expenses as a register, newest last
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &[Category],
    settings: &Settings,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:5} {:16} {:>10}  {:20}  {}\n",
        "Key", "Date", "Amount", "Category", "Comment"
    ));
    output.push_str(&"-".repeat(66));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, categories, settings));
        output.push('\n');
    }

    output
}
