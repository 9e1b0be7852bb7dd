//! Budget display formatting

use crate::config::Settings;
use crate::models::{Budget, Category};
use crate::services::category_tree::label;

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget], categories: &[Category], settings: &Settings) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n\nAdd one with: budget <day|week|month> <amount> <category>\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:5} {:6} {:>10}  {}\n",
        "Key", "Period", "Amount", "Category"
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format!(
            "#{:<4} {:6} {:>10}  {}\n",
            budget.pk,
            budget.period.tag(),
            settings.format_amount(budget.amount),
            label(categories, budget.category)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, BudgetPk, CategoryPk};

    #[test]
    fn test_budget_table() {
        let mut food = Category::new("food");
        food.pk = CategoryPk::new(1);
        let mut budget = Budget::new(BudgetPeriod::Week, food.pk, 700);
        budget.pk = BudgetPk::new(2);

        let output = format_budget_list(&[budget], &[food], &Settings::default());
        let row = output.lines().nth(2).unwrap();
        assert_eq!(row, "#2    week         $700  food");
    }

    #[test]
    fn test_empty_budget_table() {
        let output = format_budget_list(&[], &[], &Settings::default());
        assert!(output.starts_with("No budgets set."));
    }
}
