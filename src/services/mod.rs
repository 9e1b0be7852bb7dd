//! Service layer for Bookkeeper
//!
//! Pure domain logic on top of the models: building the category tree from
//! an outline and computing period sums.

pub mod aggregation;
pub mod category_tree;

pub use aggregation::{budget_sums, expense_sums, BudgetAnalysis, PeriodAnalysis, PeriodSums};
pub use category_tree::{build_category_tree, parse_outline, OutlineEntry};
