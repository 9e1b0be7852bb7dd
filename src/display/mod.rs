//! Display formatting for terminal output
//!
//! Plain-text renderings of the snapshot used by the shell client.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;

pub use budget::format_budget_list;
pub use category::format_category_tree;
pub use expense::{format_expense_list, format_expense_row};
pub use report::format_budget_analysis;
