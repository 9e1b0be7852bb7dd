//! Core data models for Bookkeeper
//!
//! Plain records with identity: categories, expenses and budgets. Each record
//! carries its own primary key, which stays unassigned until a repository
//! stores it.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod period;

pub use budget::Budget;
pub use category::Category;
pub use expense::Expense;
pub use ids::{BudgetPk, CategoryPk, ExpensePk};
pub use period::BudgetPeriod;

use serde::Serialize;
use std::fmt;

/// Largest amount a single expense or budget may carry
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// A record a repository can store
///
/// The serialized form is what predicate filtering compares against, so field
/// names in filters are the serde field names.
pub trait Entity: Clone + Serialize {
    /// The typed primary key of this entity
    type Key: Copy + Eq + Ord + fmt::Debug + fmt::Display + From<u64> + Into<u64>;

    /// Name used in error messages
    const ENTITY_TYPE: &'static str;

    /// Current primary key (zero when not stored yet)
    fn pk(&self) -> Self::Key;

    /// Overwrite the primary key
    fn set_pk(&mut self, pk: Self::Key);
}
