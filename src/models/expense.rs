//! Expense model
//!
//! A single spend recorded against a category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryPk, ExpensePk};
use super::{Entity, MAX_AMOUNT};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Primary key, assigned by the repository
    #[serde(default)]
    pub pk: ExpensePk,

    /// Amount spent (whole currency units)
    pub amount: i64,

    /// The category this expense belongs to
    pub category: CategoryPk,

    /// Free-form comment
    #[serde(default)]
    pub comment: String,

    /// When the money was spent
    pub expense_date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated now
    pub fn new(amount: i64, category: CategoryPk) -> Self {
        Self::dated(amount, category, Utc::now())
    }

    /// Create a new expense with an explicit date
    pub fn dated(amount: i64, category: CategoryPk, expense_date: DateTime<Utc>) -> Self {
        Self {
            pk: ExpensePk::UNASSIGNED,
            amount,
            category,
            comment: String::new(),
            expense_date,
        }
    }

    /// Attach a comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Validate the expense on its own (the category reference is checked by the presenter)
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount <= 0 {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl Entity for Expense {
    type Key = ExpensePk;
    const ENTITY_TYPE: &'static str = "Expense";

    fn pk(&self) -> ExpensePk {
        self.pk
    }

    fn set_pk(&mut self, pk: ExpensePk) {
        self.pk = pk;
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} (category {})",
            self.pk,
            self.expense_date.format("%Y-%m-%d %H:%M"),
            self.amount,
            self.category
        )?;
        if !self.comment.is_empty() {
            write!(f, " - {}", self.comment)?;
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(i64),
    AmountTooLarge(i64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Expense amount {} exceeds the limit of {}", amount, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
