//! Budget model
//!
//! A spend limit for one category over one period.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetPk, CategoryPk};
use super::period::BudgetPeriod;
use super::{Entity, MAX_AMOUNT};

/// A spend limit for a category over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Primary key, assigned by the repository
    #[serde(default)]
    pub pk: BudgetPk,

    /// The period the limit applies to
    pub period: BudgetPeriod,

    /// The category this budget is for
    pub category: CategoryPk,

    /// Spend limit for the period
    pub amount: i64,
}

impl Budget {
    /// Create a new budget
    pub fn new(period: BudgetPeriod, category: CategoryPk, amount: i64) -> Self {
        Self {
            pk: BudgetPk::UNASSIGNED,
            period,
            category,
            amount,
        }
    }

    /// Validate the budget on its own (the category reference is checked by the presenter)
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount <= 0 {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl Entity for Budget {
    type Key = BudgetPk;
    const ENTITY_TYPE: &'static str = "Budget";

    fn pk(&self) -> BudgetPk {
        self.pk
    }

    fn set_pk(&mut self, pk: BudgetPk) {
        self.pk = pk;
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} per {} (category {})",
            self.pk, self.amount, self.period, self.category
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(i64),
    AmountTooLarge(i64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Budget amount {} exceeds the limit of {}", amount, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(BudgetPeriod::Week, CategoryPk::new(1), 700);
        assert_eq!(budget.period, BudgetPeriod::Week);
        assert_eq!(budget.amount, 700);
        assert!(!budget.pk.is_assigned());
    }

    #[test]
    fn test_validation() {
        assert!(Budget::new(BudgetPeriod::Day, CategoryPk::new(1), 100)
            .validate()
            .is_ok());
        assert_eq!(
            Budget::new(BudgetPeriod::Day, CategoryPk::new(1), 0).validate(),
            Err(BudgetValidationError::NonPositiveAmount(0))
        );
        assert_eq!(
            Budget::new(BudgetPeriod::Day, CategoryPk::new(1), MAX_AMOUNT + 1).validate(),
            Err(BudgetValidationError::AmountTooLarge(MAX_AMOUNT + 1))
        );
    }

    #[test]
    fn test_period_serializes_as_tag() {
        let budget = Budget::new(BudgetPeriod::Month, CategoryPk::new(2), 3000);
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["period"], "month");
        assert_eq!(value["category"], 2);
    }
}
