//! Budget and expense aggregation
//!
//! Both sums are recomputed from the full collections on every change; there
//! is no cached state. Windows are cumulative lookbacks from `now`: an
//! expense from an hour ago counts toward the day, the week and the month.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Budget, BudgetPeriod, Expense};

/// One total per budget period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSums {
    pub day: i64,
    pub week: i64,
    pub month: i64,
}

impl PeriodSums {
    /// Totals as `[daily, weekly, monthly]`
    pub fn to_array(&self) -> [i64; 3] {
        [self.day, self.week, self.month]
    }

    /// Total for one period
    pub fn get(&self, period: BudgetPeriod) -> i64 {
        match period {
            BudgetPeriod::Day => self.day,
            BudgetPeriod::Week => self.week,
            BudgetPeriod::Month => self.month,
        }
    }

    fn add(&mut self, period: BudgetPeriod, amount: i64) {
        let total = match period {
            BudgetPeriod::Day => &mut self.day,
            BudgetPeriod::Week => &mut self.week,
            BudgetPeriod::Month => &mut self.month,
        };
        *total = total.saturating_add(amount);
    }
}

impl From<PeriodSums> for [i64; 3] {
    fn from(sums: PeriodSums) -> Self {
        sums.to_array()
    }
}

/// Sum budget amounts grouped by period
pub fn budget_sums<'a, I>(budgets: I) -> PeriodSums
where
    I: IntoIterator<Item = &'a Budget>,
{
    let mut sums = PeriodSums::default();
    for budget in budgets {
        sums.add(budget.period, budget.amount);
    }
    sums
}

/// Sum expense amounts over the day, week and 30-day month ending at `now`
///
/// An expense counts only when `now - expense_date` is strictly positive, so
/// future-dated expenses (and one dated exactly `now`) are left out.
pub fn expense_sums<'a, I>(expenses: I, now: DateTime<Utc>) -> PeriodSums
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut sums = PeriodSums::default();
    for expense in expenses {
        let age = now - expense.expense_date;
        if age <= Duration::zero() {
            continue;
        }
        for period in BudgetPeriod::all() {
            if age < period.window() {
                sums.add(*period, expense.amount);
            }
        }
    }
    sums
}

/// Spend against budget for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodAnalysis {
    pub period: BudgetPeriod,
    pub spent: i64,
    pub budget: i64,
}

impl PeriodAnalysis {
    /// Budget left (negative when overspent)
    pub fn remaining(&self) -> i64 {
        self.budget - self.spent
    }

    /// Whether spend exceeds a set budget
    pub fn is_over(&self) -> bool {
        self.budget > 0 && self.spent > self.budget
    }
}

/// Spend vs budget for every period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetAnalysis {
    pub budget_sums: PeriodSums,
    pub expense_sums: PeriodSums,
}

impl BudgetAnalysis {
    pub fn new(budget_sums: PeriodSums, expense_sums: PeriodSums) -> Self {
        Self {
            budget_sums,
            expense_sums,
        }
    }

    /// One row per period, shortest first
    pub fn rows(&self) -> Vec<PeriodAnalysis> {
        BudgetPeriod::all()
            .iter()
            .map(|&period| PeriodAnalysis {
                period,
                spent: self.expense_sums.get(period),
                budget: self.budget_sums.get(period),
            })
            .collect()
    }

    /// Whether any period is over budget
    pub fn any_over(&self) -> bool {
        self.rows().iter().any(PeriodAnalysis::is_over)
    }
}
