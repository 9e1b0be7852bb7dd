//! Budget period representation
//!
//! Budgets are set for one of three fixed lookback windows. A "month" is a
//! flat 30-day window, not a calendar month.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BookkeeperError;

/// The period a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Day,
    Week,
    Month,
}

impl BudgetPeriod {
    /// All periods, shortest first
    pub fn all() -> &'static [Self] {
        &[Self::Day, Self::Week, Self::Month]
    }

    /// The serialized tag of this period
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    /// Length of the lookback window for this period
    pub fn window(&self) -> Duration {
        match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }

    /// Cycle to the next period (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::Day => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::Day,
        }
    }

    /// Cycle to the previous period (wraps around)
    pub fn prev(&self) -> Self {
        match self {
            Self::Day => Self::Month,
            Self::Week => Self::Day,
            Self::Month => Self::Week,
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for BudgetPeriod {
    type Err = BookkeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "день" => Ok(Self::Day),
            "week" | "weekly" | "неделя" => Ok(Self::Week),
            "month" | "monthly" | "месяц" => Ok(Self::Month),
            other => Err(BookkeeperError::Validation(format!(
                "Unknown budget period '{}' (expected day, week or month)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_tags() {
        assert_eq!("day".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Day);
        assert_eq!("Week".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Week);
        assert_eq!(" MONTH ".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Month);
    }

    #[test]
    fn test_parse_source_locale_tags() {
        assert_eq!("день".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Day);
        assert_eq!("неделя".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Week);
        assert_eq!("Месяц".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Month);
    }

    #[test]
    fn test_unknown_period_is_validation_error() {
        let err = "fortnight".parse::<BudgetPeriod>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_month_is_thirty_days() {
        assert_eq!(BudgetPeriod::Month.window(), Duration::days(30));
        assert_eq!(BudgetPeriod::Week.window(), Duration::days(7));
        assert_eq!(BudgetPeriod::Day.window(), Duration::days(1));
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&BudgetPeriod::Week).unwrap();
        assert_eq!(json, "\"week\"");
        let parsed: BudgetPeriod = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(parsed, BudgetPeriod::Month);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(BudgetPeriod::Month.next(), BudgetPeriod::Day);
        assert_eq!(BudgetPeriod::Day.prev(), BudgetPeriod::Month);
    }
}
