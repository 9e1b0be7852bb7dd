//! Strongly-typed primary keys for all entity types
//!
//! Keys are assigned by the repository on insert. A key of zero means the
//! entity has not been stored yet. Using newtype wrappers prevents mixing up
//! an expense key with a category key at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate primary key newtype wrappers
macro_rules! define_pk {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// The key carried by an entity that has not been stored yet
            pub const UNASSIGNED: Self = Self(0);

            /// Wrap a raw key
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw key
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Whether the repository has assigned this key
            pub const fn is_assigned(self) -> bool {
                self.0 != 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(pk: $name) -> Self {
                pk.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix('#').unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_pk!(CategoryPk);
define_pk!(ExpensePk);
define_pk!(BudgetPk);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_is_default() {
        assert_eq!(ExpensePk::default(), ExpensePk::UNASSIGNED);
        assert!(!ExpensePk::UNASSIGNED.is_assigned());
        assert!(ExpensePk::new(1).is_assigned());
    }

    #[test]
    fn test_pk_parse() {
        assert_eq!("12".parse::<CategoryPk>().unwrap(), CategoryPk::new(12));
        assert_eq!("#4".parse::<BudgetPk>().unwrap(), BudgetPk::new(4));
        assert!("abc".parse::<BudgetPk>().is_err());
    }

    #[test]
    fn test_pk_serializes_as_number() {
        let json = serde_json::to_string(&CategoryPk::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
