//! Category model
//!
//! Categories form a forest: each category optionally points at a parent
//! category by key. Roots have no parent.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryPk;
use super::Entity;

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 64;

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Primary key, assigned by the repository
    #[serde(default)]
    pub pk: CategoryPk,

    /// Category name
    pub name: String,

    /// Parent category (None for a root)
    #[serde(default)]
    pub parent: Option<CategoryPk>,
}

impl Category {
    /// Create a new root category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            pk: CategoryPk::UNASSIGNED,
            name: name.into(),
            parent: None,
        }
    }

    /// Create a new category under the given parent
    pub fn with_parent(name: impl Into<String>, parent: Option<CategoryPk>) -> Self {
        let mut category = Self::new(name);
        category.parent = parent;
        category
    }

    /// Whether this category sits at the top of the tree
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Validate the category on its own (references are checked by the presenter)
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        if self.pk.is_assigned() && self.parent == Some(self.pk) {
            return Err(CategoryValidationError::OwnParent);
        }

        Ok(())
    }
}

impl Entity for Category {
    type Key = CategoryPk;
    const ENTITY_TYPE: &'static str = "Category";

    fn pk(&self) -> CategoryPk {
        self.pk
    }

    fn set_pk(&mut self, pk: CategoryPk) {
        self.pk = pk;
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    OwnParent,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Category name too long ({} chars, max {})",
                    len, MAX_NAME_LEN
                )
            }
            Self::OwnParent => write!(f, "A category cannot be its own parent"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("food");
        assert_eq!(category.name, "food");
        assert!(!category.pk.is_assigned());
        assert!(category.is_root());
    }

    #[test]
    fn test_with_parent() {
        let category = Category::with_parent("meat", Some(CategoryPk::new(1)));
        assert_eq!(category.parent, Some(CategoryPk::new(1)));
        assert!(!category.is_root());
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::new("Valid");
        assert!(category.validate().is_ok());

        category.name = "   ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(_))
        ));

        category.name = "loop".to_string();
        category.pk = CategoryPk::new(4);
        category.parent = Some(CategoryPk::new(4));
        assert_eq!(category.validate(), Err(CategoryValidationError::OwnParent));
    }

    #[test]
    fn test_serialized_fields() {
        let category = Category::with_parent("sweets", Some(CategoryPk::new(2)));
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["name"], "sweets");
        assert_eq!(value["parent"], 2);
        assert_eq!(value["pk"], 0);
    }
}
