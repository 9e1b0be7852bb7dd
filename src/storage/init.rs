//! Storage initialization
//!
//! Seeds a fresh store with the demo category tree.

use tracing::info;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::Category;
use crate::services::category_tree::build_category_tree;

use super::{Repository, Storage};

/// Category outline used when no other seed is configured
pub const DEMO_CATEGORY_OUTLINE: &str = "\
food
    meat
        raw meat
        meat products
    sweets
books
clothes
";

/// Seed the category repository from an outline
///
/// Refuses to seed a store that already holds categories, so the tree is
/// never duplicated.
pub fn initialize_storage(storage: &Storage, outline: &str) -> BookkeeperResult<Vec<Category>> {
    if storage.categories.len()? > 0 {
        return Err(BookkeeperError::Startup(
            "Category store is already populated".into(),
        ));
    }

    let created = build_category_tree(outline.lines(), &storage.categories)?;
    info!(count = created.len(), "Seeded category tree");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::field_eq;
    use crate::storage::Repository;

    #[test]
    fn test_demo_outline_seeds_seven_categories() {
        let storage = Storage::new();
        let created = initialize_storage(&storage, DEMO_CATEGORY_OUTLINE).unwrap();
        assert_eq!(created.len(), 7);

        let meat = storage
            .categories
            .get_all(Some(&field_eq("name", "meat")))
            .unwrap();
        let products = storage
            .categories
            .get_all(Some(&field_eq("name", "meat products")))
            .unwrap();
        assert_eq!(products[0].parent, Some(meat[0].pk));
    }

    #[test]
    fn test_seeding_twice_fails() {
        let storage = Storage::new();
        initialize_storage(&storage, "food\n").unwrap();
        let err = initialize_storage(&storage, "books\n").unwrap_err();
        assert!(matches!(err, BookkeeperError::Startup(_)));
        assert_eq!(storage.categories.len().unwrap(), 1);
    }
}
