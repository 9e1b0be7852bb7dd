//! Storage layer for Bookkeeper
//!
//! Provides the repository abstraction, its in-memory implementation and the
//! coordinator that owns one repository per entity type.

pub mod init;
pub mod memory;
pub mod repository;

pub use init::{initialize_storage, DEMO_CATEGORY_OUTLINE};
pub use memory::MemoryRepository;
pub use repository::{field_eq, Filter, Repository};

use crate::models::{Budget, Category, Expense};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub categories: MemoryRepository<Category>,
    pub expenses: MemoryRepository<Expense>,
    pub budgets: MemoryRepository<Budget>,
}

impl Storage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            categories: MemoryRepository::new(),
            expenses: MemoryRepository::new(),
            budgets: MemoryRepository::new(),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
