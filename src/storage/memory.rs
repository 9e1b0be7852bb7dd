//! In-memory repository
//!
//! Entities live in a `BTreeMap` keyed by their raw primary key. Keys come
//! from a monotonic counter and are never reused, so key order is insertion
//! order.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::Entity;

use super::repository::{matches_filter, Filter, Repository};

struct Inner<T> {
    entities: BTreeMap<u64, T>,
    last_pk: u64,
}

/// Repository that keeps everything in process memory
pub struct MemoryRepository<T: Entity> {
    inner: RwLock<Inner<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entities: BTreeMap::new(),
                last_pk: 0,
            }),
        }
    }

    fn read(&self) -> BookkeeperResult<RwLockReadGuard<'_, Inner<T>>> {
        self.inner
            .read()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> BookkeeperResult<RwLockWriteGuard<'_, Inner<T>>> {
        self.inner
            .write()
            .map_err(|e| BookkeeperError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
    fn add(&self, entity: &mut T) -> BookkeeperResult<T::Key> {
        let current: u64 = entity.pk().into();
        if current != 0 {
            return Err(BookkeeperError::AlreadyStored {
                entity_type: T::ENTITY_TYPE,
                pk: current,
            });
        }

        let mut inner = self.write()?;
        inner.last_pk += 1;
        let key = inner.last_pk;
        let pk = T::Key::from(key);
        entity.set_pk(pk);
        inner.entities.insert(key, entity.clone());
        Ok(pk)
    }

    fn get(&self, pk: T::Key) -> BookkeeperResult<T> {
        let inner = self.read()?;
        let raw: u64 = pk.into();
        inner
            .entities
            .get(&raw)
            .cloned()
            .ok_or_else(|| BookkeeperError::not_found(T::ENTITY_TYPE, raw))
    }

    fn get_all(&self, filter: Option<&Filter>) -> BookkeeperResult<Vec<T>> {
        let inner = self.read()?;
        match filter {
            None => Ok(inner.entities.values().cloned().collect()),
            Some(filter) => {
                let mut matched = Vec::new();
                for entity in inner.entities.values() {
                    if matches_filter(entity, filter)? {
                        matched.push(entity.clone());
                    }
                }
                Ok(matched)
            }
        }
    }

    fn update(&self, entity: T) -> BookkeeperResult<()> {
        let mut inner = self.write()?;
        let raw: u64 = entity.pk().into();
        match inner.entities.get_mut(&raw) {
            Some(slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(BookkeeperError::not_found(T::ENTITY_TYPE, raw)),
        }
    }

    fn delete(&self, pk: T::Key) -> BookkeeperResult<()> {
        let mut inner = self.write()?;
        let raw: u64 = pk.into();
        inner
            .entities
            .remove(&raw)
            .map(|_| ())
            .ok_or_else(|| BookkeeperError::not_found(T::ENTITY_TYPE, raw))
    }

    fn len(&self) -> BookkeeperResult<usize> {
        Ok(self.read()?.entities.len())
    }

    fn contains(&self, pk: T::Key) -> BookkeeperResult<bool> {
        let raw: u64 = pk.into();
        Ok(self.read()?.entities.contains_key(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryPk, Expense, ExpensePk};
    use crate::storage::repository::field_eq;

    fn repo_with(names: &[&str]) -> MemoryRepository<Category> {
        let repo = MemoryRepository::new();
        for name in names {
            repo.add(&mut Category::new(*name)).unwrap();
        }
        repo
    }

    #[test]
    fn test_keys_start_at_one_and_increase() {
        let repo = MemoryRepository::new();
        let mut keys = Vec::new();
        for name in ["a", "b", "c", "d"] {
            keys.push(repo.add(&mut Category::new(name)).unwrap());
        }
        let raw: Vec<u64> = keys.iter().map(|k| k.get()).collect();
        assert_eq!(raw, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_add_writes_key_back() {
        let repo = MemoryRepository::new();
        let mut category = Category::new("food");
        let pk = repo.add(&mut category).unwrap();
        assert_eq!(category.pk, pk);
        assert_eq!(repo.get(pk).unwrap(), category);
    }

    #[test]
    fn test_add_stores_under_returned_key() {
        let repo = repo_with(&["food"]);
        let key = repo.add(&mut Category::new("books")).unwrap();
        assert_eq!(repo.get(key).unwrap().name, "books");
        assert_eq!(repo.get(key).unwrap().pk, key);
    }

    #[test]
    fn test_add_rejects_stored_entity() {
        let repo = MemoryRepository::new();
        let mut category = Category::new("food");
        repo.add(&mut category).unwrap();

        let err = repo.add(&mut category).unwrap_err();
        assert!(matches!(
            err,
            BookkeeperError::AlreadyStored {
                entity_type: "Category",
                pk: 1
            }
        ));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn test_get_all_preserves_insertion_order() {
        let repo = repo_with(&["food", "books", "clothes"]);
        let names: Vec<String> = repo
            .get_all(None)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["food", "books", "clothes"]);
    }

    #[test]
    fn test_get_all_is_idempotent() {
        let repo = repo_with(&["food", "books"]);
        assert_eq!(repo.get_all(None).unwrap(), repo.get_all(None).unwrap());
    }

    #[test]
    fn test_get_all_with_filter() {
        let repo = repo_with(&["food", "books", "food"]);
        let found = repo.get_all(Some(&field_eq("name", "food"))).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].pk, CategoryPk::new(1));
        assert_eq!(found[1].pk, CategoryPk::new(3));

        let none = repo.get_all(Some(&field_eq("name", "cars"))).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let repo = repo_with(&["food", "books"]);
        repo.delete(CategoryPk::new(1)).unwrap();
        assert!(repo.get(CategoryPk::new(1)).unwrap_err().is_not_found());
        assert!(repo.delete(CategoryPk::new(1)).unwrap_err().is_not_found());
        assert!(!repo.contains(CategoryPk::new(1)).unwrap());
    }

    #[test]
    fn test_keys_not_reused_after_delete() {
        let repo = repo_with(&["food", "books"]);
        repo.delete(CategoryPk::new(2)).unwrap();
        let pk = repo.add(&mut Category::new("clothes")).unwrap();
        assert_eq!(pk, CategoryPk::new(3));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let repo = repo_with(&["food", "books", "clothes"]);
        let mut books = repo.get(CategoryPk::new(2)).unwrap();
        books.name = "novels".to_string();
        repo.update(books).unwrap();

        let names: Vec<String> = repo
            .get_all(None)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["food", "novels", "clothes"]);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let repo: MemoryRepository<Expense> = MemoryRepository::new();
        let mut expense = Expense::new(100, CategoryPk::new(1));
        expense.pk = ExpensePk::new(42);
        assert!(repo.update(expense).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_unassigned_is_not_found() {
        let repo = repo_with(&["food"]);
        assert!(repo.update(Category::new("ghost")).unwrap_err().is_not_found());
    }
}
