//! Repository abstraction
//!
//! A repository is a keyed store of one entity type with CRUD operations and
//! simple equality filtering. The in-memory implementation lives in
//! `memory.rs`; a persistent backend would implement the same trait.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::Entity;

/// Field-name to expected-value mapping used by `get_all`
///
/// Field names are the serialized (serde) names of the entity's fields.
pub type Filter = BTreeMap<String, Value>;

/// Build a single-field filter
pub fn field_eq(name: impl Into<String>, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(name.into(), value.into());
    filter
}

/// Keyed storage for one entity type
pub trait Repository<T: Entity> {
    /// Store a new entity, assigning it the next unused key
    ///
    /// The assigned key is written back into `entity` and returned. Fails if
    /// the entity already carries a key.
    fn add(&self, entity: &mut T) -> BookkeeperResult<T::Key>;

    /// Fetch an entity by key
    fn get(&self, pk: T::Key) -> BookkeeperResult<T>;

    /// All entities in insertion order, optionally restricted to those whose
    /// fields equal every value in `filter`
    fn get_all(&self, filter: Option<&Filter>) -> BookkeeperResult<Vec<T>>;

    /// Replace the stored entity that has the same key
    fn update(&self, entity: T) -> BookkeeperResult<()>;

    /// Remove an entity (no cascading)
    fn delete(&self, pk: T::Key) -> BookkeeperResult<()>;

    /// Number of stored entities
    fn len(&self) -> BookkeeperResult<usize>;

    /// Whether the repository is empty
    fn is_empty(&self) -> BookkeeperResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether an entity with this key is stored
    fn contains(&self, pk: T::Key) -> BookkeeperResult<bool>;
}

/// Check an entity against a filter by comparing its serialized fields
pub fn matches_filter<T: Entity>(entity: &T, filter: &Filter) -> BookkeeperResult<bool> {
    if filter.is_empty() {
        return Ok(true);
    }

    let value = serde_json::to_value(entity)?;
    let fields = value.as_object().ok_or_else(|| {
        BookkeeperError::Storage(format!(
            "{} does not serialize to an object",
            T::ENTITY_TYPE
        ))
    })?;

    for (name, expected) in filter {
        let actual = fields.get(name).ok_or_else(|| {
            BookkeeperError::Validation(format!(
                "{} has no field '{}'",
                T::ENTITY_TYPE,
                name
            ))
        })?;
        if actual != expected {
            return Ok(false);
        }
    }

    Ok(true)
}
