//! In-memory tables specialized by key shape.

use crate::key::{KeyExtractor, KeyShape, TableKey};
use crate::{StorageError, StorageResult};
use memtable_model::{EntityType, Row};
use memtable_types::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to a table, as handed out by the registry.
pub type Table = Arc<dyn MemoryTable>;

/// Row storage for a single entity type.
///
/// Every row must match the entity type (see [`EntityType::validate_row`]);
/// rows are identified by their primary key.
pub trait MemoryTable: Send + Sync + fmt::Debug {
    fn entity_type(&self) -> &Arc<EntityType>;

    fn key_shape(&self) -> &KeyShape;

    fn sensitive_logging_enabled(&self) -> bool;

    /// Adds a new row. Fails with [`StorageError::DuplicateKey`] if a row
    /// with the same key is already stored.
    fn insert(&self, row: Row) -> StorageResult<()>;

    /// Replaces the stored row that has the same key as `row`.
    fn update(&self, row: Row) -> StorageResult<()>;

    /// Removes the stored row that has the same key as `row` and returns it.
    fn delete(&self, row: &Row) -> StorageResult<Row>;

    /// Looks up a row by key values given in declared key order.
    fn find(&self, key: &[Value]) -> StorageResult<Option<Row>>;

    /// Copies all stored rows. Order is unspecified.
    fn snapshot(&self) -> Vec<Row>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`MemoryTable`] whose rows are keyed by `K`.
pub struct InMemoryTable<K: TableKey> {
    entity_type: Arc<EntityType>,
    extractor: KeyExtractor,
    sensitive_logging_enabled: bool,
    rows: RwLock<HashMap<K, Row>>,
}

impl<K: TableKey> InMemoryTable<K> {
    pub fn new(
        entity_type: Arc<EntityType>,
        extractor: KeyExtractor,
        sensitive_logging_enabled: bool,
    ) -> Self {
        Self {
            entity_type,
            extractor,
            sensitive_logging_enabled,
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn describe(&self, key: &K) -> String {
        self.extractor
            .describe(key.components(), self.sensitive_logging_enabled)
    }

    fn not_found(&self, key: &K) -> StorageError {
        StorageError::RowNotFound {
            entity_type: self.entity_type.name().to_string(),
            key: self.describe(key),
        }
    }
}

impl<K: TableKey> MemoryTable for InMemoryTable<K> {
    fn entity_type(&self) -> &Arc<EntityType> {
        &self.entity_type
    }

    fn key_shape(&self) -> &KeyShape {
        self.extractor.shape()
    }

    fn sensitive_logging_enabled(&self) -> bool {
        self.sensitive_logging_enabled
    }

    fn insert(&self, row: Row) -> StorageResult<()> {
        self.entity_type.validate_row(&row)?;
        let key: K = self.extractor.extract(&row)?;

        match self.rows.write().entry(key) {
            Entry::Occupied(occupied) => Err(StorageError::DuplicateKey {
                entity_type: self.entity_type.name().to_string(),
                key: self.describe(occupied.key()),
            }),
            Entry::Vacant(vacant) => {
                debug!("Inserted row {} into {}", self.describe(vacant.key()), self.entity_type.name());
                vacant.insert(row);
                Ok(())
            }
        }
    }

    fn update(&self, row: Row) -> StorageResult<()> {
        self.entity_type.validate_row(&row)?;
        let key: K = self.extractor.extract(&row)?;

        let mut rows = self.rows.write();
        match rows.get_mut(&key) {
            Some(stored) => {
                *stored = row;
                debug!("Updated row {} in {}", self.describe(&key), self.entity_type.name());
                Ok(())
            }
            None => Err(self.not_found(&key)),
        }
    }

    fn delete(&self, row: &Row) -> StorageResult<Row> {
        self.entity_type.validate_row(row)?;
        let key: K = self.extractor.extract(row)?;

        let removed = self.rows.write().remove(&key);
        match removed {
            Some(stored) => {
                debug!("Deleted row {} from {}", self.describe(&key), self.entity_type.name());
                Ok(stored)
            }
            None => Err(self.not_found(&key)),
        }
    }

    fn find(&self, key: &[Value]) -> StorageResult<Option<Row>> {
        let key: K = self.extractor.key_from_values(key)?;
        Ok(self.rows.read().get(&key).cloned())
    }

    fn snapshot(&self) -> Vec<Row> {
        self.rows.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.rows.read().len()
    }
}

impl<K: TableKey> fmt::Debug for InMemoryTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Row contents stay out of debug output.
        f.debug_struct("InMemoryTable")
            .field("entity_type", &self.entity_type.name())
            .field("key_shape", self.extractor.shape())
            .field("rows", &self.len())
            .finish()
    }
}
