//! The per-entity-type table registry.

use crate::config::LoggingOptions;
use crate::factory::{InMemoryTableFactory, TableFactory};
use crate::key::KeyShapeResolver;
use crate::table::Table;
use crate::StorageResult;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use memtable_model::EntityType;
use memtable_types::EntityTypeId;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lazily creates and caches one table per entity type.
///
/// Tables are created on first request and kept for the registry's lifetime;
/// there is no eviction. Lookups for different entity types proceed in
/// parallel, and table construction runs outside the map's locks, so a slow
/// construction for one entity type never holds up another.
pub struct TableRegistry {
    tables: DashMap<EntityTypeId, Table>,
    factory: Arc<dyn TableFactory>,
    sensitive_logging_enabled: bool,
}

impl TableRegistry {
    /// Creates an empty registry that builds [`InMemoryTable`](crate::InMemoryTable)s.
    pub fn new(options: &LoggingOptions) -> Self {
        Self::with_factory(options, Arc::new(InMemoryTableFactory))
    }

    /// Creates an empty registry that builds tables with `factory`.
    pub fn with_factory(options: &LoggingOptions, factory: Arc<dyn TableFactory>) -> Self {
        Self {
            tables: DashMap::new(),
            factory,
            sensitive_logging_enabled: options.sensitive_data_logging,
        }
    }

    pub fn sensitive_logging_enabled(&self) -> bool {
        self.sensitive_logging_enabled
    }

    /// Returns the table for `entity_type`, creating it on first use.
    ///
    /// Every call for the same entity type returns the same table, including
    /// calls that race on first use: if two threads both build a table, only
    /// the first one installed is ever returned and the other is dropped.
    ///
    /// Fails with [`StorageError::MissingPrimaryKey`](crate::StorageError::MissingPrimaryKey)
    /// when the entity type has no primary key. Failures are not cached and
    /// leave no entry behind.
    pub fn get_or_create(&self, entity_type: &Arc<EntityType>) -> StorageResult<Table> {
        if let Some(table) = self.get(entity_type) {
            return Ok(table);
        }

        let extractor = KeyShapeResolver::extractor(entity_type)?;
        let table = self.factory.create(
            Arc::clone(entity_type),
            extractor,
            self.sensitive_logging_enabled,
        )?;

        match self.tables.entry(entity_type.id()) {
            Entry::Occupied(installed) => {
                debug!(
                    "Discarded duplicate table for {}; another caller installed it first",
                    entity_type.name()
                );
                Ok(Arc::clone(installed.get()))
            }
            Entry::Vacant(vacant) => {
                debug!(
                    "Created table for {} (key shape {})",
                    entity_type.name(),
                    table.key_shape()
                );
                Ok(Arc::clone(vacant.insert(table).value()))
            }
        }
    }

    /// Returns the table for `entity_type` if one has been created.
    pub fn get(&self, entity_type: &EntityType) -> Option<Table> {
        self.tables
            .get(&entity_type.id())
            .map(|table| Arc::clone(table.value()))
    }

    /// Number of tables created so far.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Handles to every table created so far, in no particular order.
    pub fn tables(&self) -> Vec<Table> {
        self.tables
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new(&LoggingOptions::default())
    }
}

impl fmt::Debug for TableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRegistry")
            .field("tables", &self.tables.len())
            .field("sensitive_logging_enabled", &self.sensitive_logging_enabled)
            .finish()
    }
}
