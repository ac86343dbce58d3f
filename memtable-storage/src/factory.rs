//! Table construction.

use crate::key::{CompositeKey, KeyExtractor, ScalarKey};
use crate::table::{InMemoryTable, Table};
use crate::StorageResult;
use memtable_model::EntityType;
use std::sync::Arc;

/// Builds the table for an entity type once its key shape is known.
///
/// The registry may call `create` more than once for the same entity type
/// when threads race, and keeps only one result. Implementations must not
/// publish the new table anywhere else.
pub trait TableFactory: Send + Sync {
    fn create(
        &self,
        entity_type: Arc<EntityType>,
        extractor: KeyExtractor,
        sensitive_logging_enabled: bool,
    ) -> StorageResult<Table>;
}

/// Default factory: one [`InMemoryTable`] per entity type, keyed by the
/// representation that matches the resolved shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryTableFactory;

impl TableFactory for InMemoryTableFactory {
    fn create(
        &self,
        entity_type: Arc<EntityType>,
        extractor: KeyExtractor,
        sensitive_logging_enabled: bool,
    ) -> StorageResult<Table> {
        let table: Table = if extractor.shape().is_composite() {
            Arc::new(InMemoryTable::<CompositeKey>::new(
                entity_type,
                extractor,
                sensitive_logging_enabled,
            ))
        } else {
            Arc::new(InMemoryTable::<ScalarKey>::new(
                entity_type,
                extractor,
                sensitive_logging_enabled,
            ))
        };
        Ok(table)
    }
}
