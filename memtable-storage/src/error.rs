//! Error types for the storage layer.

use memtable_model::ModelError;
use memtable_types::ValueType;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// Key descriptions (`key`) always name the key properties; they include the
/// actual key values only when sensitive data logging is enabled.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The entity type declares no primary key, so no table can be built for it.
    #[error("entity type '{entity_type}' has no primary key; a table cannot be created without one")]
    MissingPrimaryKey { entity_type: String },

    /// A row with the same key is already stored.
    #[error("cannot insert into '{entity_type}': a row with key {key} already exists")]
    DuplicateKey { entity_type: String, key: String },

    /// No row with the given key is stored.
    #[error("no row in '{entity_type}' with key {key}")]
    RowNotFound { entity_type: String, key: String },

    /// A key component was null.
    #[error("key property '{entity_type}.{property}' cannot be null")]
    NullKeyValue { entity_type: String, property: String },

    /// A key component has the wrong type.
    #[error("key property '{entity_type}.{property}' expects {expected} but got {actual}")]
    KeyTypeMismatch {
        entity_type: String,
        property: String,
        expected: ValueType,
        actual: ValueType,
    },

    /// A lookup supplied the wrong number of key values.
    #[error("key of '{entity_type}' has {expected} values, got {actual}")]
    KeyArity {
        entity_type: String,
        expected: usize,
        actual: usize,
    },

    /// The row does not fit the entity type.
    #[error(transparent)]
    Model(#[from] ModelError),
}
