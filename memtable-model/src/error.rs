//! Error types for entity metadata and rows.

use memtable_types::ValueType;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building descriptors or validating rows.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity type '{entity_type}' declares property '{property}' more than once")]
    DuplicateProperty { entity_type: String, property: String },

    #[error("entity type '{entity_type}' has no property named '{property}'")]
    UnknownProperty { entity_type: String, property: String },

    #[error("primary key of entity type '{entity_type}' lists property '{property}' more than once")]
    DuplicateKeyProperty { entity_type: String, property: String },

    #[error("property '{entity_type}.{property}' expects {expected} but got {actual}")]
    ValueTypeMismatch {
        entity_type: String,
        property: String,
        expected: ValueType,
        actual: String,
    },

    #[error("property '{entity_type}.{property}' is required and cannot be null")]
    NullNotAllowed { entity_type: String, property: String },

    #[error("row for entity type '{entity_type}' has {actual} values, expected {expected}")]
    RowArity {
        entity_type: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid row for entity type '{entity_type}': {reason}")]
    InvalidRow { entity_type: String, reason: String },
}
