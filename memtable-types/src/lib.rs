//! Core type definitions for memtable.
//!
//! This crate defines the leaf types every other memtable crate depends on:
//! - [`ValueType`] — the declared type of an entity property
//! - [`Value`] — a single property value, usable as a key component
//! - [`EntityTypeId`] — identity of an entity type descriptor (UUID v7)
//!
//! Entity metadata (properties, primary keys) lives in `memtable-model`.

mod ids;
mod value;

pub use ids::EntityTypeId;
pub use value::{Value, ValueType};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
