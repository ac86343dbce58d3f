//! In-memory storage for memtable.
//!
//! Holds one table per entity type, created lazily the first time the entity
//! type is used.
//!
//! # Architecture
//!
//! - [`KeyShapeResolver`] turns an entity type's primary key into a
//!   [`KeyShape`] (scalar or composite) and a [`KeyExtractor`] bound to it
//! - [`TableFactory`] builds a table specialized to that shape; the default
//!   [`InMemoryTableFactory`] picks [`ScalarKey`] or [`CompositeKey`] storage
//! - [`TableRegistry`] caches tables per entity type with at-most-one-winner
//!   installation, so every caller sees the same table
//! - [`LoggingOptions`] decides whether key values may appear in errors and logs

mod config;
mod error;
mod factory;
mod key;
mod registry;
mod table;

pub use config::LoggingOptions;
pub use error::{StorageError, StorageResult};
pub use factory::{InMemoryTableFactory, TableFactory};
pub use key::{CompositeKey, KeyExtractor, KeyShape, KeyShapeResolver, ScalarKey, TableKey};
pub use registry::TableRegistry;
pub use table::{InMemoryTable, MemoryTable, Table};
