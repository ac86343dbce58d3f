//! Entity type metadata for memtable.
//!
//! Defines the descriptors the storage layer consumes:
//! - [`EntityType`] — an immutable entity type descriptor (properties + primary key)
//! - [`EntityTypeBuilder`] / [`EntityTypeDef`] — programmatic and JSON construction
//! - [`PrimaryKey`] — a borrowed view of the declared key properties, in order
//! - [`Row`] — positional property values for one instance of an entity type
//!
//! Descriptors are validated once at build time and never change afterwards,
//! so anything derived from them (such as a table's key shape) stays valid
//! for the descriptor's lifetime.

mod entity_type;
mod error;
mod row;

pub use entity_type::{EntityType, EntityTypeBuilder, EntityTypeDef, PrimaryKey, Property, PropertyDef};
pub use error::{ModelError, ModelResult};
pub use row::Row;
