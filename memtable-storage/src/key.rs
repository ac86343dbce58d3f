//! Key shape resolution and key extraction.
//!
//! A table's key representation is chosen once, when the table is created,
//! from the entity type's primary key:
//!
//! - one key property → [`KeyShape::Scalar`], stored as [`ScalarKey`]
//! - several key properties → [`KeyShape::Composite`], stored as [`CompositeKey`]
//!
//! [`KeyExtractor`] captures the resolved shape together with the key
//! property ordinals, so per-row work is a few indexed reads and type checks.

use crate::{StorageError, StorageResult};
use memtable_model::{EntityType, ModelError, Row};
use memtable_types::{Value, ValueType};
use std::fmt;
use std::hash::Hash;

/// The resolved representation of an entity type's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyShape {
    /// A single key property of the given type.
    Scalar(ValueType),
    /// Several key properties, in declared order.
    Composite(Vec<ValueType>),
}

impl KeyShape {
    /// Number of key components.
    pub fn arity(&self) -> usize {
        self.value_types().len()
    }

    pub fn value_types(&self) -> &[ValueType] {
        match self {
            Self::Scalar(value_type) => std::slice::from_ref(value_type),
            Self::Composite(value_types) => value_types,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

impl fmt::Display for KeyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value_type) => write!(f, "{value_type}"),
            Self::Composite(value_types) => {
                f.write_str("(")?;
                for (i, value_type) in value_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value_type}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Derives key shapes and extractors from entity type descriptors.
pub struct KeyShapeResolver;

impl KeyShapeResolver {
    /// Resolves the key shape of `entity_type`.
    ///
    /// Fails with [`StorageError::MissingPrimaryKey`] when no key is declared.
    pub fn resolve(entity_type: &EntityType) -> StorageResult<KeyShape> {
        let primary_key = entity_type
            .find_primary_key()
            .ok_or_else(|| StorageError::MissingPrimaryKey {
                entity_type: entity_type.name().to_string(),
            })?;

        let mut value_types = primary_key.value_types();
        Ok(if value_types.len() == 1 {
            KeyShape::Scalar(value_types.remove(0))
        } else {
            KeyShape::Composite(value_types)
        })
    }

    /// Resolves the key shape and binds it to the key property positions.
    pub fn extractor(entity_type: &EntityType) -> StorageResult<KeyExtractor> {
        let shape = Self::resolve(entity_type)?;
        // resolve() succeeded, so the key exists
        let (ordinals, names) = entity_type
            .find_primary_key()
            .map(|pk| {
                let names: Vec<String> = pk.properties().map(|p| p.name().to_string()).collect();
                (pk.ordinals().to_vec(), names)
            })
            .unwrap_or_default();

        Ok(KeyExtractor {
            entity_type: entity_type.name().to_string(),
            shape,
            ordinals,
            names,
        })
    }
}

/// Pulls typed keys out of rows for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyExtractor {
    entity_type: String,
    shape: KeyShape,
    ordinals: Vec<usize>,
    names: Vec<String>,
}

impl KeyExtractor {
    pub fn shape(&self) -> &KeyShape {
        &self.shape
    }

    pub fn entity_type_name(&self) -> &str {
        &self.entity_type
    }

    /// Key property names, in declared order.
    pub fn property_names(&self) -> &[String] {
        &self.names
    }

    /// Extracts the key of `row`.
    pub fn extract<K: TableKey>(&self, row: &Row) -> StorageResult<K> {
        let mut components = Vec::with_capacity(self.ordinals.len());
        for (i, &ordinal) in self.ordinals.iter().enumerate() {
            let value = row.get(ordinal).ok_or_else(|| ModelError::RowArity {
                entity_type: self.entity_type.clone(),
                expected: ordinal + 1,
                actual: row.len(),
            })?;
            self.check(i, value)?;
            components.push(value.clone());
        }
        Ok(K::from_components(components))
    }

    /// Builds a key from values given in declared key order.
    pub fn key_from_values<K: TableKey>(&self, values: &[Value]) -> StorageResult<K> {
        if values.len() != self.ordinals.len() {
            return Err(StorageError::KeyArity {
                entity_type: self.entity_type.clone(),
                expected: self.ordinals.len(),
                actual: values.len(),
            });
        }
        for (i, value) in values.iter().enumerate() {
            self.check(i, value)?;
        }
        Ok(K::from_components(values.to_vec()))
    }

    /// Renders a key for messages: `{Id: 42}` when `sensitive`, `{Id}` otherwise.
    pub fn describe(&self, values: &[Value], sensitive: bool) -> String {
        let parts: Vec<String> = if sensitive {
            self.names
                .iter()
                .zip(values)
                .map(|(name, value)| format!("{name}: {value}"))
                .collect()
        } else {
            self.names.clone()
        };
        format!("{{{}}}", parts.join(", "))
    }

    fn check(&self, component: usize, value: &Value) -> StorageResult<()> {
        let expected = self.shape.value_types()[component];
        match value.value_type() {
            None => Err(StorageError::NullKeyValue {
                entity_type: self.entity_type.clone(),
                property: self.names[component].clone(),
            }),
            Some(actual) if actual != expected => Err(StorageError::KeyTypeMismatch {
                entity_type: self.entity_type.clone(),
                property: self.names[component].clone(),
                expected,
                actual,
            }),
            Some(_) => Ok(()),
        }
    }
}

/// In-memory representation of a primary key value.
///
/// Implementations are chosen by key shape; the extractor guarantees that
/// `from_components` receives exactly one value per key property, none null.
pub trait TableKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn from_components(components: Vec<Value>) -> Self;

    /// Key values in declared order.
    fn components(&self) -> &[Value];
}

/// Key of a table whose primary key has a single property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarKey(Value);

impl ScalarKey {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl TableKey for ScalarKey {
    fn from_components(mut components: Vec<Value>) -> Self {
        debug_assert_eq!(components.len(), 1);
        Self(components.pop().unwrap_or(Value::Null))
    }

    fn components(&self) -> &[Value] {
        std::slice::from_ref(&self.0)
    }
}

/// Key of a table whose primary key has several properties.
///
/// Equality and hashing are structural and order-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(Box<[Value]>);

impl TableKey for CompositeKey {
    fn from_components(components: Vec<Value>) -> Self {
        Self(components.into_boxed_slice())
    }

    fn components(&self) -> &[Value] {
        &self.0
    }
}
