use crate::{ModelError, ModelResult, Row};
use memtable_types::{EntityTypeId, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// A single declared property of an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value_type: ValueType,
    nullable: bool,
    ordinal: usize,
}

impl Property {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Position of this property's value within a [`Row`].
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Describes an entity type: its properties and its primary key.
///
/// Identity is the [`EntityTypeId`] assigned at build time. Clones share that
/// identity; two descriptors built separately never compare equal, even when
/// their names and properties match.
#[derive(Debug, Clone)]
pub struct EntityType {
    id: EntityTypeId,
    name: String,
    properties: Vec<Property>,
    primary_key: Option<Vec<usize>>,
}

impl EntityType {
    /// Starts building a descriptor named `name`.
    pub fn builder(name: impl Into<String>) -> EntityTypeBuilder {
        EntityTypeBuilder {
            name: name.into(),
            properties: Vec::new(),
            primary_key: None,
        }
    }

    pub fn id(&self) -> EntityTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the declared primary key, or `None` if the entity type has
    /// no key (either never declared, or declared with zero properties).
    pub fn find_primary_key(&self) -> Option<PrimaryKey<'_>> {
        match &self.primary_key {
            Some(ordinals) if !ordinals.is_empty() => Some(PrimaryKey {
                entity_type: self,
                ordinals,
            }),
            _ => None,
        }
    }

    /// Checks that `row` has one value per property and that every value
    /// matches its property's declared type and nullability.
    pub fn validate_row(&self, row: &Row) -> ModelResult<()> {
        if row.len() != self.properties.len() {
            return Err(ModelError::RowArity {
                entity_type: self.name.clone(),
                expected: self.properties.len(),
                actual: row.len(),
            });
        }
        for (property, value) in self.properties.iter().zip(row.values()) {
            match value.value_type() {
                None if !property.nullable => {
                    return Err(ModelError::NullNotAllowed {
                        entity_type: self.name.clone(),
                        property: property.name.clone(),
                    });
                }
                Some(actual) if actual != property.value_type => {
                    return Err(ModelError::ValueTypeMismatch {
                        entity_type: self.name.clone(),
                        property: property.name.clone(),
                        expected: property.value_type,
                        actual: actual.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns a serializable definition of this descriptor.
    pub fn to_def(&self) -> EntityTypeDef {
        EntityTypeDef {
            name: self.name.clone(),
            properties: self
                .properties
                .iter()
                .map(|p| PropertyDef {
                    name: p.name.clone(),
                    value_type: p.value_type,
                    nullable: p.nullable,
                })
                .collect(),
            primary_key: self.primary_key.as_ref().map(|ordinals| {
                ordinals
                    .iter()
                    .map(|&i| self.properties[i].name.clone())
                    .collect()
            }),
        }
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Borrowed view of an entity type's primary key, in declared order.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryKey<'a> {
    entity_type: &'a EntityType,
    ordinals: &'a [usize],
}

impl<'a> PrimaryKey<'a> {
    pub fn entity_type(&self) -> &'a EntityType {
        self.entity_type
    }

    /// Number of key properties (always at least one).
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Row ordinals of the key properties, in declared order.
    pub fn ordinals(&self) -> &'a [usize] {
        self.ordinals
    }

    pub fn properties(&self) -> impl Iterator<Item = &'a Property> + 'a {
        let entity_type: &'a EntityType = self.entity_type;
        let ordinals: &'a [usize] = self.ordinals;
        ordinals.iter().map(move |&i| &entity_type.properties[i])
    }

    pub fn value_types(&self) -> Vec<ValueType> {
        self.properties().map(Property::value_type).collect()
    }
}

/// Builder for [`EntityType`].
///
/// Key properties are always required: declaring a nullable property as part
/// of the primary key makes it non-nullable.
#[derive(Debug, Clone)]
pub struct EntityTypeBuilder {
    name: String,
    properties: Vec<PropertyDef>,
    primary_key: Option<Vec<String>>,
}

impl EntityTypeBuilder {
    /// Adds a required property.
    pub fn property(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.properties.push(PropertyDef {
            name: name.into(),
            value_type,
            nullable: false,
        });
        self
    }

    /// Adds a property that accepts `Null`.
    pub fn nullable_property(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.properties.push(PropertyDef {
            name: name.into(),
            value_type,
            nullable: true,
        });
        self
    }

    /// Declares the primary key as the named properties, in order.
    pub fn primary_key<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> ModelResult<EntityType> {
        let mut seen = HashSet::new();
        let mut properties = Vec::with_capacity(self.properties.len());
        for (ordinal, def) in self.properties.into_iter().enumerate() {
            if !seen.insert(def.name.clone()) {
                return Err(ModelError::DuplicateProperty {
                    entity_type: self.name,
                    property: def.name,
                });
            }
            properties.push(Property {
                name: def.name,
                value_type: def.value_type,
                nullable: def.nullable,
                ordinal,
            });
        }

        let primary_key = match self.primary_key {
            None => None,
            Some(names) => {
                let mut ordinals = Vec::with_capacity(names.len());
                for name in names {
                    let Some(property) = properties.iter_mut().find(|p| p.name == name) else {
                        return Err(ModelError::UnknownProperty {
                            entity_type: self.name,
                            property: name,
                        });
                    };
                    if ordinals.contains(&property.ordinal) {
                        return Err(ModelError::DuplicateKeyProperty {
                            entity_type: self.name,
                            property: name,
                        });
                    }
                    property.nullable = false;
                    ordinals.push(property.ordinal);
                }
                Some(ordinals)
            }
        };

        Ok(EntityType {
            id: EntityTypeId::new(),
            name: self.name,
            properties,
            primary_key,
        })
    }
}

/// JSON form of a property declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub nullable: bool,
}

/// JSON form of an entity type declaration.
///
/// ```json
/// {"name": "Order",
///  "properties": [{"name": "CustomerId", "value_type": "int32"},
///                 {"name": "OrderSeq", "value_type": "int32"}],
///  "primary_key": ["CustomerId", "OrderSeq"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<String>>,
}

impl EntityTypeDef {
    /// Validates the definition and assigns it a fresh identity.
    pub fn build(self) -> ModelResult<EntityType> {
        EntityTypeBuilder {
            name: self.name,
            properties: self.properties,
            primary_key: self.primary_key,
        }
        .build()
    }
}
