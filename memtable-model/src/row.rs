use crate::{EntityType, ModelError, ModelResult};
use memtable_types::{Value, ValueType};
use uuid::Uuid;

/// Property values for one instance of an entity type.
///
/// Values are positional: `values[i]` belongs to the property whose
/// [`ordinal`](crate::Property::ordinal) is `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Builds a row from a JSON object keyed by property name.
    ///
    /// Properties missing from the object are `Null`. The resulting row is
    /// validated against `entity_type`.
    pub fn from_json(entity_type: &EntityType, json: &serde_json::Value) -> ModelResult<Self> {
        let Some(object) = json.as_object() else {
            return Err(ModelError::InvalidRow {
                entity_type: entity_type.name().to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        if let Some(unknown) = object.keys().find(|k| entity_type.property(k).is_none()) {
            return Err(ModelError::UnknownProperty {
                entity_type: entity_type.name().to_string(),
                property: unknown.clone(),
            });
        }

        let mut values = Vec::with_capacity(entity_type.properties().len());
        for property in entity_type.properties() {
            let value = match object.get(property.name()) {
                None | Some(serde_json::Value::Null) => Value::Null,
                Some(raw) => convert(raw, property.value_type()).ok_or_else(|| {
                    ModelError::ValueTypeMismatch {
                        entity_type: entity_type.name().to_string(),
                        property: property.name().to_string(),
                        expected: property.value_type(),
                        actual: json_kind(raw).to_string(),
                    }
                })?,
            };
            values.push(value);
        }

        let row = Self { values };
        entity_type.validate_row(&row)?;
        Ok(row)
    }

    /// Renders the row as a JSON object keyed by property name.
    pub fn to_json(&self, entity_type: &EntityType) -> serde_json::Value {
        let object = entity_type
            .properties()
            .iter()
            .zip(&self.values)
            .map(|(p, v)| (p.name().to_string(), serde_json::Value::from(v)))
            .collect();
        serde_json::Value::Object(object)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

fn convert(raw: &serde_json::Value, value_type: ValueType) -> Option<Value> {
    match value_type {
        ValueType::Bool => raw.as_bool().map(Value::Bool),
        ValueType::Int32 => raw
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        ValueType::Int64 => raw.as_i64().map(Value::Int64),
        ValueType::Float64 => raw.as_f64().map(Value::Float64),
        ValueType::String => raw.as_str().map(|s| Value::String(s.to_string())),
        ValueType::Uuid => raw
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(Value::Uuid),
        ValueType::Bytes => raw
            .as_array()?
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(Value::Bytes),
    }
}

fn json_kind(raw: &serde_json::Value) -> &'static str {
    match raw {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
