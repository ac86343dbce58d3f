//! Model file loading and table summaries for the `memtable` binary.

use anyhow::{Context, Result, bail};
use memtable_model::{EntityType, EntityTypeDef, Row};
use memtable_storage::{LoggingOptions, TableRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Contents of a model file: entity type declarations plus seed rows keyed
/// by entity type name.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    pub entity_types: Vec<EntityTypeDef>,
    #[serde(default)]
    pub rows: BTreeMap<String, Vec<serde_json::Value>>,
}

/// One line of `memtable` output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub entity_type: String,
    pub key_shape: String,
    pub rows: usize,
}

/// A populated registry together with the entity types it was built from.
#[derive(Debug)]
pub struct LoadedModel {
    registry: TableRegistry,
    entity_types: Vec<Arc<EntityType>>,
}

/// Reads and parses a model file.
pub fn load_model_file(path: &Path) -> Result<ModelFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse model file {}", path.display()))
}

/// Builds every entity type, creates its table and inserts the seed rows.
pub fn populate(model: ModelFile, options: &LoggingOptions) -> Result<LoadedModel> {
    let registry = TableRegistry::new(options);
    let mut entity_types: Vec<Arc<EntityType>> = Vec::with_capacity(model.entity_types.len());

    for def in model.entity_types {
        if entity_types.iter().any(|t| t.name() == def.name) {
            bail!("entity type '{}' is declared more than once", def.name);
        }
        let name = def.name.clone();
        let entity_type = Arc::new(
            def.build()
                .with_context(|| format!("invalid entity type '{name}'"))?,
        );
        registry
            .get_or_create(&entity_type)
            .with_context(|| format!("cannot create table for '{name}'"))?;
        entity_types.push(entity_type);
    }

    for (name, rows) in model.rows {
        let Some(entity_type) = entity_types.iter().find(|t| t.name() == name) else {
            bail!("rows given for undeclared entity type '{name}'");
        };
        let table = registry.get_or_create(entity_type)?;
        for (i, json) in rows.iter().enumerate() {
            let row = Row::from_json(entity_type, json)
                .with_context(|| format!("row {i} of '{name}'"))?;
            table
                .insert(row)
                .with_context(|| format!("row {i} of '{name}'"))?;
        }
        debug!("Loaded {} rows into {}", rows.len(), name);
    }

    info!("Populated {} tables", registry.len());
    Ok(LoadedModel {
        registry,
        entity_types,
    })
}

impl LoadedModel {
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn entity_types(&self) -> &[Arc<EntityType>] {
        &self.entity_types
    }

    /// One summary per entity type, in declaration order.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.entity_types
            .iter()
            .filter_map(|t| self.registry.get(t))
            .map(|table| TableSummary {
                entity_type: table.entity_type().name().to_string(),
                key_shape: table.key_shape().to_string(),
                rows: table.len(),
            })
            .collect()
    }

    /// All rows of every table as JSON, keyed by entity type name.
    pub fn dump(&self) -> serde_json::Value {
        let tables = self
            .entity_types
            .iter()
            .filter_map(|t| self.registry.get(t))
            .map(|table| {
                let entity_type = table.entity_type();
                let rows = table
                    .snapshot()
                    .iter()
                    .map(|row| row.to_json(entity_type))
                    .collect();
                (entity_type.name().to_string(), serde_json::Value::Array(rows))
            })
            .collect();
        serde_json::Value::Object(tables)
    }
}
