use memtable_model::{EntityType, EntityTypeDef, ModelError, PropertyDef};
use memtable_types::ValueType;
use pretty_assertions::assert_eq;

fn customer() -> EntityType {
    EntityType::builder("Customer")
        .property("Id", ValueType::Int32)
        .nullable_property("Name", ValueType::String)
        .primary_key(["Id"])
        .build()
        .unwrap()
}

fn order() -> EntityType {
    EntityType::builder("Order")
        .property("CustomerId", ValueType::Int32)
        .property("OrderSeq", ValueType::Int32)
        .property("Total", ValueType::Float64)
        .primary_key(["CustomerId", "OrderSeq"])
        .build()
        .unwrap()
}

// ── Builder ──────────────────────────────────────────────────────

#[test]
fn properties_keep_declared_order_and_ordinals() {
    let o = order();
    let names: Vec<_> = o.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["CustomerId", "OrderSeq", "Total"]);
    for (i, p) in o.properties().iter().enumerate() {
        assert_eq!(p.ordinal(), i);
    }
}

#[test]
fn property_lookup_by_name() {
    let c = customer();
    let name = c.property("Name").unwrap();
    assert_eq!(name.value_type(), ValueType::String);
    assert!(name.is_nullable());
    assert!(c.property("Missing").is_none());
}

#[test]
fn duplicate_property_is_rejected() {
    let err = EntityType::builder("Dup")
        .property("Id", ValueType::Int32)
        .property("Id", ValueType::Int64)
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateProperty { ref property, .. } if property == "Id"));
}

#[test]
fn unknown_key_property_is_rejected() {
    let err = EntityType::builder("Bad")
        .property("Id", ValueType::Int32)
        .primary_key(["Code"])
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "entity type 'Bad' has no property named 'Code'");
}

#[test]
fn repeated_key_property_is_rejected() {
    let err = EntityType::builder("Bad")
        .property("Id", ValueType::Int32)
        .primary_key(["Id", "Id"])
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateKeyProperty { .. }));
}

#[test]
fn key_properties_become_required() {
    let t = EntityType::builder("Tag")
        .nullable_property("Code", ValueType::String)
        .primary_key(["Code"])
        .build()
        .unwrap();
    assert!(!t.property("Code").unwrap().is_nullable());
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn separately_built_descriptors_are_distinct() {
    let a = customer();
    let b = customer();
    assert_ne!(a, b);
    assert_ne!(a.id(), b.id());
}

#[test]
fn clones_share_identity() {
    let a = customer();
    let b = a.clone();
    assert_eq!(a, b);
}

// ── Primary key ──────────────────────────────────────────────────

#[test]
fn scalar_primary_key() {
    let c = customer();
    let pk = c.find_primary_key().unwrap();
    assert_eq!(pk.len(), 1);
    assert_eq!(pk.ordinals(), &[0]);
    assert_eq!(pk.value_types(), vec![ValueType::Int32]);
}

#[test]
fn composite_primary_key_keeps_declared_order() {
    let t = EntityType::builder("Line")
        .property("Code", ValueType::String)
        .property("Seq", ValueType::Int32)
        .primary_key(["Seq", "Code"])
        .build()
        .unwrap();
    let pk = t.find_primary_key().unwrap();
    let names: Vec<_> = pk.properties().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Seq", "Code"]);
    assert_eq!(pk.ordinals(), &[1, 0]);
    assert_eq!(pk.value_types(), vec![ValueType::Int32, ValueType::String]);
    assert_eq!(pk.entity_type(), &t);
}

#[test]
fn no_primary_key_declared() {
    let t = EntityType::builder("Keyless")
        .property("Value", ValueType::String)
        .build()
        .unwrap();
    assert!(t.find_primary_key().is_none());
}

#[test]
fn empty_primary_key_counts_as_missing() {
    let t = EntityType::builder("Keyless")
        .property("Value", ValueType::String)
        .primary_key(Vec::<String>::new())
        .build()
        .unwrap();
    assert!(t.find_primary_key().is_none());
}

// ── JSON definitions ─────────────────────────────────────────────

#[test]
fn def_from_json() {
    let json = r#"{
        "name": "Order",
        "properties": [
            {"name": "CustomerId", "value_type": "int32"},
            {"name": "OrderSeq", "value_type": "int32"},
            {"name": "Note", "value_type": "string", "nullable": true}
        ],
        "primary_key": ["CustomerId", "OrderSeq"]
    }"#;
    let def: EntityTypeDef = serde_json::from_str(json).unwrap();
    assert_eq!(
        def.properties[2],
        PropertyDef {
            name: "Note".to_string(),
            value_type: ValueType::String,
            nullable: true,
        }
    );
    let t = def.build().unwrap();
    assert_eq!(t.find_primary_key().unwrap().len(), 2);
}

#[test]
fn def_without_primary_key_field() {
    let json = r#"{"name": "Log", "properties": [{"name": "Line", "value_type": "string"}]}"#;
    let def: EntityTypeDef = serde_json::from_str(json).unwrap();
    assert_eq!(def.primary_key, None);
    assert!(def.build().unwrap().find_primary_key().is_none());
}

#[test]
fn to_def_round_trips_through_build() {
    let o = order();
    let def = o.to_def();
    assert_eq!(def.primary_key, Some(vec!["CustomerId".to_string(), "OrderSeq".to_string()]));
    let rebuilt = def.clone().build().unwrap();
    assert_eq!(rebuilt.to_def(), def);
    assert_ne!(rebuilt, o);
}
