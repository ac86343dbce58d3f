//! Shared entity types for storage tests.

#![allow(dead_code)]

use memtable_model::{EntityType, Row};
use memtable_types::{Value, ValueType};
use std::sync::Arc;

/// `Customer { Id: int32, Name: string? }`, key `[Id]`.
pub fn customer() -> Arc<EntityType> {
    Arc::new(
        EntityType::builder("Customer")
            .property("Id", ValueType::Int32)
            .nullable_property("Name", ValueType::String)
            .primary_key(["Id"])
            .build()
            .unwrap(),
    )
}

/// `Order { CustomerId: int32, OrderSeq: int32, Total: float64 }`, key `[CustomerId, OrderSeq]`.
pub fn order() -> Arc<EntityType> {
    Arc::new(
        EntityType::builder("Order")
            .property("CustomerId", ValueType::Int32)
            .property("OrderSeq", ValueType::Int32)
            .property("Total", ValueType::Float64)
            .primary_key(["CustomerId", "OrderSeq"])
            .build()
            .unwrap(),
    )
}

/// `Line { Sku: string, Seq: int32 }`, key `[Seq, Sku]` (not in property order).
pub fn line() -> Arc<EntityType> {
    Arc::new(
        EntityType::builder("Line")
            .property("Sku", ValueType::String)
            .property("Seq", ValueType::Int32)
            .primary_key(["Seq", "Sku"])
            .build()
            .unwrap(),
    )
}

/// An entity type without a primary key.
pub fn keyless() -> Arc<EntityType> {
    Arc::new(
        EntityType::builder("AuditEntry")
            .property("Message", ValueType::String)
            .build()
            .unwrap(),
    )
}

pub fn customer_row(id: i32, name: &str) -> Row {
    Row::new(vec![Value::Int32(id), Value::from(name)])
}

pub fn order_row(customer_id: i32, seq: i32, total: f64) -> Row {
    Row::new(vec![
        Value::Int32(customer_id),
        Value::Int32(seq),
        Value::Float64(total),
    ])
}
