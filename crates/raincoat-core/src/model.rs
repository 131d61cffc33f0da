//! Order model shared by the store and the HTTP surface.
//!
//! Field names are part of the public JSON contract (`customer`, `quantity`,
//! `price`) and match the columns of the `orders` table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A column value exactly as submitted or stored.
///
/// Order fields are not type-checked: whatever JSON a client sends is carried
/// through to the `orders` table, where SQLite column affinity is the only
/// conversion applied. Arrays and objects are kept as their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Json(serde_json::Value),
}

impl FieldValue {
    /// Numeric reading of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Real(x) => Some(*x),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Null | FieldValue::Json(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Real(x) => write!(f, "{x}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n.into())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Real(x)
    }
}

/// A persisted order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer: FieldValue,
    pub quantity: FieldValue,
    pub price: FieldValue,
    /// RFC 3339 / ISO-8601 timestamp.
    pub timestamp: String,
}

impl Order {
    /// `quantity * price` when both columns hold numbers.
    pub fn line_total(&self) -> Option<f64> {
        Some(self.quantity.as_f64()? * self.price.as_f64()?)
    }
}

/// Order submission payload (`POST /order`).
///
/// Values are taken as-is: no type, range, or emptiness checks are applied
/// anywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: FieldValue,
    pub quantity: FieldValue,
    pub price: FieldValue,
}

/// Aggregates over the whole `orders` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderTotals {
    pub count: u64,
    pub revenue: f64,
}
