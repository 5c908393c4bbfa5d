// crates/metabridge-core/src/render.rs
// ============================================================================
// Module: Storage Value Rendering
// Description: Tagged storage-value shapes and their string renderings.
// Purpose: Render literals for display and metastore-side filter expressions.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Storage values form a small sum type (primitive, array, map, struct) with
//! two string renderings that share the recursive cases: the top-level form
//! leaves text unquoted, while the nested form quotes text so composite
//! renderings stay unambiguous. Filter expressions for partition pushdown use
//! the nested form for literals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

// ============================================================================
// SECTION: Storage Values
// ============================================================================

/// A storage value shape.
///
/// # Invariants
/// - `Decimal` carries the host's exact textual rendering; no reformatting is
///   applied.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Integral value.
    Integer(i64),
    /// Exact decimal value, pre-rendered by the host.
    Decimal(String),
    /// Text value.
    Text(String),
    /// Ordered array of values.
    Array(Vec<StorageValue>),
    /// Ordered key-value entries.
    Map(Vec<(StorageValue, StorageValue)>),
    /// Named fields in declaration order.
    Struct(Vec<(String, StorageValue)>),
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a value at the top level: text stays unquoted.
#[must_use]
pub fn render_top_level(value: &StorageValue) -> String {
    match value {
        StorageValue::Text(text) => text.clone(),
        other => render_nested(other),
    }
}

/// Renders a value inside a composite: text is double-quoted.
#[must_use]
pub fn render_nested(value: &StorageValue) -> String {
    match value {
        StorageValue::Null => "NULL".to_string(),
        StorageValue::Boolean(b) => b.to_string(),
        StorageValue::Integer(i) => i.to_string(),
        StorageValue::Decimal(d) => d.clone(),
        StorageValue::Text(text) => format!("\"{text}\""),
        StorageValue::Array(items) => {
            let mut out = String::from("[");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&render_nested(item));
            }
            out.push(']');
            out
        }
        StorageValue::Map(entries) => {
            let mut out = String::from("{");
            for (index, (key, val)) in entries.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}:{}", render_nested(key), render_nested(val));
            }
            out.push('}');
            out
        }
        StorageValue::Struct(fields) => {
            let mut out = String::from("{");
            for (index, (name, val)) in fields.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                let _ = write!(out, "\"{}\":{}", name, render_nested(val));
            }
            out.push('}');
            out
        }
    }
}
