// crates/metabridge-core/src/catalog.rs
// ============================================================================
// Module: Internal Catalog Model
// Description: Version-independent catalog entities for tables and partitions.
// Purpose: Represent host-side metadata independent of any client version.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The internal catalog model is the host's representation of tables, columns,
//! partitions, and storage formats. It is independent of any external client
//! version; the client crate translates it to and from the external shapes at
//! the boundary.
//! Invariants:
//! - Timestamps carry millisecond resolution; translation narrows to seconds.
//! - A column name never appears in both the regular and partition-key role
//!   once the schema split is applied at the translation boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Table Type
// ============================================================================

/// Internal table classification.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogTableType {
    /// Table whose data lives outside the warehouse and outlives the table.
    External,
    /// Table whose data is owned and managed by the warehouse.
    Managed,
    /// Secondary index table.
    Index,
    /// Logical view with no storage of its own.
    View,
}

// ============================================================================
// SECTION: Columns and Storage
// ============================================================================

/// A single column in the internal schema.
///
/// # Invariants
/// - `data_type` is the host's textual type form (for example `array<string>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    /// Column name.
    pub name: String,
    /// Textual data type.
    pub data_type: String,
    /// Whether the column admits nulls.
    pub nullable: bool,
    /// Optional column comment.
    pub comment: Option<String>,
}

impl CatalogColumn {
    /// Creates a nullable, uncommented column.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            comment: None,
        }
    }
}

/// Storage format of a table or partition.
///
/// # Invariants
/// - Absent optional fields stay `None`; they are never defaulted to empty
///   strings at the translation boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStorageFormat {
    /// Storage location URI.
    pub location_uri: Option<String>,
    /// Input format class name.
    pub input_format: Option<String>,
    /// Output format class name.
    pub output_format: Option<String>,
    /// Serialization library class name.
    pub serde: Option<String>,
    /// Serialization properties.
    pub serde_properties: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Tables and Partitions
// ============================================================================

/// Internal table definition.
///
/// # Invariants
/// - `schema` includes both regular and partition-key columns; the split is
///   performed by `partition_column_names` at translation time.
/// - `create_time_ms` and `last_access_time_ms` are millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTable {
    /// Database name.
    pub database: String,
    /// Table name.
    pub name: String,
    /// Table classification.
    pub table_type: CatalogTableType,
    /// Full schema, regular and partition-key columns together.
    pub schema: Vec<CatalogColumn>,
    /// Names of partition-key columns, in partition order.
    pub partition_column_names: Vec<String>,
    /// Storage format of the table root.
    pub storage: CatalogStorageFormat,
    /// Free-form table properties.
    pub properties: BTreeMap<String, String>,
    /// Table owner.
    pub owner: String,
    /// Creation time in milliseconds since the epoch.
    pub create_time_ms: i64,
    /// Last access time in milliseconds since the epoch.
    pub last_access_time_ms: i64,
}

/// Internal partition definition.
///
/// # Invariants
/// - `spec` maps partition-column names to their values; it may be empty for
///   partitions recovered from an external handle without a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTablePartition {
    /// Partition spec: column name to value.
    pub spec: BTreeMap<String, String>,
    /// Storage format of the partition.
    pub storage: CatalogStorageFormat,
    /// Free-form partition parameters.
    pub parameters: BTreeMap<String, String>,
    /// Creation time in milliseconds since the epoch.
    pub create_time_ms: i64,
    /// Last access time in milliseconds since the epoch.
    pub last_access_time_ms: i64,
}
