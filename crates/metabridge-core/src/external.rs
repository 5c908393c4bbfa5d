// crates/metabridge-core/src/external.rs
// ============================================================================
// Module: External Client Model
// Description: The external metastore client's view of tables and partitions.
// Purpose: Mirror the external service shapes crossed at the client boundary.
// Dependencies: serde, thiserror (via crate error types)
// ============================================================================

//! ## Overview
//! The external model mirrors what the metastore client sends and receives:
//! second-resolution timestamps, flat string-keyed parameter maps, and
//! positional partition values. Translation between this model and the
//! internal catalog model is lossy by design for timestamps (milliseconds are
//! truncated to seconds on the way out and never recovered).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::interfaces::TranslateError;

// ============================================================================
// SECTION: Table Type
// ============================================================================

/// External table classification as reported by the metastore service.
///
/// # Invariants
/// - `as_str` forms are the service's stable wire labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalTableType {
    /// Externally managed table.
    ExternalTable,
    /// Warehouse-managed table.
    ManagedTable,
    /// Secondary index table.
    IndexTable,
    /// Virtual view.
    VirtualView,
}

impl ExternalTableType {
    /// Returns the service's wire label for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExternalTable => "EXTERNAL_TABLE",
            Self::ManagedTable => "MANAGED_TABLE",
            Self::IndexTable => "INDEX_TABLE",
            Self::VirtualView => "VIRTUAL_VIEW",
        }
    }

    /// Parses a service wire label.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::UnknownTableType`] naming the rejected label.
    pub fn parse(raw: &str) -> Result<Self, TranslateError> {
        match raw {
            "EXTERNAL_TABLE" => Ok(Self::ExternalTable),
            "MANAGED_TABLE" => Ok(Self::ManagedTable),
            "INDEX_TABLE" => Ok(Self::IndexTable),
            "VIRTUAL_VIEW" => Ok(Self::VirtualView),
            other => Err(TranslateError::UnknownTableType(other.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Columns and Storage
// ============================================================================

/// A column as represented by the external client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalColumn {
    /// Column name.
    pub name: String,
    /// Textual data type in the service's type language.
    pub data_type: String,
    /// Optional column comment.
    pub comment: Option<String>,
}

impl ExternalColumn {
    /// Creates an uncommented external column.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            comment: None,
        }
    }
}

/// Storage descriptor as represented by the external client.
///
/// # Invariants
/// - Absent optional fields stay `None`, matching the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalStorageDescriptor {
    /// Storage location URI.
    pub location: Option<String>,
    /// Input format class name.
    pub input_format: Option<String>,
    /// Output format class name.
    pub output_format: Option<String>,
    /// Serialization library class name.
    pub serialization_lib: Option<String>,
    /// Serialization properties.
    pub serde_parameters: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Tables and Partitions
// ============================================================================

/// Table as represented by the external client.
///
/// # Invariants
/// - `create_time_s` and `last_access_time_s` carry one-second resolution.
/// - `columns` holds regular columns only; partition keys live in
///   `partition_columns`.
/// - All configuration is flattened into the string-keyed `parameters` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTable {
    /// Database name.
    pub database: String,
    /// Table name.
    pub name: String,
    /// Table classification.
    pub table_type: ExternalTableType,
    /// Regular (non-partition) columns.
    pub columns: Vec<ExternalColumn>,
    /// Partition-key columns, in partition order.
    pub partition_columns: Vec<ExternalColumn>,
    /// Storage descriptor of the table root.
    pub storage: ExternalStorageDescriptor,
    /// Flat string-keyed table parameters.
    pub parameters: BTreeMap<String, String>,
    /// Table owner.
    pub owner: String,
    /// Creation time in seconds since the epoch.
    pub create_time_s: i64,
    /// Last access time in seconds since the epoch.
    pub last_access_time_s: i64,
}

impl ExternalTable {
    /// Returns the fully qualified `database.table` name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database, self.name)
    }
}

/// Partition as represented by the external client.
///
/// # Invariants
/// - `values` are positional, aligned with the owning table's
///   `partition_columns` order.
/// - `spec` is optional; partitions fetched from older services may omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPartition {
    /// Positional partition values.
    pub values: Vec<String>,
    /// Optional spec map: partition-column name to value.
    pub spec: Option<BTreeMap<String, String>>,
    /// Storage descriptor of the partition.
    pub storage: ExternalStorageDescriptor,
    /// Flat string-keyed partition parameters.
    pub parameters: BTreeMap<String, String>,
    /// Creation time in seconds since the epoch.
    pub create_time_s: i64,
    /// Last access time in seconds since the epoch.
    pub last_access_time_s: i64,
}
