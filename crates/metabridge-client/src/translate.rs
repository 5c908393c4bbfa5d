// crates/metabridge-client/src/translate.rs
// ============================================================================
// Module: Metadata Translation
// Description: Bidirectional mapping between catalog and external entities.
// Purpose: Translate tables and partitions at the client boundary.
// Dependencies: metabridge-core
// ============================================================================

//! ## Overview
//! Translation crosses two independently evolving schemas. Outbound table
//! translation splits the schema into regular and partition columns,
//! substitutes the historical synthetic column for schema-less tables, marks
//! external tables explicitly, and truncates millisecond timestamps to the
//! external second resolution. Truncation is a deliberate, lossy, one-way
//! narrowing: round-tripping a table does not preserve sub-second precision.
//! Partition listing optionally pushes predicates down to the metastore;
//! with pruning disabled the full partition list is fetched and any predicate
//! argument is discarded, a documented legacy behavior retained for
//! compatibility with older deployments.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use metabridge_core::CatalogColumn;
use metabridge_core::CatalogStorageFormat;
use metabridge_core::CatalogTable;
use metabridge_core::CatalogTablePartition;
use metabridge_core::CatalogTableType;
use metabridge_core::ExternalColumn;
use metabridge_core::ExternalPartition;
use metabridge_core::ExternalStorageDescriptor;
use metabridge_core::ExternalTable;
use metabridge_core::ExternalTableType;
use metabridge_core::MetastoreClient;
use metabridge_core::MetastoreError;
use metabridge_core::StorageValue;
use metabridge_core::TranslateError;
use metabridge_core::render_nested;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker parameter without which the external service silently reclassifies
/// an external table as managed.
const EXTERNAL_MARKER_KEY: &str = "EXTERNAL";

/// Marker value for [`EXTERNAL_MARKER_KEY`].
const EXTERNAL_MARKER_VALUE: &str = "TRUE";

/// Name of the synthetic column substituted for schema-less tables.
const SYNTHETIC_COLUMN_NAME: &str = "col";

/// Type of the synthetic column substituted for schema-less tables.
const SYNTHETIC_COLUMN_TYPE: &str = "array<string>";

// ============================================================================
// SECTION: Table Translation
// ============================================================================

/// Translates an internal table into the external client shape.
///
/// The schema splits into regular and partition columns by
/// `partition_column_names`; an empty regular list substitutes one synthetic
/// `col` column to preserve historical default-schema behavior. Timestamps
/// narrow from milliseconds to seconds.
#[must_use]
pub fn to_external_table(table: &CatalogTable) -> ExternalTable {
    let mut columns: Vec<ExternalColumn> = table
        .schema
        .iter()
        .filter(|column| !table.partition_column_names.contains(&column.name))
        .map(column_to_external)
        .collect();
    if columns.is_empty() {
        columns.push(ExternalColumn::new(SYNTHETIC_COLUMN_NAME, SYNTHETIC_COLUMN_TYPE));
    }

    let partition_columns: Vec<ExternalColumn> = table
        .partition_column_names
        .iter()
        .filter_map(|name| table.schema.iter().find(|column| &column.name == name))
        .map(column_to_external)
        .collect();

    let mut parameters = table.properties.clone();
    let table_type = match table.table_type {
        CatalogTableType::External => {
            parameters.insert(EXTERNAL_MARKER_KEY.to_string(), EXTERNAL_MARKER_VALUE.to_string());
            ExternalTableType::ExternalTable
        }
        CatalogTableType::Managed => ExternalTableType::ManagedTable,
        CatalogTableType::Index => ExternalTableType::IndexTable,
        CatalogTableType::View => ExternalTableType::VirtualView,
    };

    ExternalTable {
        database: table.database.clone(),
        name: table.name.clone(),
        table_type,
        columns,
        partition_columns,
        storage: storage_to_external(&table.storage),
        parameters,
        owner: table.owner.clone(),
        create_time_s: table.create_time_ms / 1000,
        last_access_time_s: table.last_access_time_ms / 1000,
    }
}

/// Translates an external table back into the internal catalog shape.
///
/// Second-resolution timestamps widen to milliseconds; the sub-second part
/// lost on the way out is not recovered.
#[must_use]
pub fn from_external_table(table: &ExternalTable) -> CatalogTable {
    let schema = table
        .columns
        .iter()
        .chain(table.partition_columns.iter())
        .map(column_from_external)
        .collect();
    let table_type = match table.table_type {
        ExternalTableType::ExternalTable => CatalogTableType::External,
        ExternalTableType::ManagedTable => CatalogTableType::Managed,
        ExternalTableType::IndexTable => CatalogTableType::Index,
        ExternalTableType::VirtualView => CatalogTableType::View,
    };

    CatalogTable {
        database: table.database.clone(),
        name: table.name.clone(),
        table_type,
        schema,
        partition_column_names: table
            .partition_columns
            .iter()
            .map(|column| column.name.clone())
            .collect(),
        storage: storage_from_external(&table.storage),
        properties: table.parameters.clone(),
        owner: table.owner.clone(),
        create_time_ms: table.create_time_s * 1000,
        last_access_time_ms: table.last_access_time_s * 1000,
    }
}

// ============================================================================
// SECTION: Partition Translation
// ============================================================================

/// Translates an internal partition into the external client shape.
///
/// Partition values are resolved positionally by looking up each of the
/// external table's declared partition-column names in the partition's spec.
///
/// # Errors
///
/// Returns [`TranslateError::IncompleteSpec`] naming the first declared
/// partition column missing from the spec.
pub fn to_external_partition(
    partition: &CatalogTablePartition,
    table: &ExternalTable,
) -> Result<ExternalPartition, TranslateError> {
    let mut values = Vec::with_capacity(table.partition_columns.len());
    for column in &table.partition_columns {
        let Some(value) = partition.spec.get(&column.name) else {
            return Err(TranslateError::IncompleteSpec {
                column: column.name.clone(),
            });
        };
        values.push(value.clone());
    }

    Ok(ExternalPartition {
        values,
        spec: Some(partition.spec.clone()),
        storage: storage_to_external(&partition.storage),
        parameters: partition.parameters.clone(),
        create_time_s: partition.create_time_ms / 1000,
        last_access_time_s: partition.last_access_time_ms / 1000,
    })
}

/// Translates an external partition back into the internal catalog shape.
///
/// An absent spec yields an empty mapping rather than failing.
#[must_use]
pub fn from_external_partition(partition: &ExternalPartition) -> CatalogTablePartition {
    CatalogTablePartition {
        spec: partition.spec.clone().unwrap_or_default(),
        storage: storage_from_external(&partition.storage),
        parameters: partition.parameters.clone(),
        create_time_ms: partition.create_time_s * 1000,
        last_access_time_ms: partition.last_access_time_s * 1000,
    }
}

// ============================================================================
// SECTION: Partition Listing
// ============================================================================

/// Comparison operator in a partition predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl PredicateOp {
    /// Returns the filter-expression rendering of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// A single partition-column predicate eligible for pushdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionPredicate {
    /// Partition column name.
    pub column: String,
    /// Comparison operator.
    pub op: PredicateOp,
    /// Literal operand.
    pub value: StorageValue,
}

/// Renders predicates into a metastore-side filter expression.
///
/// Literals use the nested rendering so text operands are quoted.
#[must_use]
pub fn build_partition_filter(predicates: &[PartitionPredicate]) -> String {
    predicates
        .iter()
        .map(|predicate| {
            format!(
                "{} {} {}",
                predicate.column,
                predicate.op.as_str(),
                render_nested(&predicate.value)
            )
        })
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Lists partitions of a table, pushing predicates down when pruning is on.
///
/// With pruning disabled the unfiltered full partition list is fetched and
/// the predicates are discarded; callers trade metastore-side efficiency for
/// guaranteed-complete client-side filtering.
///
/// # Errors
///
/// Returns [`MetastoreError`] unchanged from the client.
pub fn list_partitions(
    client: &dyn MetastoreClient,
    table: &ExternalTable,
    predicates: &[PartitionPredicate],
    pruning_enabled: bool,
) -> Result<Vec<ExternalPartition>, MetastoreError> {
    if pruning_enabled && !predicates.is_empty() {
        let filter = build_partition_filter(predicates);
        return client.list_partitions_by_filter(&table.database, &table.name, &filter);
    }
    client.list_partitions(&table.database, &table.name)
}

// ============================================================================
// SECTION: Column and Storage Helpers
// ============================================================================

/// Maps an internal column to the external shape.
fn column_to_external(column: &CatalogColumn) -> ExternalColumn {
    ExternalColumn {
        name: column.name.clone(),
        data_type: column.data_type.clone(),
        comment: column.comment.clone(),
    }
}

/// Maps an external column to the internal shape.
fn column_from_external(column: &ExternalColumn) -> CatalogColumn {
    CatalogColumn {
        name: column.name.clone(),
        data_type: column.data_type.clone(),
        nullable: true,
        comment: column.comment.clone(),
    }
}

/// Maps internal storage to the external descriptor; absent optional fields
/// stay absent, never defaulted to empty strings.
fn storage_to_external(storage: &CatalogStorageFormat) -> ExternalStorageDescriptor {
    ExternalStorageDescriptor {
        location: storage.location_uri.clone(),
        input_format: storage.input_format.clone(),
        output_format: storage.output_format.clone(),
        serialization_lib: storage.serde.clone(),
        serde_parameters: storage.serde_properties.clone(),
    }
}

/// Maps an external descriptor back to internal storage.
fn storage_from_external(storage: &ExternalStorageDescriptor) -> CatalogStorageFormat {
    CatalogStorageFormat {
        location_uri: storage.location.clone(),
        input_format: storage.input_format.clone(),
        output_format: storage.output_format.clone(),
        serde: storage.serialization_lib.clone(),
        serde_properties: storage.serde_parameters.clone(),
    }
}

// ============================================================================
// SECTION: Spec Helpers
// ============================================================================

/// Builds a spec mapping from positional values and declared columns.
///
/// Used when older services return partitions without a spec; extra values
/// beyond the declared columns are dropped.
#[must_use]
pub fn spec_from_values(
    table: &ExternalTable,
    values: &[String],
) -> BTreeMap<String, String> {
    table
        .partition_columns
        .iter()
        .zip(values.iter())
        .map(|(column, value)| (column.name.clone(), value.clone()))
        .collect()
}
