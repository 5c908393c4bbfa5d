// crates/metabridge-client/tests/translate_unit.rs
// ============================================================================
// Module: Metadata Translation Tests
// Description: Validate bidirectional table and partition translation.
// Purpose: Ensure schema splitting, markers, truncation, and spec errors.
// Dependencies: metabridge-client, metabridge-core
// ============================================================================

//! Unit tests for catalog/external metadata translation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use metabridge_client::from_external_partition;
use metabridge_client::from_external_table;
use metabridge_client::spec_from_values;
use metabridge_client::to_external_partition;
use metabridge_client::to_external_table;
use metabridge_core::CatalogColumn;
use metabridge_core::CatalogStorageFormat;
use metabridge_core::CatalogTable;
use metabridge_core::CatalogTablePartition;
use metabridge_core::CatalogTableType;
use metabridge_core::ExternalTableType;
use metabridge_core::TranslateError;

/// Builds a partitioned external-type table with a two-column schema.
fn sample_table() -> CatalogTable {
    CatalogTable {
        database: "sales".to_string(),
        name: "orders".to_string(),
        table_type: CatalogTableType::External,
        schema: vec![
            CatalogColumn::new("id", "bigint"),
            CatalogColumn::new("amount", "decimal(10,2)"),
            CatalogColumn::new("year", "string"),
            CatalogColumn::new("month", "string"),
        ],
        partition_column_names: vec!["year".to_string(), "month".to_string()],
        storage: CatalogStorageFormat {
            location_uri: Some("/warehouse/sales/orders".to_string()),
            input_format: Some("com.vendor.mapred.TextInputFormat".to_string()),
            output_format: None,
            serde: None,
            serde_properties: BTreeMap::new(),
        },
        properties: BTreeMap::new(),
        owner: "etl".to_string(),
        create_time_ms: 1_700_000_000_789,
        last_access_time_ms: 1_700_000_111_999,
    }
}

/// Builds a partition spec from `(name, value)` pairs.
fn spec(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn schema_splits_into_regular_and_partition_columns() {
    let external = to_external_table(&sample_table());
    let regular: Vec<&str> = external.columns.iter().map(|c| c.name.as_str()).collect();
    let partition: Vec<&str> = external.partition_columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(regular, vec!["id", "amount"]);
    assert_eq!(partition, vec!["year", "month"]);
}

#[test]
fn external_tables_carry_the_external_marker() {
    let external = to_external_table(&sample_table());
    assert_eq!(external.table_type, ExternalTableType::ExternalTable);
    assert_eq!(external.parameters.get("EXTERNAL").map(String::as_str), Some("TRUE"));

    let mut managed = sample_table();
    managed.table_type = CatalogTableType::Managed;
    let external = to_external_table(&managed);
    assert_eq!(external.table_type, ExternalTableType::ManagedTable);
    assert!(!external.parameters.contains_key("EXTERNAL"));
}

#[test]
fn timestamps_truncate_to_seconds_and_do_not_round_trip() {
    let table = sample_table();
    let external = to_external_table(&table);
    assert_eq!(external.create_time_s, 1_700_000_000);
    assert_eq!(external.last_access_time_s, 1_700_000_111);

    // The sub-second part is lost by design; the round trip lands on the
    // whole second, not the original millisecond value.
    let back = from_external_table(&external);
    assert_eq!(back.create_time_ms, 1_700_000_000_000);
    assert_ne!(back.create_time_ms, table.create_time_ms);
}

#[test]
fn empty_schema_yields_exactly_one_synthetic_column() {
    let mut table = sample_table();
    table.schema.clear();
    table.partition_column_names.clear();
    let external = to_external_table(&table);
    assert_eq!(external.columns.len(), 1);
    assert_eq!(external.columns[0].name, "col");
    assert_eq!(external.columns[0].data_type, "array<string>");
}

#[test]
fn all_partition_schema_yields_the_synthetic_column() {
    let mut table = sample_table();
    table.schema =
        vec![CatalogColumn::new("year", "string"), CatalogColumn::new("month", "string")];
    let external = to_external_table(&table);
    assert_eq!(external.columns.len(), 1);
    assert_eq!(external.columns[0].name, "col");
    assert_eq!(external.partition_columns.len(), 2);
}

#[test]
fn absent_storage_fields_stay_absent() {
    let external = to_external_table(&sample_table());
    assert_eq!(external.storage.location.as_deref(), Some("/warehouse/sales/orders"));
    assert!(external.storage.output_format.is_none());
    assert!(external.storage.serialization_lib.is_none());
}

#[test]
fn view_and_index_types_map_both_ways() {
    for (internal, external_type) in [
        (CatalogTableType::View, ExternalTableType::VirtualView),
        (CatalogTableType::Index, ExternalTableType::IndexTable),
    ] {
        let mut table = sample_table();
        table.table_type = internal;
        let external = to_external_table(&table);
        assert_eq!(external.table_type, external_type);
        assert_eq!(from_external_table(&external).table_type, internal);
    }
}

#[test]
fn partition_values_resolve_positionally() -> Result<(), TranslateError> {
    let external = to_external_table(&sample_table());
    let partition = CatalogTablePartition {
        spec: spec(&[("month", "06"), ("year", "2024")]),
        storage: CatalogStorageFormat::default(),
        parameters: BTreeMap::new(),
        create_time_ms: 1_700_000_000_500,
        last_access_time_ms: 0,
    };
    let translated = to_external_partition(&partition, &external)?;
    assert_eq!(translated.values, vec!["2024".to_string(), "06".to_string()]);
    assert_eq!(translated.create_time_s, 1_700_000_000);
    Ok(())
}

#[test]
fn missing_spec_value_fails_naming_the_column() {
    let external = to_external_table(&sample_table());
    let partition = CatalogTablePartition {
        spec: spec(&[("year", "2024")]),
        storage: CatalogStorageFormat::default(),
        parameters: BTreeMap::new(),
        create_time_ms: 0,
        last_access_time_ms: 0,
    };
    let err = match to_external_partition(&partition, &external) {
        Err(err) => err,
        Ok(_) => panic!("expected translation to fail"),
    };
    assert!(matches!(err, TranslateError::IncompleteSpec { ref column } if column == "month"));
    assert!(err.to_string().contains("month"));
}

#[test]
fn partition_spec_round_trips_identically() -> Result<(), TranslateError> {
    let external = to_external_table(&sample_table());
    let original = CatalogTablePartition {
        spec: spec(&[("year", "2024"), ("month", "06")]),
        storage: CatalogStorageFormat::default(),
        parameters: BTreeMap::new(),
        create_time_ms: 1_700_000_000_000,
        last_access_time_ms: 0,
    };
    let translated = to_external_partition(&original, &external)?;
    let back = from_external_partition(&translated);
    assert_eq!(back.spec, original.spec);
    Ok(())
}

#[test]
fn absent_spec_recovers_as_empty_mapping() {
    let external = to_external_table(&sample_table());
    let mut translated = to_external_partition(
        &CatalogTablePartition {
            spec: spec(&[("year", "2024"), ("month", "06")]),
            storage: CatalogStorageFormat::default(),
            parameters: BTreeMap::new(),
            create_time_ms: 0,
            last_access_time_ms: 0,
        },
        &external,
    )
    .unwrap_or_else(|err| panic!("translation failed: {err}"));
    translated.spec = None;

    let back = from_external_partition(&translated);
    assert!(back.spec.is_empty());

    // Positional values can still rebuild a spec against the table.
    let rebuilt = spec_from_values(&external, &translated.values);
    assert_eq!(rebuilt, spec(&[("year", "2024"), ("month", "06")]));
}
