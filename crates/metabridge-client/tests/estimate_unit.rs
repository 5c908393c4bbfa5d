// crates/metabridge-client/tests/estimate_unit.rs
// ============================================================================
// Module: Table Size Estimation Tests
// Description: Validate the ordered fallback chain and its degradation.
// Purpose: Ensure planning estimates never surface filesystem errors.
// Dependencies: metabridge-client, metabridge-core, tempfile
// ============================================================================

//! Unit tests for the size-estimation fallback chain.

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
use std::path::Path;

use metabridge_client::LocalFileStore;
use metabridge_client::SizeEstimateOptions;
use metabridge_client::SizeProvenance;
use metabridge_client::estimate_table_size;
use metabridge_core::ExternalColumn;
use metabridge_core::ExternalStorageDescriptor;
use metabridge_core::ExternalTable;
use metabridge_core::ExternalTableType;
use metabridge_core::FileStore;
use metabridge_core::FileStoreError;
use metabridge_core::MetastoreOptions;

/// File store that always fails.
struct FailingFileStore;

impl FileStore for FailingFileStore {
    fn content_length(&self, path: &Path) -> Result<u64, FileStoreError> {
        Err(FileStoreError::Io {
            path: path.display().to_string(),
            cause: "transient outage".to_string(),
        })
    }
}

/// File store returning a fixed length for every path.
struct FixedFileStore(u64);

impl FileStore for FixedFileStore {
    fn content_length(&self, _path: &Path) -> Result<u64, FileStoreError> {
        Ok(self.0)
    }
}

/// Builds a table with the given declared statistics and location.
fn table(total_size: Option<&str>, raw_data_size: Option<&str>, location: Option<&str>) -> ExternalTable {
    let mut parameters = BTreeMap::new();
    if let Some(value) = total_size {
        parameters.insert("totalSize".to_string(), value.to_string());
    }
    if let Some(value) = raw_data_size {
        parameters.insert("rawDataSize".to_string(), value.to_string());
    }
    ExternalTable {
        database: "db".to_string(),
        name: "t".to_string(),
        table_type: ExternalTableType::ExternalTable,
        columns: vec![ExternalColumn::new("id", "bigint")],
        partition_columns: Vec::new(),
        storage: ExternalStorageDescriptor {
            location: location.map(ToString::to_string),
            ..ExternalStorageDescriptor::default()
        },
        parameters,
        owner: "tester".to_string(),
        create_time_s: 0,
        last_access_time_s: 0,
    }
}

/// Options with scan control and a small recognizable default.
const fn options(fallback_to_scan: bool) -> SizeEstimateOptions {
    SizeEstimateOptions {
        fallback_to_scan,
        default_estimate: 4_096,
    }
}

#[test]
fn declared_total_size_wins() {
    let estimate =
        estimate_table_size(&table(Some("100"), Some("0"), None), &FailingFileStore, &options(true));
    assert_eq!(estimate.bytes, 100);
    assert_eq!(estimate.provenance, SizeProvenance::Declared);
}

#[test]
fn zero_total_size_falls_through_to_raw_data_size() {
    let estimate =
        estimate_table_size(&table(Some("0"), Some("50"), None), &FailingFileStore, &options(false));
    assert_eq!(estimate.bytes, 50);
    assert_eq!(estimate.provenance, SizeProvenance::RawData);
}

#[test]
fn both_zero_with_scan_disabled_uses_the_default() {
    let estimate = estimate_table_size(
        &table(Some("0"), Some("0"), Some("/data/t")),
        &FixedFileStore(999),
        &options(false),
    );
    assert_eq!(estimate.bytes, 4_096);
    assert_eq!(estimate.provenance, SizeProvenance::Default);
}

#[test]
fn scan_step_produces_a_filesystem_estimate() {
    let estimate = estimate_table_size(
        &table(None, None, Some("/data/t")),
        &FixedFileStore(777),
        &options(true),
    );
    assert_eq!(estimate.bytes, 777);
    assert_eq!(estimate.provenance, SizeProvenance::FilesystemScan);
}

#[test]
fn scan_failure_degrades_to_the_default_without_surfacing() {
    let estimate = estimate_table_size(
        &table(Some("0"), Some("0"), Some("/data/t")),
        &FailingFileStore,
        &options(true),
    );
    assert_eq!(estimate.bytes, 4_096);
    assert_eq!(estimate.provenance, SizeProvenance::Default);
}

#[test]
fn missing_location_skips_the_scan_step() {
    let estimate =
        estimate_table_size(&table(None, None, None), &FixedFileStore(777), &options(true));
    assert_eq!(estimate.provenance, SizeProvenance::Default);
}

#[test]
fn unparseable_statistics_are_treated_as_absent() {
    let estimate = estimate_table_size(
        &table(Some("not-a-number"), Some("-5"), None),
        &FailingFileStore,
        &options(false),
    );
    assert_eq!(estimate.provenance, SizeProvenance::Default);
}

#[test]
fn options_derive_from_the_metastore_surface() {
    let metastore = MetastoreOptions {
        fallback_to_scan: true,
        default_size_estimate: 2_048,
        ..MetastoreOptions::default()
    };
    let derived = SizeEstimateOptions::from_metastore(&metastore);
    assert!(derived.fallback_to_scan);

    let scanned = estimate_table_size(
        &table(None, None, Some("/data/t")),
        &FixedFileStore(777),
        &derived,
    );
    assert_eq!(scanned.provenance, SizeProvenance::FilesystemScan);

    let defaulted = estimate_table_size(&table(None, None, None), &FailingFileStore, &derived);
    assert_eq!(defaulted.bytes, 2_048);
    assert_eq!(defaulted.provenance, SizeProvenance::Default);
}

#[test]
fn local_file_store_sums_files_recursively() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("part-0"), vec![0_u8; 10])?;
    std::fs::create_dir(dir.path().join("year=2024"))?;
    std::fs::write(dir.path().join("year=2024").join("part-1"), vec![0_u8; 32])?;

    let store = LocalFileStore;
    assert_eq!(store.content_length(dir.path())?, 42);
    Ok(())
}

#[test]
fn local_file_store_reports_missing_paths_as_errors() {
    let store = LocalFileStore;
    let err = match store.content_length(Path::new("/definitely/not/here")) {
        Err(err) => err,
        Ok(bytes) => panic!("unexpected length: {bytes}"),
    };
    assert!(err.to_string().contains("/definitely/not/here"));
}
