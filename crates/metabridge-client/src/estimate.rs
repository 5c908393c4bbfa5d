// crates/metabridge-client/src/estimate.rs
// ============================================================================
// Module: Table Size Estimation
// Description: Fallback-chain heuristic for table byte-size estimates.
// Purpose: Feed query planning a best-effort cardinality input.
// Dependencies: metabridge-core, tracing
// ============================================================================

//! ## Overview
//! Size estimation walks an ordered fallback chain, first match wins:
//! a declared total-size statistic, a declared raw-data-size statistic, an
//! optional live filesystem scan of the storage location, and finally the
//! configured default. Authoritative statistics rank above the scan because
//! they are cheaper and more accurate; the raw-data step exists because
//! external services report a total size of exactly zero for
//! externally-managed tables, which would otherwise bias planning toward an
//! underestimate. Scan failures are logged and swallowed; the estimator never
//! fails a planning call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use metabridge_core::ExternalTable;
use metabridge_core::FileStore;
use metabridge_core::FileStoreError;
use metabridge_core::MetastoreOptions;
use tracing::warn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Declared total-size statistic parameter.
const TOTAL_SIZE_PARAMETER: &str = "totalSize";

/// Declared raw-data-size statistic parameter.
const RAW_DATA_SIZE_PARAMETER: &str = "rawDataSize";

// ============================================================================
// SECTION: Estimates
// ============================================================================

/// Which step of the fallback chain produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeProvenance {
    /// Declared total-size statistic.
    Declared,
    /// Declared raw-data-size statistic.
    RawData,
    /// Live filesystem content-length scan.
    FilesystemScan,
    /// Process-wide configured default.
    Default,
}

/// A byte-size estimate and the step that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEstimate {
    /// Estimated size in bytes.
    pub bytes: u64,
    /// Fallback-chain step that produced the estimate.
    pub provenance: SizeProvenance,
}

/// Options controlling the estimation fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEstimateOptions {
    /// Whether the live filesystem scan step is enabled.
    pub fallback_to_scan: bool,
    /// Default estimate when no other step produces a result.
    pub default_estimate: u64,
}

impl SizeEstimateOptions {
    /// Derives estimation options from the metastore option surface.
    #[must_use]
    pub const fn from_metastore(options: &MetastoreOptions) -> Self {
        Self {
            fallback_to_scan: options.fallback_to_scan,
            default_estimate: options.default_size_estimate,
        }
    }
}

// ============================================================================
// SECTION: Estimation
// ============================================================================

/// Reads a declared statistic parameter, treating absent, unparseable, and
/// zero values as no result.
fn declared_statistic(table: &ExternalTable, parameter: &str) -> Option<u64> {
    table
        .parameters
        .get(parameter)
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|bytes| *bytes > 0)
}

/// Scans the table's storage location for its content length.
///
/// Any failure is logged at warn level and treated as no result so a
/// transient filesystem error can never fail a planning call.
fn scan_storage_location(table: &ExternalTable, file_store: &dyn FileStore) -> Option<u64> {
    let location = table.storage.location.as_deref()?;
    match file_store.content_length(Path::new(location)) {
        Ok(bytes) => Some(bytes),
        Err(cause) => {
            warn!(
                table = %table.qualified_name(),
                %location,
                %cause,
                "filesystem scan failed during size estimation; falling back"
            );
            None
        }
    }
}

/// Estimates the byte size of a table through the fallback chain.
#[must_use]
pub fn estimate_table_size(
    table: &ExternalTable,
    file_store: &dyn FileStore,
    options: &SizeEstimateOptions,
) -> SizeEstimate {
    if let Some(bytes) = declared_statistic(table, TOTAL_SIZE_PARAMETER) {
        return SizeEstimate {
            bytes,
            provenance: SizeProvenance::Declared,
        };
    }
    if let Some(bytes) = declared_statistic(table, RAW_DATA_SIZE_PARAMETER) {
        return SizeEstimate {
            bytes,
            provenance: SizeProvenance::RawData,
        };
    }
    if options.fallback_to_scan
        && let Some(bytes) = scan_storage_location(table, file_store)
    {
        return SizeEstimate {
            bytes,
            provenance: SizeProvenance::FilesystemScan,
        };
    }
    SizeEstimate {
        bytes: options.default_estimate,
        provenance: SizeProvenance::Default,
    }
}

// ============================================================================
// SECTION: Local File Store
// ============================================================================

/// Filesystem collaborator backed by the local filesystem.
///
/// Content length of a directory is the recursive sum of the lengths of the
/// regular files beneath it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl LocalFileStore {
    /// Sums regular-file lengths under the path recursively.
    fn sum_lengths(path: &Path) -> Result<u64, std::io::Error> {
        let metadata = std::fs::metadata(path)?;
        if metadata.is_file() {
            return Ok(metadata.len());
        }
        let mut total = 0_u64;
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            total = total.saturating_add(Self::sum_lengths(&entry.path())?);
        }
        Ok(total)
    }
}

impl FileStore for LocalFileStore {
    fn content_length(&self, path: &Path) -> Result<u64, FileStoreError> {
        Self::sum_lengths(path).map_err(|cause| FileStoreError::Io {
            path: path.display().to_string(),
            cause: cause.to_string(),
        })
    }
}
