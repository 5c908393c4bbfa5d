// crates/metabridge-core/src/interfaces.rs
// ============================================================================
// Module: Metabridge Interfaces
// Description: Client capability set and external collaborator contracts.
// Purpose: Define the surfaces Metabridge consumes without backend details.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Metabridge talks to external systems: the metastore
//! client capability set, the package resolver used for on-demand artifact
//! fetches, the filesystem collaborator used by size estimation, the host
//! loader chain used for jar auto-discovery, and the session table cache that
//! the SQL command surface drives.
//! Invariants:
//! - External-service errors are surfaced unchanged; this layer adds no retry
//!   policy of its own.
//! - Translation errors are fatal per call; callers never receive a partially
//!   populated result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::external::ExternalPartition;
use crate::external::ExternalTable;
use crate::version::ClientVersion;

// ============================================================================
// SECTION: Jar Sets
// ============================================================================

/// An ordered sequence of artifact locations forming a classpath.
///
/// # Invariants
/// - Order is significant: the first matching artifact wins at resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarSet {
    /// Artifact locations in resolution order.
    jars: Vec<PathBuf>,
}

impl JarSet {
    /// Creates a jar set from locations, deduplicating while preserving the
    /// first-seen order.
    #[must_use]
    pub fn new(jars: Vec<PathBuf>) -> Self {
        let mut seen = Vec::with_capacity(jars.len());
        for jar in jars {
            if !seen.contains(&jar) {
                seen.push(jar);
            }
        }
        Self {
            jars: seen,
        }
    }

    /// Returns the artifact locations in resolution order.
    #[must_use]
    pub fn jars(&self) -> &[PathBuf] {
        &self.jars
    }

    /// Returns true when the jar set holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jars.is_empty()
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jars.len()
    }
}

// ============================================================================
// SECTION: Metastore Client
// ============================================================================

/// External metastore client errors.
///
/// # Invariants
/// - `Service` carries the service-reported message unchanged.
#[derive(Debug, Error)]
pub enum MetastoreError {
    /// Table does not exist in the metastore.
    #[error("table not found: {database}.{table}")]
    NotFound {
        /// Database name.
        database: String,
        /// Table name.
        table: String,
    },
    /// Table already exists in the metastore.
    #[error("table already exists: {database}.{table}")]
    AlreadyExists {
        /// Database name.
        database: String,
        /// Table name.
        table: String,
    },
    /// The external service reported an error.
    #[error("metastore service error: {0}")]
    Service(String),
}

/// Capability set shared by every supported client version.
///
/// Implementations are synchronous and may block on network round trips;
/// callers apply their own timeout or cancellation wrapper externally.
pub trait MetastoreClient: Send + Sync {
    /// Returns the client version this instance speaks.
    fn version(&self) -> ClientVersion;

    /// Fetches a table by database and name.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError::NotFound`] when the table does not exist, or
    /// a service error unchanged.
    fn get_table(&self, database: &str, table: &str) -> Result<ExternalTable, MetastoreError>;

    /// Creates a table.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError::AlreadyExists`] on a duplicate, or a service
    /// error unchanged.
    fn create_table(&self, table: &ExternalTable) -> Result<(), MetastoreError>;

    /// Replaces an existing table definition.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError::NotFound`] when the table does not exist, or
    /// a service error unchanged.
    fn alter_table(
        &self,
        database: &str,
        table: &str,
        updated: &ExternalTable,
    ) -> Result<(), MetastoreError>;

    /// Drops a table.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError::NotFound`] when the table does not exist, or
    /// a service error unchanged.
    fn drop_table(&self, database: &str, table: &str) -> Result<(), MetastoreError>;

    /// Lists every partition of a table.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError`] when the table is missing or the service
    /// fails.
    fn list_partitions(
        &self,
        database: &str,
        table: &str,
    ) -> Result<Vec<ExternalPartition>, MetastoreError>;

    /// Lists partitions matching a metastore-side filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError`] when the table is missing, the filter is
    /// rejected, or the service fails.
    fn list_partitions_by_filter(
        &self,
        database: &str,
        table: &str,
        filter: &str,
    ) -> Result<Vec<ExternalPartition>, MetastoreError>;
}

// ============================================================================
// SECTION: Translation Errors
// ============================================================================

/// Metadata translation errors.
///
/// # Invariants
/// - Messages name the offending column or label for diagnosis.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A partition spec is missing a declared partition column.
    #[error("partition spec is missing partition column: {column}")]
    IncompleteSpec {
        /// Name of the missing partition column.
        column: String,
    },
    /// The external service reported an unknown table type label.
    #[error("unknown external table type: {0}")]
    UnknownTableType(String),
}

// ============================================================================
// SECTION: Package Resolver
// ============================================================================

/// Package resolution errors for on-demand artifact fetches.
#[derive(Debug, Error)]
pub enum PackageResolverError {
    /// Resolution failed; carries the resolver-reported cause.
    #[error("package resolution failed for client {version}: {cause}")]
    ResolutionFailed {
        /// Requested client version.
        version: ClientVersion,
        /// Resolver-reported cause.
        cause: String,
    },
}

/// Resolves a versioned artifact set from a remote repository.
pub trait PackageResolver: Send + Sync {
    /// Resolves the artifact set for a client version on a platform version.
    ///
    /// # Errors
    ///
    /// Returns [`PackageResolverError`] when resolution fails; failures
    /// propagate as fatal construction errors.
    fn resolve(
        &self,
        version: ClientVersion,
        platform_version: &str,
    ) -> Result<JarSet, PackageResolverError>;
}

// ============================================================================
// SECTION: Filesystem Collaborator
// ============================================================================

/// Filesystem collaborator errors.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Content length could not be determined for the path.
    #[error("file store error for {path}: {cause}")]
    Io {
        /// Path being inspected.
        path: String,
        /// Underlying cause.
        cause: String,
    },
}

/// Filesystem collaborator used by table size estimation.
pub trait FileStore: Send + Sync {
    /// Returns the total content length in bytes under the path.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError`] when the path cannot be scanned.
    fn content_length(&self, path: &Path) -> Result<u64, FileStoreError>;
}

// ============================================================================
// SECTION: Host Loader Chain
// ============================================================================

/// A node in the host's loader chain, used for jar auto-discovery.
///
/// The builtin jar source walks this chain to recover the locations of
/// artifacts the host has already loaded.
pub trait HostLoader: Send + Sync {
    /// Returns the artifact locations loaded at this node.
    fn loaded_jars(&self) -> Vec<PathBuf>;

    /// Returns the parent node, if any.
    fn parent(&self) -> Option<&dyn HostLoader>;
}

// ============================================================================
// SECTION: Session Table Cache
// ============================================================================

/// Session-wide named-table cache driven by the SQL command surface.
///
/// This layer does not implement caching; the trait fixes the semantics the
/// external collaborator must provide.
///
/// # Invariants
/// - The cache is keyed by fully qualified `database.table` names.
/// - Lazy entries materialize on first read; eager entries immediately.
pub trait SessionTableCache: Send + Sync {
    /// Caches a table, lazily or eagerly.
    fn cache_table(&self, qualified_name: &str, lazy: bool);

    /// Evicts a table; `blocking` false requests non-blocking eviction.
    fn uncache_table(&self, qualified_name: &str, blocking: bool);

    /// Evicts every cached table.
    fn clear_cache(&self);
}
