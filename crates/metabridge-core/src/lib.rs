// crates/metabridge-core/src/lib.rs
// ============================================================================
// Module: Metabridge Core
// Description: Version-independent catalog model and metastore interfaces.
// Purpose: Define the shared types and contract surfaces used across Metabridge.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This crate defines the host's internal catalog representation, the external
//! metastore client representation, the client capability traits, the
//! configuration surface, and the boundary helpers (time-unit translation and
//! storage-value rendering) shared by the isolation and client crates.
//! Invariants:
//! - Catalog and external values are immutable once constructed.
//! - External-service errors surface unchanged through [`MetastoreError`].
//!
//! Error posture: configuration and translation failures embed the offending
//! value so misconfiguration is diagnosable without internal knowledge.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod external;
pub mod interfaces;
pub mod memory;
pub mod options;
pub mod render;
pub mod timevars;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogColumn;
pub use catalog::CatalogStorageFormat;
pub use catalog::CatalogTable;
pub use catalog::CatalogTablePartition;
pub use catalog::CatalogTableType;
pub use external::ExternalColumn;
pub use external::ExternalPartition;
pub use external::ExternalStorageDescriptor;
pub use external::ExternalTable;
pub use external::ExternalTableType;
pub use interfaces::FileStore;
pub use interfaces::FileStoreError;
pub use interfaces::HostLoader;
pub use interfaces::JarSet;
pub use interfaces::MetastoreClient;
pub use interfaces::MetastoreError;
pub use interfaces::PackageResolver;
pub use interfaces::PackageResolverError;
pub use interfaces::SessionTableCache;
pub use interfaces::TranslateError;
pub use memory::MemoryMetastore;
pub use options::ConfigError;
pub use options::ConnectionOptions;
pub use options::JarSource;
pub use options::MetastoreOptions;
pub use options::parse_prefix_list;
pub use render::StorageValue;
pub use render::render_nested;
pub use render::render_top_level;
pub use timevars::TimeUnit;
pub use timevars::translate_time_vars;
pub use version::ClientVersion;
pub use version::EXECUTION_VERSION;
