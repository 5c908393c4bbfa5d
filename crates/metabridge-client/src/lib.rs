// crates/metabridge-client/src/lib.rs
// ============================================================================
// Module: Metabridge Client
// Description: Metadata translation and planning-side estimation helpers.
// Purpose: Translate every call crossing the client boundary and estimate
//          table sizes for query planning.
// Dependencies: metabridge-core, tracing
// ============================================================================

//! ## Overview
//! This crate translates between the host's internal catalog model and the
//! external client model on every boundary crossing, lists partitions with
//! optional metastore-side predicate pushdown, and produces best-effort table
//! size estimates through an ordered fallback chain.
//! Invariants:
//! - Translation is pure and total over well-formed input; failures are fatal
//!   per call and never yield partially populated results.
//! - Size estimation never fails a planning call; degradable errors collapse
//!   to a less precise estimate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod estimate;
pub mod translate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use estimate::LocalFileStore;
pub use estimate::SizeEstimate;
pub use estimate::SizeEstimateOptions;
pub use estimate::SizeProvenance;
pub use estimate::estimate_table_size;
pub use translate::PartitionPredicate;
pub use translate::PredicateOp;
pub use translate::build_partition_filter;
pub use translate::from_external_partition;
pub use translate::from_external_table;
pub use translate::list_partitions;
pub use translate::spec_from_values;
pub use translate::to_external_partition;
pub use translate::to_external_table;
