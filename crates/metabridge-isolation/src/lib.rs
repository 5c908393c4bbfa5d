// crates/metabridge-isolation/src/lib.rs
// ============================================================================
// Module: Metabridge Isolation
// Description: Class classification, isolated loading, and client construction.
// Purpose: Let incompatible client versions coexist in one host process.
// Dependencies: metabridge-core, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate decides, per fully qualified class name, whether the host or an
//! isolated environment resolves it; builds loading environments over ordered
//! jar sets; and constructs versioned clients through a closed constructor
//! registry with environment-equality caching.
//! Invariants:
//! - Classification is a total, deterministic function of name and rule sets.
//! - At most one loader/client pair exists per distinct loading environment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classifier;
pub mod environment;
pub mod factory;
pub mod loader;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classifier::Classification;
pub use classifier::classify;
pub use environment::LoadingEnvironment;
pub use factory::ClientConstructor;
pub use factory::ClientRegistry;
pub use factory::VersionedClientFactory;
pub use factory::expand_classpath;
pub use loader::IsolatedRuntimeLoader;
pub use loader::IsolationError;
pub use loader::Resolution;
pub use loader::discover_host_jars;
