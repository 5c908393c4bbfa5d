// crates/metabridge-isolation/src/environment.rs
// ============================================================================
// Module: Loading Environments
// Description: The identity tuple for isolated loading contexts.
// Purpose: Key loader and client caching on environment equality.
// Dependencies: metabridge-core
// ============================================================================

//! ## Overview
//! A loading environment is the tuple of client version, ordered jar set,
//! prefix rule lists, and isolation flag. Two environments are interchangeable
//! iff all fields are equal; the factory never constructs two loaders for
//! equal environments within one process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use metabridge_core::ClientVersion;
use metabridge_core::JarSet;

// ============================================================================
// SECTION: Loading Environment
// ============================================================================

/// Identity tuple of an isolated loading context.
///
/// # Invariants
/// - Equality over all fields drives loader/client caching.
/// - `jar_set` order is significant: the first matching artifact wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingEnvironment {
    /// Client version the environment loads.
    pub version: ClientVersion,
    /// Ordered classpath for isolated resolution.
    pub jar_set: JarSet,
    /// Shared class-name prefixes.
    pub shared_prefixes: Vec<String>,
    /// Barrier class-name prefixes.
    pub barrier_prefixes: Vec<String>,
    /// Whether isolation is enabled; when false, the host context is used
    /// verbatim.
    pub isolation_enabled: bool,
}
