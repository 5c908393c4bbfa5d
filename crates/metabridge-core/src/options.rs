// crates/metabridge-core/src/options.rs
// ============================================================================
// Module: Configuration Surface
// Description: Options controlling client versioning, isolation, and planning.
// Purpose: Carry explicit configuration into every component; no ambient state.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Configuration is an explicit struct constructed once at startup and passed
//! by reference into every component; no component reads ambient global state.
//! Each option has exactly one recognized effect. Comma-separated prefix lists
//! discard empty segments so blank configuration entries never become
//! accidental wildcard rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Configuration Errors
// ============================================================================

/// Configuration errors, fatal at construction and never retried.
///
/// # Invariants
/// - Messages embed the offending value for diagnosis.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured version string is not a supported client version.
    #[error("unsupported metastore client version: {0}")]
    UnsupportedVersion(String),
    /// The configured jar source token is not recognized.
    #[error("unknown metastore jar source: {0}")]
    UnknownJarSource(String),
}

// ============================================================================
// SECTION: Jar Source
// ============================================================================

/// Where the factory obtains the client classpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JarSource {
    /// Use the jars bundled with the host process.
    Builtin,
    /// Fetch the exact versioned artifact set from a remote repository.
    Maven,
    /// Explicit path-separator-delimited classpath; a trailing `*` segment
    /// expands to all jar files directly inside that directory.
    Path(String),
}

impl JarSource {
    /// Parses a configured jar source token.
    ///
    /// Anything other than the two reserved tokens is treated as an explicit
    /// classpath string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "builtin" => Self::Builtin,
            "maven" => Self::Maven,
            other => Self::Path(other.to_string()),
        }
    }
}

impl fmt::Display for JarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Maven => f.write_str("maven"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

// ============================================================================
// SECTION: Prefix Lists
// ============================================================================

/// Parses a comma-separated prefix list, discarding empty segments.
#[must_use]
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// Default shared prefixes: classes the host and every client must observe
/// with one identity.
pub const DEFAULT_SHARED_PREFIXES: [&str; 4] =
    ["java.", "javax.annotation.", "org.slf4j", "org.apache.log4j"];

// ============================================================================
// SECTION: Metastore Options
// ============================================================================

/// Process-wide options for the metastore client layer.
///
/// # Invariants
/// - `default_size_estimate` is the pessimistic planning fallback; it keeps
///   unsized tables out of small-table optimizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetastoreOptions {
    /// Configured metastore client version string.
    pub version: String,
    /// Configured jar source token (`builtin`, `maven`, or a classpath).
    pub jar_source: String,
    /// Shared class-name prefixes.
    pub shared_prefixes: Vec<String>,
    /// Barrier class-name prefixes.
    pub barrier_prefixes: Vec<String>,
    /// Whether partition predicates are pushed down to the metastore.
    pub partition_pruning: bool,
    /// Whether size estimation may fall back to a filesystem scan.
    pub fallback_to_scan: bool,
    /// Default table size estimate in bytes.
    pub default_size_estimate: u64,
    /// Platform version handed to the package resolver for the maven source.
    pub platform_version: String,
}

impl Default for MetastoreOptions {
    fn default() -> Self {
        Self {
            version: "1.2.1".to_string(),
            jar_source: "builtin".to_string(),
            shared_prefixes: DEFAULT_SHARED_PREFIXES.iter().map(ToString::to_string).collect(),
            barrier_prefixes: Vec::new(),
            partition_pruning: true,
            fallback_to_scan: false,
            default_size_estimate: u64::MAX,
            platform_version: "3.3.6".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Connection Options
// ============================================================================

/// Per-connection options handed to a constructed client.
///
/// # Invariants
/// - `timing` carries host-native durations; the time-variable translator
///   flattens them into `properties` strings at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Flat string-keyed connection properties.
    pub properties: BTreeMap<String, String>,
    /// Host-native duration values, keyed by external parameter name.
    pub timing: BTreeMap<String, Duration>,
}
