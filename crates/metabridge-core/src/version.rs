// crates/metabridge-core/src/version.rs
// ============================================================================
// Module: Client Versions
// Description: Closed, ordered set of supported external client versions.
// Purpose: Key client construction on an enumerated version tag.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! External client versions form a closed, ordered enumeration. Exactly one
//! version per process is the execution version: the version bundled with the
//! host, used for execution-side clients with isolation disabled. Keeping the
//! set closed means every supported version registers a concrete constructor
//! ahead of time instead of being discovered reflectively at runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::options::ConfigError;

// ============================================================================
// SECTION: Client Version
// ============================================================================

/// Supported external metastore client versions, oldest first.
///
/// # Invariants
/// - Variant order defines version order; `Ord` follows declaration order.
/// - The set is closed: unsupported version strings fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClientVersion {
    /// Client line 0.12.0.
    V0_12_0,
    /// Client line 0.13.0.
    V0_13_0,
    /// Client line 0.13.1.
    V0_13_1,
    /// Client line 0.14.0.
    V0_14_0,
    /// Client line 1.0.0.
    V1_0_0,
    /// Client line 1.1.0.
    V1_1_0,
    /// Client line 1.2.0.
    V1_2_0,
    /// Client line 1.2.1.
    V1_2_1,
}

/// The version bundled with the host process.
///
/// # Invariants
/// - Exactly one execution version exists per process lifetime.
pub const EXECUTION_VERSION: ClientVersion = ClientVersion::V1_2_1;

impl ClientVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 8] = [
        Self::V0_12_0,
        Self::V0_13_0,
        Self::V0_13_1,
        Self::V0_14_0,
        Self::V1_0_0,
        Self::V1_1_0,
        Self::V1_2_0,
        Self::V1_2_1,
    ];

    /// Returns the canonical version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V0_12_0 => "0.12.0",
            Self::V0_13_0 => "0.13.0",
            Self::V0_13_1 => "0.13.1",
            Self::V0_14_0 => "0.14.0",
            Self::V1_0_0 => "1.0.0",
            Self::V1_1_0 => "1.1.0",
            Self::V1_2_0 => "1.2.0",
            Self::V1_2_1 => "1.2.1",
        }
    }

    /// Parses a configured version string into a supported version.
    ///
    /// Accepts the canonical three-segment form plus the common two-segment
    /// shorthand for the head of each line (for example `"0.12"`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedVersion`] naming the rejected string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim() {
            "0.12" | "0.12.0" => Ok(Self::V0_12_0),
            "0.13" | "0.13.0" => Ok(Self::V0_13_0),
            "0.13.1" => Ok(Self::V0_13_1),
            "0.14" | "0.14.0" => Ok(Self::V0_14_0),
            "1.0" | "1.0.0" => Ok(Self::V1_0_0),
            "1.1" | "1.1.0" => Ok(Self::V1_1_0),
            "1.2" | "1.2.0" => Ok(Self::V1_2_0),
            "1.2.1" => Ok(Self::V1_2_1),
            other => Err(ConfigError::UnsupportedVersion(other.to_string())),
        }
    }

    /// Returns true when this is the execution version bundled with the host.
    #[must_use]
    pub fn is_execution(self) -> bool {
        self == EXECUTION_VERSION
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
