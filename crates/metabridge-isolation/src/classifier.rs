// crates/metabridge-isolation/src/classifier.rs
// ============================================================================
// Module: Class Prefix Classifier
// Description: Classifies class names as shared, barrier, or isolated.
// Purpose: Decide which loading context resolves each class name.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Classification is a pure, total function of a fully qualified class name
//! and two prefix rule lists. Barrier rules are checked first, then shared
//! rules, then the isolated default. An empty prefix string matches nothing,
//! so a blank configuration entry can never become a wildcard rule.

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Resolution class for a fully qualified class name.
///
/// # Invariants
/// - `Barrier` takes precedence over `Shared`, which takes precedence over
///   the `Isolated` default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Loading delegates to the host so host and client observe one identity.
    Shared,
    /// Always reloaded fresh per isolated environment, even if otherwise
    /// eligible for sharing.
    Barrier,
    /// Loaded from the version-specific jar set, invisible to the host.
    Isolated,
}

/// Returns true when the class name matches a non-empty prefix.
fn matches_prefix(class_name: &str, prefix: &str) -> bool {
    !prefix.is_empty() && class_name.starts_with(prefix)
}

/// Classifies a fully qualified class name against the rule lists.
///
/// Barrier prefixes are evaluated before shared prefixes; names matching
/// neither list are isolated.
#[must_use]
pub fn classify(
    class_name: &str,
    barrier_prefixes: &[String],
    shared_prefixes: &[String],
) -> Classification {
    if barrier_prefixes.iter().any(|prefix| matches_prefix(class_name, prefix)) {
        return Classification::Barrier;
    }
    if shared_prefixes.iter().any(|prefix| matches_prefix(class_name, prefix)) {
        return Classification::Shared;
    }
    Classification::Isolated
}
