// crates/metabridge-core/src/timevars.rs
// ============================================================================
// Module: Time Variable Translation
// Description: Converts host durations into the client's expected time units.
// Purpose: Keep one translation point for time-valued client parameters.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The external client accepts certain timing parameters in a fixed unit per
//! parameter name, and the accepted input format has changed across client
//! versions (from bare integers to unit-suffixed durations). Translating at
//! this single boundary keeps the host compatible with every supported client
//! version without branching on version number at each call site: parameters
//! in the enumerated table become bare numeric strings in the expected unit;
//! everything else passes through with the host's canonical rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

// ============================================================================
// SECTION: Unit Table
// ============================================================================

/// Time unit a client parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Bare seconds.
    Seconds,
    /// Bare milliseconds.
    Milliseconds,
}

/// Enumerated table of time-valued client parameters and their expected units.
///
/// # Invariants
/// - Every timing parameter the client consumes in a fixed unit is listed
///   here; parameters not listed pass through untranslated.
pub const TIME_VAR_UNITS: [(&str, TimeUnit); 6] = [
    ("metastore.client.connect.retry.delay", TimeUnit::Seconds),
    ("metastore.client.socket.timeout", TimeUnit::Seconds),
    ("metastore.client.socket.lifetime", TimeUnit::Seconds),
    ("metastore.lock.sleep.between.retries", TimeUnit::Seconds),
    ("metastore.event.db.listener.timetolive", TimeUnit::Seconds),
    ("metastore.stats.jdbc.timeout", TimeUnit::Milliseconds),
];

/// Looks up the expected unit for a parameter name.
#[must_use]
pub fn expected_unit(name: &str) -> Option<TimeUnit> {
    TIME_VAR_UNITS.iter().find(|(param, _)| *param == name).map(|(_, unit)| *unit)
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Renders a duration in the given unit as a bare numeric string.
#[must_use]
fn render_in_unit(value: Duration, unit: TimeUnit) -> String {
    match unit {
        TimeUnit::Seconds => value.as_secs().to_string(),
        TimeUnit::Milliseconds => value.as_millis().to_string(),
    }
}

/// Translates host-native durations into client parameter strings.
///
/// Parameters named in [`TIME_VAR_UNITS`] become bare numeric strings in the
/// expected unit; all other parameters pass through with the host's canonical
/// millisecond-suffixed rendering.
#[must_use]
pub fn translate_time_vars(timing: &BTreeMap<String, Duration>) -> BTreeMap<String, String> {
    timing
        .iter()
        .map(|(name, value)| {
            let rendered = expected_unit(name).map_or_else(
                || format!("{}ms", value.as_millis()),
                |unit| render_in_unit(*value, unit),
            );
            (name.clone(), rendered)
        })
        .collect()
}
