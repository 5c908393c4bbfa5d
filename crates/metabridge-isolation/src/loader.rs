// crates/metabridge-isolation/src/loader.rs
// ============================================================================
// Module: Isolated Runtime Loader
// Description: Symbol resolution context over a versioned jar set.
// Purpose: Resolve each class name to the host, a fresh copy, or the jar set.
// Dependencies: metabridge-core, thiserror
// ============================================================================

//! ## Overview
//! The loader turns a loading environment into an explicit resolution table:
//! shared names resolve to the host, barrier names are reloaded fresh per
//! environment, and everything else resolves against the ordered jar set.
//! With isolation disabled the loader degrades to the host context verbatim,
//! which is how execution clients run (they always match the host's bundled
//! version and gain nothing from isolation).
//! Invariants:
//! - Construction validates the environment; configuration errors are fatal
//!   and reported before any resolution occurs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use metabridge_core::ClientVersion;
use metabridge_core::ConfigError;
use metabridge_core::EXECUTION_VERSION;
use metabridge_core::HostLoader;
use metabridge_core::JarSet;
use metabridge_core::JarSource;
use metabridge_core::PackageResolverError;
use thiserror::Error;

use crate::classifier::Classification;
use crate::classifier::classify;
use crate::environment::LoadingEnvironment;

// ============================================================================
// SECTION: Isolation Errors
// ============================================================================

/// Configuration errors for isolated loading and client construction.
///
/// # Invariants
/// - All variants are fatal at construction and never retried automatically.
/// - Messages embed the offending version or value.
#[derive(Debug, Error)]
pub enum IsolationError {
    /// The builtin jar source only represents the execution version.
    #[error(
        "builtin metastore jars are version {execution}; cannot serve requested version \
         {requested}"
    )]
    VersionMismatch {
        /// Version requested by configuration.
        requested: ClientVersion,
        /// Version bundled with the host process.
        execution: ClientVersion,
    },
    /// No way to build or construct a client for the version.
    #[error("cannot resolve a client for version {0}")]
    UnresolvableVersion(ClientVersion),
    /// Isolation was requested but the resolved jar set is empty.
    #[error("isolation requested for version {0} with an empty classpath")]
    EmptyClasspath(ClientVersion),
    /// A constructor is already registered for the version.
    #[error("client constructor already registered for version {0}")]
    DuplicateConstructor(ClientVersion),
    /// The factory's client cache lock was poisoned by a panicking thread.
    #[error("client cache lock poisoned")]
    CachePoisoned,
    /// The package resolver failed to produce a jar set.
    #[error(transparent)]
    Resolution(#[from] PackageResolverError),
    /// An option value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Which context resolves a class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The host's own loading context; one identity for host and client.
    Host,
    /// A fresh per-environment copy, never shared with the host.
    Fresh,
    /// The environment's ordered jar set; first match wins.
    Environment,
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Resolution context for one loading environment.
///
/// # Invariants
/// - The environment is validated at construction and immutable afterwards.
#[derive(Debug)]
pub struct IsolatedRuntimeLoader {
    /// Validated loading environment.
    environment: LoadingEnvironment,
}

impl IsolatedRuntimeLoader {
    /// Builds a loader for the environment obtained from the given source.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::UnresolvableVersion`] when isolation is
    /// requested against the builtin source for a non-execution version, and
    /// [`IsolationError::EmptyClasspath`] when isolation is requested with no
    /// jars to load from.
    pub fn new(
        environment: LoadingEnvironment,
        source: &JarSource,
    ) -> Result<Self, IsolationError> {
        if environment.isolation_enabled {
            if *source == JarSource::Builtin && environment.version != EXECUTION_VERSION {
                return Err(IsolationError::UnresolvableVersion(environment.version));
            }
            if environment.jar_set.is_empty() {
                return Err(IsolationError::EmptyClasspath(environment.version));
            }
        }
        Ok(Self {
            environment,
        })
    }

    /// Returns the environment this loader serves.
    #[must_use]
    pub const fn environment(&self) -> &LoadingEnvironment {
        &self.environment
    }

    /// Resolves a fully qualified class name to its loading context.
    ///
    /// With isolation disabled every name resolves to the host context.
    #[must_use]
    pub fn resolve(&self, class_name: &str) -> Resolution {
        if !self.environment.isolation_enabled {
            return Resolution::Host;
        }
        match classify(
            class_name,
            &self.environment.barrier_prefixes,
            &self.environment.shared_prefixes,
        ) {
            Classification::Shared => Resolution::Host,
            Classification::Barrier => Resolution::Fresh,
            Classification::Isolated => Resolution::Environment,
        }
    }
}

// ============================================================================
// SECTION: Host Jar Discovery
// ============================================================================

/// Discovers jar locations already loaded by the host loader chain.
///
/// Walks parent loaders until none remain, deduplicating while preserving
/// first-seen order. Used only for the execution/builtin path.
#[must_use]
pub fn discover_host_jars(loader: &dyn HostLoader) -> JarSet {
    let mut jars = Vec::new();
    let mut current: Option<&dyn HostLoader> = Some(loader);
    while let Some(node) = current {
        jars.extend(node.loaded_jars());
        current = node.parent();
    }
    JarSet::new(jars)
}
