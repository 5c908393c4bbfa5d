// crates/metabridge-isolation/src/factory.rs
// ============================================================================
// Module: Versioned Client Factory
// Description: Builds metastore clients through isolated loading environments.
// Purpose: Resolve configured versions and jar sources into cached clients.
// Dependencies: metabridge-core, tracing
// ============================================================================

//! ## Overview
//! The factory resolves a requested client version against a jar source
//! (builtin, maven, or an explicit classpath), builds or reuses the isolated
//! loader for the resulting environment, and constructs the concrete client
//! through a closed constructor registry. Every supported version registers a
//! concrete constructor ahead of time; nothing is discovered reflectively at
//! runtime. Execution-side clients bypass the registry and always get the
//! in-memory store.
//! Invariants:
//! - Exactly one loader/client pair exists per distinct loading environment;
//!   concurrent first requests serialize on the cache lock.
//! - Configuration errors are fatal at construction; there is no degraded
//!   client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use metabridge_core::ClientVersion;
use metabridge_core::ConnectionOptions;
use metabridge_core::EXECUTION_VERSION;
use metabridge_core::HostLoader;
use metabridge_core::JarSet;
use metabridge_core::JarSource;
use metabridge_core::MemoryMetastore;
use metabridge_core::MetastoreClient;
use metabridge_core::MetastoreOptions;
use metabridge_core::PackageResolver;
use metabridge_core::translate_time_vars;
use tracing::warn;

use crate::environment::LoadingEnvironment;
use crate::loader::IsolatedRuntimeLoader;
use crate::loader::IsolationError;
use crate::loader::discover_host_jars;

// ============================================================================
// SECTION: Classpath Expansion
// ============================================================================

/// Expands an explicit classpath string into a jar set.
///
/// The string is split on the platform path separator. A segment whose final
/// component is `*` expands to every `.jar` file directly inside that
/// directory, sorted by name for determinism; a missing directory expands to
/// nothing with a warning rather than failing. Other segments are kept as-is.
#[must_use]
pub fn expand_classpath(raw: &str) -> JarSet {
    let mut jars = Vec::new();
    for segment in std::env::split_paths(raw) {
        if segment.file_name().is_some_and(|name| name == "*") {
            let dir = segment.parent().map_or_else(PathBuf::new, PathBuf::from);
            match std::fs::read_dir(&dir) {
                Ok(entries) => {
                    let mut expanded: Vec<PathBuf> = entries
                        .filter_map(Result::ok)
                        .map(|entry| entry.path())
                        .filter(|path| path.extension().is_some_and(|ext| ext == "jar"))
                        .collect();
                    expanded.sort();
                    jars.extend(expanded);
                }
                Err(cause) => {
                    warn!(directory = %dir.display(), %cause, "classpath directory missing; expanding to nothing");
                }
            }
        } else {
            jars.push(segment);
        }
    }
    JarSet::new(jars)
}

// ============================================================================
// SECTION: Client Registry
// ============================================================================

/// Constructor for a concrete client implementation.
pub type ClientConstructor = Arc<
    dyn Fn(&ConnectionOptions, &IsolatedRuntimeLoader) -> Result<Arc<dyn MetastoreClient>, IsolationError>
        + Send
        + Sync,
>;

/// Closed registry mapping client versions to concrete constructors.
///
/// # Invariants
/// - At most one constructor per version.
/// - Unregistered versions fail construction with
///   [`IsolationError::UnresolvableVersion`].
#[derive(Clone)]
pub struct ClientRegistry {
    /// Constructors keyed by version.
    constructors: BTreeMap<ClientVersion, ClientConstructor>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Creates a registry with the in-memory client registered for the
    /// execution version.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let constructor: ClientConstructor = Arc::new(|_conn, loader| {
            Ok(Arc::new(MemoryMetastore::new(loader.environment().version))
                as Arc<dyn MetastoreClient>)
        });
        registry.constructors.insert(EXECUTION_VERSION, constructor);
        registry
    }

    /// Registers a constructor for a version.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::DuplicateConstructor`] when the version is
    /// already registered.
    pub fn register(
        &mut self,
        version: ClientVersion,
        constructor: ClientConstructor,
    ) -> Result<(), IsolationError> {
        if self.constructors.contains_key(&version) {
            return Err(IsolationError::DuplicateConstructor(version));
        }
        self.constructors.insert(version, constructor);
        Ok(())
    }

    /// Constructs a client for the version through the loader.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::UnresolvableVersion`] when no constructor is
    /// registered, or the constructor's own error.
    pub fn construct(
        &self,
        version: ClientVersion,
        connection: &ConnectionOptions,
        loader: &IsolatedRuntimeLoader,
    ) -> Result<Arc<dyn MetastoreClient>, IsolationError> {
        let Some(constructor) = self.constructors.get(&version) else {
            return Err(IsolationError::UnresolvableVersion(version));
        };
        constructor(connection, loader)
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

// ============================================================================
// SECTION: Versioned Client Factory
// ============================================================================

/// Builds and caches metastore clients keyed by loading environment.
///
/// # Invariants
/// - The cache is the only shared mutable state; it is protected by a mutex
///   held across construction so concurrent first requests observe one
///   instance.
pub struct VersionedClientFactory {
    /// Process-wide metastore options.
    options: MetastoreOptions,
    /// Closed constructor registry.
    registry: ClientRegistry,
    /// Package resolver for the maven jar source.
    resolver: Arc<dyn PackageResolver>,
    /// Host loader chain for builtin jar discovery.
    host_loader: Arc<dyn HostLoader>,
    /// Constructed clients keyed by environment equality.
    cache: Mutex<Vec<(LoadingEnvironment, Arc<dyn MetastoreClient>)>>,
}

impl VersionedClientFactory {
    /// Creates a factory over the given options and collaborators.
    #[must_use]
    pub fn new(
        options: MetastoreOptions,
        registry: ClientRegistry,
        resolver: Arc<dyn PackageResolver>,
        host_loader: Arc<dyn HostLoader>,
    ) -> Self {
        Self {
            options,
            registry,
            resolver,
            host_loader,
            cache: Mutex::new(Vec::new()),
        }
    }

    /// Returns the options the factory was built with.
    #[must_use]
    pub const fn options(&self) -> &MetastoreOptions {
        &self.options
    }

    /// Builds a client for execution-side use.
    ///
    /// Always resolves to the execution version with isolation off, backed by
    /// a throwaway in-memory store constructed directly rather than through
    /// the registry. Registering a real constructor for the execution version
    /// therefore never routes execution-side calls to the real metadata
    /// service. The in-memory store takes no connection settings; the
    /// parameter is unused.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError`] when construction fails.
    pub fn client_for_execution(
        &self,
        _connection: &ConnectionOptions,
    ) -> Result<Arc<dyn MetastoreClient>, IsolationError> {
        let environment = LoadingEnvironment {
            version: EXECUTION_VERSION,
            jar_set: discover_host_jars(self.host_loader.as_ref()),
            shared_prefixes: self.options.shared_prefixes.clone(),
            barrier_prefixes: self.options.barrier_prefixes.clone(),
            isolation_enabled: false,
        };
        self.get_or_build(environment, &JarSource::Builtin, |loader| {
            Ok(Arc::new(MemoryMetastore::new(loader.environment().version))
                as Arc<dyn MetastoreClient>)
        })
    }

    /// Builds a client for the configured metastore version.
    ///
    /// Isolation is on; the jar set comes from the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::VersionMismatch`] for a builtin source whose
    /// requested version differs from the execution version (before any
    /// loading occurs), [`IsolationError::EmptyClasspath`] when the resolved
    /// jar set is empty, and resolver or registry errors otherwise.
    pub fn client_for_metadata(
        &self,
        connection: &ConnectionOptions,
    ) -> Result<Arc<dyn MetastoreClient>, IsolationError> {
        let version = ClientVersion::parse(&self.options.version)?;
        let source = JarSource::parse(&self.options.jar_source);
        let jar_set = match &source {
            JarSource::Builtin => {
                if version != EXECUTION_VERSION {
                    return Err(IsolationError::VersionMismatch {
                        requested: version,
                        execution: EXECUTION_VERSION,
                    });
                }
                discover_host_jars(self.host_loader.as_ref())
            }
            JarSource::Maven => {
                self.resolver.resolve(version, &self.options.platform_version)?
            }
            JarSource::Path(raw) => expand_classpath(raw),
        };
        let environment = LoadingEnvironment {
            version,
            jar_set,
            shared_prefixes: self.options.shared_prefixes.clone(),
            barrier_prefixes: self.options.barrier_prefixes.clone(),
            isolation_enabled: true,
        };
        let effective = flatten_timing(connection);
        self.get_or_build(environment, &source, |loader| {
            self.registry.construct(loader.environment().version, &effective, loader)
        })
    }

    /// Returns the cached client for the environment, constructing it under
    /// the cache lock when absent.
    fn get_or_build(
        &self,
        environment: LoadingEnvironment,
        source: &JarSource,
        construct: impl FnOnce(&IsolatedRuntimeLoader) -> Result<Arc<dyn MetastoreClient>, IsolationError>,
    ) -> Result<Arc<dyn MetastoreClient>, IsolationError> {
        let mut cache =
            self.cache.lock().map_err(|_poisoned| IsolationError::CachePoisoned)?;
        if let Some((_, client)) = cache.iter().find(|(cached, _)| *cached == environment) {
            return Ok(Arc::clone(client));
        }
        let loader = IsolatedRuntimeLoader::new(environment.clone(), source)?;
        let client = construct(&loader)?;
        cache.push((environment, Arc::clone(&client)));
        Ok(client)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens host-native timing durations into connection property strings.
fn flatten_timing(connection: &ConnectionOptions) -> ConnectionOptions {
    let mut properties = connection.properties.clone();
    properties.extend(translate_time_vars(&connection.timing));
    ConnectionOptions {
        properties,
        timing: BTreeMap::new(),
    }
}
