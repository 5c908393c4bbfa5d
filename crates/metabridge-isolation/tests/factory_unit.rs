// crates/metabridge-isolation/tests/factory_unit.rs
// ============================================================================
// Module: Versioned Client Factory Tests
// Description: Validate jar source handling and environment caching.
// Purpose: Ensure one client per environment and fatal configuration errors.
// Dependencies: metabridge-core, metabridge-isolation, tempfile
// ============================================================================

//! Unit tests for versioned client construction and caching.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use metabridge_core::ClientVersion;
use metabridge_core::ConnectionOptions;
use metabridge_core::EXECUTION_VERSION;
use metabridge_core::HostLoader;
use metabridge_core::JarSet;
use metabridge_core::MemoryMetastore;
use metabridge_core::MetastoreClient;
use metabridge_core::MetastoreError;
use metabridge_core::MetastoreOptions;
use metabridge_core::PackageResolver;
use metabridge_core::PackageResolverError;
use metabridge_isolation::ClientConstructor;
use metabridge_isolation::ClientRegistry;
use metabridge_isolation::IsolationError;
use metabridge_isolation::VersionedClientFactory;
use metabridge_isolation::expand_classpath;

/// Host loader reporting one fixed jar and no parent.
struct FixedHostLoader;

impl HostLoader for FixedHostLoader {
    fn loaded_jars(&self) -> Vec<PathBuf> {
        vec![PathBuf::from("/host/bundled-client.jar")]
    }

    fn parent(&self) -> Option<&dyn HostLoader> {
        None
    }
}

/// Package resolver returning a fixed jar set for every version.
struct FixedResolver;

impl PackageResolver for FixedResolver {
    fn resolve(
        &self,
        _version: ClientVersion,
        _platform_version: &str,
    ) -> Result<JarSet, PackageResolverError> {
        Ok(JarSet::new(vec![PathBuf::from("/fetched/client.jar")]))
    }
}

/// Package resolver that always fails.
struct FailingResolver;

impl PackageResolver for FailingResolver {
    fn resolve(
        &self,
        version: ClientVersion,
        _platform_version: &str,
    ) -> Result<JarSet, PackageResolverError> {
        Err(PackageResolverError::ResolutionFailed {
            version,
            cause: "repository unreachable".to_string(),
        })
    }
}

/// Registry with a construction-counting constructor for the version.
fn counting_registry(version: ClientVersion, counter: Arc<AtomicUsize>) -> ClientRegistry {
    let mut registry = ClientRegistry::with_builtin();
    let constructor: ClientConstructor = Arc::new(move |_conn, loader| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryMetastore::new(loader.environment().version))
            as Arc<dyn MetastoreClient>)
    });
    if version != EXECUTION_VERSION {
        registry
            .register(version, constructor)
            .unwrap_or_else(|err| panic!("registration failed: {err}"));
    }
    registry
}

/// Options selecting the maven source for the given version string.
fn maven_options(version: &str) -> MetastoreOptions {
    MetastoreOptions {
        version: version.to_string(),
        jar_source: "maven".to_string(),
        ..MetastoreOptions::default()
    }
}

#[test]
fn builtin_source_rejects_version_mismatch_before_loading() {
    let options = MetastoreOptions {
        version: "0.13.1".to_string(),
        jar_source: "builtin".to_string(),
        ..MetastoreOptions::default()
    };
    let factory = VersionedClientFactory::new(
        options,
        ClientRegistry::with_builtin(),
        Arc::new(FixedResolver),
        Arc::new(FixedHostLoader),
    );
    let err = match factory.client_for_metadata(&ConnectionOptions::default()) {
        Err(err) => err,
        Ok(client) => panic!("unexpected client for version {}", client.version()),
    };
    assert!(matches!(err, IsolationError::VersionMismatch { .. }));
    assert!(err.to_string().contains("0.13.1"));
}

#[test]
fn resolver_failures_are_fatal() {
    let factory = VersionedClientFactory::new(
        maven_options("0.13.1"),
        counting_registry(ClientVersion::V0_13_1, Arc::new(AtomicUsize::new(0))),
        Arc::new(FailingResolver),
        Arc::new(FixedHostLoader),
    );
    let err = match factory.client_for_metadata(&ConnectionOptions::default()) {
        Err(err) => err,
        Ok(client) => panic!("unexpected client for version {}", client.version()),
    };
    assert!(matches!(err, IsolationError::Resolution(_)));
    assert!(err.to_string().contains("repository unreachable"));
}

#[test]
fn unregistered_version_is_unresolvable() {
    let factory = VersionedClientFactory::new(
        maven_options("0.14.0"),
        ClientRegistry::with_builtin(),
        Arc::new(FixedResolver),
        Arc::new(FixedHostLoader),
    );
    let err = match factory.client_for_metadata(&ConnectionOptions::default()) {
        Err(err) => err,
        Ok(client) => panic!("unexpected client for version {}", client.version()),
    };
    assert!(matches!(err, IsolationError::UnresolvableVersion(ClientVersion::V0_14_0)));
}

#[test]
fn one_construction_per_environment_under_concurrency() {
    let counter = Arc::new(AtomicUsize::new(0));
    let factory = Arc::new(VersionedClientFactory::new(
        maven_options("0.13.1"),
        counting_registry(ClientVersion::V0_13_1, Arc::clone(&counter)),
        Arc::new(FixedResolver),
        Arc::new(FixedHostLoader),
    ));

    let mut handles = Vec::new();
    for _ in 0 .. 8 {
        let factory = Arc::clone(&factory);
        handles.push(std::thread::spawn(move || {
            factory.client_for_metadata(&ConnectionOptions::default())
        }));
    }
    let mut clients = Vec::new();
    for handle in handles {
        match handle.join() {
            Ok(Ok(client)) => clients.push(client),
            Ok(Err(err)) => panic!("construction failed: {err}"),
            Err(_) => panic!("worker thread panicked"),
        }
    }

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    for client in &clients[1 ..] {
        assert!(Arc::ptr_eq(&clients[0], client));
    }
}

#[test]
fn execution_client_uses_execution_version_without_isolation() -> Result<(), IsolationError> {
    let factory = VersionedClientFactory::new(
        MetastoreOptions::default(),
        ClientRegistry::with_builtin(),
        Arc::new(FixedResolver),
        Arc::new(FixedHostLoader),
    );
    let client = factory.client_for_execution(&ConnectionOptions::default())?;
    assert_eq!(client.version(), EXECUTION_VERSION);

    // Repeated requests reuse the cached execution client.
    let again = factory.client_for_execution(&ConnectionOptions::default())?;
    assert!(Arc::ptr_eq(&client, &again));
    Ok(())
}

#[test]
fn execution_client_ignores_registered_execution_constructors() -> Result<(), IsolationError> {
    let counter = Arc::new(AtomicUsize::new(0));
    let tracked = Arc::clone(&counter);
    let constructor: ClientConstructor = Arc::new(move |_conn, loader| {
        tracked.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryMetastore::new(loader.environment().version))
            as Arc<dyn MetastoreClient>)
    });
    let mut registry = ClientRegistry::new();
    registry
        .register(EXECUTION_VERSION, constructor)
        .unwrap_or_else(|err| panic!("registration failed: {err}"));

    let factory = VersionedClientFactory::new(
        MetastoreOptions::default(),
        registry,
        Arc::new(FixedResolver),
        Arc::new(FixedHostLoader),
    );
    let client = factory.client_for_execution(&ConnectionOptions::default())?;

    // The registered constructor was never consulted; the client is the
    // empty throwaway store.
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert!(matches!(
        client.get_table("db", "anything"),
        Err(MetastoreError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn classpath_wildcard_expands_to_jar_files() -> Result<(), std::io::Error> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("b.jar"), b"jar")?;
    std::fs::write(dir.path().join("a.jar"), b"jar")?;
    std::fs::write(dir.path().join("notes.txt"), b"text")?;

    let raw = format!("{}/*", dir.path().display());
    let expanded = expand_classpath(&raw);
    assert_eq!(expanded.jars(), &[dir.path().join("a.jar"), dir.path().join("b.jar")]);
    Ok(())
}

#[test]
fn missing_classpath_directory_expands_to_nothing() {
    let expanded = expand_classpath("/definitely/not/a/dir/*");
    assert!(expanded.is_empty());
}

#[test]
fn plain_classpath_segments_are_kept_in_order() {
    let expanded = expand_classpath("/jars/first.jar:/jars/second.jar");
    assert_eq!(expanded.jars(), &[
        PathBuf::from("/jars/first.jar"),
        PathBuf::from("/jars/second.jar"),
    ]);
}
