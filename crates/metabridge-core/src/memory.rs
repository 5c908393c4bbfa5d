// crates/metabridge-core/src/memory.rs
// ============================================================================
// Module: In-Memory Metastore
// Description: Throwaway metastore client backed by process memory.
// Purpose: Back execution clients without touching the persistent metastore.
// Dependencies: crate interfaces and models
// ============================================================================

//! ## Overview
//! The in-memory metastore implements the full client capability set over a
//! process-local map. Execution clients use it so that operations needing a
//! functioning client (for example registering transient session-local
//! functions) can never corrupt the real metadata service. Tests use it as a
//! deterministic client double.
//! Invariants:
//! - State is scoped to the instance; dropping the instance drops all data.
//! - Filter expressions support conjunctions of comparison clauses
//!   (`=`, `!=`, `<`, `<=`, `>`, `>=`), the full clause set the translation
//!   layer renders. A clause outside that set fails the call with a service
//!   error instead of silently matching nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::external::ExternalPartition;
use crate::external::ExternalTable;
use crate::interfaces::MetastoreClient;
use crate::interfaces::MetastoreError;
use crate::version::ClientVersion;

// ============================================================================
// SECTION: State
// ============================================================================

/// A stored table and its partitions.
#[derive(Debug, Clone)]
struct StoredTable {
    /// Table definition.
    table: ExternalTable,
    /// Partitions in insertion order.
    partitions: Vec<ExternalPartition>,
}

/// In-memory metastore client.
///
/// # Invariants
/// - Keys are `(database, table)` pairs; names are matched exactly.
#[derive(Debug)]
pub struct MemoryMetastore {
    /// Version this instance reports.
    version: ClientVersion,
    /// Tables keyed by `(database, table)`.
    state: Mutex<BTreeMap<(String, String), StoredTable>>,
}

impl MemoryMetastore {
    /// Creates an empty in-memory metastore reporting the given version.
    #[must_use]
    pub fn new(version: ClientVersion) -> Self {
        Self {
            version,
            state: Mutex::new(BTreeMap::new()),
        }
    }

    /// Adds partitions to an existing table.
    ///
    /// # Errors
    ///
    /// Returns [`MetastoreError::NotFound`] when the table does not exist.
    pub fn add_partitions(
        &self,
        database: &str,
        table: &str,
        partitions: Vec<ExternalPartition>,
    ) -> Result<(), MetastoreError> {
        let mut state = self.lock_state()?;
        let key = (database.to_string(), table.to_string());
        let Some(stored) = state.get_mut(&key) else {
            return Err(MetastoreError::NotFound {
                database: database.to_string(),
                table: table.to_string(),
            });
        };
        stored.partitions.extend(partitions);
        Ok(())
    }

    /// Locks the table map, surfacing poisoning as a service error.
    fn lock_state(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<(String, String), StoredTable>>, MetastoreError>
    {
        self.state
            .lock()
            .map_err(|_poisoned| MetastoreError::Service("metastore state lock poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Filter Matching
// ============================================================================

/// Comparison operator accepted in a pushdown filter clause.
#[derive(Debug, Clone, Copy)]
enum FilterOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

/// Operator tokens in recognition order; two-character tokens come first so
/// `>=` is not split as `>`.
const FILTER_OPS: [(&str, FilterOp); 6] = [
    (">=", FilterOp::Ge),
    ("<=", FilterOp::Le),
    ("!=", FilterOp::Ne),
    ("=", FilterOp::Eq),
    ("<", FilterOp::Lt),
    (">", FilterOp::Gt),
];

impl FilterOp {
    /// Returns true when the ordering of `value` against the literal
    /// satisfies the operator.
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Lt => ordering.is_lt(),
            Self::Le => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Ge => ordering.is_ge(),
        }
    }
}

/// A parsed filter clause.
#[derive(Debug, Clone)]
struct FilterClause {
    /// Partition column name.
    name: String,
    /// Comparison operator.
    op: FilterOp,
    /// Literal with surrounding quotes stripped.
    literal: String,
}

/// Parses a filter into its conjunction of clauses.
///
/// Clauses are separated by ` and `; each clause is `name <op> literal` with
/// one of the six comparison operators. A clause outside that shape fails the
/// whole filter so callers see the unsupported expression instead of an empty
/// result.
fn parse_filter(filter: &str) -> Result<Vec<FilterClause>, MetastoreError> {
    filter
        .split(" and ")
        .map(|clause| {
            FILTER_OPS
                .iter()
                .find_map(|(token, op)| {
                    clause.split_once(token).map(|(name, literal)| FilterClause {
                        name: name.trim().to_string(),
                        op: *op,
                        literal: literal.trim().trim_matches('"').to_string(),
                    })
                })
                .ok_or_else(|| {
                    MetastoreError::Service(format!("unsupported filter clause: {clause}"))
                })
        })
        .collect()
}

/// Returns true when the partition spec satisfies every parsed clause.
///
/// String values that both parse as integers compare numerically, matching
/// how unquoted integer literals are rendered; everything else compares
/// lexicographically. A partition without a spec, or without the named
/// column, matches nothing.
fn matches_clauses(partition: &ExternalPartition, clauses: &[FilterClause]) -> bool {
    let Some(spec) = partition.spec.as_ref() else {
        return false;
    };
    clauses.iter().all(|clause| {
        spec.get(&clause.name).is_some_and(|value| {
            let ordering = match (value.parse::<i64>(), clause.literal.parse::<i64>()) {
                (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs),
                _ => value.as_str().cmp(&clause.literal),
            };
            clause.op.accepts(ordering)
        })
    })
}

// ============================================================================
// SECTION: Client Implementation
// ============================================================================

impl MetastoreClient for MemoryMetastore {
    fn version(&self) -> ClientVersion {
        self.version
    }

    fn get_table(&self, database: &str, table: &str) -> Result<ExternalTable, MetastoreError> {
        let state = self.lock_state()?;
        state.get(&(database.to_string(), table.to_string())).map(|s| s.table.clone()).ok_or_else(
            || MetastoreError::NotFound {
                database: database.to_string(),
                table: table.to_string(),
            },
        )
    }

    fn create_table(&self, table: &ExternalTable) -> Result<(), MetastoreError> {
        let mut state = self.lock_state()?;
        let key = (table.database.clone(), table.name.clone());
        if state.contains_key(&key) {
            return Err(MetastoreError::AlreadyExists {
                database: table.database.clone(),
                table: table.name.clone(),
            });
        }
        state.insert(key, StoredTable {
            table: table.clone(),
            partitions: Vec::new(),
        });
        Ok(())
    }

    fn alter_table(
        &self,
        database: &str,
        table: &str,
        updated: &ExternalTable,
    ) -> Result<(), MetastoreError> {
        let mut state = self.lock_state()?;
        let key = (database.to_string(), table.to_string());
        let Some(stored) = state.get_mut(&key) else {
            return Err(MetastoreError::NotFound {
                database: database.to_string(),
                table: table.to_string(),
            });
        };
        stored.table = updated.clone();
        Ok(())
    }

    fn drop_table(&self, database: &str, table: &str) -> Result<(), MetastoreError> {
        let mut state = self.lock_state()?;
        let key = (database.to_string(), table.to_string());
        if state.remove(&key).is_none() {
            return Err(MetastoreError::NotFound {
                database: database.to_string(),
                table: table.to_string(),
            });
        }
        Ok(())
    }

    fn list_partitions(
        &self,
        database: &str,
        table: &str,
    ) -> Result<Vec<ExternalPartition>, MetastoreError> {
        let state = self.lock_state()?;
        state
            .get(&(database.to_string(), table.to_string()))
            .map(|s| s.partitions.clone())
            .ok_or_else(|| MetastoreError::NotFound {
                database: database.to_string(),
                table: table.to_string(),
            })
    }

    fn list_partitions_by_filter(
        &self,
        database: &str,
        table: &str,
        filter: &str,
    ) -> Result<Vec<ExternalPartition>, MetastoreError> {
        let clauses = parse_filter(filter)?;
        let all = self.list_partitions(database, table)?;
        Ok(all.into_iter().filter(|p| matches_clauses(p, &clauses)).collect())
    }
}
