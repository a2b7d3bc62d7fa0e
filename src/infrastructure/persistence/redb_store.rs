//! Transactional sequence store on top of redb.
//!
//! # Layout
//!
//! - `sequences`: namespace name -> last allocated sequence number
//! - `ns:{name}`: one table per namespace, raw key bytes -> raw value bytes
//!
//! A namespace with no `sequences` entry has allocated nothing yet. Write
//! transactions are serialized by redb; read transactions see a consistent
//! snapshot and never block writers.

use redb::{
    Database, ReadTransaction, ReadableTable, TableDefinition, TableError, WriteTransaction,
};
use std::path::Path;

const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

const NAMESPACE_TABLE_PREFIX: &str = "ns:";

/// Errors raised by [`RedbStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage engine error: {0}")]
    Engine(#[from] redb::Error),

    #[error("sequence for namespace '{0}' is exhausted")]
    SequenceExhausted(String),

    #[error("record in namespace '{namespace}' is not valid UTF-8")]
    CorruptRecord { namespace: String },
}

macro_rules! engine_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for StoreError {
                fn from(err: $source) -> Self {
                    Self::Engine(err.into())
                }
            }
        )+
    };
}

engine_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Handle to a namespace ("bucket") of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    table: String,
}

impl Namespace {
    /// Refers to a namespace by name without creating it.
    ///
    /// Reads through a handle to a namespace that was never created simply
    /// find nothing.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table: format!("{NAMESPACE_TABLE_PREFIX}{name}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
        TableDefinition::new(&self.table)
    }
}

/// Operations available inside a write transaction.
pub struct WriteScope {
    txn: WriteTransaction,
}

impl WriteScope {
    /// Creates the namespace if it does not exist yet.
    pub fn ensure_namespace(&self, name: &str) -> Result<Namespace, StoreError> {
        let namespace = Namespace::named(name);
        self.txn.open_table(namespace.definition())?;
        Ok(namespace)
    }

    /// Increments and returns the namespace counter. The first call returns 1.
    pub fn next_sequence(&self, namespace: &Namespace) -> Result<u64, StoreError> {
        let mut table = self.txn.open_table(SEQUENCES)?;

        let current = table
            .get(namespace.name())?
            .map(|value| value.value())
            .unwrap_or(0);
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::SequenceExhausted(namespace.name().to_string()))?;

        table.insert(namespace.name(), next)?;
        Ok(next)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, namespace: &Namespace, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut table = self.txn.open_table(namespace.definition())?;
        table.insert(key, value)?;
        Ok(())
    }
}

/// Operations available inside a read transaction.
pub struct ReadScope {
    txn: ReadTransaction,
}

impl ReadScope {
    /// Returns the value stored under `key`; a missing namespace reads as empty.
    pub fn get(&self, namespace: &Namespace, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let table = match self.txn.open_table(namespace.definition()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = table.get(key)?.map(|value| value.value().to_vec());
        Ok(value)
    }

    /// Last allocated sequence number, or 0 if none was allocated.
    pub fn current_sequence(&self, namespace: &Namespace) -> Result<u64, StoreError> {
        let table = match self.txn.open_table(SEQUENCES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let current = table
            .get(namespace.name())?
            .map(|value| value.value())
            .unwrap_or(0);
        Ok(current)
    }
}

/// Embedded, durable key-value store with per-namespace sequences.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Opens the database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Engine`] if the file cannot be opened or is
    /// already held by another process.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path)?;

        let txn = db.begin_write()?;
        txn.open_table(SEQUENCES)?;
        txn.commit()?;

        tracing::debug!(path = %path.display(), "Opened link store");
        Ok(Self { db })
    }

    /// Runs `f` in a write transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and is aborted otherwise,
    /// so none of its writes (including sequence increments) become visible.
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&WriteScope) -> Result<T, E>,
        E: From<StoreError>,
    {
        let scope = WriteScope {
            txn: self.db.begin_write().map_err(StoreError::from)?,
        };

        match f(&scope) {
            Ok(value) => {
                scope.txn.commit().map_err(StoreError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = scope.txn.abort() {
                    tracing::warn!(error = %abort_err, "Failed to abort write transaction");
                }
                Err(err)
            }
        }
    }

    /// Runs `f` in a read transaction.
    pub fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&ReadScope) -> Result<T, E>,
        E: From<StoreError>,
    {
        let scope = ReadScope {
            txn: self.db.begin_read().map_err(StoreError::from)?,
        };
        f(&scope)
    }

    pub fn ensure_namespace(&self, name: &str) -> Result<Namespace, StoreError> {
        self.update(|tx| tx.ensure_namespace(name))
    }

    pub fn next_sequence(&self, namespace: &Namespace) -> Result<u64, StoreError> {
        self.update(|tx| tx.next_sequence(namespace))
    }

    pub fn put(&self, namespace: &Namespace, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.update(|tx| tx.put(namespace, key, value))
    }

    pub fn get(&self, namespace: &Namespace, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.view(|tx| tx.get(namespace, key))
    }

    pub fn current_sequence(&self, namespace: &Namespace) -> Result<u64, StoreError> {
        self.view(|tx| tx.current_sequence(namespace))
    }
}
