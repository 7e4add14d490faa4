//! Implements a transaction store that keeps everything in memory.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder},
};

#[derive(Debug)]
struct Inner {
    transactions: BTreeMap<TransactionId, Transaction>,
    next_id: TransactionId,
}

/// Stores transactions in a map that lives as long as the store.
///
/// IDs start at 1 and are never reused, even after a delete. Nothing is
/// written to disk, so this store suits tests and throwaway servers.
#[derive(Debug, Clone)]
pub struct InMemoryTransactionStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                transactions: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, Inner>, Error> {
        self.inner.lock().map_err(|error| {
            tracing::error!("Could not acquire in-memory store lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn find_all(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.lock_inner()?.transactions.values().cloned().collect())
    }

    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        Ok(self.lock_inner()?.transactions.get(&id).cloned())
    }

    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let mut inner = self.lock_inner()?;

        let id = inner.next_id;
        inner.next_id += 1;

        let transaction = builder.finalise(id);
        inner.transactions.insert(id, transaction.clone());

        Ok(transaction)
    }

    fn update(&mut self, transaction: Transaction) -> Result<Transaction, Error> {
        let mut inner = self.lock_inner()?;

        match inner.transactions.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(transaction)
            }
            None => Err(Error::NotFound),
        }
    }

    fn delete_by_id(&mut self, id: TransactionId) -> Result<(), Error> {
        self.lock_inner()?.transactions.remove(&id);

        Ok(())
    }
}
