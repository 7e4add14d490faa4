//! The business rules for transactions: balance aggregation and the
//! fetch-then-save orchestration of create, update and delete.

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder},
};

/// Runs the transaction operations against a [TransactionStore].
///
/// The service holds no state of its own besides the store. A missing ID is
/// reported as `Ok(None)` rather than an error, errors are reserved for
/// failures in the store itself.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore,
{
    /// Create a service that reads and writes transactions through `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All transactions in the order the store returns them.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.store.find_all()
    }

    /// The transaction with `id`, or `None` if there is no such transaction.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        self.store.find_by_id(id)
    }

    /// Save a new transaction and return it with the ID assigned by the store.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn create(&mut self, candidate: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self.store.create(candidate)?;
        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Overwrite every field of the transaction with `id` using `candidate`.
    ///
    /// Returns `None`, without writing anything, if there is no transaction
    /// with `id`. The ID of the transaction never changes.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn update(
        &mut self,
        id: TransactionId,
        candidate: TransactionBuilder,
    ) -> Result<Option<Transaction>, Error> {
        let Some(mut existing) = self.store.find_by_id(id)? else {
            tracing::debug!("Skipping update of missing transaction {id}");
            return Ok(None);
        };

        existing.overwrite_with(candidate);

        match self.store.update(existing) {
            Ok(updated) => Ok(Some(updated)),
            // The transaction was deleted between the read and the write.
            Err(Error::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Remove the transaction with `id`, if it exists.
    ///
    /// # Errors
    /// Returns any error from the store. A missing ID is not an error.
    pub fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        self.store.delete_by_id(id)
    }

    /// The signed sum of all transactions: income adds its amount, expenses
    /// subtract theirs. An empty store has a balance of zero.
    ///
    /// The sum is recomputed from the store on every call.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn balance(&self) -> Result<f64, Error> {
        let balance = self
            .store
            .find_all()?
            .iter()
            .map(Transaction::signed_amount)
            .sum();

        Ok(balance)
    }
}
