//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder},
};

/// Handles the persistence of transactions.
///
/// A store owns the durable copy of every transaction. Clones of a store must
/// share the same underlying storage so that request handlers can each hold a
/// cheap copy.
pub trait TransactionStore {
    /// Retrieve every transaction in the store, ordered by ID.
    fn find_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction from the store, or `None` if `id` is not in the store.
    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error>;

    /// Save a new transaction, assigning it a fresh ID.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Overwrite the saved transaction that has the same ID as `transaction`.
    ///
    /// Implementers should return [Error::NotFound] if no transaction has that ID.
    fn update(&mut self, transaction: Transaction) -> Result<Transaction, Error>;

    /// Remove the transaction with `id` from the store.
    ///
    /// Removing an ID that is not in the store is not an error.
    fn delete_by_id(&mut self, id: TransactionId) -> Result<(), Error>;
}
