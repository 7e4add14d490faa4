//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    Error,
    database_id::TransactionId,
    db::{CreateTable, MapRow},
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder},
};

/// Stores transactions in a SQLite database.
///
/// The `transaction` table must exist before the store is used, see
/// [initialize](crate::db::initialize).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Retrieve all transactions in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    fn find_all(&self) -> Result<Vec<Transaction>, Error> {
        self.lock_connection()?
            .prepare(
                "SELECT id, title, amount, type, category, date FROM \"transaction\" ORDER BY id ASC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "SELECT id, title, amount, type, category, date FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .optional()?;

        Ok(transaction)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "INSERT INTO \"transaction\" (title, amount, type, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, title, amount, type, category, date",
            )?
            .query_row(
                params![
                    builder.title,
                    builder.amount,
                    builder.transaction_type,
                    builder.category,
                    builder.date,
                ],
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Overwrite all fields, except the ID, of an existing transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `transaction.id` does not refer to a saved transaction,
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, transaction: Transaction) -> Result<Transaction, Error> {
        let transaction = self
            .lock_connection()?
            .prepare(
                "UPDATE \"transaction\"
                 SET title = ?1, amount = ?2, type = ?3, category = ?4, date = ?5
                 WHERE id = ?6
                 RETURNING id, title, amount, type, category, date",
            )?
            .query_row(
                params![
                    transaction.title,
                    transaction.amount,
                    transaction.transaction_type,
                    transaction.category,
                    transaction.date,
                    transaction.id,
                ],
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Delete a transaction from the database.
    ///
    /// Deleting an ID that does not exist affects zero rows and is not an error.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is an SQL error.
    fn delete_by_id(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock_connection()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            tracing::debug!("Delete of transaction {id} affected no rows");
        }

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    amount REAL NOT NULL,
                    type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                    category TEXT NOT NULL,
                    date TEXT NOT NULL
                    )",
            (),
        )?;

        // Ensure the sequence starts at 1
        connection.execute(
            "INSERT INTO sqlite_sequence (name, seq)
             SELECT 'transaction', 0
             WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(offset)?,
            title: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            transaction_type: row.get(offset + 3)?,
            category: row.get(offset + 4)?,
            date: row.get(offset + 5)?,
        })
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use std::{
        collections::HashSet,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        stores::TransactionStore,
        transaction::{Transaction, TransactionType},
    };

    use super::SQLiteTransactionStore;

    fn get_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn create_succeeds() {
        let mut store = get_store();
        let builder =
            Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01))
                .category("Job");

        let transaction = store.create(builder.clone()).unwrap();

        assert_eq!(transaction, builder.finalise(transaction.id));
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let mut store = get_store();
        let mut ids = HashSet::new();

        for i in 0..10 {
            let transaction = store
                .create(Transaction::build(
                    "Coffee",
                    i as f64,
                    TransactionType::Expense,
                    date!(2024 - 03 - 01),
                ))
                .unwrap();
            ids.insert(transaction.id);
        }

        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn first_id_is_one() {
        let mut store = get_store();

        let transaction = store
            .create(Transaction::build(
                "Salary",
                1.0,
                TransactionType::Income,
                date!(2024 - 01 - 01),
            ))
            .unwrap();

        assert_eq!(transaction.id, 1);
    }

    #[test]
    fn find_by_id_returns_created_transaction() {
        let mut store = get_store();
        let want = store
            .create(
                Transaction::build("Rent", 400.0, TransactionType::Expense, date!(2024 - 01 - 02))
                    .category("Housing"),
            )
            .unwrap();

        let got = store.find_by_id(want.id).unwrap();

        assert_eq!(got, Some(want));
    }

    #[test]
    fn find_by_id_returns_none_for_missing_id() {
        let store = get_store();

        assert_eq!(store.find_by_id(42), Ok(None));
    }

    #[test]
    fn find_all_returns_transactions_in_id_order() {
        let mut store = get_store();
        let first = store
            .create(Transaction::build(
                "Later",
                1.0,
                TransactionType::Income,
                date!(2024 - 12 - 31),
            ))
            .unwrap();
        let second = store
            .create(Transaction::build(
                "Earlier",
                2.0,
                TransactionType::Expense,
                date!(2024 - 01 - 01),
            ))
            .unwrap();

        let got = store.find_all().unwrap();

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn find_all_on_empty_store() {
        let store = get_store();

        assert_eq!(store.find_all(), Ok(vec![]));
    }

    #[test]
    fn update_overwrites_fields() {
        let mut store = get_store();
        let mut transaction = store
            .create(
                Transaction::build("Rent", 400.0, TransactionType::Expense, date!(2024 - 01 - 02))
                    .category("Housing"),
            )
            .unwrap();
        transaction.amount = 500.0;
        transaction.title = "Rent (new lease)".to_owned();

        let updated = store.update(transaction.clone()).unwrap();

        assert_eq!(updated, transaction);
        assert_eq!(store.find_by_id(transaction.id), Ok(Some(transaction)));
    }

    #[test]
    fn update_fails_on_missing_id() {
        let mut store = get_store();
        let transaction =
            Transaction::build("Ghost", 1.0, TransactionType::Income, date!(2024 - 01 - 01))
                .finalise(99);

        assert_eq!(store.update(transaction), Err(Error::NotFound));
        assert_eq!(store.find_all(), Ok(vec![]));
    }

    #[test]
    fn delete_removes_transaction() {
        let mut store = get_store();
        let transaction = store
            .create(Transaction::build(
                "Salary",
                1000.0,
                TransactionType::Income,
                date!(2024 - 01 - 01),
            ))
            .unwrap();

        store.delete_by_id(transaction.id).unwrap();

        assert_eq!(store.find_by_id(transaction.id), Ok(None));
    }

    #[test]
    fn delete_missing_id_succeeds() {
        let mut store = get_store();

        assert_eq!(store.delete_by_id(1234), Ok(()));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = get_store();
        let builder =
            Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01));
        let first = store.create(builder.clone()).unwrap();
        store.delete_by_id(first.id).unwrap();

        let second = store.create(builder).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn clones_share_storage() {
        let mut store = get_store();
        let reader = store.clone();

        let transaction = store
            .create(Transaction::build(
                "Salary",
                1000.0,
                TransactionType::Income,
                date!(2024 - 01 - 01),
            ))
            .unwrap();

        assert_eq!(reader.find_by_id(transaction.id), Ok(Some(transaction)));
    }
}
