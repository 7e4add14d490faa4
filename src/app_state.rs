//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{stores::TransactionStore, transaction::TransactionService};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// The service for managing [transactions](crate::transaction::Transaction).
    pub transaction_service: TransactionService<S>,
}

impl<S> AppState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// Create a new [AppState] that keeps transactions in `transaction_store`.
    pub fn new(transaction_store: S) -> Self {
        Self {
            transaction_service: TransactionService::new(transaction_store),
        }
    }
}

impl<S> FromRef<AppState<S>> for TransactionService<S>
where
    S: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<S>) -> Self {
        state.transaction_service.clone()
    }
}
