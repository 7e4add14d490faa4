use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionService},
};

/// A route handler for getting a transaction by its ID.
///
/// Responds with the status code 404 if there is no transaction with that ID.
pub async fn get_transaction_endpoint<S>(
    State(service): State<TransactionService<S>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    service
        .get(transaction_id)?
        .map(Json)
        .ok_or(Error::NotFound)
}
