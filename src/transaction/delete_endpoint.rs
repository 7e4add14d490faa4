use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    Error, database_id::TransactionId, stores::TransactionStore, transaction::TransactionService,
};

/// A route handler for deleting a transaction, responds with an empty 200 OK.
///
/// Deleting a transaction that does not exist also responds with 200 OK.
pub async fn delete_transaction_endpoint<S>(
    State(mut service): State<TransactionService<S>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    service.delete(transaction_id)?;

    Ok(StatusCode::OK)
}
