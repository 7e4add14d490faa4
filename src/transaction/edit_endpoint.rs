use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder, TransactionService, payload::parse_payload},
};

/// A route handler for replacing the fields of an existing transaction.
///
/// Responds with the status code 404, and changes nothing, if there is no
/// transaction with that ID.
pub async fn edit_transaction_endpoint<S>(
    State(mut service): State<TransactionService<S>>,
    Path(transaction_id): Path<TransactionId>,
    payload: Result<Json<TransactionBuilder>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    let builder = parse_payload(payload)?;

    match service.update(transaction_id, builder)? {
        Some(transaction) => Ok(Json(transaction)),
        None => {
            tracing::debug!("Could not update transaction {transaction_id}: not found");
            Err(Error::NotFound)
        }
    }
}
