use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder, TransactionService, payload::parse_payload},
};

/// A route handler for creating a new transaction.
///
/// Responds with the saved transaction, including the ID assigned by the store.
pub async fn create_transaction_endpoint<S>(
    State(mut service): State<TransactionService<S>>,
    payload: Result<Json<TransactionBuilder>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    let builder = parse_payload(payload)?;

    service.create(builder).map(Json)
}
