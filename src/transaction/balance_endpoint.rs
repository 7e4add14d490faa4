use axum::{Json, extract::State};

use crate::{Error, stores::TransactionStore, transaction::TransactionService};

/// A route handler that responds with the signed sum of all transactions as
/// a bare JSON number.
pub async fn get_balance_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<f64>, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    service.balance().map(Json)
}
