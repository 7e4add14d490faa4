use axum::{Json, extract::State};

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionService},
};

/// A route handler that responds with every transaction as a JSON array.
pub async fn list_transactions_endpoint<S>(
    State(service): State<TransactionService<S>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore + Clone + Send + Sync,
{
    service.list().map(Json)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use time::macros::date;

    use crate::{
        stores::InMemoryTransactionStore,
        transaction::{
            Transaction, TransactionService, TransactionType,
            list_endpoint::list_transactions_endpoint,
        },
    };

    #[tokio::test]
    async fn lists_all_transactions() {
        let mut service = TransactionService::new(InMemoryTransactionStore::new());
        let salary = service
            .create(Transaction::build(
                "Salary",
                1000.0,
                TransactionType::Income,
                date!(2024 - 01 - 01),
            ))
            .unwrap();
        let rent = service
            .create(Transaction::build(
                "Rent",
                400.0,
                TransactionType::Expense,
                date!(2024 - 01 - 02),
            ))
            .unwrap();

        let response = list_transactions_endpoint(State(service)).await.unwrap();

        assert_eq!(response.0, vec![salary, rent]);
    }

    #[tokio::test]
    async fn empty_store_gives_empty_list() {
        let service = TransactionService::new(InMemoryTransactionStore::new());

        let response = list_transactions_endpoint(State(service)).await.unwrap();

        assert!(response.0.is_empty());
    }
}
