//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error, endpoints,
    stores::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_balance_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Cross-origin requests are allowed from any origin so that a browser
/// front end served from elsewhere can use the API.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore + Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint::<S>).post(create_transaction_endpoint::<S>),
        )
        .route(endpoints::BALANCE, get(get_balance_endpoint::<S>))
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint::<S>)
                .get(get_transaction_endpoint::<S>)
                .delete(delete_transaction_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .layer(cors)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
