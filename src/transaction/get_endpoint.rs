use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    extract::TransactionIdPath,
    transaction::{Transaction, TransactionStore},
};

/// A route handler for getting a transaction by its database ID.
///
/// This function will return the status code 404 if the requested resource does not exist (e.g., not created yet).
pub async fn get_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    TransactionIdPath(transaction_id): TransactionIdPath,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore,
{
    state.transaction_store.get(transaction_id).map(Json)
}
