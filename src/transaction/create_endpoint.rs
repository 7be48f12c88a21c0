use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    extract::JsonBody,
    transaction::{NewTransaction, Transaction, TransactionStore},
};

/// A route handler for creating a new transaction.
///
/// Responds with the created transaction, including the ID assigned by the store.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    JsonBody(new_transaction): JsonBody<NewTransaction>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore,
{
    let transaction = state.transaction_store.create(new_transaction)?;
    tracing::debug!("Created transaction {}", transaction.id);

    Ok(Json(transaction))
}
