use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    extract::{JsonBody, TransactionIdPath},
    transaction::{RowsAffected, TransactionPatch, TransactionStore},
};

/// A route handler for updating some or all of the fields of a transaction.
///
/// Responds with the number of rows changed rather than the transaction, or
/// with 404 if the transaction does not exist.
pub async fn edit_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    TransactionIdPath(transaction_id): TransactionIdPath,
    JsonBody(patch): JsonBody<TransactionPatch>,
) -> Result<Json<RowsAffected>, Error>
where
    S: TransactionStore,
{
    match state.transaction_store.update(transaction_id, patch)? {
        0 => {
            tracing::debug!("Could not update transaction {transaction_id}: no rows affected");
            Err(Error::NotFound)
        }
        rows_affected => Ok(Json(rows_affected)),
    }
}
