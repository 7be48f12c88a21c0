use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    extract::TransactionIdPath,
    transaction::{RowsAffected, TransactionStore},
};

/// A route handler for deleting a transaction.
///
/// Responds with the number of rows deleted, or with 404 if the transaction
/// does not exist.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    TransactionIdPath(transaction_id): TransactionIdPath,
) -> Result<Json<RowsAffected>, Error>
where
    S: TransactionStore,
{
    match state.transaction_store.delete(transaction_id)? {
        0 => Err(Error::NotFound),
        rows_affected => {
            tracing::debug!("Deleted transaction {transaction_id}");
            Ok(Json(rows_affected))
        }
    }
}
