//! The route handler for listing transaction categories.

use axum::{Json, extract::State};

use crate::{AppState, Error, transaction::TransactionStore};

/// A route handler for getting each distinct category in ascending order.
pub async fn get_categories_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<String>>, Error>
where
    S: TransactionStore,
{
    state.transaction_store.categories().map(Json)
}
