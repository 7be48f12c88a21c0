//! Route handlers for listing transactions, optionally filtered by category or date.

use axum::{Json, extract::State};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    extract::QueryParams,
    transaction::{Transaction, TransactionQuery, TransactionStore, date_time::parse_date_time},
};

/// A route handler for listing every transaction in the order they were created.
pub async fn list_transactions_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore,
{
    state
        .transaction_store
        .get_query(TransactionQuery::default())
        .map(Json)
}

/// The query parameters for [list_transactions_by_category_endpoint].
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    category: Option<String>,
}

/// A route handler for listing the transactions with exactly the given category.
///
/// Transactions are ordered by category and then date. An unknown category
/// gives an empty list.
pub async fn list_transactions_by_category_endpoint<S>(
    State(state): State<AppState<S>>,
    QueryParams(params): QueryParams<CategoryParams>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore,
{
    let category = params
        .category
        .ok_or_else(|| Error::BadRequest("You must provide category".to_owned()))?;

    state
        .transaction_store
        .get_query(TransactionQuery::by_category(&category))
        .map(Json)
}

/// The query parameters for [list_transactions_by_date_endpoint].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

/// A route handler for listing the transactions between two dates (inclusive), ordered by date.
///
/// Both `startDate` and `endDate` are required and may either be an RFC 3339
/// date-time or a `YYYY-MM-DD` date, which is read as midnight UTC.
pub async fn list_transactions_by_date_endpoint<S>(
    State(state): State<AppState<S>>,
    QueryParams(params): QueryParams<DateRangeParams>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore,
{
    let (Some(start_date), Some(end_date)) = (
        params.start_date.filter(|date| !date.is_empty()),
        params.end_date.filter(|date| !date.is_empty()),
    ) else {
        return Err(Error::BadRequest(
            "You must provide startDate and endDate".to_owned(),
        ));
    };

    let start_date = parse_date_param("startDate", &start_date)?;
    let end_date = parse_date_param("endDate", &end_date)?;

    state
        .transaction_store
        .get_query(TransactionQuery::by_date_range(start_date..=end_date))
        .map(Json)
}

fn parse_date_param(name: &str, value: &str) -> Result<OffsetDateTime, Error> {
    parse_date_time(value)
        .map_err(|error| Error::BadRequest(format!("Invalid {name} \"{value}\": {error}")))
}
