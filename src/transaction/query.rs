//! Builds the SQL for filtered, ordered transaction queries and partial updates.

use std::ops::RangeInclusive;

use rusqlite::types::Value;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{TransactionPatch, date_time},
};

/// The columns of the transaction table in the order [map_transaction_row](super::map_transaction_row) expects.
pub(crate) const TRANSACTION_COLUMNS: &str = "id, type, amount, category, date, description";

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query](super::TransactionStore::get_query).
///
/// The default query selects every transaction in the order it was created.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions with exactly this category.
    pub category: Option<String>,
    /// Include transactions within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<OffsetDateTime>>,
    /// Order by these fields, in turn. Ties are always broken by ID.
    pub sort: Vec<(SortField, SortOrder)>,
}

impl TransactionQuery {
    /// Transactions with the category `category`, ordered by category and then date.
    pub fn by_category(category: &str) -> Self {
        Self {
            category: Some(category.to_owned()),
            sort: vec![
                (SortField::Category, SortOrder::Ascending),
                (SortField::Date, SortOrder::Ascending),
            ],
            ..Default::default()
        }
    }

    /// Transactions that happened within `date_range`, ordered by date.
    pub fn by_date_range(date_range: RangeInclusive<OffsetDateTime>) -> Self {
        Self {
            date_range: Some(date_range),
            sort: vec![(SortField::Date, SortOrder::Ascending)],
            ..Default::default()
        }
    }
}

/// A field that transactions can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Order by the category label.
    Category,
    /// Order by when the transaction happened.
    Date,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::Category => "category",
            SortField::Date => "date",
        }
    }
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortOrder {
    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// A SQL string with its positional parameters.
#[derive(Debug, PartialEq)]
pub(crate) struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Build the `SELECT` statement for `query`.
///
/// # Errors
/// Returns an [Error::SqlError] if a date in the query cannot be formatted.
pub(crate) fn build_select(query: &TransactionQuery) -> Result<SqlStatement, Error> {
    let mut sql = format!("SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"");
    let mut where_clause_parts = vec![];
    let mut params = vec![];

    if let Some(ref category) = query.category {
        params.push(Value::Text(category.clone()));
        where_clause_parts.push(format!("category = ?{}", params.len()));
    }

    if let Some(ref date_range) = query.date_range {
        params.push(date_value(*date_range.start())?);
        params.push(date_value(*date_range.end())?);
        where_clause_parts.push(format!(
            "date BETWEEN ?{} AND ?{}",
            params.len() - 1,
            params.len()
        ));
    }

    if !where_clause_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause_parts.join(" AND "));
    }

    let order_by_parts = query
        .sort
        .iter()
        .map(|(field, order)| format!("{} {}", field.column(), order.keyword()))
        .chain(std::iter::once("id ASC".to_owned()))
        .collect::<Vec<_>>();

    sql.push_str(" ORDER BY ");
    sql.push_str(&order_by_parts.join(", "));

    Ok(SqlStatement { sql, params })
}

/// Build the `UPDATE` statement that applies `patch` to the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::BadRequest] if `patch` does not set any fields,
/// - or [Error::SqlError] if the date cannot be formatted.
pub(crate) fn build_update(
    id: TransactionId,
    patch: &TransactionPatch,
) -> Result<SqlStatement, Error> {
    if patch.is_empty() {
        return Err(Error::BadRequest(
            "You must provide at least one field to update".to_owned(),
        ));
    }

    let mut assignments = vec![];
    let mut params = vec![];

    if let Some(transaction_type) = patch.transaction_type {
        params.push(Value::Text(transaction_type.as_str().to_owned()));
        assignments.push(format!("type = ?{}", params.len()));
    }

    if let Some(amount) = patch.amount {
        params.push(Value::Text(amount.to_string()));
        assignments.push(format!("amount = ?{}", params.len()));
    }

    if let Some(ref category) = patch.category {
        params.push(Value::Text(category.clone()));
        assignments.push(format!("category = ?{}", params.len()));
    }

    if let Some(date) = patch.date {
        params.push(date_value(date)?);
        assignments.push(format!("date = ?{}", params.len()));
    }

    if let Some(ref description) = patch.description {
        params.push(
            description
                .as_ref()
                .map_or(Value::Null, |description| Value::Text(description.clone())),
        );
        assignments.push(format!("description = ?{}", params.len()));
    }

    params.push(Value::Integer(id));
    let sql = format!(
        "UPDATE \"transaction\" SET {} WHERE id = ?{}",
        assignments.join(", "),
        params.len()
    );

    Ok(SqlStatement { sql, params })
}

fn date_value(date_time: OffsetDateTime) -> Result<Value, Error> {
    date_time::to_storage_text(date_time)
        .map(Value::Text)
        .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)).into())
}
