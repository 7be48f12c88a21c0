//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId, transaction::date_time};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name of the type as it is written in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(Error::Validation(format!(
                "invalid transaction type \"{other}\", expected Income or Expense"
            ))),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A ledger entry: an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned in this transaction.
    pub amount: Decimal,
    /// A label for grouping transactions, e.g. "Groceries", "Rent".
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "date_time")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        transaction_type: TransactionType,
        amount: Decimal,
        category: &str,
        date: OffsetDateTime,
    ) -> NewTransaction {
        NewTransaction {
            transaction_type,
            amount,
            category: category.to_owned(),
            date,
            description: None,
        }
    }
}

/// The fields needed to create a [Transaction].
///
/// This is also the shape of the JSON body for creating a transaction. Every
/// field except `description` is required, and any `id` in the body is
/// ignored since the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// A label for grouping transactions.
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "date_time")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransaction {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }
}

/// A partial update to a [Transaction].
///
/// Fields that are `None` are left unchanged. Required fields may be left
/// out of the JSON body but may not be set to `null`, whereas `description`
/// may be set to `null` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionPatch {
    /// The new transaction type.
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub transaction_type: Option<TransactionType>,
    /// The new amount.
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Decimal>,
    /// The new category.
    #[serde(default, deserialize_with = "present")]
    pub category: Option<String>,
    /// The new date.
    #[serde(default, deserialize_with = "date_time::deserialize_some")]
    pub date: Option<OffsetDateTime>,
    /// The new description, `Some(None)` clears the description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl TransactionPatch {
    /// Whether the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

/// Deserialize a field that was present in the body.
///
/// Only called by serde when the field exists, so a missing field stays
/// `None` via `#[serde(default)]` while `null` is handed to `T`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============================================================================
// TESTS
// ============================================================================
