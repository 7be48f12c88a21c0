//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the request bodies for creating and updating transactions
//! - The `TransactionStore` trait and its SQLite implementation
//! - The query builder used to filter and order transactions
//! - Route handlers for the transaction endpoints

mod core;
mod create_endpoint;
pub mod date_time;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod query;
mod sqlite;
mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{NewTransaction, Transaction, TransactionPatch, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{
    list_transactions_by_category_endpoint, list_transactions_by_date_endpoint,
    list_transactions_endpoint,
};
pub use query::{SortField, SortOrder, TransactionQuery};
pub use sqlite::SQLiteTransactionStore;
pub(crate) use sqlite::{create_transaction_table, map_transaction_row};
pub use store::{RowsAffected, TransactionStore};
