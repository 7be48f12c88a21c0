//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction, TransactionPatch, TransactionQuery},
};

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

/// Handles the creation, retrieval, modification and removal of transactions.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Create a new transaction in the store and return it with its assigned ID.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Apply `patch` to the transaction `id`, leaving fields the patch does not set untouched.
    ///
    /// Returns the number of rows changed, which is zero if `id` does not refer
    /// to a stored transaction.
    fn update(&self, id: TransactionId, patch: TransactionPatch) -> Result<RowsAffected, Error>;

    /// Permanently remove the transaction `id`.
    ///
    /// Returns the number of rows removed, which is zero if `id` does not
    /// refer to a stored transaction.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error>;

    /// Get each distinct category in ascending order.
    fn categories(&self) -> Result<Vec<String>, Error>;
}
