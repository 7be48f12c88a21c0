//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::{authenticate, initialize},
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The state of the REST server.
///
/// The store is constructed once at startup and handed to every route handler.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: TransactionStore,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: S,
}

impl<S> AppState<S>
where
    S: TransactionStore,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: S) -> Self {
        Self { transaction_store }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function checks that the database can be queried and then adds the
/// tables for the domain models to the database if they do not exist.
///
/// # Errors
/// Returns an error if the database cannot be queried or initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    authenticate(&db_connection)?;
    tracing::info!("Connection success");

    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(SQLiteTransactionStore::new(connection)))
}
