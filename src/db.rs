//! Checks the connection to the application's database and creates its tables.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Check that `connection` can run queries.
///
/// # Errors
/// Returns an [Error::SqlError] if the database cannot be queried, e.g. the
/// file is not a SQLite database.
pub fn authenticate(connection: &Connection) -> Result<(), Error> {
    connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

    Ok(())
}

/// Create the tables for the domain models if they do not already exist.
///
/// The tables are created inside an exclusive transaction, so either all of
/// them are created or none are.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
