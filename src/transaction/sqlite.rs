//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{
        NewTransaction, Transaction, TransactionPatch, TransactionQuery, date_time,
        query::{TRANSACTION_COLUMNS, build_select, build_update},
        store::{RowsAffected, TransactionStore},
    },
};

/// Stores transactions in a SQLite database.
///
/// The transaction table must exist before the store is used, see
/// [initialize](crate::db::initialize).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the row violates a table constraint,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let date = date_time::to_storage_text(new_transaction.date)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))?;
        let connection = self.lock()?;

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (type, amount, category, date, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    new_transaction.transaction_type,
                    new_transaction.amount.to_string(),
                    new_transaction.category,
                    date,
                    new_transaction.description,
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let statement = build_select(&query)?;
        let connection = self.lock()?;

        let mut prepared = connection.prepare(&statement.sql)?;
        let transactions = prepared
            .query_map(params_from_iter(statement.params.iter()), map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Update the fields set in `patch` for the transaction `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::BadRequest] if `patch` does not set any fields,
    /// - [Error::Validation] if the new values violate a table constraint,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, id: TransactionId, patch: TransactionPatch) -> Result<RowsAffected, Error> {
        let statement = build_update(id, &patch)?;

        self.lock()?
            .execute(&statement.sql, params_from_iter(statement.params.iter()))
            .map_err(Error::from)
    }

    /// Delete the transaction `id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn delete(&self, id: TransactionId) -> Result<RowsAffected, Error> {
        self.lock()?
            .execute(
                "DELETE FROM \"transaction\" WHERE id = :id",
                &[(":id", &id)],
            )
            .map_err(Error::from)
    }

    /// Get the distinct categories in the database, sorted by byte value.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn categories(&self) -> Result<Vec<String>, Error> {
        let connection = self.lock()?;

        let mut prepared = connection
            .prepare("SELECT DISTINCT category FROM \"transaction\" ORDER BY category ASC")?;
        let categories = prepared
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(categories)
    }
}

/// Create the transaction table in the database.
///
/// Does nothing if the table already exists.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL CHECK (type IN ('Income', 'Expense')),
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT
                )",
        (),
    )?;

    // Indexes for the by-category and by-date listings.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_category_date ON \"transaction\"(category, date);",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns in the order of a `SELECT` built by this module.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let transaction_type = row.get(1)?;

    let raw_amount: String = row.get(2)?;
    let amount = raw_amount
        .parse::<Decimal>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;

    let category = row.get(3)?;

    let raw_date: String = row.get(4)?;
    let date = date_time::from_storage_text(&raw_date)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error)))?;

    let description = row.get(5)?;

    Ok(Transaction {
        id,
        transaction_type,
        amount,
        category,
        date,
        description,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            SQLiteTransactionStore, Transaction, TransactionPatch, TransactionQuery,
            TransactionStore, TransactionType,
        },
    };

    fn get_test_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&conn).expect("Could not initialize database.");

        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn count_transactions(store: &SQLiteTransactionStore) -> usize {
        store
            .get_query(TransactionQuery::default())
            .expect("Could not list transactions")
            .len()
    }

    #[test]
    fn create_assigns_id_and_keeps_fields() {
        let store = get_test_store();
        let new_transaction = Transaction::build(
            TransactionType::Expense,
            Decimal::new(-4599, 2),
            "Food",
            datetime!(2025-01-15 10:30:00.25 +13:00),
        )
        .description("Coffee");

        let transaction = store
            .create(new_transaction.clone())
            .expect("Could not create transaction");

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.transaction_type, new_transaction.transaction_type);
        assert_eq!(transaction.amount, new_transaction.amount);
        assert_eq!(transaction.category, new_transaction.category);
        assert_eq!(transaction.date, new_transaction.date);
        assert_eq!(transaction.description, new_transaction.description);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = get_test_store();
        let build = || {
            Transaction::build(
                TransactionType::Income,
                Decimal::ONE,
                "Gift",
                datetime!(2025-01-01 0:00 UTC),
            )
        };
        let first = store.create(build()).unwrap();
        store.delete(first.id).unwrap();

        let second = store.create(build()).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn get_returns_created_transaction() {
        let store = get_test_store();
        let created = store
            .create(Transaction::build(
                TransactionType::Income,
                Decimal::new(100000, 2),
                "Salary",
                datetime!(2025-01-31 0:00 UTC),
            ))
            .unwrap();

        let got = store.get(created.id).expect("Could not get transaction");

        assert_eq!(got, created);
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let store = get_test_store();

        assert_eq!(store.get(42), Err(Error::NotFound));
    }

    #[test]
    fn invalid_type_is_rejected_by_table() {
        let store = get_test_store();

        let result = store.lock().unwrap().execute(
            "INSERT INTO \"transaction\" (type, amount, category, date) \
             VALUES ('Transfer', '1', 'Food', '2025-01-01T00:00:00.000000000Z')",
            (),
        );

        assert!(
            matches!(Error::from(result.unwrap_err()), Error::Validation(_)),
            "CHECK constraint should be reported as a validation error"
        );
        assert_eq!(count_transactions(&store), 0);
    }

    #[test]
    fn update_merges_fields() {
        let store = get_test_store();
        let created = store
            .create(
                Transaction::build(
                    TransactionType::Expense,
                    Decimal::new(1999, 2),
                    "Food",
                    datetime!(2025-01-15 0:00 UTC),
                )
                .description("Lunch"),
            )
            .unwrap();

        let rows_affected = store
            .update(
                created.id,
                TransactionPatch {
                    category: Some("Eating Out".to_owned()),
                    ..Default::default()
                },
            )
            .expect("Could not update transaction");

        assert_eq!(rows_affected, 1);
        assert_eq!(
            store.get(created.id).unwrap(),
            Transaction {
                category: "Eating Out".to_owned(),
                ..created
            }
        );
    }

    #[test]
    fn update_can_clear_description() {
        let store = get_test_store();
        let created = store
            .create(
                Transaction::build(
                    TransactionType::Expense,
                    Decimal::ONE,
                    "Food",
                    datetime!(2025-01-15 0:00 UTC),
                )
                .description("Lunch"),
            )
            .unwrap();

        store
            .update(
                created.id,
                TransactionPatch {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.get(created.id).unwrap().description, None);
    }

    #[test]
    fn update_missing_transaction_affects_no_rows() {
        let store = get_test_store();

        let rows_affected = store
            .update(
                42,
                TransactionPatch {
                    amount: Some(Decimal::TEN),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(rows_affected, 0);
    }

    #[test]
    fn delete_removes_transaction() {
        let store = get_test_store();
        let created = store
            .create(Transaction::build(
                TransactionType::Expense,
                Decimal::ONE,
                "Food",
                datetime!(2025-01-15 0:00 UTC),
            ))
            .unwrap();

        let rows_affected = store.delete(created.id).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(store.get(created.id), Err(Error::NotFound));
        assert_eq!(store.delete(created.id), Ok(0));
    }

    #[test]
    fn query_by_category_matches_exactly_and_sorts_by_date() {
        let store = get_test_store();
        for (category, date) in [
            ("Food", datetime!(2025-03-01 0:00 UTC)),
            ("food", datetime!(2025-01-01 0:00 UTC)),
            ("Food", datetime!(2025-01-01 0:00 UTC)),
            ("Fuel", datetime!(2025-02-01 0:00 UTC)),
            ("Food", datetime!(2025-02-01 0:00 UTC)),
        ] {
            store
                .create(Transaction::build(
                    TransactionType::Expense,
                    Decimal::ONE,
                    category,
                    date,
                ))
                .unwrap();
        }

        let got = store
            .get_query(TransactionQuery::by_category("Food"))
            .unwrap();

        let got_dates = got.iter().map(|t| t.date).collect::<Vec<_>>();
        assert!(got.iter().all(|t| t.category == "Food"));
        assert_eq!(
            got_dates,
            vec![
                datetime!(2025-01-01 0:00 UTC),
                datetime!(2025-02-01 0:00 UTC),
                datetime!(2025-03-01 0:00 UTC),
            ]
        );
    }

    #[test]
    fn query_by_date_range_is_inclusive() {
        let store = get_test_store();
        let start = datetime!(2025-01-10 0:00 UTC);
        let end = datetime!(2025-01-20 0:00 UTC);
        for date in [
            datetime!(2025-01-20 0:00 UTC),
            datetime!(2025-01-09 23:59:59 UTC),
            start,
            datetime!(2025-01-15 12:00 +13:00),
            datetime!(2025-01-20 0:00:00.000000001 UTC),
        ] {
            store
                .create(Transaction::build(
                    TransactionType::Expense,
                    Decimal::ONE,
                    "Food",
                    date,
                ))
                .unwrap();
        }

        let got = store
            .get_query(TransactionQuery::by_date_range(start..=end))
            .unwrap()
            .into_iter()
            .map(|t| t.date)
            .collect::<Vec<_>>();

        assert_eq!(got, vec![start, datetime!(2025-01-15 12:00 +13:00), end]);
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let store = get_test_store();
        for category in ["Rent", "Food", "Rent", "Car", "Food"] {
            store
                .create(Transaction::build(
                    TransactionType::Expense,
                    Decimal::ONE,
                    category,
                    datetime!(2025-01-01 0:00 UTC),
                ))
                .unwrap();
        }

        let got = store.categories().unwrap();

        assert_eq!(got, vec!["Car", "Food", "Rent"]);
    }

    #[test]
    fn categories_are_empty_without_transactions() {
        let store = get_test_store();

        assert_eq!(store.categories(), Ok(vec![]));
    }
}
