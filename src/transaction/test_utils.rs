use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    SQLAppState, build_router, create_app_state,
    transaction::{NewTransaction, Transaction, TransactionStore, TransactionType},
};

#[track_caller]
pub fn must_create_test_state() -> SQLAppState {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(conn).expect("Could not create app state.")
}

/// A test server for the full router and the state it shares, so tests can
/// seed or inspect the store directly.
#[track_caller]
pub fn must_create_test_server() -> (TestServer, SQLAppState) {
    let state = must_create_test_state();
    let server = TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

pub fn expense(category: &str, date: OffsetDateTime) -> NewTransaction {
    Transaction::build(TransactionType::Expense, Decimal::new(1000, 2), category, date)
}

#[track_caller]
pub fn must_insert(state: &SQLAppState, new_transaction: NewTransaction) -> Transaction {
    state
        .transaction_store
        .create(new_transaction)
        .expect("Could not create test transaction")
}
