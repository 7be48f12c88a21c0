use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::macros::datetime;

use ledger_rs::{
    create_app_state,
    transaction::{Transaction, TransactionStore, TransactionType},
};

/// A utility for creating a test database for the REST API server of ledger_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let state = create_app_state(conn)?;

    println!("Creating test transactions...");

    let transactions = [
        Transaction::build(
            TransactionType::Income,
            Decimal::new(250000, 2),
            "Salary",
            datetime!(2025-01-01 9:00 UTC),
        )
        .description("January pay"),
        Transaction::build(
            TransactionType::Expense,
            Decimal::new(120000, 2),
            "Rent",
            datetime!(2025-01-02 0:00 UTC),
        ),
        Transaction::build(
            TransactionType::Expense,
            Decimal::new(8450, 2),
            "Food",
            datetime!(2025-01-05 18:30 UTC),
        )
        .description("Groceries"),
        Transaction::build(
            TransactionType::Expense,
            Decimal::new(1299, 2),
            "Food",
            datetime!(2025-01-12 12:15 UTC),
        ),
        Transaction::build(
            TransactionType::Expense,
            Decimal::new(6000, 2),
            "Car",
            datetime!(2025-01-20 7:45 UTC),
        )
        .description("Fuel"),
        Transaction::build(
            TransactionType::Income,
            Decimal::new(250000, 2),
            "Salary",
            datetime!(2025-02-01 9:00 UTC),
        )
        .description("February pay"),
    ];

    for transaction in transactions {
        state.transaction_store.create(transaction)?;
    }

    println!("Success!");

    Ok(())
}
