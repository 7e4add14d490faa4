use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use finance_tracker::{
    stores::sqlite::create_app_state,
    transaction::{Transaction, TransactionBuilder, TransactionType},
};

/// A utility for creating a test database for the REST API server of finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: PathBuf,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = args.output_path.as_path();

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
    let mut service = create_app_state(conn)?.transaction_service;

    println!("Creating test transactions...");

    for builder in sample_transactions() {
        let transaction = service.create(builder)?;
        println!(
            "  #{} {} {} {}",
            transaction.id, transaction.date, transaction.transaction_type, transaction.title
        );
    }

    println!("Success!");

    Ok(())
}

fn sample_transactions() -> Vec<TransactionBuilder> {
    vec![
        Transaction::build("Salary", 1000.0, TransactionType::Income, date!(2024 - 01 - 01))
            .category("Job"),
        Transaction::build("Rent", 400.0, TransactionType::Expense, date!(2024 - 01 - 02))
            .category("Housing"),
        Transaction::build("Groceries", 82.45, TransactionType::Expense, date!(2024 - 01 - 05))
            .category("Food"),
        Transaction::build("Freelance", 250.0, TransactionType::Income, date!(2024 - 01 - 12))
            .category("Side work"),
    ]
}
