use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use event_expenses::{initialize_db, insert_demo_events};

/// A utility for creating a SQLite database with demo events for the event expenses server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: PathBuf,
}

/// Create a database seeded with the demo events and their expenses.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = args.output_path.as_path();

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'events.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Adding demo events...");
    let events = insert_demo_events(&conn)?;

    for event in &events {
        println!("  {} ({} expenses)", event.name, event.expenses.len());
    }

    println!("Success!");

    Ok(())
}
