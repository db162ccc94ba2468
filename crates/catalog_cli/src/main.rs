//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `catalog_core` linkage and database bootstrap from a shell.
//! - Print every book aggregate in a stable one-line-per-book format.
//!
//! Database path: first argument, then `CATALOG_DB_PATH`, then in-memory.
//! Log directory: `CATALOG_LOG_DIR` (absolute); logging stays off when unset.

use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{BookRepository, SqliteBookRepository};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "CATALOG_DB_PATH";
const LOG_DIR_ENV: &str = "CATALOG_LOG_DIR";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("catalog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        catalog_core::init_logging(catalog_core::default_log_level(), &log_dir)?;
    }

    println!("catalog_core version={}", catalog_core::core_version());

    let db_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(DB_PATH_ENV).ok());
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let repo = SqliteBookRepository::try_new(&conn)?;
    let books = repo.find_all()?;
    info!("event=cli_list module=cli status=ok books={}", books.len());

    for book in &books {
        let genres = book
            .genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} | {} | [{}]",
            book.id, book.title, book.author.full_name, genres
        );
    }
    println!("books={}", books.len());
    Ok(())
}
