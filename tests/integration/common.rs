//! Shared fixtures

use std::fs;

use shelfkeeper::{models::Book, AppConfig, Library};
use tempfile::TempDir;

/// Library over a fresh directory seeded with `books` and raw ledger text
pub fn library_with(books: &[Book], ledger: &str) -> (TempDir, Library) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig::in_dir(dir.path());

    let json = serde_json::to_string_pretty(books).expect("Failed to encode books");
    fs::write(&config.storage.books_path, json).expect("Failed to seed books");
    fs::write(&config.storage.accounts_path, ledger).expect("Failed to seed ledger");

    let library = Library::open(config).expect("Failed to open library");
    (dir, library)
}

pub fn dune() -> Book {
    Book::new("Dune", "Herbert", 1965, 2)
}

/// Re-open the same directory from disk
pub fn reopen(dir: &TempDir) -> Library {
    Library::open(AppConfig::in_dir(dir.path())).expect("Failed to reopen library")
}
