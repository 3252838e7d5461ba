//! Repository layer for the flat-file stores

pub mod accounts;
pub mod books;

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::{config::StorageConfig, error::AppResult};

pub use accounts::AccountLedger;
pub use books::BooksRepository;

/// Main repository struct holding both stores
#[derive(Clone, Debug)]
pub struct Repository {
    pub books: BooksRepository,
    pub accounts: AccountLedger,
}

impl Repository {
    /// Create a new repository over the configured files
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            books: BooksRepository::new(&storage.books_path, &storage.bootstrap_path),
            accounts: AccountLedger::new(&storage.accounts_path),
        }
    }

    /// Create missing store files (first run)
    pub fn ensure_files(&self) -> AppResult<()> {
        self.books.ensure_files()?;
        self.accounts.ensure_file()?;
        Ok(())
    }
}

/// Create `path` with `initial` contents unless it already exists
pub(crate) fn ensure_file(path: &Path, initial: &str) -> AppResult<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, initial)?;
    tracing::info!("Created store file {}", path.display());
    Ok(())
}

/// Replace the whole file: write a sibling temp file, flush it, then rename
/// it over the target so readers never see a half-written store.
pub(crate) fn rewrite_file(path: &Path, contents: &[u8]) -> AppResult<()> {
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}
