//! Book store: the primary JSON file plus the legacy line-oriented import

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{error::AppResult, models::book::Book};

#[derive(Clone, Debug)]
pub struct BooksRepository {
    path: PathBuf,
    bootstrap_path: PathBuf,
}

impl BooksRepository {
    pub fn new(path: impl AsRef<Path>, bootstrap_path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            bootstrap_path: bootstrap_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn ensure_files(&self) -> AppResult<()> {
        super::ensure_file(&self.path, "[]")?;
        super::ensure_file(&self.bootstrap_path, "")
    }

    /// Load every book. Falls back to the legacy list when the primary store
    /// holds nothing. A primary store that fails to decode is an error.
    pub fn load(&self) -> AppResult<Vec<Book>> {
        let books = self.load_primary()?;
        if !books.is_empty() {
            tracing::debug!("Loaded {} books from {}", books.len(), self.path.display());
            return Ok(books);
        }

        let imported = self.load_bootstrap()?;
        if !imported.is_empty() {
            tracing::info!(
                "Imported {} books from legacy list {}",
                imported.len(),
                self.bootstrap_path.display()
            );
        }
        Ok(imported)
    }

    fn load_primary(&self) -> AppResult<Vec<Book>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn load_bootstrap(&self) -> AppResult<Vec<Book>> {
        let raw = match fs::read_to_string(&self.bootstrap_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(raw
            .lines()
            .enumerate()
            .filter_map(|(line_no, line)| {
                let book = parse_legacy_line(line);
                if book.is_none() && !line.trim().is_empty() {
                    tracing::warn!("Skipping malformed legacy book line {}: {:?}", line_no + 1, line);
                }
                book
            })
            .collect())
    }

    /// Rewrite the whole store, indented for human inspection
    pub fn save(&self, books: &[Book]) -> AppResult<()> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        books.serialize(&mut serializer)?;

        super::rewrite_file(&self.path, &out)?;
        tracing::debug!("Saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }
}

/// Parse `name, author, year, total_copies`. Anything else yields `None`.
pub fn parse_legacy_line(line: &str) -> Option<Book> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() != 4 {
        return None;
    }

    let year = parts[2].trim().parse().ok()?;
    let total_copies = parts[3].trim().parse().ok()?;
    Some(Book::new(parts[0].trim(), parts[1].trim(), year, total_copies))
}
