//! Book (catalog entry) model and related types.
//!
//! A book has no surrogate id: the `(name, author)` pair is its natural key and
//! the display label `"<name> (<author>)"` is how accounts refer to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Availability shown in catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Borrowed,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => f.write_str("Available"),
            Availability::Borrowed => f.write_str("Borrowed"),
        }
    }
}

/// Catalog entry held in memory.
///
/// The `borrowed` flag of the stored format is not kept here; it is derived
/// from `available_copies` whenever a record is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BookRecord", into = "BookRecord")]
pub struct Book {
    pub name: String,
    pub author: String,
    pub year: i32,
    pub total_copies: u32,
    pub available_copies: u32,
}

impl Book {
    pub fn new(name: impl Into<String>, author: impl Into<String>, year: i32, total_copies: u32) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            year,
            total_copies,
            available_copies: total_copies,
        }
    }

    /// Label used inside an account's borrowed list
    pub fn label(&self) -> String {
        display_label(&self.name, &self.author)
    }

    /// True once every copy is out
    pub fn is_borrowed(&self) -> bool {
        self.available_copies == 0
    }

    pub fn status(&self) -> Availability {
        if self.available_copies > 0 {
            Availability::Available
        } else {
            Availability::Borrowed
        }
    }

    /// Copies currently out on loan
    pub fn on_loan(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }

    /// Case-insensitive substring match on name or author.
    /// `keyword` must already be lower-cased.
    pub fn matches(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword) || self.author.to_lowercase().contains(keyword)
    }

    pub fn has_key(&self, name: &str, author: &str) -> bool {
        self.name == name && self.author == author
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({}) - {}", self.name, self.author, self.year, self.status())
    }
}

/// Build the `"<name> (<author>)"` label
pub fn display_label(name: &str, author: &str) -> String {
    format!("{} ({})", name, author)
}

/// On-disk shape of a book in the primary store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub name: String,
    pub author: String,
    pub year: i32,
    pub total_copies: u32,
    pub available_copies: u32,
    #[serde(default)]
    pub borrowed: bool,
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        let available_copies = if record.available_copies > record.total_copies {
            tracing::warn!(
                "Book '{}' stores {} available of {} copies, clamping",
                record.name,
                record.available_copies,
                record.total_copies
            );
            record.total_copies
        } else {
            record.available_copies
        };

        Self {
            name: record.name,
            author: record.author,
            year: record.year,
            total_copies: record.total_copies,
            available_copies,
        }
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        let borrowed = book.is_borrowed();
        Self {
            name: book.name,
            author: book.author,
            year: book.year,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            borrowed,
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "Book name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: String,
    pub year: i32,
    #[validate(range(min = 1, message = "A book needs at least one copy"))]
    pub total_copies: u32,
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Book::new(new.name.trim(), new.author.trim(), new.year, new.total_copies)
    }
}
