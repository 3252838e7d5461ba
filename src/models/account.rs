//! Member account model and related types

use serde::Deserialize;
use std::fmt;
use validator::Validate;

/// Display labels of the books an account holds, in borrow order.
///
/// Stored on disk as a single comma-joined field, so a label that itself
/// contains a comma does not survive a save/load cycle intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowedBooks(Vec<String>);

impl BorrowedBooks {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the stored field: split on commas, trim, drop empty pieces
    pub fn parse(field: &str) -> Self {
        field
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|held| held == label)
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.0.push(label.into());
    }

    /// Remove the first occurrence; false when absent
    pub fn remove(&mut self, label: &str) -> bool {
        match self.0.iter().position(|held| held == label) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for BorrowedBooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl FromIterator<String> for BorrowedBooks {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<String>> for BorrowedBooks {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().map(|label| label.trim().to_string()).collect()
    }
}

impl From<&[String]> for BorrowedBooks {
    fn from(labels: &[String]) -> Self {
        labels.to_vec().into()
    }
}

/// A preformatted, comma-joined field
impl From<&str> for BorrowedBooks {
    fn from(field: &str) -> Self {
        Self::parse(field)
    }
}

/// Member account as stored in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub borrowed_books: BorrowedBooks,
}

impl Account {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            borrowed_books: BorrowedBooks::new(),
        }
    }
}

/// Sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(
        length(min = 1, message = "Username cannot be empty"),
        does_not_contain(pattern = ",", message = "Username cannot contain a comma")
    )]
    pub username: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        does_not_contain(pattern = ",", message = "Password cannot contain a comma")
    )]
    pub password: String,
}
