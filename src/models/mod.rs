//! Data models for Shelfkeeper

pub mod account;
pub mod book;
pub mod operation;

// Re-export commonly used types
pub use account::{Account, BorrowedBooks, CreateAccount};
pub use book::{display_label, Availability, Book, BookRecord, NewBook};
pub use operation::OperationRecord;
