//! Error types for Shelfkeeper

use thiserror::Error;

/// Numeric error codes reported to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NotAuthorized = 2,
    StoreFailure = 3,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    NotBorrowed = 13,
    BadValue = 18,
    UserIdentificationAlreadyExists = 19,
    NoSuchData = 20,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid book index {index} (catalog holds {len} books)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Book already borrowed: {0}")]
    AlreadyBorrowed(String),

    #[error("No copies available: {0}")]
    NoCopiesAvailable(String),

    #[error("User {0} has no borrowed books")]
    NoBorrowedBooks(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Book not borrowed by this user: {0}")]
    NotBorrowed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Book store decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    /// Code reported alongside the message
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidIndex { .. } => ErrorCode::BadValue,
            AppError::UnknownUser(_) => ErrorCode::NoSuchUser,
            AppError::AlreadyBorrowed(_) => ErrorCode::Duplicate,
            AppError::NoCopiesAvailable(_) => ErrorCode::ItemNotAvailable,
            AppError::NoBorrowedBooks(_) => ErrorCode::NoSuchData,
            AppError::BookNotFound(_) => ErrorCode::NoSuchItem,
            AppError::NotBorrowed(_) => ErrorCode::NotBorrowed,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Conflict(_) => ErrorCode::UserIdentificationAlreadyExists,
            AppError::Authentication(_) => ErrorCode::NotAuthorized,
            AppError::Io(e) => {
                tracing::error!("Storage error: {:?}", e);
                ErrorCode::StoreFailure
            }
            AppError::Decode(e) => {
                tracing::error!("Book store decode error: {:?}", e);
                ErrorCode::StoreFailure
            }
        }
    }

    /// Refusals leave state untouched; persistence failures may not
    pub fn is_refusal(&self) -> bool {
        !matches!(self, AppError::Io(_) | AppError::Decode(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
