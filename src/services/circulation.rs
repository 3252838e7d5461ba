//! Circulation: borrowing and returning books.
//!
//! Each operation checks its preconditions against the current catalog and a
//! fresh read of the ledger, mutates the book in memory, then writes the
//! ledger and the catalog in that order. There is no rollback: if the catalog
//! write fails after the ledger write succeeded, the two stores disagree until
//! an administrator corrects them.


use crate::{
    catalog::BookCatalog,
    error::{AppError, AppResult},
    history::OperationHistory,
    models::{Account, Book},
    repository::AccountLedger,
};

/// One search hit offered for borrowing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowCandidate {
    /// Catalog index to pass to [`CirculationEngine::borrow`]
    pub index: usize,
    pub label: String,
    pub name: String,
    pub author: String,
    pub year: i32,
    pub available_copies: u32,
    /// The user already holds a copy
    pub already_borrowed: bool,
}

pub struct CirculationEngine<'a> {
    catalog: &'a mut BookCatalog,
    ledger: &'a AccountLedger,
    history: &'a mut OperationHistory,
}

impl<'a> CirculationEngine<'a> {
    pub fn new(
        catalog: &'a mut BookCatalog,
        ledger: &'a AccountLedger,
        history: &'a mut OperationHistory,
    ) -> Self {
        Self {
            catalog,
            ledger,
            history,
        }
    }

    fn account(&self, username: &str) -> AppResult<Account> {
        self.ledger
            .get(username)
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))
    }

    /// Search-then-borrow lookup. The linked view is tried first; the plain
    /// search, which is recorded in the history, only runs when it finds
    /// nothing.
    pub fn lookup(&mut self, keyword: &str, username: &str) -> AppResult<Vec<BorrowCandidate>> {
        let account = self.account(username)?;

        let mut hits = self.catalog.find_all_linked(keyword);
        if hits.is_empty() {
            hits = self.catalog.search(keyword, &mut *self.history);
        }

        Ok(hits
            .into_iter()
            .map(|(index, book)| {
                let label = book.label();
                BorrowCandidate {
                    index,
                    already_borrowed: account.borrowed_books.contains(&label),
                    label,
                    name: book.name.clone(),
                    author: book.author.clone(),
                    year: book.year,
                    available_copies: book.available_copies,
                }
            })
            .collect())
    }

    /// Run every borrow precondition without changing anything. Lets the
    /// caller refuse a duplicate before asking for confirmation.
    pub fn check_borrow(&self, index: usize, username: &str) -> AppResult<Account> {
        let book = self.catalog.get(index).ok_or(AppError::InvalidIndex {
            index,
            len: self.catalog.len(),
        })?;
        let account = self.account(username)?;

        let label = book.label();
        if account.borrowed_books.contains(&label) {
            return Err(AppError::AlreadyBorrowed(label));
        }
        if book.available_copies == 0 {
            return Err(AppError::NoCopiesAvailable(book.name.clone()));
        }

        Ok(account)
    }

    /// Lend one copy of the book at `index` to `username`
    pub fn borrow(&mut self, index: usize, username: &str) -> AppResult<Book> {
        let mut account = self.check_borrow(index, username)?;

        let len = self.catalog.len();
        let book = self
            .catalog
            .get_mut(index)
            .ok_or(AppError::InvalidIndex { index, len })?;
        book.available_copies -= 1;
        let book = book.clone();
        self.catalog.rebuild_view();

        account.borrowed_books.push(book.label());
        self.ledger.store(&account)?;
        self.catalog.save(&mut *self.history)?;

        self.history
            .push(format!("Borrow book: {} by {}", book.name, username));
        tracing::info!(
            "{} borrowed '{}' ({} of {} left)",
            username,
            book.label(),
            book.available_copies,
            book.total_copies
        );
        Ok(book)
    }

    /// Take back the book `label` from `username`.
    ///
    /// The label always leaves the account, but `available_copies` is only
    /// incremented while it is below `total_copies`: returning a book whose
    /// copies are all on the shelf succeeds and leaves the count unchanged.
    pub fn return_book(&mut self, username: &str, label: &str) -> AppResult<Book> {
        let mut account = self.account(username)?;
        if account.borrowed_books.is_empty() {
            return Err(AppError::NoBorrowedBooks(username.to_string()));
        }
        if !account.borrowed_books.contains(label) {
            return Err(AppError::NotBorrowed(label.to_string()));
        }

        let index = self
            .catalog
            .position_of_label(label)
            .ok_or_else(|| AppError::BookNotFound(label.to_string()))?;
        let len = self.catalog.len();
        let book = self
            .catalog
            .get_mut(index)
            .ok_or(AppError::InvalidIndex { index, len })?;
        if book.available_copies < book.total_copies {
            book.available_copies += 1;
        } else {
            tracing::warn!(
                "Return of '{}' by {} while all {} copies are on the shelf",
                label,
                username,
                book.total_copies
            );
        }
        let book = book.clone();

        account.borrowed_books.remove(label);
        self.ledger.store(&account)?;
        self.catalog.save(&mut *self.history)?;

        self.history
            .push(format!("Return book: {} by {}", label, username));
        tracing::info!("{} returned '{}'", username, label);
        Ok(book)
    }

    /// Labels the account currently holds
    pub fn borrowed_books(&self, username: &str) -> AppResult<Vec<String>> {
        Ok(self.account(username)?.borrowed_books.as_slice().to_vec())
    }
}
