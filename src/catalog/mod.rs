//! In-memory book catalog
//!
//! `BookCatalog` owns the authoritative `Vec<Book>` and a [`CatalogView`] of
//! index links over it. Structural edits (add, remove) rebuild or extend the
//! view; field edits go straight to the vector and are visible through both.

pub mod view;

use std::fmt::Write as _;

pub use view::CatalogView;

use crate::{
    error::AppResult,
    history::OperationHistory,
    models::Book,
    repository::BooksRepository,
};

#[derive(Debug, Clone)]
pub struct BookCatalog {
    repository: BooksRepository,
    books: Vec<Book>,
    view: CatalogView,
}

impl BookCatalog {
    /// Load the catalog from its store and build the view
    pub fn load(repository: BooksRepository) -> AppResult<Self> {
        let books = repository.load()?;
        let view = CatalogView::over(books.len());
        Ok(Self {
            repository,
            books,
            view,
        })
    }

    /// Re-read the store, discarding unsaved in-memory edits
    pub fn reload(&mut self) -> AppResult<()> {
        self.books = self.repository.load()?;
        self.rebuild_view();
        Ok(())
    }

    /// Write the catalog, in view order, to the primary store
    pub fn save(&mut self, history: &mut OperationHistory) -> AppResult<()> {
        let ordered: Vec<Book> = self.view.walk(&self.books).map(|(_, book)| book.clone()).collect();
        self.repository.save(&ordered)?;
        self.books = ordered;
        self.rebuild_view();
        history.push("Save all books");
        Ok(())
    }

    pub fn rebuild_view(&mut self) {
        self.view = CatalogView::over(self.books.len());
    }

    /// Case-insensitive substring search on name or author, in catalog order.
    /// The search is recorded even when nothing matches.
    pub fn search(&self, keyword: &str, history: &mut OperationHistory) -> Vec<(usize, &Book)> {
        let keyword = keyword.to_lowercase();
        let results: Vec<(usize, &Book)> = self
            .books
            .iter()
            .enumerate()
            .filter(|(_, book)| book.matches(&keyword))
            .collect();

        tracing::debug!("Search '{}' matched {} books", keyword, results.len());
        history.push(format!("Search books with keyword: {}", keyword));
        results
    }

    /// Same matching rule as [`search`](Self::search), but walking the linked
    /// view and without recording an operation
    pub fn find_all_linked(&self, keyword: &str) -> Vec<(usize, &Book)> {
        let keyword = keyword.to_lowercase();
        self.view
            .walk(&self.books)
            .filter(|(_, book)| book.matches(&keyword))
            .collect()
    }

    /// Append a book; returns its index
    pub fn add(&mut self, book: Book) -> usize {
        let index = self.books.len();
        self.books.push(book);
        self.view.append(index);
        index
    }

    /// Remove the first book with this `(name, author)` and rebuild the view
    pub fn remove(&mut self, name: &str, author: &str) -> Option<Book> {
        let index = self.position(name, author)?;
        let removed = self.books.remove(index);
        self.rebuild_view();
        Some(removed)
    }

    /// Books with at least one copy on the shelf
    pub fn count_available(&self) -> usize {
        self.view
            .walk(&self.books)
            .filter(|(_, book)| book.available_copies > 0)
            .count()
    }

    /// Numbered listing walked through the view
    pub fn display_all(&self) -> String {
        if self.view.is_empty() {
            return "No books in library".to_string();
        }

        let mut out = String::new();
        for (position, (_, book)) in self.view.walk(&self.books).enumerate() {
            if position > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{}. {}", position + 1, book);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Book> {
        self.books.get_mut(index)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// First index with this natural key
    pub fn position(&self, name: &str, author: &str) -> Option<usize> {
        self.books.iter().position(|book| book.has_key(name, author))
    }

    /// First index whose display label equals `label`
    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.books.iter().position(|book| book.label() == label)
    }
}
