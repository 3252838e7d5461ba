//! Catalog management service (administrator operations)

use validator::Validate;

use crate::{
    catalog::BookCatalog,
    error::{AppError, AppResult},
    history::OperationHistory,
    models::book::{Book, NewBook},
};

pub struct CatalogService<'a> {
    catalog: &'a mut BookCatalog,
    history: &'a mut OperationHistory,
}

impl<'a> CatalogService<'a> {
    pub fn new(catalog: &'a mut BookCatalog, history: &'a mut OperationHistory) -> Self {
        Self { catalog, history }
    }

    fn book(&self, index: usize) -> AppResult<&Book> {
        self.catalog.get(index).ok_or(AppError::InvalidIndex {
            index,
            len: self.catalog.len(),
        })
    }

    /// Search as an administrator; recorded in the history
    pub fn search(&mut self, keyword: &str) -> Vec<(usize, Book)> {
        self.catalog
            .search(keyword, &mut *self.history)
            .into_iter()
            .map(|(index, book)| (index, book.clone()))
            .collect()
    }

    /// Add a book with every copy on the shelf
    pub fn add_book(&mut self, new: NewBook) -> AppResult<usize> {
        new.validate()?;
        let book = Book::from(new);
        let name = book.name.clone();

        let index = self.catalog.add(book);
        self.catalog.save(&mut *self.history)?;
        self.history.push(format!("Add new book: '{}'", name));
        tracing::info!("Added '{}' at index {}", name, index);
        Ok(index)
    }

    /// Remove the book shown at `index`.
    ///
    /// Removal goes by `(name, author)`, so with duplicate entries the first
    /// one in the catalog is the one removed.
    pub fn remove_book(&mut self, index: usize) -> AppResult<Book> {
        let (name, author) = {
            let book = self.book(index)?;
            (book.name.clone(), book.author.clone())
        };

        let removed = self
            .catalog
            .remove(&name, &author)
            .ok_or_else(|| AppError::BookNotFound(format!("{} ({})", name, author)))?;
        if removed.on_loan() > 0 {
            tracing::warn!("Removed '{}' with {} copies still on loan", removed.label(), removed.on_loan());
        }

        self.catalog.save(&mut *self.history)?;
        self.history.push(format!("Remove book: '{}'", removed.name));
        tracing::info!("Removed '{}'", removed.label());
        Ok(removed)
    }

    /// Shift the shelf count by `delta`, staying within `0..=total_copies`
    pub fn adjust_available(&mut self, index: usize, delta: i64) -> AppResult<u32> {
        let book = self.book(index)?;
        let target = i64::from(book.available_copies) + delta;
        if target < 0 || target > i64::from(book.total_copies) {
            return Err(AppError::Validation(format!(
                "'{}' would have {} of {} copies available",
                book.name, target, book.total_copies
            )));
        }

        self.set_available(index, target as u32, |name, n| {
            format!("Edit copies of '{}' to {}", name, n)
        })
    }

    /// Take every copy off the shelf
    pub fn clear_available(&mut self, index: usize) -> AppResult<u32> {
        self.book(index)?;
        self.set_available(index, 0, |name, _| format!("Set copies of '{}' to 0", name))
    }

    fn set_available(
        &mut self,
        index: usize,
        available: u32,
        describe: impl FnOnce(&str, u32) -> String,
    ) -> AppResult<u32> {
        let len = self.catalog.len();
        let book = self
            .catalog
            .get_mut(index)
            .ok_or(AppError::InvalidIndex { index, len })?;
        book.available_copies = available;
        let description = describe(&book.name, available);

        self.catalog.save(&mut *self.history)?;
        self.history.push(description);
        Ok(available)
    }
}
