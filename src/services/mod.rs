//! Business logic services

pub mod accounts;
pub mod catalog;
pub mod circulation;

use crate::{
    catalog::BookCatalog,
    config::HistoryConfig,
    error::AppResult,
    history::OperationHistory,
    repository::Repository,
};

pub use accounts::AccountsService;
pub use catalog::CatalogService;
pub use circulation::{BorrowCandidate, CirculationEngine};

/// Container for all services and the in-memory state they share
#[derive(Debug)]
pub struct Services {
    pub catalog: BookCatalog,
    pub accounts: AccountsService,
    pub history: OperationHistory,
}

impl Services {
    /// Load the catalog and wire the services to the given repository
    pub fn new(repository: Repository, history: &HistoryConfig) -> AppResult<Self> {
        Ok(Self {
            catalog: BookCatalog::load(repository.books)?,
            accounts: AccountsService::new(repository.accounts),
            history: OperationHistory::new(history.capacity),
        })
    }

    /// Borrow/return operations over the catalog and the account ledger
    pub fn circulation(&mut self) -> CirculationEngine<'_> {
        CirculationEngine::new(&mut self.catalog, self.accounts.ledger(), &mut self.history)
    }

    /// Administrator catalog edits
    pub fn catalog_admin(&mut self) -> CatalogService<'_> {
        CatalogService::new(&mut self.catalog, &mut self.history)
    }
}
