//! Shelfkeeper Library Catalog
//!
//! Catalog and member circulation for a single-desk library: a book catalog
//! persisted as JSON, member accounts in a flat delimited ledger, borrow and
//! return operations that keep the two in step, and a bounded history of what
//! was done.

pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Open library: configuration plus loaded services
#[derive(Debug)]
pub struct Library {
    pub config: AppConfig,
    pub services: Services,
}

impl Library {
    /// Provision missing store files, then load the catalog
    pub fn open(config: AppConfig) -> AppResult<Self> {
        let repository = Repository::new(&config.storage);
        repository.ensure_files()?;
        let services = Services::new(repository, &config.history)?;
        Ok(Self { config, services })
    }
}
