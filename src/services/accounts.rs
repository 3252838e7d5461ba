//! Member account service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::account::{Account, BorrowedBooks, CreateAccount},
    repository::AccountLedger,
};

#[derive(Clone, Debug)]
pub struct AccountsService {
    ledger: AccountLedger,
}

impl AccountsService {
    pub fn new(ledger: AccountLedger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    /// Register a new member with an empty borrowed list
    pub fn create_account(&self, account: CreateAccount) -> AppResult<Account> {
        let account = CreateAccount {
            username: account.username.trim().to_string(),
            password: account.password,
        };
        account.validate()?;
        let username = account.username.as_str();

        if self.ledger.contains(username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        self.ledger
            .save(username, &account.password, BorrowedBooks::new())?;
        tracing::info!("Created account '{}'", username);
        Ok(Account::new(username, account.password))
    }

    /// Check a cleartext password against the ledger
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<Account> {
        let account = self
            .ledger
            .get(username)
            .ok_or_else(|| AppError::Authentication("Username not found".to_string()))?;

        if account.password != password {
            tracing::debug!("Rejected password for '{}'", username);
            return Err(AppError::Authentication("Incorrect password".to_string()));
        }
        Ok(account)
    }

    /// Fetch one account
    pub fn account(&self, username: &str) -> AppResult<Account> {
        self.ledger
            .get(username)
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))
    }

    /// Every `(username, label)` loan across the ledger, in file order
    pub fn borrowed_report(&self) -> Vec<(String, String)> {
        self.ledger
            .load()
            .into_values()
            .flat_map(|account| {
                let username = account.username;
                account
                    .borrowed_books
                    .as_slice()
                    .iter()
                    .map(|label| (username.clone(), label.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
