//! Account ledger: one `username,password,borrowed_books` line per member.
//!
//! Only the first two commas separate fields; whatever follows the second is
//! the borrowed-books field verbatim, itself a comma-joined list of labels.
//! Every save rewrites the whole file from a freshly loaded mapping.

use indexmap::IndexMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::{
    error::AppResult,
    models::account::{Account, BorrowedBooks},
};

/// Accounts keyed by username, in file order
pub type Accounts = IndexMap<String, Account>;

#[derive(Clone, Debug)]
pub struct AccountLedger {
    path: PathBuf,
}

impl AccountLedger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn ensure_file(&self) -> AppResult<()> {
        super::ensure_file(&self.path, "")
    }

    /// Read every account. Read errors are logged and whatever was parsed
    /// before the failure is returned; a later line for the same username
    /// replaces an earlier one.
    pub fn load(&self) -> Accounts {
        let (accounts, error) = self.read();
        if let Some(e) = error {
            tracing::warn!(
                "Error loading users from {} after {} accounts: {}",
                self.path.display(),
                accounts.len(),
                e
            );
        }
        accounts
    }

    /// Like [`load`](Self::load), but a read error fails instead of
    /// returning a partial mapping. Used before rewriting the file.
    fn load_complete(&self) -> AppResult<Accounts> {
        match self.read() {
            (accounts, None) => Ok(accounts),
            (_, Some(e)) => Err(e.into()),
        }
    }

    /// Parse the file, stopping at the first read error
    fn read(&self) -> (Accounts, Option<io::Error>) {
        let mut accounts = Accounts::new();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return (accounts, None),
            Err(e) => return (accounts, Some(e)),
        };

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return (accounts, Some(e)),
            };

            match parse_line(&line) {
                Some(account) => {
                    accounts.insert(account.username.clone(), account);
                }
                None if !line.trim().is_empty() => {
                    tracing::warn!("Skipping malformed account line {}", line_no + 1);
                }
                None => {}
            }
        }

        (accounts, None)
    }

    /// Look up a single account
    pub fn get(&self, username: &str) -> Option<Account> {
        self.load().shift_remove(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.load().contains_key(username)
    }

    /// Insert or replace one account and rewrite the whole ledger.
    /// Fails without touching the file if the current ledger cannot be
    /// read in full.
    ///
    /// `borrowed_books` accepts a list of labels or an already comma-joined
    /// field.
    pub fn save(
        &self,
        username: &str,
        password: &str,
        borrowed_books: impl Into<BorrowedBooks>,
    ) -> AppResult<()> {
        let mut accounts = self.load_complete()?;
        accounts.insert(
            username.to_string(),
            Account {
                username: username.to_string(),
                password: password.to_string(),
                borrowed_books: borrowed_books.into(),
            },
        );
        self.write_all(&accounts)
    }

    /// Persist a full account record
    pub fn store(&self, account: &Account) -> AppResult<()> {
        self.save(&account.username, &account.password, account.borrowed_books.clone())
    }

    fn write_all(&self, accounts: &Accounts) -> AppResult<()> {
        let mut out = String::new();
        for account in accounts.values() {
            let _ = writeln!(
                out,
                "{},{},{}",
                account.username, account.password, account.borrowed_books
            );
        }

        super::rewrite_file(&self.path, out.as_bytes())?;
        tracing::debug!("Saved {} accounts to {}", accounts.len(), self.path.display());
        Ok(())
    }
}

/// Parse one ledger line. Lines with fewer than two fields are rejected.
fn parse_line(line: &str) -> Option<Account> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.splitn(3, ',').map(str::trim);
    let username = parts.next()?;
    let password = parts.next()?;
    let borrowed_books = parts.next().map(BorrowedBooks::parse).unwrap_or_default();

    Some(Account {
        username: username.to_string(),
        password: password.to_string(),
        borrowed_books,
    })
}
