//! Ledger Store Traits
//!
//! Persistence abstraction for accounts, positions and the transaction log.
//! Every mutation runs inside a [`LedgerScope`] obtained from
//! [`LedgerStore::begin`]; nothing a scope does is visible to other readers
//! until [`LedgerScope::commit`] succeeds. A scope dropped without commit
//! (error, early return, panic, cancelled future) is rolled back.

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::{Account, NewTransaction, Position, Transaction};
use crate::domain::shared::{AccountId, Money, Ticker};

/// Errors raised by a ledger store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No account row for the owner.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// An account with this id already exists.
    #[error("account {0} already exists")]
    AlreadyExists(AccountId),

    /// Insert of a position that is already stored.
    #[error("position {0} already exists")]
    PositionExists(Ticker),

    /// Update or delete of a position that is not stored.
    #[error("position {0} not found")]
    PositionMissing(Ticker),

    /// The scope was already committed or rolled back.
    #[error("scope already closed")]
    ScopeClosed,

    /// A write would break a stored invariant.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// Backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// An account and its positions read under one acquisition of the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// The account row, including the cash balance.
    pub account: Account,
    /// Committed positions, ordered by ticker.
    pub positions: Vec<Position>,
}

/// Transactional record store for the ledger.
///
/// Implementations must serialize scopes for the same owner. The balance is
/// shared by every position an owner holds, so isolation is per owner, not
/// per (owner, ticker).
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Persist a newly opened account.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the id is taken.
    async fn open_account(&self, account: Account) -> Result<(), StoreError>;

    /// Begin an exclusive mutation scope over one owner's ledger.
    ///
    /// Waits until any other scope for the same owner has finished.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the owner has no account.
    async fn begin(&self, owner: AccountId) -> Result<Box<dyn LedgerScope>, StoreError>;

    /// Read an account outside any scope.
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails.
    async fn find_account(&self, owner: AccountId) -> Result<Option<Account>, StoreError>;

    /// Account and positions as of one committed state.
    ///
    /// No scope commit for the owner can land between reading the balance
    /// and reading the positions.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the owner has no account.
    async fn snapshot(&self, owner: AccountId) -> Result<LedgerSnapshot, StoreError>;

    /// All committed positions of an owner, ordered by ticker.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the owner has no account.
    async fn list_positions(&self, owner: AccountId) -> Result<Vec<Position>, StoreError>;

    /// All committed transactions of an owner in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the owner has no account.
    async fn list_transactions(&self, owner: AccountId) -> Result<Vec<Transaction>, StoreError>;
}

/// An open, isolated mutation scope over one owner's ledger.
#[async_trait]
pub trait LedgerScope: Send + Sync {
    /// Owner the scope is bound to.
    fn owner(&self) -> AccountId;

    /// Cash balance as seen inside the scope.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` after commit or rollback.
    async fn balance(&self) -> Result<Money, StoreError>;

    /// Apply a signed change to the balance, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns `Invariant` if the balance would go negative.
    async fn apply_balance_delta(&mut self, delta: Money) -> Result<Money, StoreError>;

    /// Position for a ticker, if held.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` after commit or rollback.
    async fn find_position(&self, ticker: &Ticker) -> Result<Option<Position>, StoreError>;

    /// Insert a position that is not yet held.
    ///
    /// # Errors
    ///
    /// Returns `PositionExists` if the ticker is already held.
    async fn insert_position(&mut self, position: Position) -> Result<(), StoreError>;

    /// Replace a held position.
    ///
    /// # Errors
    ///
    /// Returns `PositionMissing` if the ticker is not held.
    async fn update_position(&mut self, position: Position) -> Result<(), StoreError>;

    /// Delete a held position.
    ///
    /// # Errors
    ///
    /// Returns `PositionMissing` if the ticker is not held.
    async fn delete_position(&mut self, ticker: &Ticker) -> Result<(), StoreError>;

    /// Append a transaction log entry.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` after commit or rollback.
    async fn append_transaction(&mut self, entry: NewTransaction)
    -> Result<Transaction, StoreError>;

    /// Publish every staged change atomically and release the owner.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` if already closed.
    async fn commit(&mut self) -> Result<(), StoreError>;

    /// Discard every staged change and release the owner. Idempotent.
    async fn rollback(&mut self);
}
