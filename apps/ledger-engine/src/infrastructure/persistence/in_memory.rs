//! In-memory ledger store.
//!
//! Each account's book (balance, positions, transaction log) sits behind its
//! own async mutex. A scope holds that mutex for its whole lifetime and works
//! on a staged copy of the account and positions. Log appends are buffered
//! separately, so opening a scope never copies the history. Commit swaps the
//! copy in and extends the log; anything else (rollback, error, drop,
//! cancelled future) discards both. Different owners never contend.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::ledger::{
    Account, LedgerScope, LedgerSnapshot, LedgerStore, NewTransaction, Position, StoreError,
    Transaction,
};
use crate::domain::shared::{AccountId, Money, Ticker, TransactionId};

#[derive(Debug)]
struct AccountBook {
    account: Account,
    positions: BTreeMap<Ticker, Position>,
    transactions: Vec<Transaction>,
}

impl AccountBook {
    const fn new(account: Account) -> Self {
        Self {
            account,
            positions: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }
}

/// Writes made inside an open scope.
#[derive(Debug)]
struct StagedBook {
    account: Account,
    positions: BTreeMap<Ticker, Position>,
    pending: Vec<Transaction>,
}

impl StagedBook {
    fn from_committed(book: &AccountBook) -> Self {
        Self {
            account: book.account.clone(),
            positions: book.positions.clone(),
            pending: Vec::new(),
        }
    }

    fn publish(self, book: &mut AccountBook) {
        book.account = self.account;
        book.positions = self.positions;
        book.transactions.extend(self.pending);
    }
}

/// Hands out transaction ids and insertion timestamps.
///
/// Timestamps never go backwards even if the wall clock does.
#[derive(Debug)]
struct TransactionClock {
    state: Mutex<(u64, Option<DateTime<Utc>>)>,
}

impl TransactionClock {
    const fn new() -> Self {
        Self {
            state: Mutex::new((0, None)),
        }
    }

    fn stamp(&self) -> (TransactionId, DateTime<Utc>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();
        let at = state.1.map_or(now, |last| last.max(now));
        state.0 += 1;
        state.1 = Some(at);
        (TransactionId::new(state.0), at)
    }
}

type SharedBook = Arc<AsyncMutex<AccountBook>>;

/// In-memory implementation of [`LedgerStore`].
///
/// Suitable for development, tests and single-process deployments. State is
/// lost on restart.
#[derive(Debug)]
pub struct InMemoryLedgerStore {
    books: RwLock<HashMap<AccountId, SharedBook>>,
    clock: Arc<TransactionClock>,
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedgerStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
            clock: Arc::new(TransactionClock::new()),
        }
    }

    /// Number of accounts in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the store has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn book(&self, owner: AccountId) -> Result<SharedBook, StoreError> {
        self.books
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&owner)
            .cloned()
            .ok_or(StoreError::AccountNotFound(owner))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn open_account(&self, account: Account) -> Result<(), StoreError> {
        let mut books = self.books.write().unwrap_or_else(PoisonError::into_inner);
        let id = account.id();
        if books.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        books.insert(id, Arc::new(AsyncMutex::new(AccountBook::new(account))));
        Ok(())
    }

    async fn begin(&self, owner: AccountId) -> Result<Box<dyn LedgerScope>, StoreError> {
        let book = self.book(owner)?;
        let guard = book.lock_owned().await;
        let staged = StagedBook::from_committed(&guard);
        tracing::trace!(owner = %owner, "Ledger scope opened");
        Ok(Box::new(InMemoryScope {
            owner,
            state: Some((guard, staged)),
            clock: Arc::clone(&self.clock),
        }))
    }

    async fn find_account(&self, owner: AccountId) -> Result<Option<Account>, StoreError> {
        match self.book(owner) {
            Ok(book) => Ok(Some(book.lock().await.account.clone())),
            Err(StoreError::AccountNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn snapshot(&self, owner: AccountId) -> Result<LedgerSnapshot, StoreError> {
        let book = self.book(owner)?;
        let book = book.lock().await;
        Ok(LedgerSnapshot {
            account: book.account.clone(),
            positions: book.positions.values().cloned().collect(),
        })
    }

    async fn list_positions(&self, owner: AccountId) -> Result<Vec<Position>, StoreError> {
        let book = self.book(owner)?;
        let book = book.lock().await;
        Ok(book.positions.values().cloned().collect())
    }

    async fn list_transactions(&self, owner: AccountId) -> Result<Vec<Transaction>, StoreError> {
        let book = self.book(owner)?;
        let book = book.lock().await;
        Ok(book.transactions.clone())
    }
}

/// Scope over one account book. Holds the book's lock until closed or dropped.
struct InMemoryScope {
    owner: AccountId,
    state: Option<(OwnedMutexGuard<AccountBook>, StagedBook)>,
    clock: Arc<TransactionClock>,
}

impl InMemoryScope {
    fn staged(&self) -> Result<&StagedBook, StoreError> {
        self.state
            .as_ref()
            .map(|(_, staged)| staged)
            .ok_or(StoreError::ScopeClosed)
    }

    fn staged_mut(&mut self) -> Result<&mut StagedBook, StoreError> {
        self.state
            .as_mut()
            .map(|(_, staged)| staged)
            .ok_or(StoreError::ScopeClosed)
    }
}

#[async_trait]
impl LedgerScope for InMemoryScope {
    fn owner(&self) -> AccountId {
        self.owner
    }

    async fn balance(&self) -> Result<Money, StoreError> {
        Ok(self.staged()?.account.balance())
    }

    async fn apply_balance_delta(&mut self, delta: Money) -> Result<Money, StoreError> {
        self.staged_mut()?
            .account
            .apply_delta(delta)
            .map_err(|e| StoreError::Invariant(e.to_string()))
    }

    async fn find_position(&self, ticker: &Ticker) -> Result<Option<Position>, StoreError> {
        Ok(self.staged()?.positions.get(ticker).cloned())
    }

    async fn insert_position(&mut self, position: Position) -> Result<(), StoreError> {
        let owner = self.owner;
        let book = self.staged_mut()?;
        if position.owner() != owner {
            return Err(StoreError::Invariant(format!(
                "position owner {} written in scope of {owner}",
                position.owner()
            )));
        }
        if book.positions.contains_key(position.ticker()) {
            return Err(StoreError::PositionExists(position.ticker().clone()));
        }
        book.positions.insert(position.ticker().clone(), position);
        Ok(())
    }

    async fn update_position(&mut self, position: Position) -> Result<(), StoreError> {
        let book = self.staged_mut()?;
        let slot = book
            .positions
            .get_mut(position.ticker())
            .ok_or_else(|| StoreError::PositionMissing(position.ticker().clone()))?;
        *slot = position;
        Ok(())
    }

    async fn delete_position(&mut self, ticker: &Ticker) -> Result<(), StoreError> {
        self.staged_mut()?
            .positions
            .remove(ticker)
            .map(|_| ())
            .ok_or_else(|| StoreError::PositionMissing(ticker.clone()))
    }

    async fn append_transaction(
        &mut self,
        entry: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        if entry.owner != self.owner {
            return Err(StoreError::Invariant(format!(
                "transaction owner {} written in scope of {}",
                entry.owner, self.owner
            )));
        }
        let clock = Arc::clone(&self.clock);
        let book = self.staged_mut()?;
        let (id, at) = clock.stamp();
        let tx = Transaction::record(id, entry, at);
        book.pending.push(tx.clone());
        Ok(tx)
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        let (mut guard, staged) = self.state.take().ok_or(StoreError::ScopeClosed)?;
        staged.publish(&mut *guard);
        tracing::trace!(owner = %self.owner, "Ledger scope committed");
        Ok(())
    }

    async fn rollback(&mut self) {
        if self.state.take().is_some() {
            tracing::trace!(owner = %self.owner, "Ledger scope rolled back");
        }
    }
}
