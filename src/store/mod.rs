//! Persistence contracts
//!
//! Collaborator traits for account and transaction storage. The core owns
//! no query building or mapping; adapters implement these traits over
//! whatever storage they like. Each call is assumed atomic, and "not
//! found" (`Ok(None)`) is distinguishable from a storage failure.
//!
//! The executor persists an account and its transaction as one unit; a
//! relational adapter is expected to wrap the two `save` calls in a
//! single storage transaction.

mod memory;

pub use memory::{InMemoryAccountStore, InMemoryTransactionStore};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Account, AccountNumber, Transaction};

/// Storage failures, propagated to callers unmodified.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage failure: {0}")]
    Internal(String),
}

/// Account persistence collaborator.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist the account (insert or update).
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn find_by_number(&self, number: &AccountNumber)
        -> Result<Option<Account>, StoreError>;

    async fn exists_by_number(&self, number: &AccountNumber) -> Result<bool, StoreError>;
}

/// Transaction persistence collaborator. Transactions are write-once;
/// adapters never see updates.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn save(&self, transaction: &Transaction) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;

    /// All transactions for one account, in creation order.
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>, StoreError>;
}
