//! In-memory store adapters
//!
//! Concurrent-map implementations of the persistence contracts, used by
//! tests and single-process deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{Account, AccountNumber, Transaction};

use super::{AccountStore, StoreError, TransactionStore};

/// Thread-safe in-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<Uuid, Account>,
    by_number: DashMap<String, Uuid>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.by_number
            .insert(account.account_number().as_str().to_string(), account.id());
        self.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.clone()))
    }

    async fn find_by_number(
        &self,
        number: &AccountNumber,
    ) -> Result<Option<Account>, StoreError> {
        let id = match self.by_number.get(number.as_str()) {
            Some(entry) => *entry,
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn exists_by_number(&self, number: &AccountNumber) -> Result<bool, StoreError> {
        Ok(self.by_number.contains_key(number.as_str()))
    }
}

/// Thread-safe in-memory transaction store, preserving creation order
/// per account.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    by_id: DashMap<Uuid, Transaction>,
    by_account: DashMap<Uuid, Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn save(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.by_id.insert(transaction.id(), transaction.clone());
        self.by_account
            .entry(transaction.account_id())
            .or_default()
            .push(transaction.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(self.by_id.get(&id).map(|entry| entry.clone()))
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .by_account
            .get(&account_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }
}
