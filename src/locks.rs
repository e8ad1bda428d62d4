//! Per-account lock registry
//!
//! Serializes balance and status mutations per account id while keeping
//! operations on distinct accounts fully independent. Transactions wait
//! for the lock; status transitions only try it, so a transition racing
//! an in-flight transaction surfaces a conflict instead of queueing.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Guard over one account's critical section. Dropping it releases the
/// account for the next operation.
pub type AccountGuard = OwnedMutexGuard<()>;

/// Registry of per-account mutexes, created lazily on first use.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, account_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Wait for exclusive access to the account's critical section.
    pub async fn acquire(&self, account_id: Uuid) -> AccountGuard {
        self.lock_for(account_id).lock_owned().await
    }

    /// Take the lock only if no operation is in flight for this account.
    pub fn try_acquire(&self, account_id: Uuid) -> Option<AccountGuard> {
        self.lock_for(account_id).try_lock_owned().ok()
    }
}
