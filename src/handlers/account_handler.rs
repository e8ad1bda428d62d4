//! Account handler
//!
//! Orchestrates account lifecycle commands: creation, status
//! transitions and lookups.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Account, AccountNumber, CustomerId, DomainError, DomainResult, Money,
};
use crate::locks::AccountLocks;
use crate::projection::CustomerProjectionCache;
use crate::publisher::{publish_committed, DomainEventPublisher};
use crate::store::AccountStore;

use super::{CreateAccountCommand, CreateAccountResult, StatusChangeResult};

/// Handler for account lifecycle commands.
pub struct AccountHandler {
    accounts: Arc<dyn AccountStore>,
    customers: Arc<CustomerProjectionCache>,
    publisher: Arc<dyn DomainEventPublisher>,
    locks: Arc<AccountLocks>,
}

impl AccountHandler {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        customers: Arc<CustomerProjectionCache>,
        publisher: Arc<dyn DomainEventPublisher>,
        locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            accounts,
            customers,
            publisher,
            locks,
        }
    }

    /// Open a new account for an existing, active customer.
    pub async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> DomainResult<CreateAccountResult> {
        tracing::info!(
            account_number = %command.account_number,
            customer_id = %command.customer_id,
            "creating account"
        );

        let account_number = AccountNumber::new(command.account_number)?;
        let initial_balance: Money = command.initial_balance.parse()?;
        let customer_id = CustomerId::new(command.customer_id);

        // Advisory read: a just-deactivated customer may still pass here
        // until its status event is consumed. Account creation tolerates
        // that narrow staleness window; a transient upstream failure is
        // surfaced instead of being treated as "inactive".
        self.ensure_customer_active(customer_id).await?;

        if self.accounts.exists_by_number(&account_number).await? {
            return Err(DomainError::conflict(format!(
                "account number {account_number} already exists"
            )));
        }

        let (account, event) =
            Account::create(account_number, command.account_type, initial_balance, customer_id);

        self.accounts.save(&account).await?;
        tracing::info!(account_id = %account.id(), "account created");

        let events = vec![event];
        publish_committed(self.publisher.as_ref(), &events).await;

        Ok(CreateAccountResult { account, events })
    }

    /// Transition an account to ACTIVE. No-op (and no event) when the
    /// account already is active.
    pub async fn activate(&self, account_id: Uuid) -> DomainResult<StatusChangeResult> {
        tracing::info!(%account_id, "activating account");

        let _guard = self.guard_status_change(account_id)?;

        let mut account = self.load(account_id).await?;
        self.ensure_customer_active(account.customer_id()).await?;

        let staged = account.activate();
        self.commit_status_change(account, staged).await
    }

    /// Transition an account to INACTIVE. No-op when already inactive.
    pub async fn deactivate(&self, account_id: Uuid) -> DomainResult<StatusChangeResult> {
        tracing::info!(%account_id, "deactivating account");

        let _guard = self.guard_status_change(account_id)?;

        let mut account = self.load(account_id).await?;
        let staged = account.deactivate();
        self.commit_status_change(account, staged).await
    }

    pub async fn get_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.load(account_id).await
    }

    pub async fn get_account_by_number(&self, account_number: &str) -> DomainResult<Account> {
        let number = AccountNumber::new(account_number)?;
        self.accounts
            .find_by_number(&number)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(number.to_string()))
    }

    /// Status transitions share the per-account critical section with
    /// transaction execution; a transition racing an in-flight
    /// transaction is rejected rather than queued.
    fn guard_status_change(&self, account_id: Uuid) -> DomainResult<crate::locks::AccountGuard> {
        self.locks.try_acquire(account_id).ok_or_else(|| {
            DomainError::conflict(format!(
                "a transaction is in flight for account {account_id}"
            ))
        })
    }

    async fn commit_status_change(
        &self,
        account: Account,
        staged: Option<crate::domain::DomainEvent>,
    ) -> DomainResult<StatusChangeResult> {
        let events = match staged {
            Some(event) => {
                self.accounts.save(&account).await?;
                tracing::info!(account_id = %account.id(), status = ?account.status(), "account status changed");
                vec![event]
            }
            None => Vec::new(),
        };

        publish_committed(self.publisher.as_ref(), &events).await;
        Ok(StatusChangeResult { account, events })
    }

    async fn load(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(account_id.to_string()))
    }

    async fn ensure_customer_active(&self, customer_id: CustomerId) -> DomainResult<()> {
        match self.customers.lookup(customer_id).await? {
            None => Err(DomainError::CustomerNotFound { customer_id }),
            Some(info) if !info.is_active() => Err(DomainError::CustomerInactive { customer_id }),
            Some(_) => Ok(()),
        }
    }
}
