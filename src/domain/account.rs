//! Account aggregate
//!
//! The consistency boundary for money movement: identity, owner, type,
//! status and balance, with every invariant enforced at the mutation
//! site. Mutations stage domain events; callers hand them to the
//! publisher only after the storage commit succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DomainError, DomainResult};
use super::events::{AccountCreated, AccountStatusChanged, DomainEvent, TransactionPerformed};
use super::ids::{AccountNumber, CustomerId};
use super::money::Money;
use super::transaction::Transaction;

/// Account status state machine: ACTIVE ⇄ INACTIVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }

    /// Transactions may only run against an ACTIVE account.
    pub fn allows_transactions(&self) -> bool {
        self.is_active()
    }
}

/// Supported account kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Checking,
    Savings,
}

/// Account aggregate root.
///
/// Holds only the owning customer's id, never live customer state; customer
/// facts are resolved through the projection cache. Invariant: the current
/// balance is never negative after a committed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: Uuid,
    account_number: AccountNumber,
    account_type: AccountType,
    customer_id: CustomerId,
    initial_balance: Money,
    current_balance: Money,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Open a new account in ACTIVE status with current balance equal to
    /// the initial balance, and stage the creation event.
    ///
    /// Inputs arrive as validated value types, so malformed account numbers
    /// and negative balances are rejected before this point.
    pub fn create(
        account_number: AccountNumber,
        account_type: AccountType,
        initial_balance: Money,
        customer_id: CustomerId,
    ) -> (Self, DomainEvent) {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let account = Self {
            id,
            account_number: account_number.clone(),
            account_type,
            customer_id,
            initial_balance: initial_balance.clone(),
            current_balance: initial_balance.clone(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let event = DomainEvent::AccountCreated(AccountCreated {
            account_id: id,
            account_number: account_number.as_str().to_string(),
            customer_id,
            account_type,
            initial_balance,
            status: AccountStatus::Active,
            occurred_at: now,
        });

        (account, event)
    }

    /// Transition to ACTIVE. Returns the status-changed event, or `None`
    /// when the account already is ACTIVE (idempotent no-op, no event).
    pub fn activate(&mut self) -> Option<DomainEvent> {
        self.transition_to(AccountStatus::Active)
    }

    /// Transition to INACTIVE. Returns the status-changed event, or `None`
    /// when the account already is INACTIVE.
    pub fn deactivate(&mut self) -> Option<DomainEvent> {
        self.transition_to(AccountStatus::Inactive)
    }

    fn transition_to(&mut self, new_status: AccountStatus) -> Option<DomainEvent> {
        if self.status == new_status {
            return None;
        }

        self.status = new_status;
        self.updated_at = Utc::now();

        Some(DomainEvent::AccountStatusChanged(AccountStatusChanged {
            account_id: self.id,
            account_number: self.account_number.as_str().to_string(),
            customer_id: self.customer_id,
            new_status,
            occurred_at: self.updated_at,
        }))
    }

    /// Increase the balance. Internal to the transaction executor, which
    /// holds the per-account lock while calling this.
    pub(crate) fn apply_credit(&mut self, amount: &Money) -> DomainResult<()> {
        self.ensure_active()?;
        ensure_positive(amount)?;

        self.current_balance = self.current_balance.checked_add(amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrease the balance, rejecting any debit that would take it below
    /// zero. Internal to the transaction executor.
    pub(crate) fn apply_debit(&mut self, amount: &Money) -> DomainResult<()> {
        self.ensure_active()?;
        ensure_positive(amount)?;

        if self.current_balance < *amount {
            return Err(DomainError::InsufficientFunds {
                account_number: self.account_number.as_str().to_string(),
                available: self.current_balance.value(),
                requested: amount.value(),
            });
        }

        self.current_balance = self.current_balance.checked_sub(amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Build the event describing a committed transaction, referencing the
    /// post-mutation account snapshot.
    pub(crate) fn transaction_performed_event(&self, transaction: &Transaction) -> DomainEvent {
        DomainEvent::TransactionPerformed(TransactionPerformed {
            transaction_id: transaction.id(),
            account_id: self.id,
            account_number: self.account_number.as_str().to_string(),
            customer_id: self.customer_id,
            transaction_type: transaction.transaction_type(),
            amount: transaction.amount().clone(),
            balance_before: transaction.balance_before().clone(),
            balance_after: transaction.balance_after().clone(),
            reference: transaction.reference().map(str::to_string),
            occurred_at: Utc::now(),
        })
    }

    pub fn ensure_active(&self) -> DomainResult<()> {
        if !self.status.allows_transactions() {
            return Err(DomainError::AccountInactive {
                account_number: self.account_number.as_str().to_string(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn initial_balance(&self) -> &Money {
        &self.initial_balance
    }

    pub fn current_balance(&self) -> &Money {
        &self.current_balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn ensure_positive(amount: &Money) -> DomainResult<()> {
    if amount.is_zero() {
        return Err(DomainError::validation(
            "transaction amount must be positive",
        ));
    }
    Ok(())
}
