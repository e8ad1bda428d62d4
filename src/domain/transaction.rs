//! Transaction record
//!
//! An immutable fact recording a single balance-affecting operation
//! against one account, with the balances captured at execution time.
//! Created only by a successful transaction executor run; never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{DomainError, DomainResult};
use super::money::Money;

/// Supported transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn is_deposit(&self) -> bool {
        matches!(self, TransactionType::Deposit)
    }

    pub fn is_withdrawal(&self) -> bool {
        matches!(self, TransactionType::Withdrawal)
    }
}

/// Write-once transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    transaction_type: TransactionType,
    amount: Money,
    balance_before: Money,
    balance_after: Money,
    reference: Option<String>,
    account_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction record, validating the invariant
    /// `balance_after = balance_before ± amount` and `amount > 0`.
    ///
    /// The `reference` is caller-supplied and is not a dedup key:
    /// duplicate submissions with the same reference produce two distinct
    /// transactions unless an external idempotency layer is added.
    pub fn create(
        transaction_type: TransactionType,
        amount: Money,
        balance_before: Money,
        balance_after: Money,
        reference: Option<String>,
        account_id: Uuid,
    ) -> DomainResult<Self> {
        if amount.is_zero() {
            return Err(DomainError::validation(
                "transaction amount must be positive",
            ));
        }

        let expected = if transaction_type.is_deposit() {
            balance_before.checked_add(&amount)?
        } else {
            balance_before.checked_sub(&amount)?
        };
        if expected != balance_after {
            return Err(DomainError::validation(format!(
                "inconsistent balances: {balance_before} {transaction_type:?} {amount} != {balance_after}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            transaction_type,
            amount,
            balance_before,
            balance_after,
            reference,
            account_id,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn balance_before(&self) -> &Money {
        &self.balance_before
    }

    pub fn balance_after(&self) -> &Money {
        &self.balance_after
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
