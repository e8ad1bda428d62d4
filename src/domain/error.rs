//! Domain error types
//!
//! Structured errors for every way a ledger command can be rejected.
//! Each kind carries the context the presentation layer needs to build
//! its own external representation; no raw-string errors cross the
//! crate boundary.

use rust_decimal::Decimal;
use thiserror::Error;

use super::ids::CustomerId;
use super::money::MoneyError;
use crate::store::StoreError;

/// Result alias used throughout the crate.
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or out-of-range input; recoverable by correcting the input.
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// Unknown account id or number; terminal for the request.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Unknown transaction id; terminal for the request.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// The referenced customer does not exist (confirmed by the customer
    /// service, possibly via a cached negative result).
    #[error("Customer not found: {customer_id}")]
    CustomerNotFound { customer_id: CustomerId },

    /// Business rule: transactions require an ACTIVE account.
    #[error("Account {account_number} is not active")]
    AccountInactive { account_number: String },

    /// Business rule: the owning customer must be active.
    #[error("Customer {customer_id} is not active")]
    CustomerInactive { customer_id: CustomerId },

    /// Business rule: a debit may not take the balance below zero.
    #[error("Insufficient funds on account {account_number}: available {available}, requested {requested}")]
    InsufficientFunds {
        account_number: String,
        available: Decimal,
        requested: Decimal,
    },

    /// Concurrent operations collided (e.g. a status change raced an
    /// in-flight transaction); the whole command may be retried.
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// The customer service could not be reached; never treated as
    /// "customer inactive" — the caller decides retry-or-degrade.
    #[error("Customer service unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    /// Persistence failure, propagated unmodified.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn upstream_unavailable(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
        }
    }

    /// Check if this is a client error (caller's input or a business-rule
    /// rejection; retrying the same request will not help).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::AccountNotFound(_)
                | Self::TransactionNotFound(_)
                | Self::CustomerNotFound { .. }
                | Self::AccountInactive { .. }
                | Self::CustomerInactive { .. }
                | Self::InsufficientFunds { .. }
        )
    }

    /// Check if retrying the whole command may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::UpstreamUnavailable { .. } | Self::Store(_)
        )
    }
}

impl From<MoneyError> for DomainError {
    fn from(err: MoneyError) -> Self {
        DomainError::Validation {
            reason: err.to_string(),
        }
    }
}
