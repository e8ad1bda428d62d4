//! Command definitions
//!
//! Commands represent already-validated, already-authenticated intentions
//! to change the system state, as handed over by the presentation layer.
//! Amounts travel as strings and are parsed into `Money` at the handler
//! boundary so nothing with the wrong scale reaches an aggregate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, AccountType, DomainEvent, Transaction, TransactionType};

/// Command to open a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    pub account_number: String,
    pub account_type: AccountType,
    /// Initial balance (as string for precise decimal).
    pub initial_balance: String,
    pub customer_id: Uuid,
}

impl CreateAccountCommand {
    pub fn new(
        account_number: impl Into<String>,
        account_type: AccountType,
        initial_balance: impl Into<String>,
        customer_id: Uuid,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            account_type,
            initial_balance: initial_balance.into(),
            customer_id,
        }
    }
}

/// Command to execute one balance-affecting transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCommand {
    pub account_id: Uuid,
    pub transaction_type: TransactionType,
    /// Amount to move (as string for precise decimal).
    pub amount: String,
    /// Caller-supplied reference; carried on the record, not a dedup key.
    pub reference: Option<String>,
}

impl TransactionCommand {
    pub fn new(
        account_id: Uuid,
        transaction_type: TransactionType,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            account_id,
            transaction_type,
            amount: amount.into(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Outcome of a create-account command: the persisted aggregate plus the
/// events already handed to the publisher after commit.
#[derive(Debug, Clone)]
pub struct CreateAccountResult {
    pub account: Account,
    pub events: Vec<DomainEvent>,
}

/// Outcome of a status-change command. `events` is empty when the
/// transition was an idempotent no-op.
#[derive(Debug, Clone)]
pub struct StatusChangeResult {
    pub account: Account,
    pub events: Vec<DomainEvent>,
}

/// Outcome of a transaction command: the write-once transaction record,
/// the post-mutation account snapshot, and the committed events.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub transaction: Transaction,
    pub account: Account,
    pub events: Vec<DomainEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_command_builder() {
        let cmd = TransactionCommand::new(Uuid::new_v4(), TransactionType::Deposit, "100.00")
            .with_reference("salary-2026-08");

        assert_eq!(cmd.amount, "100.00");
        assert_eq!(cmd.reference.as_deref(), Some("salary-2026-08"));
    }

    #[test]
    fn test_create_account_command_serde() {
        let cmd = CreateAccountCommand::new(
            "1234567890",
            AccountType::Checking,
            "0.00",
            Uuid::new_v4(),
        );

        let json = serde_json::to_string(&cmd).unwrap();
        let back: CreateAccountCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back.account_number, cmd.account_number);
    }
}
