//! Transaction executor
//!
//! Applies one transaction request to an account under per-account
//! concurrency control: load, validate preconditions, mutate the
//! balance, persist account and transaction as one unit, then stage
//! events for publication after the commit.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Account, DomainError, DomainResult, Money, Transaction, TransactionType,
};
use crate::locks::AccountLocks;
use crate::publisher::{publish_committed, DomainEventPublisher};
use crate::store::{AccountStore, TransactionStore};

use super::{TransactionCommand, TransactionResult};

/// Handler executing balance-affecting transactions with
/// at-most-one-in-flight-per-account semantics.
pub struct TransactionExecutor {
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
    publisher: Arc<dyn DomainEventPublisher>,
    locks: Arc<AccountLocks>,
}

impl TransactionExecutor {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        publisher: Arc<dyn DomainEventPublisher>,
        locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            publisher,
            locks,
        }
    }

    /// Execute one transaction command.
    ///
    /// Preconditions are checked in order: the account exists, it is
    /// ACTIVE, and a debit leaves the balance non-negative. The whole
    /// read-modify-write runs inside the account's critical section, so
    /// concurrent transactions against the same account serialize and
    /// their before/after balances chain; distinct accounts proceed in
    /// parallel.
    pub async fn execute(&self, command: TransactionCommand) -> DomainResult<TransactionResult> {
        tracing::info!(
            account_id = %command.account_id,
            transaction_type = ?command.transaction_type,
            "executing transaction"
        );

        let amount: Money = command.amount.parse()?;
        if amount.is_zero() {
            return Err(DomainError::validation(
                "transaction amount must be positive",
            ));
        }

        let _guard = self.locks.acquire(command.account_id).await;

        let mut account = self
            .accounts
            .find_by_id(command.account_id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(command.account_id.to_string()))?;

        let balance_before = account.current_balance().clone();

        match command.transaction_type {
            TransactionType::Deposit => account.apply_credit(&amount)?,
            TransactionType::Withdrawal => account.apply_debit(&amount)?,
        }

        let balance_after = account.current_balance().clone();

        let transaction = Transaction::create(
            command.transaction_type,
            amount,
            balance_before,
            balance_after,
            command.reference,
            account.id(),
        )?;

        // One unit of work: if either save fails the error propagates and
        // no events are staged. The storage adapter owns the transactional
        // boundary across the pair.
        self.accounts.save(&account).await?;
        self.transactions.save(&transaction).await?;

        tracing::info!(
            transaction_id = %transaction.id(),
            account_id = %account.id(),
            new_balance = %account.current_balance(),
            "transaction committed"
        );

        let events = vec![account.transaction_performed_event(&transaction)];
        publish_committed(self.publisher.as_ref(), &events).await;

        Ok(TransactionResult {
            transaction,
            account,
            events,
        })
    }

    pub async fn get_transaction(&self, transaction_id: Uuid) -> DomainResult<Transaction> {
        self.transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| DomainError::TransactionNotFound(transaction_id.to_string()))
    }

    /// All transactions recorded against one account, in creation order.
    pub async fn get_transactions_for_account(
        &self,
        account_id: Uuid,
    ) -> DomainResult<Vec<Transaction>> {
        self.ensure_account_exists(account_id).await?;
        Ok(self.transactions.find_by_account(account_id).await?)
    }

    async fn ensure_account_exists(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(account_id.to_string()))
    }
}
