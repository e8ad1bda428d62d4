//! banking-ledger
//!
//! Account ledger core for a two-service banking system: the
//! Account/Transaction aggregate enforcing monetary invariants and
//! producing domain events, plus an eventually-consistent projection
//! cache of customer state owned by the customer service.
//!
//! Presentation, relational persistence and broker wiring live outside
//! this crate and plug in through the `store`, `projection` and
//! `publisher` collaborator contracts.

pub mod domain;
pub mod handlers;
pub mod locks;
pub mod projection;
pub mod publisher;
pub mod store;

pub use domain::{
    Account, AccountNumber, AccountStatus, AccountType, CustomerEvent, CustomerId, CustomerStatus,
    DomainError, DomainEvent, DomainResult, EventEnvelope, Money, MoneyError, Transaction,
    TransactionType,
};
pub use handlers::{
    AccountHandler, CreateAccountCommand, CreateAccountResult, StatusChangeResult,
    TransactionCommand, TransactionExecutor, TransactionResult,
};
pub use locks::AccountLocks;
pub use projection::{CustomerInfo, CustomerLookup, CustomerProjectionCache, RemoteCustomer};
pub use publisher::{DomainEventPublisher, PublishError, TracingEventPublisher};
pub use store::{
    AccountStore, InMemoryAccountStore, InMemoryTransactionStore, StoreError, TransactionStore,
};
