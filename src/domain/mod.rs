//! Domain module
//!
//! Core domain types and business logic.

pub mod account;
pub mod error;
pub mod events;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountStatus, AccountType};
pub use error::{DomainError, DomainResult};
pub use events::{
    AccountCreated, AccountStatusChanged, CustomerChanges, CustomerEvent, CustomerStatus,
    DomainEvent, EventEnvelope, TransactionPerformed,
};
pub use ids::{AccountNumber, CustomerId};
pub use money::{Money, MoneyError};
pub use transaction::{Transaction, TransactionType};
