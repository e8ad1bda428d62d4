//! Command handlers module
//!
//! Handlers that orchestrate business operations. Each handler
//! coordinates aggregates, stores, the per-account lock registry and
//! event publication.

mod account_handler;
mod commands;
mod transaction_handler;

pub use account_handler::AccountHandler;
pub use commands::*;
pub use transaction_handler::TransactionExecutor;
