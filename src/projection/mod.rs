//! Projection module
//!
//! Eventually-consistent local read models of facts owned by other
//! services, kept fresh by consuming their domain events.

mod customer_cache;

pub use customer_cache::{
    CustomerInfo, CustomerLookup, CustomerProjectionCache, LookupError, RemoteCustomer,
};
