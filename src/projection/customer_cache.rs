//! Customer projection cache
//!
//! Read-through cache of minimal customer facts (existence, active flag,
//! display name) owned by the customer service. Populated lazily from the
//! remote lookup, invalidated by consumed customer-domain events.
//!
//! Consistency model: pull-then-invalidate, not a push-synchronized
//! replica. Between a remote change and the consumption of its event,
//! reads may return the prior value; callers treat a hit as advisory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;

use crate::domain::{
    CustomerChanges, CustomerEvent, CustomerId, CustomerStatus, DomainError, DomainResult,
};

/// Cached customer facts. A cache entry, not a source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerInfo {
    pub customer_id: CustomerId,
    pub full_name: String,
    pub active: bool,
    pub refreshed_at: DateTime<Utc>,
}

impl CustomerInfo {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Customer facts as returned by the remote lookup collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCustomer {
    pub customer_id: CustomerId,
    pub full_name: String,
    pub active: bool,
}

/// Transient failure reaching the customer service. Distinct from "not
/// found", which is a successful `None` answer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("customer lookup unavailable: {0}")]
    Unavailable(String),
}

/// Remote customer lookup capability, satisfied by any adapter
/// (HTTP client, test double).
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    /// `Ok(None)` means the customer service confirmed the id is unknown.
    async fn fetch_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<RemoteCustomer>, LookupError>;
}

/// One cache slot. Entries are inserted whole, so a reader never
/// observes a partially populated value.
#[derive(Debug, Clone)]
enum CacheEntry {
    Present(CustomerInfo),
    /// Cached negative result: the remote confirmed the id does not
    /// exist, so repeated lookups stay local.
    Absent { refreshed_at: DateTime<Utc> },
}

/// Shared, concurrently read and written projection cache. Lookups and
/// invalidations for different customer ids never block each other.
pub struct CustomerProjectionCache {
    entries: DashMap<CustomerId, CacheEntry>,
    lookup: Arc<dyn CustomerLookup>,
}

impl CustomerProjectionCache {
    pub fn new(lookup: Arc<dyn CustomerLookup>) -> Self {
        Self {
            entries: DashMap::new(),
            lookup,
        }
    }

    /// Answer "does this customer exist / is it active / what is its name".
    ///
    /// Returns the cached entry when present (including a cached negative
    /// as `Ok(None)`); on a miss, fetches from the remote lookup once and
    /// caches the answer. A transient remote failure is **not** cached:
    /// it surfaces as `UpstreamUnavailable` and the caller decides whether
    /// to proceed degraded or reject.
    pub async fn lookup(&self, customer_id: CustomerId) -> DomainResult<Option<CustomerInfo>> {
        if let Some(entry) = self.entries.get(&customer_id) {
            return Ok(match entry.value() {
                CacheEntry::Present(info) => Some(info.clone()),
                CacheEntry::Absent { .. } => None,
            });
        }

        let fetched = self
            .lookup
            .fetch_customer(customer_id)
            .await
            .map_err(|LookupError::Unavailable(reason)| DomainError::UpstreamUnavailable {
                reason,
            })?;

        let refreshed_at = Utc::now();
        match fetched {
            Some(remote) => {
                let info = CustomerInfo {
                    customer_id,
                    full_name: remote.full_name,
                    active: remote.active,
                    refreshed_at,
                };
                tracing::debug!(%customer_id, active = info.active, "customer projection refreshed");
                self.entries
                    .insert(customer_id, CacheEntry::Present(info.clone()));
                Ok(Some(info))
            }
            None => {
                tracing::debug!(%customer_id, "customer unknown upstream, caching negative result");
                self.entries
                    .insert(customer_id, CacheEntry::Absent { refreshed_at });
                Ok(None)
            }
        }
    }

    /// Drop one entry, forcing the next lookup to refetch.
    pub fn invalidate(&self, customer_id: CustomerId) {
        self.entries.remove(&customer_id);
    }

    /// Drop all entries. Administrative/test operation.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume a `CustomerUpdated` notification. The payload is partial,
    /// so no state is reconstructed from it; the entry is invalidated and
    /// the next lookup refetches.
    pub fn on_customer_updated(&self, customer_id: CustomerId, changes: &CustomerChanges) {
        tracing::info!(%customer_id, ?changes, "customer updated, invalidating projection");
        self.invalidate(customer_id);
    }

    /// Consume a `CustomerStatusChanged` notification.
    pub fn on_customer_status_changed(&self, customer_id: CustomerId, new_status: CustomerStatus) {
        tracing::info!(%customer_id, ?new_status, "customer status changed, invalidating projection");
        self.invalidate(customer_id);
    }

    /// Dispatch a consumed customer-domain event.
    pub fn handle_event(&self, event: &CustomerEvent) {
        match event {
            CustomerEvent::CustomerUpdated {
                customer_id,
                changes,
            } => self.on_customer_updated(*customer_id, changes),
            CustomerEvent::CustomerStatusChanged {
                customer_id,
                new_status,
            } => self.on_customer_status_changed(*customer_id, *new_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Test double tracking fetch counts; can simulate an outage.
    #[derive(Default)]
    struct StubLookup {
        customers: DashMap<CustomerId, RemoteCustomer>,
        fetches: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl StubLookup {
        fn insert(&self, customer: RemoteCustomer) {
            self.customers.insert(customer.customer_id, customer);
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CustomerLookup for StubLookup {
        async fn fetch_customer(
            &self,
            customer_id: CustomerId,
        ) -> Result<Option<RemoteCustomer>, LookupError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(LookupError::Unavailable("stub outage".to_string()));
            }
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.customers.get(&customer_id).map(|c| c.clone()))
        }
    }

    fn remote(active: bool) -> RemoteCustomer {
        RemoteCustomer {
            customer_id: CustomerId::new(Uuid::new_v4()),
            full_name: "Jane Doe".to_string(),
            active,
        }
    }

    #[tokio::test]
    async fn test_lookup_fetches_once_then_hits_cache() {
        let stub = Arc::new(StubLookup::default());
        let customer = remote(true);
        let id = customer.customer_id;
        stub.insert(customer);

        let cache = CustomerProjectionCache::new(stub.clone());

        let first = cache.lookup(id).await.unwrap().unwrap();
        assert!(first.active);
        assert_eq!(first.full_name, "Jane Doe");

        let second = cache.lookup(id).await.unwrap().unwrap();
        assert_eq!(second, first);
        assert_eq!(stub.fetches(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_exactly_one_refetch() {
        let stub = Arc::new(StubLookup::default());
        let customer = remote(true);
        let id = customer.customer_id;
        stub.insert(customer);

        let cache = CustomerProjectionCache::new(stub.clone());
        cache.lookup(id).await.unwrap();
        assert_eq!(stub.fetches(), 1);

        cache.invalidate(id);
        cache.lookup(id).await.unwrap();
        cache.lookup(id).await.unwrap();
        assert_eq!(stub.fetches(), 2);
    }

    #[tokio::test]
    async fn test_negative_result_is_cached() {
        let stub = Arc::new(StubLookup::default());
        let cache = CustomerProjectionCache::new(stub.clone());
        let unknown = CustomerId::new(Uuid::new_v4());

        assert_eq!(cache.lookup(unknown).await.unwrap(), None);
        assert_eq!(cache.lookup(unknown).await.unwrap(), None);
        assert_eq!(stub.fetches(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_not_cached() {
        let stub = Arc::new(StubLookup::default());
        let customer = remote(true);
        let id = customer.customer_id;
        stub.insert(customer);

        let cache = CustomerProjectionCache::new(stub.clone());

        stub.set_unavailable(true);
        let err = cache.lookup(id).await.unwrap_err();
        assert!(matches!(err, DomainError::UpstreamUnavailable { .. }));
        assert!(cache.is_empty());

        stub.set_unavailable(false);
        let info = cache.lookup(id).await.unwrap().unwrap();
        assert!(info.active);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch_per_distinct_id() {
        let stub = Arc::new(StubLookup::default());
        let a = remote(true);
        let b = remote(false);
        let (id_a, id_b) = (a.customer_id, b.customer_id);
        stub.insert(a);
        stub.insert(b);

        let cache = CustomerProjectionCache::new(stub.clone());
        cache.lookup(id_a).await.unwrap();
        cache.lookup(id_b).await.unwrap();
        assert_eq!(stub.fetches(), 2);

        cache.clear();
        assert!(cache.is_empty());

        cache.lookup(id_a).await.unwrap();
        cache.lookup(id_b).await.unwrap();
        assert_eq!(stub.fetches(), 4);
    }

    #[tokio::test]
    async fn test_customer_events_invalidate() {
        let stub = Arc::new(StubLookup::default());
        let customer = remote(true);
        let id = customer.customer_id;
        stub.insert(customer);

        let cache = CustomerProjectionCache::new(stub.clone());
        cache.lookup(id).await.unwrap();
        assert_eq!(cache.len(), 1);

        cache.handle_event(&CustomerEvent::CustomerStatusChanged {
            customer_id: id,
            new_status: CustomerStatus::Inactive,
        });
        assert!(cache.is_empty());

        cache.lookup(id).await.unwrap();
        cache.handle_event(&CustomerEvent::CustomerUpdated {
            customer_id: id,
            changes: CustomerChanges {
                full_name: Some("Jane Smith".to_string()),
                email: None,
            },
        });
        assert!(cache.is_empty());
    }
}
