//! Common test utilities
//!
//! In-memory collaborator doubles wired into ready-to-use handlers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use banking_ledger::projection::LookupError;
use banking_ledger::publisher::PublishError;
use banking_ledger::store::StoreError;
use banking_ledger::{
    Account, AccountHandler, AccountLocks, AccountStore, AccountType, CreateAccountCommand,
    CustomerId, CustomerLookup, CustomerProjectionCache, DomainEvent, DomainEventPublisher,
    InMemoryAccountStore, InMemoryTransactionStore, RemoteCustomer, Transaction,
    TransactionExecutor, TransactionStore,
};

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Customer-service double with a fetch counter and a switchable outage.
#[derive(Default)]
pub struct StubCustomerLookup {
    customers: DashMap<CustomerId, RemoteCustomer>,
    fetches: AtomicUsize,
    unavailable: AtomicBool,
}

impl StubCustomerLookup {
    pub fn seed(&self, active: bool) -> CustomerId {
        let customer_id = CustomerId::new(Uuid::new_v4());
        self.customers.insert(
            customer_id,
            RemoteCustomer {
                customer_id,
                full_name: "Ada Lovelace".to_string(),
                active,
            },
        );
        customer_id
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl CustomerLookup for StubCustomerLookup {
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

/// Publisher double recording every handed-off event in order.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DomainEventPublisher for RecordingPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), PublishError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PublishError::Delivery(
                "recording publisher down".to_string(),
            ));
        }
        self.events.lock().unwrap().extend_from_slice(events);
        Ok(())
    }
}

/// Transaction store whose `save` always fails; reads stay empty.
#[derive(Default)]
pub struct FailingTransactionStore;

#[async_trait]
impl TransactionStore for FailingTransactionStore {
    async fn save(&self, _transaction: &Transaction) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("txn store down".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(None)
    }

    async fn find_by_account(&self, _account_id: Uuid) -> Result<Vec<Transaction>, StoreError> {
        Ok(Vec::new())
    }
}

/// Fully wired ledger over in-memory doubles.
pub struct TestLedger {
    pub accounts: Arc<InMemoryAccountStore>,
    pub transactions: Arc<InMemoryTransactionStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub remote: Arc<StubCustomerLookup>,
    pub cache: Arc<CustomerProjectionCache>,
    pub locks: Arc<AccountLocks>,
    pub account_handler: AccountHandler,
    pub executor: Arc<TransactionExecutor>,
}

impl TestLedger {
    pub fn new() -> Self {
        init_tracing();

        let accounts = Arc::new(InMemoryAccountStore::new());
        let transactions = Arc::new(InMemoryTransactionStore::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let remote = Arc::new(StubCustomerLookup::default());
        let cache = Arc::new(CustomerProjectionCache::new(remote.clone()));
        let locks = Arc::new(AccountLocks::new());

        let account_handler = AccountHandler::new(
            accounts.clone() as Arc<dyn AccountStore>,
            cache.clone(),
            publisher.clone() as Arc<dyn DomainEventPublisher>,
            locks.clone(),
        );
        let executor = Arc::new(TransactionExecutor::new(
            accounts.clone() as Arc<dyn AccountStore>,
            transactions.clone() as Arc<dyn TransactionStore>,
            publisher.clone() as Arc<dyn DomainEventPublisher>,
            locks.clone(),
        ));

        Self {
            accounts,
            transactions,
            publisher,
            remote,
            cache,
            locks,
            account_handler,
            executor,
        }
    }

    /// Create a checking account for a freshly seeded active customer.
    pub async fn open_account(&self, number: &str, initial_balance: &str) -> Account {
        let customer_id = self.remote.seed(true);
        self.account_handler
            .create_account(CreateAccountCommand::new(
                number,
                AccountType::Checking,
                initial_balance,
                customer_id.as_uuid(),
            ))
            .await
            .expect("account creation should succeed")
            .account
    }
}
