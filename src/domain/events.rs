//! Domain events
//!
//! Events are immutable facts produced alongside committed aggregate
//! mutations, intended for asynchronous consumption by the customer
//! service and other downstream components. Field names on the wire are
//! part of the published contract and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{AccountStatus, AccountType};
use super::ids::CustomerId;
use super::money::Money;
use super::transaction::TransactionType;

/// Payload of the event emitted when an account is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    pub account_id: Uuid,
    pub account_number: String,
    pub customer_id: CustomerId,
    pub account_type: AccountType,
    pub initial_balance: Money,
    pub status: AccountStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Payload of the event emitted when an account actually changes status
/// (idempotent no-op transitions emit nothing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusChanged {
    pub account_id: Uuid,
    pub account_number: String,
    pub customer_id: CustomerId,
    pub new_status: AccountStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Payload of the event emitted for every committed transaction,
/// referencing both the transaction and the post-mutation account snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPerformed {
    pub transaction_id: Uuid,
    pub account_id: Uuid,
    pub account_number: String,
    pub customer_id: CustomerId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub balance_before: Money,
    pub balance_after: Money,
    pub reference: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Events produced by the account service.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    AccountCreated(AccountCreated),
    AccountStatusChanged(AccountStatusChanged),
    TransactionPerformed(TransactionPerformed),
}

impl DomainEvent {
    /// Get the event type as a string.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::AccountCreated(_) => "AccountCreated",
            DomainEvent::AccountStatusChanged(_) => "AccountStatusChanged",
            DomainEvent::TransactionPerformed(_) => "TransactionPerformed",
        }
    }

    /// Get the account ID this event relates to.
    pub fn account_id(&self) -> Uuid {
        match self {
            DomainEvent::AccountCreated(e) => e.account_id,
            DomainEvent::AccountStatusChanged(e) => e.account_id,
            DomainEvent::TransactionPerformed(e) => e.account_id,
        }
    }

    /// When the underlying state change happened.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::AccountCreated(e) => e.occurred_at,
            DomainEvent::AccountStatusChanged(e) => e.occurred_at,
            DomainEvent::TransactionPerformed(e) => e.occurred_at,
        }
    }

    /// Serialize into the record shape handed to publisher adapters.
    pub fn to_envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        let payload = match self {
            DomainEvent::AccountCreated(e) => serde_json::to_value(e)?,
            DomainEvent::AccountStatusChanged(e) => serde_json::to_value(e)?,
            DomainEvent::TransactionPerformed(e) => serde_json::to_value(e)?,
        };

        Ok(EventEnvelope {
            id: Uuid::new_v4(),
            event_type: self.event_type().to_string(),
            payload,
            occurred_at: self.occurred_at(),
        })
    }
}

/// A serialized event record as handed to the messaging layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

/// Customer status as reported by the customer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CustomerStatus::Active)
    }
}

/// Fields a `CustomerUpdated` event may carry. Payloads are partial; the
/// projection cache never reconstructs customer state from them, it only
/// invalidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Customer-domain events consumed by the account service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CustomerEvent {
    /// Customer profile fields changed.
    #[serde(rename_all = "camelCase")]
    CustomerUpdated {
        customer_id: CustomerId,
        changes: CustomerChanges,
    },

    /// Customer was activated or deactivated.
    #[serde(rename_all = "camelCase")]
    CustomerStatusChanged {
        customer_id: CustomerId,
        new_status: CustomerStatus,
    },
}

impl CustomerEvent {
    /// Get the customer ID this event relates to.
    pub fn customer_id(&self) -> CustomerId {
        match self {
            CustomerEvent::CustomerUpdated { customer_id, .. } => *customer_id,
            CustomerEvent::CustomerStatusChanged { customer_id, .. } => *customer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_performed_wire_shape() {
        let event = DomainEvent::TransactionPerformed(TransactionPerformed {
            transaction_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            account_number: "1234567890".to_string(),
            customer_id: CustomerId::new(Uuid::new_v4()),
            transaction_type: TransactionType::Deposit,
            amount: "25.00".parse().unwrap(),
            balance_before: "0.00".parse().unwrap(),
            balance_after: "25.00".parse().unwrap(),
            reference: Some("invoice-42".to_string()),
            occurred_at: Utc::now(),
        });

        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.event_type, "TransactionPerformed");

        let payload = envelope.payload.as_object().unwrap();
        for field in [
            "transactionId",
            "accountId",
            "accountNumber",
            "customerId",
            "type",
            "amount",
            "balanceBefore",
            "balanceAfter",
            "reference",
            "occurredAt",
        ] {
            assert!(payload.contains_key(field), "missing field {field}");
        }
        assert_eq!(payload["type"], "DEPOSIT");
        assert_eq!(payload["balanceAfter"], "25.00");
    }

    #[test]
    fn test_account_created_wire_shape() {
        let event = DomainEvent::AccountCreated(AccountCreated {
            account_id: Uuid::new_v4(),
            account_number: "9876543210".to_string(),
            customer_id: CustomerId::new(Uuid::new_v4()),
            account_type: AccountType::Savings,
            initial_balance: "100.00".parse().unwrap(),
            status: AccountStatus::Active,
            occurred_at: Utc::now(),
        });

        let envelope = event.to_envelope().unwrap();
        let payload = envelope.payload.as_object().unwrap();
        assert_eq!(payload["accountType"], "SAVINGS");
        assert_eq!(payload["status"], "ACTIVE");
        assert_eq!(payload["initialBalance"], "100.00");
    }

    #[test]
    fn test_customer_event_deserialization() {
        let customer_id = Uuid::new_v4();
        let json = format!(
            r#"{{"type":"CustomerStatusChanged","customerId":"{customer_id}","newStatus":"INACTIVE"}}"#
        );

        let event: CustomerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.customer_id().as_uuid(), customer_id);
        assert!(matches!(
            event,
            CustomerEvent::CustomerStatusChanged {
                new_status: CustomerStatus::Inactive,
                ..
            }
        ));
    }
}
