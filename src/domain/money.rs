//! Money value type
//!
//! Fixed-scale monetary value used for balances and transaction amounts.
//! Values are validated at construction time, ensuring invalid amounts
//! cannot exist in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional digits carried by every stored value (cents).
const SCALE: u32 = 2;

/// Money represents a validated monetary value.
///
/// # Invariants
/// - Value is never negative
/// - At most 2 fractional digits; construction rejects finer values
///   rather than rounding them
/// - Arithmetic is exact; comparisons are exact
///
/// # Example
/// ```
/// use banking_ledger::domain::Money;
///
/// let balance: Money = "100.00".parse().unwrap();
/// assert_eq!(balance.to_string(), "100.00");
/// assert!("0.005".parse::<Money>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when creating or combining Money values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Money cannot be negative (got {0})")]
    Negative(Decimal),

    #[error("Money has too many decimal places (max {SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Money arithmetic overflow")]
    Overflow,

    #[error("Invalid money format: {0}")]
    ParseError(String),
}

impl Money {
    /// Create a new Money value with validation.
    ///
    /// # Errors
    /// - `MoneyError::Negative` if value < 0
    /// - `MoneyError::TooManyDecimals` if more than 2 fractional digits
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value < Decimal::ZERO {
            return Err(MoneyError::Negative(value));
        }

        if value.normalize().scale() > SCALE {
            return Err(MoneyError::TooManyDecimals(value.scale()));
        }

        // Lossless after the scale check; keeps display and storage uniform.
        let mut value = value;
        value.rescale(SCALE);
        Ok(Self(value))
    }

    /// Zero money (the starting balance of an empty account).
    pub fn zero() -> Self {
        Self(Decimal::new(0, SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add another value, failing on overflow.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        let sum = self.0.checked_add(other.0).ok_or(MoneyError::Overflow)?;
        Money::new(sum)
    }

    /// Subtract another value.
    ///
    /// Fails with `MoneyError::Negative` when the result would drop below
    /// zero; negative money exists only inside this check, never as a
    /// stored value.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        let diff = self.0.checked_sub(other.0).ok_or(MoneyError::Overflow)?;
        Money::new(diff)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Money::new(decimal)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        format!("{:.2}", money.0)
    }
}
