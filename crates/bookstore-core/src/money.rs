//! # Money Module
//!
//! Provides the `Money` type: an integer minor-unit amount tagged with a
//! three-letter currency code.
//!
//! ## Two Error Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHAT CAN GO WRONG                                                      │
//! │                                                                         │
//! │  Money::new(100, "EURO")      → Err(ValidationError)   (bad input)      │
//! │                                                                         │
//! │  eur.add(&usd)                → panic!                 (caller bug)     │
//! │                                                                         │
//! │  Mixing currencies is never user input: it means two values that were   │
//! │  never compatible ended up in the same sum. Check `same_currency` first │
//! │  if the pairing is not already guaranteed.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::Money;
//!
//! let price = Money::new(1299, "EUR").unwrap();
//! let shipping = Money::new(499, "EUR").unwrap();
//!
//! assert_eq!(price.add(&shipping).amount(), 1798);
//! assert_eq!(price.display(), "12.99 EUR");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_currency_code, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for EUR/USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts are allowed here; entities that
///   need non-negative prices (e.g. `Book`) enforce that themselves
/// - **No setters**: every operation returns a new `Money`
/// - **Serde**: deserialization re-runs the currency check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "MoneyRecord")]
#[ts(export)]
pub struct Money {
    amount: i64,
    currency: String,
}

/// Unvalidated wire shape of [`Money`].
#[derive(Deserialize)]
struct MoneyRecord {
    amount: i64,
    currency: String,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = ValidationError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        Money::new(record.amount, record.currency)
    }
}

impl Money {
    /// Creates a Money value from minor units and a currency code.
    ///
    /// ## Rules
    /// - Currency must be non-empty and exactly 3 characters
    /// - Amount is accepted as-is, negative included
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::Money;
    ///
    /// let refund = Money::new(-500, "GBP").unwrap();
    /// assert_eq!(refund.amount(), -500);
    ///
    /// assert!(Money::new(100, "").is_err());
    /// assert!(Money::new(100, "EURO").is_err());
    /// ```
    pub fn new(amount: i64, currency: impl Into<String>) -> ValidationResult<Self> {
        let currency = currency.into();
        validate_currency_code(&currency)?;
        Ok(Money { amount, currency })
    }

    /// Zero in the given currency.
    pub fn zero(currency: impl Into<String>) -> ValidationResult<Self> {
        Money::new(0, currency)
    }

    /// Same currency, different amount. The currency is already valid.
    pub(crate) fn with_amount(&self, amount: i64) -> Self {
        Money {
            amount,
            currency: self.currency.clone(),
        }
    }

    /// Returns the amount in minor units.
    #[inline]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency code.
    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Checks if the amount is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// True when `add`/`subtract` with `other` will not panic.
    #[inline]
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Returns the sum of both amounts.
    ///
    /// # Panics
    /// If the currencies differ. This is a contract violation by the caller,
    /// not an input error.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Money) -> Money {
        if !self.same_currency(other) {
            panic!("cannot add {} to {}", other.currency, self.currency);
        }
        self.with_amount(self.amount + other.amount)
    }

    /// Returns `self - other`.
    ///
    /// # Panics
    /// If the currencies differ.
    pub fn subtract(&self, other: &Money) -> Money {
        if !self.same_currency(other) {
            panic!("cannot subtract {} from {}", other.currency, self.currency);
        }
        self.with_amount(self.amount - other.amount)
    }

    /// Scales the amount by a percentage: `amount * percent / 100`.
    ///
    /// Truncates toward zero, it does not round.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::Money;
    ///
    /// let price = Money::new(1099, "EUR").unwrap();
    /// assert_eq!(price.scale_by_percent(50).amount(), 549);   // not 550
    /// assert_eq!(price.scale_by_percent(110).amount(), 1208); // 1208.9 → 1208
    /// ```
    ///
    /// Saturates at the `i64` bounds when the result does not fit; use
    /// [`Money::checked_scale_by_percent`] to detect that case.
    pub fn scale_by_percent(&self, percent: i64) -> Money {
        self.with_amount(saturate(self.scaled_by_percent(percent)))
    }

    /// Like [`Money::scale_by_percent`], but `None` when the result does not fit in `i64`.
    pub fn checked_scale_by_percent(&self, percent: i64) -> Option<Money> {
        i64::try_from(self.scaled_by_percent(percent))
            .ok()
            .map(|amount| self.with_amount(amount))
    }

    fn scaled_by_percent(&self, percent: i64) -> i128 {
        // i128 keeps the intermediate product from overflowing
        i128::from(self.amount) * i128::from(percent) / 100
    }

    /// Human-readable form, e.g. `"12.99 EUR"`.
    ///
    /// ## Sign Handling
    /// ```text
    ///  1299 → "12.99 EUR"
    ///    -5 → "-0.05 EUR"    (sign kept even though the whole part is 0)
    /// -1299 → "-12.99 EUR"
    /// ```
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        format!(
            "{}{}.{:02} {}",
            sign,
            magnitude / 100,
            magnitude % 100,
            self.currency
        )
    }
}

/// Clamps a wide intermediate into `i64` minor units.
pub(crate) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
