//! # Pricing Engine
//!
//! Pure functions over books: bulk discounts, order totals and the
//! time-based price adjustments.
//!
//! ## Bulk Discount Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STANDARD TIERS            quantity → discount                          │
//! │                                                                         │
//! │   min 10  →  5%                  5 →  0%  (no tier matches)             │
//! │   min 25  → 10%                 10 →  5%                                │
//! │   min 50  → 15%                 49 → 10%                                │
//! │   min 100 → 20%                100 → 20%                                │
//! │                                                                         │
//! │  The result is the MAXIMUM percent among all tiers whose minimum is     │
//! │  met. Tiers do not need to be sorted.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! The tier table is a value ([`DiscountSchedule`]) passed in by the caller,
//! not process-wide state. [`DiscountSchedule::standard`] gives the default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::book::Book;
use crate::error::ValidationError;
use crate::money::{saturate, Money};
use crate::{CLASSIC_SURCHARGE_PERCENT, NEW_RELEASE_PREMIUM_PERCENT};

// =============================================================================
// Discount Tiers
// =============================================================================

/// A `(minimum quantity, discount percent)` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    pub min_quantity: i64,
    /// Discount percentage, e.g. 10 = 10% off.
    pub percent: i64,
}

impl DiscountTier {
    pub const fn new(min_quantity: i64, percent: i64) -> Self {
        DiscountTier {
            min_quantity,
            percent,
        }
    }
}

/// The default bulk discount tiers.
pub const STANDARD_TIERS: [DiscountTier; 4] = [
    DiscountTier::new(10, 5),
    DiscountTier::new(25, 10),
    DiscountTier::new(50, 15),
    DiscountTier::new(100, 20),
];

/// An owned, injectable tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSchedule {
    tiers: Vec<DiscountTier>,
}

impl DiscountSchedule {
    pub fn new(tiers: Vec<DiscountTier>) -> Self {
        DiscountSchedule { tiers }
    }

    /// Schedule built from [`STANDARD_TIERS`].
    pub fn standard() -> Self {
        DiscountSchedule::new(STANDARD_TIERS.to_vec())
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// See [`bulk_discount`].
    pub fn bulk_discount(&self, quantity: i64) -> i64 {
        bulk_discount(quantity, &self.tiers)
    }

    /// See [`order_total`].
    pub fn order_total(&self, book: &Book, quantity: i64) -> Money {
        order_total(book, quantity, &self.tiers)
    }

    /// See [`checked_order_total`].
    pub fn checked_order_total(&self, book: &Book, quantity: i64) -> Option<Money> {
        checked_order_total(book, quantity, &self.tiers)
    }
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        DiscountSchedule::standard()
    }
}

/// Parses `"10:5,25:10,50:15"`. Whitespace around entries is ignored;
/// an empty string yields a schedule with no tiers.
///
/// ## Example
/// ```rust
/// use bookstore_core::DiscountSchedule;
///
/// let schedule: DiscountSchedule = "10:5, 25:10, 50:15, 100:20".parse().unwrap();
/// assert_eq!(schedule, DiscountSchedule::standard());
/// assert!("10-5".parse::<DiscountSchedule>().is_err());
/// ```
impl FromStr for DiscountSchedule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiers = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_tier)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DiscountSchedule::new(tiers))
    }
}

fn parse_tier(entry: &str) -> Result<DiscountTier, ValidationError> {
    let invalid = || ValidationError::InvalidTier {
        entry: entry.to_string(),
    };

    let (min, percent) = entry.split_once(':').ok_or_else(invalid)?;
    let min_quantity = min.trim().parse().map_err(|_| invalid())?;
    let percent = percent.trim().parse().map_err(|_| invalid())?;

    Ok(DiscountTier::new(min_quantity, percent))
}

// =============================================================================
// Pricing Functions
// =============================================================================

/// Best discount percent for `quantity`: the maximum over all tiers whose
/// `min_quantity <= quantity`, or 0 when none match.
pub fn bulk_discount(quantity: i64, tiers: &[DiscountTier]) -> i64 {
    tiers
        .iter()
        .filter(|t| quantity >= t.min_quantity)
        .map(|t| t.percent)
        .fold(0, i64::max)
}

/// Price of `quantity` copies after the bulk discount.
///
/// ## Rounding
/// One truncating division on the whole product:
/// `unit * quantity * (100 - discount) / 100`. Dividing per factor would
/// round differently.
///
/// ## Example
/// ```text
/// unit 1099, quantity 10, discount 5%
///   1099 * 10 * 95 = 1_044_050
///   1_044_050 / 100 = 10_440       (10440.5 truncated)
/// ```
///
/// Saturates at the `i64` bounds when the total does not fit; use
/// [`checked_order_total`] to detect that case.
pub fn order_total(book: &Book, quantity: i64, tiers: &[DiscountTier]) -> Money {
    book.price()
        .with_amount(saturate(wide_order_total(book, quantity, tiers)))
}

/// Like [`order_total`], but `None` when the total does not fit in `i64`.
pub fn checked_order_total(book: &Book, quantity: i64, tiers: &[DiscountTier]) -> Option<Money> {
    i64::try_from(wide_order_total(book, quantity, tiers))
        .ok()
        .map(|total| book.price().with_amount(total))
}

fn wide_order_total(book: &Book, quantity: i64, tiers: &[DiscountTier]) -> i128 {
    let effective_percent = i128::from(100 - bulk_discount(quantity, tiers));
    let gross = i128::from(book.price().amount()) * i128::from(quantity);

    match gross.checked_mul(effective_percent) {
        Some(product) => product / 100,
        // a tier above 100% can push past i128; only the sign matters then
        None if (gross < 0) == (effective_percent < 0) => i128::MAX,
        None => i128::MIN,
    }
}

/// Classic books (published more than 50 years before `now`) cost 25% more.
pub fn classic_surcharge_at(book: &Book, now: DateTime<Utc>) -> Money {
    if !book.is_classic_at(now) {
        return book.price().clone();
    }
    book.price().scale_by_percent(CLASSIC_SURCHARGE_PERCENT)
}

/// Books published within the last year before `now` cost 10% more.
pub fn new_release_premium_at(book: &Book, now: DateTime<Utc>) -> Money {
    if !book.is_recent_at(now) {
        return book.price().clone();
    }
    book.price().scale_by_percent(NEW_RELEASE_PREMIUM_PERCENT)
}

/// [`classic_surcharge_at`] against the current wall clock.
pub fn classic_surcharge(book: &Book) -> Money {
    classic_surcharge_at(book, Utc::now())
}

/// [`new_release_premium_at`] against the current wall clock.
pub fn new_release_premium(book: &Book) -> Money {
    new_release_premium_at(book, Utc::now())
}

// =============================================================================
// Unit Tests
// =============================================================================
