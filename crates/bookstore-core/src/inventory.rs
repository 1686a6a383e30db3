//! # Inventory (Stock Ledger)
//!
//! Per-title stock counters with reservation semantics.
//!
//! ## Reservation State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    StockEntry (total, reserved)                         │
//! │                                                                         │
//! │   available = total - reserved        0 <= reserved <= total            │
//! │                                                                         │
//! │   reserve(n)  ── n <= 0?          → Err(MustBePositive)                 │
//! │               ── n > available?   → Err(InsufficientStock)              │
//! │               └─ reserved += n                                          │
//! │                                                                         │
//! │   release(n)  ── n <= 0?          → Err(MustBePositive)                 │
//! │               ── n > reserved?    → Err(ExcessiveRelease)               │
//! │               └─ reserved -= n                                          │
//! │                                                                         │
//! │   restock(n)  ── n <= 0?          → Err(MustBePositive)                 │
//! │               ── total + n > MAX? → Err(StockOverflow)                  │
//! │               └─ total += n       (available grows)                     │
//! │                                                                         │
//! │   A failed call leaves both counters untouched.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! None here. Mutators take `&mut self`; whoever shares an `Inventory`
//! across threads wraps it in a lock (many readers XOR one writer).

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::book::Book;
use crate::error::{InventoryError, InventoryResult};
use crate::isbn::Isbn;
use crate::validation::{validate_non_negative, validate_positive_quantity, ValidationResult};

// =============================================================================
// Stock Entry
// =============================================================================

/// Stock counters for a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockEntry {
    book: Book,
    total: i64,
    reserved: i64,
}

impl StockEntry {
    /// Creates an entry with `total` copies and nothing reserved.
    ///
    /// ## Example
    /// ```rust
    /// # use bookstore_core::{Author, Book, Genre, Isbn, Money, StockEntry};
    /// # use chrono::Utc;
    /// # let book = Book::new(
    /// #     Isbn::parse("9780306406157").unwrap(),
    /// #     "Dune",
    /// #     Author::new("Frank", "Herbert").unwrap(),
    /// #     Money::new(1299, "EUR").unwrap(),
    /// #     Utc::now(),
    /// #     Genre::Fiction,
    /// # ).unwrap();
    /// let mut entry = StockEntry::new(book, 10).unwrap();
    /// entry.reserve(3).unwrap();
    /// assert_eq!(entry.available(), 7);
    /// ```
    pub fn new(book: Book, total: i64) -> ValidationResult<Self> {
        validate_non_negative("total stock", total)?;
        Ok(StockEntry {
            book,
            total,
            reserved: 0,
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn reserved(&self) -> i64 {
        self.reserved
    }

    /// Copies that can still be reserved.
    pub fn available(&self) -> i64 {
        self.total - self.reserved
    }

    /// Reserves `n` copies out of the available stock.
    pub fn reserve(&mut self, n: i64) -> InventoryResult<()> {
        validate_positive_quantity("reservation quantity", n)?;

        let available = self.available();
        if available < n {
            warn!(
                isbn = %self.book.isbn(),
                available,
                requested = n,
                "Reservation rejected"
            );
            return Err(InventoryError::InsufficientStock {
                available,
                requested: n,
            });
        }

        self.reserved += n;
        debug!(isbn = %self.book.isbn(), reserved = self.reserved, "Copies reserved");
        Ok(())
    }

    /// Returns `n` previously reserved copies to available stock.
    pub fn release(&mut self, n: i64) -> InventoryResult<()> {
        validate_positive_quantity("release quantity", n)?;

        if n > self.reserved {
            warn!(
                isbn = %self.book.isbn(),
                reserved = self.reserved,
                requested = n,
                "Release rejected"
            );
            return Err(InventoryError::ExcessiveRelease {
                reserved: self.reserved,
                requested: n,
            });
        }

        self.reserved -= n;
        debug!(isbn = %self.book.isbn(), reserved = self.reserved, "Copies released");
        Ok(())
    }

    /// Adds `n` copies to total stock. Reservations are unchanged.
    pub fn restock(&mut self, n: i64) -> InventoryResult<()> {
        validate_positive_quantity("restock quantity", n)?;

        let Some(total) = self.total.checked_add(n) else {
            warn!(
                isbn = %self.book.isbn(),
                total = self.total,
                requested = n,
                "Restock rejected"
            );
            return Err(InventoryError::StockOverflow {
                total: self.total,
                requested: n,
            });
        };

        self.total = total;
        debug!(isbn = %self.book.isbn(), total = self.total, "Restocked");
        Ok(())
    }

    /// True when fewer than `threshold` copies are available.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.available() < threshold
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock entries keyed by canonical ISBN string.
///
/// Iteration order is unspecified; aggregate queries must not depend on it.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: HashMap<String, StockEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any existing entry for the same ISBN.
    pub fn add(&mut self, entry: StockEntry) {
        let key = entry.book.isbn().to_string();
        if self.entries.insert(key, entry).is_some() {
            debug!("Replaced existing stock entry");
        }
    }

    /// Looks up the entry for `isbn`.
    pub fn find(&self, isbn: &Isbn) -> InventoryResult<&StockEntry> {
        self.entries
            .get(isbn.as_str())
            .ok_or_else(|| not_found(isbn))
    }

    /// Looks up the entry for `isbn` so it can be reserved/released/restocked.
    ///
    /// ## Example
    /// ```rust,ignore
    /// inventory.find_mut(&isbn)?.reserve(2)?;
    /// ```
    pub fn find_mut(&mut self, isbn: &Isbn) -> InventoryResult<&mut StockEntry> {
        self.entries
            .get_mut(isbn.as_str())
            .ok_or_else(|| not_found(isbn))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Books whose available stock is below `threshold`, in no particular order.
    pub fn low_stock_books(&self, threshold: i64) -> Vec<&Book> {
        self.entries
            .values()
            .filter(|e| e.is_low_stock(threshold))
            .map(StockEntry::book)
            .collect()
    }

    /// Σ `price.amount * total` over all entries.
    ///
    /// Values owned stock, reserved copies included. Compare
    /// `low_stock_books`, which looks at *available* stock.
    ///
    /// Saturates at the `i64` bounds; see [`Inventory::checked_total_value`].
    pub fn total_value(&self) -> i64 {
        let sum: i128 = self
            .entries
            .values()
            .map(|e| i128::from(e.book.price().amount()) * i128::from(e.total))
            .sum();
        crate::money::saturate(sum)
    }

    /// Like [`Inventory::total_value`], but `None` when the sum does not fit in `i64`.
    pub fn checked_total_value(&self) -> Option<i64> {
        self.entries.values().try_fold(0i64, |acc, e| {
            e.book
                .price()
                .amount()
                .checked_mul(e.total)
                .and_then(|value| acc.checked_add(value))
        })
    }
}

fn not_found(isbn: &Isbn) -> InventoryError {
    InventoryError::NotFound {
        isbn: isbn.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Author, Genre, Money, ValidationError};
    use chrono::Utc;
    use proptest::prelude::*;

    const DUNE: &str = "9780306406157";
    const HOBBIT: &str = "9781234567897";

    fn book(isbn: &str, price: i64) -> Book {
        Book::new(
            Isbn::parse(isbn).unwrap(),
            "Title",
            Author::new("Ada", "Lovelace").unwrap(),
            Money::new(price, "EUR").unwrap(),
            Utc::now(),
            Genre::Science,
        )
        .unwrap()
    }

    fn entry(total: i64) -> StockEntry {
        StockEntry::new(book(DUNE, 1000), total).unwrap()
    }

    #[test]
    fn test_new_rejects_negative_total() {
        let err = StockEntry::new(book(DUNE, 1000), -1).unwrap_err();
        assert_eq!(err.to_string(), "total stock must not be negative");

        let empty = entry(0);
        assert_eq!(empty.available(), 0);
        assert_eq!(empty.reserved(), 0);
    }

    #[test]
    fn test_reserve() {
        let mut e = entry(10);
        e.reserve(4).unwrap();
        assert_eq!(e.reserved(), 4);
        assert_eq!(e.available(), 6);
        assert_eq!(e.total(), 10);

        e.reserve(6).unwrap();
        assert_eq!(e.available(), 0);
    }

    #[test]
    fn test_reserve_insufficient_stock() {
        let mut e = entry(5);
        e.reserve(3).unwrap();

        let err = e.reserve(3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                available: 2,
                requested: 3
            }
        );
        assert!(err.is_capacity());
        assert_eq!(e.reserved(), 3); // unchanged
    }

    #[test]
    fn test_reserve_rejects_non_positive() {
        let mut e = entry(5);
        for n in [0, -1] {
            let err = e.reserve(n).unwrap_err();
            assert_eq!(
                err,
                InventoryError::Validation(ValidationError::MustBePositive {
                    field: "reservation quantity".to_string()
                })
            );
        }
        assert_eq!(e.reserved(), 0);
    }

    #[test]
    fn test_release() {
        let mut e = entry(10);
        e.reserve(5).unwrap();
        e.release(2).unwrap();
        assert_eq!(e.reserved(), 3);
        assert_eq!(e.available(), 7);

        let err = e.release(4).unwrap_err();
        assert_eq!(err.to_string(), "cannot release 4: only 3 reserved");
        assert_eq!(e.reserved(), 3);

        assert!(e.release(0).is_err());
        assert!(e.release(-2).is_err());
    }

    #[test]
    fn test_restock() {
        let mut e = entry(2);
        e.reserve(2).unwrap();
        e.restock(5).unwrap();
        assert_eq!(e.total(), 7);
        assert_eq!(e.reserved(), 2);
        assert_eq!(e.available(), 5);

        assert_eq!(
            e.restock(0).unwrap_err().to_string(),
            "restock quantity must be positive"
        );
    }

    #[test]
    fn test_restock_overflow_is_rejected() {
        let mut e = entry(i64::MAX);
        e.reserve(3).unwrap();

        let err = e.restock(1).unwrap_err();
        assert_eq!(
            err,
            InventoryError::StockOverflow {
                total: i64::MAX,
                requested: 1
            }
        );
        assert!(err.is_capacity());
        assert_eq!(e.total(), i64::MAX);
        assert_eq!(e.reserved(), 3);

        // still usable afterwards
        e.release(3).unwrap();
        assert_eq!(e.available(), i64::MAX);
    }

    #[test]
    fn test_restock_up_to_max() {
        let mut e = entry(i64::MAX - 10);
        e.restock(10).unwrap();
        assert_eq!(e.total(), i64::MAX);
        assert!(e.restock(i64::MAX).is_err());
    }

    #[test]
    fn test_is_low_stock() {
        let mut e = entry(5);
        assert!(!e.is_low_stock(5));
        assert!(e.is_low_stock(6));
        e.reserve(1).unwrap();
        assert!(e.is_low_stock(5));
    }

    #[test]
    fn test_inventory_add_and_find() {
        let mut inv = Inventory::new();
        assert!(inv.is_empty());

        inv.add(entry(3));
        let isbn = Isbn::parse(DUNE).unwrap();
        assert_eq!(inv.find(&isbn).unwrap().total(), 3);

        // re-adding overwrites
        inv.add(entry(8));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.find(&isbn).unwrap().total(), 8);

        let missing = Isbn::parse(HOBBIT).unwrap();
        assert_eq!(
            inv.find(&missing).unwrap_err().to_string(),
            format!("book {HOBBIT} not found in inventory")
        );
    }

    #[test]
    fn test_inventory_find_mut_reserves_in_place() {
        let mut inv = Inventory::new();
        inv.add(entry(4));
        let isbn = Isbn::parse(DUNE).unwrap();

        inv.find_mut(&isbn).unwrap().reserve(3).unwrap();
        assert_eq!(inv.find(&isbn).unwrap().available(), 1);
    }

    #[test]
    fn test_low_stock_books() {
        let mut inv = Inventory::new();
        inv.add(StockEntry::new(book(DUNE, 1000), 2).unwrap());
        inv.add(StockEntry::new(book(HOBBIT, 500), 20).unwrap());

        let low = inv.low_stock_books(5);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].isbn().as_str(), DUNE);

        assert!(inv.low_stock_books(0).is_empty());
        assert_eq!(inv.low_stock_books(100).len(), 2);
    }

    #[test]
    fn test_total_value_counts_reserved_copies() {
        let mut inv = Inventory::new();
        inv.add(StockEntry::new(book(DUNE, 1000), 2).unwrap());
        inv.add(StockEntry::new(book(HOBBIT, 500), 3).unwrap());
        assert_eq!(inv.total_value(), 2 * 1000 + 3 * 500);

        let isbn = Isbn::parse(HOBBIT).unwrap();
        inv.find_mut(&isbn).unwrap().reserve(3).unwrap();
        assert_eq!(inv.total_value(), 3500);

        assert_eq!(Inventory::new().total_value(), 0);
    }

    #[test]
    fn test_total_value_saturates() {
        let mut inv = Inventory::new();
        inv.add(StockEntry::new(book(DUNE, i64::MAX), 2).unwrap());
        assert_eq!(inv.total_value(), i64::MAX);
        assert_eq!(inv.checked_total_value(), None);

        // each product fits, the sum does not
        let mut inv = Inventory::new();
        inv.add(StockEntry::new(book(DUNE, i64::MAX / 2 + 1), 1).unwrap());
        inv.add(StockEntry::new(book(HOBBIT, i64::MAX / 2 + 1), 1).unwrap());
        assert_eq!(inv.total_value(), i64::MAX);
        assert_eq!(inv.checked_total_value(), None);

        let mut inv = Inventory::new();
        inv.add(StockEntry::new(book(DUNE, 1000), 3).unwrap());
        assert_eq!(inv.checked_total_value(), Some(3000));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Reserve(i64),
        Release(i64),
        Restock(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-5i64..50).prop_map(Op::Reserve),
            (-5i64..50).prop_map(Op::Release),
            (-5i64..50).prop_map(Op::Restock),
        ]
    }

    fn large_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (i64::MAX - 100..=i64::MAX).prop_map(Op::Reserve),
            (i64::MAX - 100..=i64::MAX).prop_map(Op::Release),
            (1i64..=i64::MAX).prop_map(Op::Restock),
        ]
    }

    fn apply(e: &mut StockEntry, op: Op) -> InventoryResult<()> {
        match op {
            Op::Reserve(n) => e.reserve(n),
            Op::Release(n) => e.release(n),
            Op::Restock(n) => e.restock(n),
        }
    }

    proptest! {
        #[test]
        fn reserve_then_release_restores(total in 1i64..1000, pick in 0.0f64..1.0) {
            let mut e = entry(total);
            let n = 1 + ((total - 1) as f64 * pick) as i64;
            let before = e.reserved();

            e.reserve(n).unwrap();
            e.release(n).unwrap();
            prop_assert_eq!(e.reserved(), before);
        }

        #[test]
        fn reserve_beyond_available_fails(total in 0i64..1000, extra in 1i64..100) {
            let mut e = entry(total);
            prop_assert!(e.reserve(total + extra).is_err());
            prop_assert!(e.release(1).is_err());
        }

        #[test]
        fn invariant_holds_after_any_sequence(total in 0i64..100, ops in proptest::collection::vec(op(), 0..50)) {
            let mut e = entry(total);
            for op in ops {
                let before = e.clone();
                if apply(&mut e, op).is_err() {
                    prop_assert_eq!(&e, &before);
                }
                prop_assert!(0 <= e.reserved() && e.reserved() <= e.total());
            }
        }

        #[test]
        fn invariant_holds_near_i64_max(
            total in (i64::MAX - 1000)..=i64::MAX,
            ops in proptest::collection::vec(prop_oneof![op(), large_op()], 0..50),
        ) {
            let mut e = entry(total);
            for op in ops {
                let before = e.clone();
                if apply(&mut e, op).is_err() {
                    prop_assert_eq!(&e, &before);
                }
                prop_assert!(0 <= e.reserved() && e.reserved() <= e.total());
            }
        }
    }
}
