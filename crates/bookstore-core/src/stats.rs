//! # Statistics Engine
//!
//! Aggregates over a slice of books. None of these mutate their input and
//! every one of them has a defined result for an empty slice:
//!
//! | Function           | Empty input |
//! |--------------------|-------------|
//! | `average_price`    | `0`         |
//! | `median_price`     | `0`         |
//! | `price_range`      | `(0, 0)`    |
//! | `genre_breakdown`  | `{}`        |
//! | `most_expensive`   | `[]`        |
//!
//! All prices are raw minor-unit amounts; currencies are not inspected.

use std::collections::BTreeMap;

use crate::book::{Book, Genre};
use crate::money::saturate;

/// Mean price, truncated toward zero.
pub fn average_price(books: &[Book]) -> i64 {
    if books.is_empty() {
        return 0;
    }

    let total: i128 = books.iter().map(|b| i128::from(b.price().amount())).sum();
    saturate(total / books.len() as i128)
}

/// Median price. For an even count, the truncated mean of the two middle prices.
pub fn median_price(books: &[Book]) -> i64 {
    if books.is_empty() {
        return 0;
    }

    let mut prices: Vec<i64> = books.iter().map(|b| b.price().amount()).collect();
    prices.sort_unstable();

    let mid = prices.len() / 2;
    if prices.len() % 2 == 0 {
        // the mean of two i64 values always fits back into i64
        saturate((i128::from(prices[mid - 1]) + i128::from(prices[mid])) / 2)
    } else {
        prices[mid]
    }
}

/// `(min, max)` price.
pub fn price_range(books: &[Book]) -> (i64, i64) {
    let mut prices = books.iter().map(|b| b.price().amount());

    let Some(first) = prices.next() else {
        return (0, 0);
    };

    prices.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
}

/// Number of books per genre. Genres with no books are absent, not zero.
pub fn genre_breakdown(books: &[Book]) -> BTreeMap<Genre, usize> {
    let mut counts = BTreeMap::new();
    for book in books {
        *counts.entry(book.genre()).or_insert(0) += 1;
    }
    counts
}

/// The `n` most expensive books, highest price first.
///
/// Equal prices keep their input order (stable sort over a copy of the
/// references). `n <= 0` or an empty slice yields an empty vector.
pub fn most_expensive(books: &[Book], n: i64) -> Vec<&Book> {
    if n <= 0 || books.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Book> = books.iter().collect();
    sorted.sort_by(|a, b| b.price().amount().cmp(&a.price().amount()));

    let n = usize::try_from(n).unwrap_or(usize::MAX);
    sorted.truncate(n);
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================
