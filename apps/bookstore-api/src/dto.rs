//! Request and response bodies.

use std::collections::BTreeMap;

use bookstore_core::{Book, Genre, StockEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Books
// =============================================================================

/// `POST /books` body. Missing fields default to empty/zero so the domain
/// constructors produce the validation message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookRequest {
    pub isbn: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub price_cents: i64,
    pub currency: String,
    pub genre: String,
    /// Defaults to the time of the request.
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Display form, e.g. `"12.99 EUR"`
    pub price: String,
    pub genre: Genre,
    pub is_classic: bool,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        BookResponse {
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
            author: book.author().full_name(),
            price: book.price().display(),
            genre: book.genre(),
            is_classic: book.is_classic(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub books: Vec<BookResponse>,
    pub count: usize,
}

impl ListResponse {
    pub fn new<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let books: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
        ListResponse {
            count: books.len(),
            books,
        }
    }
}

/// `GET /books` filters. All optional, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
    /// Author last name
    pub author: Option<String>,
    /// Title substring
    pub title: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub count: usize,
    pub average_price: i64,
    pub median_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub genre_breakdown: BTreeMap<Genre, usize>,
}

// =============================================================================
// Pricing
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteQuery {
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub isbn: String,
    pub quantity: i64,
    pub unit_price: String,
    pub discount_percent: i64,
    pub order_total: String,
    pub classic_price: String,
    pub new_release_price: String,
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct StockRequest {
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockResponse {
    pub isbn: String,
    pub title: String,
    pub total: i64,
    pub reserved: i64,
    pub available: i64,
}

impl From<&StockEntry> for StockResponse {
    fn from(entry: &StockEntry) -> Self {
        StockResponse {
            isbn: entry.book().isbn().to_string(),
            title: entry.book().title().to_string(),
            total: entry.total(),
            reserved: entry.reserved(),
            available: entry.available(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockResponse {
    pub threshold: i64,
    pub books: Vec<BookResponse>,
    pub count: usize,
    /// Value of all owned stock in minor units
    /// Saturates at `i64::MAX`.
    pub total_value: i64,
}
