//! # Book (Catalog Entry)
//!
//! Composes the value objects into one catalog entry.
//!
//! ## Construction Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Book Construction                                    │
//! │                                                                         │
//! │  raw fields ──► Isbn::parse ──► Author::new ──► Money::new              │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                         Book::new  (checks in this order)               │
//! │                           1. title non-empty                            │
//! │                           2. genre is a known tag                       │
//! │                           3. price amount >= 0                          │
//! │                                                                         │
//! │  The first failing check is the one reported.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time-Relative Classification
//! `is_classic` and `is_recent` are queries against the wall clock at call
//! time, not flags stored at construction. The same book can flip from
//! recent to not-recent between two calls.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::author::Author;
use crate::error::ValidationError;
use crate::isbn::Isbn;
use crate::money::Money;
use crate::validation::{validate_non_negative, ValidationResult};
use crate::{CLASSIC_AGE_DAYS, RECENT_AGE_DAYS};

// =============================================================================
// Genre
// =============================================================================

/// The closed set of catalog genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Fiction,
    #[serde(rename = "non-fiction")]
    NonFiction,
    Science,
    Biography,
    Children,
}

impl Genre {
    /// Every genre, in declaration order.
    pub const ALL: [Genre; 5] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Science,
        Genre::Biography,
        Genre::Children,
    ];

    /// The wire tag, e.g. `"non-fiction"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => "fiction",
            Genre::NonFiction => "non-fiction",
            Genre::Science => "science",
            Genre::Biography => "biography",
            Genre::Children => "children",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive tag match.
impl FromStr for Genre {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownGenre {
                genre: s.to_string(),
            })
    }
}

// =============================================================================
// Book
// =============================================================================

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(try_from = "BookRecord")]
#[ts(export)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: Author,
    price: Money,
    #[ts(as = "String")]
    published_at: DateTime<Utc>,
    genre: Genre,
}

#[derive(Deserialize)]
struct BookRecord {
    isbn: Isbn,
    title: String,
    author: Author,
    price: Money,
    published_at: DateTime<Utc>,
    genre: Genre,
}

impl TryFrom<BookRecord> for Book {
    type Error = ValidationError;

    fn try_from(r: BookRecord) -> Result<Self, Self::Error> {
        Book::new(r.isbn, r.title, r.author, r.price, r.published_at, r.genre)
    }
}

impl Book {
    /// Creates a book from already-validated parts and a typed genre.
    ///
    /// ## Rules
    /// - Title must not be the empty string
    /// - Price amount must be >= 0 (Money alone allows negatives)
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: Author,
        price: Money,
        published_at: DateTime<Utc>,
        genre: Genre,
    ) -> ValidationResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        validate_non_negative("price", price.amount())?;

        Ok(Book {
            isbn,
            title,
            author,
            price,
            published_at,
            genre,
        })
    }

    /// Creates a book from a raw genre tag, as received from a client.
    ///
    /// Keeps the documented check order: title, then genre, then price.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::{Author, Book, Isbn, Money};
    /// use chrono::Utc;
    ///
    /// let err = Book::with_genre_tag(
    ///     Isbn::parse("9780306406157").unwrap(),
    ///     "Dune",
    ///     Author::new("Frank", "Herbert").unwrap(),
    ///     Money::new(-1, "EUR").unwrap(),
    ///     Utc::now(),
    ///     "poetry",
    /// )
    /// .unwrap_err();
    ///
    /// // genre is checked before price
    /// assert_eq!(err.to_string(), "unknown genre: poetry");
    /// ```
    pub fn with_genre_tag(
        isbn: Isbn,
        title: impl Into<String>,
        author: Author,
        price: Money,
        published_at: DateTime<Utc>,
        genre: &str,
    ) -> ValidationResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        let genre: Genre = genre.parse()?;
        Book::new(isbn, title, author, price, published_at, genre)
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Published more than 50×365 days before `now`.
    pub fn is_classic_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.published_at) > Duration::days(CLASSIC_AGE_DAYS)
    }

    /// Published less than 365 days before `now`.
    pub fn is_recent_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.published_at) < Duration::days(RECENT_AGE_DAYS)
    }

    /// [`Book::is_classic_at`] against the current wall clock.
    pub fn is_classic(&self) -> bool {
        self.is_classic_at(Utc::now())
    }

    /// [`Book::is_recent_at`] against the current wall clock.
    pub fn is_recent(&self) -> bool {
        self.is_recent_at(Utc::now())
    }
}

fn validate_title(title: &str) -> ValidationResult<()> {
    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
