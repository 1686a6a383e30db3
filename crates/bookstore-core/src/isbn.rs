//! # ISBN Module
//!
//! The `Isbn` type: a validated ISBN-13 product identifier.
//!
//! ## Checksum
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ISBN-13 WEIGHTED SUM                                                   │
//! │                                                                         │
//! │  digit:   9  7  8  0  3  0  6  4  0  6  1  5  7                          │
//! │  weight:  1  3  1  3  1  3  1  3  1  3  1  3  1                          │
//! │           ─────────────────────────────────────                         │
//! │  sum = 9+21+8+0+3+0+6+12+0+18+1+15+7 = 100                              │
//! │                                                                         │
//! │  100 % 10 == 0  → valid                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hyphens and spaces are separators only: `"978-0-306-40615-7"` and
//! `"9780306406157"` parse to the same value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::ISBN_LENGTH;

/// A validated ISBN-13, stored as its canonical 13-digit string.
///
/// There is no way to build an `Isbn` without going through [`Isbn::parse`],
/// so every value in circulation satisfies the checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct Isbn(String);

impl Isbn {
    /// Parses and validates a raw ISBN.
    ///
    /// ## Rules
    /// - `-` and ` ` are stripped first
    /// - Exactly 13 characters must remain
    /// - All of them must be ASCII digits
    /// - Weighted sum (1,3,1,3,...) must be divisible by 10
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::Isbn;
    ///
    /// let isbn = Isbn::parse("978-0-306-40615-7").unwrap();
    /// assert_eq!(isbn.as_str(), "9780306406157");
    ///
    /// assert!(Isbn::parse("9780306406158").is_err()); // bad checksum
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let cleaned: String = raw.chars().filter(|c| *c != '-' && *c != ' ').collect();

        if cleaned.len() != ISBN_LENGTH {
            return Err(ValidationError::IsbnLength {
                actual: cleaned.len(),
            });
        }

        if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::IsbnNotNumeric);
        }

        if !has_valid_checksum(&cleaned) {
            return Err(ValidationError::IsbnChecksum);
        }

        Ok(Isbn(cleaned))
    }

    /// Returns the canonical 13-digit form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the grouped form `DDD-D-DDDD-DDDD-D`.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::Isbn;
    ///
    /// let isbn = Isbn::parse("9780306406157").unwrap();
    /// assert_eq!(isbn.formatted(), "978-0-3064-0615-7");
    /// ```
    pub fn formatted(&self) -> String {
        // Unreachable for parsed values; kept so a malformed value still prints.
        if self.0.len() != ISBN_LENGTH {
            return self.0.clone();
        }

        let v = &self.0;
        format!("{}-{}-{}-{}-{}", &v[0..3], &v[3..4], &v[4..8], &v[8..12], &v[12..13])
    }
}

/// Weighted digit sum check. Caller guarantees ASCII digits only.
fn has_valid_checksum(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                d
            } else {
                d * 3
            }
        })
        .sum();

    sum % 10 == 0
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Isbn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isbn::parse(s)
    }
}

impl TryFrom<String> for Isbn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Isbn::parse(&value)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
