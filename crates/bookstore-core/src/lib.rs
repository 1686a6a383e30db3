//! # bookstore-core: Pure Domain Logic for the Bookstore
//!
//! This crate is the **heart** of the bookstore. It models books as
//! validated value objects, tracks per-title stock with reservation
//! semantics, and computes pricing and catalog statistics. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bookstore-api (axum)                         │   │
//! │  │     POST /books ──► GET /books ──► /books/stats ► quote         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ ┌───────────┐    │   │
//! │  │   │  isbn  │ │ money  │ │ author │ │  book  │ │ inventory │    │   │
//! │  │   └────────┘ └────────┘ └────────┘ └────────┘ └───────────┘    │   │
//! │  │             ┌───────────┐        ┌───────────┐                  │   │
//! │  │             │  pricing  │        │   stats   │                  │   │
//! │  │             └───────────┘        └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bookstore-store (RwLock-guarded map)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`isbn`] - ISBN-13 identifier with checksum validation
//! - [`money`] - Integer minor-unit amounts tagged with a currency
//! - [`author`] - Validated first/last name pair
//! - [`book`] - Catalog entry composed from the values above
//! - [`inventory`] - Stock ledger with reserve/release/restock
//! - [`pricing`] - Bulk discounts, order totals, surcharges
//! - [`stats`] - Aggregate statistics over book collections
//! - [`error`] / [`validation`] - Typed errors and shared validators
//!
//! ## Design Principles
//!
//! 1. **Validated Construction**: every value object goes through a factory
//!    that returns `Result<_, ValidationError>`
//! 2. **Immutability**: no setters; "changes" produce new values
//! 3. **Integer Money**: all amounts are minor units (i64), never floats
//! 4. **Two Error Channels**: bad input is a `Result`, mixing currencies is a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{Isbn, Money};
//!
//! let isbn = Isbn::parse("978-0-306-40615-7").unwrap();
//! assert_eq!(isbn.as_str(), "9780306406157");
//!
//! let price = Money::new(1099, "EUR").unwrap();
//! assert_eq!(price.scale_by_percent(50).amount(), 549);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod author;
pub mod book;
pub mod error;
pub mod inventory;
pub mod isbn;
pub mod money;
pub mod pricing;
pub mod stats;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use author::Author;
pub use book::{Book, Genre};
pub use error::{InventoryError, InventoryResult, ValidationError};
pub use inventory::{Inventory, StockEntry};
pub use isbn::Isbn;
pub use money::Money;
pub use pricing::{DiscountSchedule, DiscountTier};
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits in a canonical ISBN-13.
pub const ISBN_LENGTH: usize = 13;

/// Required length of a currency code ("EUR", "USD", ...).
///
/// ## Business Reason
/// Only the length is checked. Any three-character code is accepted;
/// there is no ISO-4217 membership lookup.
pub const CURRENCY_CODE_LENGTH: usize = 3;

/// A book older than this many days counts as a classic.
pub const CLASSIC_AGE_DAYS: i64 = 50 * 365;

/// A book younger than this many days counts as a recent release.
pub const RECENT_AGE_DAYS: i64 = 365;

/// Percent applied to the price of a classic (collector surcharge).
pub const CLASSIC_SURCHARGE_PERCENT: i64 = 125;

/// Percent applied to the price of a recent release.
pub const NEW_RELEASE_PREMIUM_PERCENT: i64 = 110;
