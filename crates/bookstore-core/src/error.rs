//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── ValidationError  - A constructor rejected its input               │
//! │  └── InventoryError   - Lookup miss or reservation capacity breach     │
//! │                                                                         │
//! │  bookstore-store errors (separate crate)                               │
//! │  └── StoreError       - Missing key, poisoned lock                     │
//! │                                                                         │
//! │  bookstore-api errors (in app)                                         │
//! │  └── ApiError         - What HTTP clients see (status + JSON)          │
//! │                                                                         │
//! │  NOT an error type: currency mismatch in Money::add / subtract.        │
//! │  That is a caller bug and panics.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Display text is the exact message handed back to API clients
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by every validating factory (ISBN, Money, Author, Book,
/// StockEntry). Always recoverable: fix the input and construct again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} must not be empty")]
    Required { field: String },

    /// ISBN does not have 13 characters after stripping separators.
    #[error("ISBN must be 13 digits, got {actual}")]
    IsbnLength { actual: usize },

    /// ISBN contains something other than ASCII digits.
    #[error("ISBN must contain only digits")]
    IsbnNotNumeric,

    /// ISBN weighted digit sum is not a multiple of ten.
    #[error("invalid ISBN-13 checksum")]
    IsbnChecksum,

    /// Currency code is not exactly three characters long.
    #[error("currency must be a 3-letter ISO code, got {code:?}")]
    CurrencyCode { code: String },

    /// Genre tag is not one of the known genres.
    #[error("unknown genre: {genre}")]
    UnknownGenre { genre: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Discount schedule entry is not `<min_quantity>:<percent>`.
    #[error("invalid discount tier {entry:?}: expected <min_quantity>:<percent>")]
    InvalidTier { entry: String },

    /// A computed amount does not fit in `i64` minor units.
    #[error("{field} is out of range")]
    OutOfRange { field: String },
}

// =============================================================================
// Inventory Error
// =============================================================================

/// Stock ledger errors.
///
/// ## When This Occurs
/// ```text
/// reserve(5) with available=3
///      │
///      ▼
/// InsufficientStock { available: 3, requested: 5 }
///      │
///      ▼
/// API answers 409: "insufficient stock: 3 available, 5 requested"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No stock entry exists for the ISBN.
    #[error("book {isbn} not found in inventory")]
    NotFound { isbn: String },

    /// Reservation asks for more copies than are available.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// Release asks for more copies than are currently reserved.
    #[error("cannot release {requested}: only {reserved} reserved")]
    ExcessiveRelease { reserved: i64, requested: i64 },

    /// Restock would push total stock past `i64::MAX`.
    #[error("cannot restock {requested}: total stock {total} would overflow")]
    StockOverflow { total: i64, requested: i64 },

    /// Quantity argument failed validation (zero or negative).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl InventoryError {
    /// True for the capacity variants (`InsufficientStock`, `ExcessiveRelease`,
    /// `StockOverflow`).
    ///
    /// These depend on the current counts rather than the input alone;
    /// callers usually retry with a different quantity.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            InventoryError::InsufficientStock { .. }
                | InventoryError::ExcessiveRelease { .. }
                | InventoryError::StockOverflow { .. }
        )
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with InventoryError.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================
