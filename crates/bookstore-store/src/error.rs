//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! BookRepository ──► StoreError ──► ApiError (in app) ──► HTTP status + JSON
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No book stored under the ISBN.
    ///
    /// ## When This Occurs
    /// - `find_by_isbn` / `delete` with an unknown key
    /// - Key given in hyphenated form (keys are canonical 13-digit strings)
    #[error("book {isbn} not found")]
    NotFound { isbn: String },

    /// A thread panicked while holding the lock.
    #[error("book store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn not_found(isbn: impl Into<String>) -> Self {
        StoreError::NotFound { isbn: isbn.into() }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
