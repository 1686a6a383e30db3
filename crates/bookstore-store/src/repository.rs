//! # Book Repository
//!
//! Keyed book storage behind a reader/writer lock.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RwLock<HashMap<String, Book>>                        │
//! │                                                                         │
//! │  find_by_isbn / find_all / count   → read lock  (many at once)          │
//! │  save / delete                     → write lock (exclusive)             │
//! │                                                                         │
//! │  Books are cloned out; callers never hold the lock after returning.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookstore_core::Book;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// In-memory book storage keyed by canonical ISBN.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BookRepository::new();
/// repo.save(book)?;
/// let found = repo.find_by_isbn("9780306406157")?;
/// ```
#[derive(Debug, Default)]
pub struct BookRepository {
    books: RwLock<HashMap<String, Book>>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Book>>> {
        self.books.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Book>>> {
        self.books.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Stores a book, replacing any book with the same ISBN.
    pub fn save(&self, book: Book) -> StoreResult<()> {
        let key = book.isbn().to_string();
        debug!(isbn = %key, title = %book.title(), "Saving book");
        self.write()?.insert(key, book);
        Ok(())
    }

    /// Gets a book by its canonical ISBN.
    ///
    /// ## Returns
    /// * `Ok(Book)` - Book found
    /// * `Err(StoreError::NotFound)` - No such key
    pub fn find_by_isbn(&self, isbn: &str) -> StoreResult<Book> {
        self.read()?
            .get(isbn)
            .cloned()
            .ok_or_else(|| StoreError::not_found(isbn))
    }

    /// Every stored book, in no particular order.
    pub fn find_all(&self) -> StoreResult<Vec<Book>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Removes a book.
    pub fn delete(&self, isbn: &str) -> StoreResult<()> {
        match self.write()?.remove(isbn) {
            Some(_) => {
                debug!(isbn = %isbn, "Deleted book");
                Ok(())
            }
            None => Err(StoreError::not_found(isbn)),
        }
    }

    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
