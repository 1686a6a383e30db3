//! # bookstore-store: Storage Layer for the Bookstore
//!
//! An in-memory book collection shared between request handlers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /books, GET /books, ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookstore-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────────┐        ┌──────────────────────┐     │   │
//! │  │   │   BookRepository     │        │   query filters      │     │   │
//! │  │   │   (repository.rs)    │        │   (query.rs)         │     │   │
//! │  │   │                      │        │                      │     │   │
//! │  │   │ RwLock<HashMap<      │───────►│ by_genre, by_title…  │     │   │
//! │  │   │   isbn, Book>>       │        │ apply(books, [..])   │     │   │
//! │  │   └──────────────────────┘        └──────────────────────┘     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - Lock-guarded keyed collection
//! - [`query`] - Composable book filters
//! - [`error`] - Store error types

pub mod error;
pub mod query;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use query::BookFilter;
pub use repository::BookRepository;
