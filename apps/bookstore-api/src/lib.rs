//! # Bookstore API
//!
//! HTTP server over the book catalog and stock ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bookstore API Routes                            │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌─────────────────────────────────────┐   │
//! │  │  Books                 │  │  Inventory                          │   │
//! │  │                        │  │                                     │   │
//! │  │ • GET    /books        │  │ • PUT  /inventory/{isbn}            │   │
//! │  │ • POST   /books        │  │ • GET  /inventory/{isbn}            │   │
//! │  │ • GET    /books/{isbn} │  │ • POST /inventory/{isbn}/reserve    │   │
//! │  │ • DELETE /books/{isbn} │  │ • POST /inventory/{isbn}/release    │   │
//! │  │ • GET    /books/stats  │  │ • POST /inventory/{isbn}/restock    │   │
//! │  │ • GET    /books/top    │  │                                     │   │
//! │  │ • GET  /books/{isbn}/  │  │ • GET  /inventory/low-stock         │   │
//! │  │        quote?quantity= │  │                                     │   │
//! │  └────────────────────────┘  └─────────────────────────────────────┘   │
//! │                                                                         │
//! │  Middleware: TraceLayer (request spans) → CatchPanicLayer (500 JSON)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `BOOKSTORE_ADDR` - Listen address (default: 0.0.0.0:8080)
//! - `BOOKSTORE_LOW_STOCK_THRESHOLD` - Low stock cutoff (default: 5)
//! - `BOOKSTORE_DISCOUNT_TIERS` - Bulk discount tiers (default: 10:5,25:10,50:15,100:20)

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use std::any::Any;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::response::{IntoResponse, Response};
use axum::Router;
use bookstore_core::{DiscountSchedule, Inventory};
use bookstore_store::BookRepository;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<BookRepository>,
    pub inventory: Arc<RwLock<Inventory>>,
    pub pricing: Arc<DiscountSchedule>,
    pub low_stock_threshold: i64,
}

impl AppState {
    /// Empty catalog and ledger using the configured pricing.
    pub fn new(config: &ApiConfig) -> Self {
        AppState {
            repo: Arc::new(BookRepository::new()),
            inventory: Arc::new(RwLock::new(Inventory::new())),
            pricing: Arc::new(config.discount_schedule.clone()),
            low_stock_threshold: config.low_stock_threshold,
        }
    }

    /// Shared lock on the stock ledger. Guards must not be held across an `.await`.
    pub fn read_inventory(&self) -> ApiResult<RwLockReadGuard<'_, Inventory>> {
        self.inventory.read().map_err(|_| inventory_poisoned())
    }

    /// Exclusive lock for reserve/release/restock and new entries.
    pub fn write_inventory(&self) -> ApiResult<RwLockWriteGuard<'_, Inventory>> {
        self.inventory.write().map_err(|_| inventory_poisoned())
    }
}

fn inventory_poisoned() -> ApiError {
    tracing::error!("Inventory lock poisoned");
    ApiError::internal("internal server error")
}

/// Builds the full router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Turns a handler panic into a 500 with the standard error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::internal("internal server error").into_response()
}
