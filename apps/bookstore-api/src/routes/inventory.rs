//! # Inventory Routes
//!
//! Stock ledger operations for books already in the catalog.
//!
//! ## Thread Safety
//! The ledger is an `Arc<RwLock<Inventory>>` in [`AppState`]. Lookups take
//! the read lock; anything that changes counts takes the write lock. Guards
//! are dropped before the handler returns and never live across an `.await`.
//!
//! ```text
//! PUT  /inventory/{isbn}          {total}     → StockEntry::new  → inventory.add
//! POST /inventory/{isbn}/reserve  {quantity}  → entry.reserve
//! POST /inventory/{isbn}/release  {quantity}  → entry.release
//! POST /inventory/{isbn}/restock  {quantity}  → entry.restock
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use bookstore_core::{InventoryResult, Isbn, StockEntry};
use tracing::info;

use crate::dto::{BookResponse, LowStockResponse, QuantityRequest, StockRequest, StockResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Registers or replaces the stock entry for a catalog book.
pub async fn set_stock(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> ApiResult<Json<StockResponse>> {
    let Json(StockRequest { total }) = payload.map_err(|_| ApiError::invalid_body())?;

    let isbn = Isbn::parse(&isbn)?;
    let book = state.repo.find_by_isbn(isbn.as_str())?;
    let entry = StockEntry::new(book, total)?;
    let response = StockResponse::from(&entry);

    state.write_inventory()?.add(entry);
    info!(isbn = %isbn, total, "Stock set");

    Ok(Json(response))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<StockResponse>> {
    let isbn = Isbn::parse(&isbn)?;
    let inventory = state.read_inventory()?;
    let entry = inventory.find(&isbn)?;
    Ok(Json(StockResponse::from(entry)))
}

pub async fn reserve(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> ApiResult<Json<StockResponse>> {
    let Json(QuantityRequest { quantity }) = payload.map_err(|_| ApiError::invalid_body())?;
    update_entry(&state, &isbn, |entry| entry.reserve(quantity)).map(Json)
}

pub async fn release(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> ApiResult<Json<StockResponse>> {
    let Json(QuantityRequest { quantity }) = payload.map_err(|_| ApiError::invalid_body())?;
    update_entry(&state, &isbn, |entry| entry.release(quantity)).map(Json)
}

pub async fn restock(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> ApiResult<Json<StockResponse>> {
    let Json(QuantityRequest { quantity }) = payload.map_err(|_| ApiError::invalid_body())?;
    update_entry(&state, &isbn, |entry| entry.restock(quantity)).map(Json)
}

/// Runs one ledger operation under the lock and reports the resulting counts.
fn update_entry<F>(state: &AppState, isbn: &str, op: F) -> ApiResult<StockResponse>
where
    F: FnOnce(&mut StockEntry) -> InventoryResult<()>,
{
    let isbn = Isbn::parse(isbn)?;
    let mut inventory = state.write_inventory()?;
    let entry = inventory.find_mut(&isbn)?;
    op(entry)?;
    Ok(StockResponse::from(&*entry))
}

/// Books below the configured threshold, plus the value of all stock held.
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<LowStockResponse>> {
    let inventory = state.read_inventory()?;

    let mut books: Vec<BookResponse> = inventory
        .low_stock_books(state.low_stock_threshold)
        .into_iter()
        .map(BookResponse::from)
        .collect();
    books.sort_by(|a, b| a.isbn.cmp(&b.isbn));

    Ok(Json(LowStockResponse {
        threshold: state.low_stock_threshold,
        count: books.len(),
        books,
        total_value: inventory.total_value(),
    }))
}
