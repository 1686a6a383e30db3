//! Route table.

pub mod books;
pub mod inventory;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

/// All routes, before state and middleware are attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/stats", get(books::book_stats))
        .route("/books/top", get(books::top_books))
        .route(
            "/books/{isbn}",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/books/{isbn}/quote", get(books::quote))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route(
            "/inventory/{isbn}",
            put(inventory::set_stock).get(inventory::get_stock),
        )
        .route("/inventory/{isbn}/reserve", post(inventory::reserve))
        .route("/inventory/{isbn}/release", post(inventory::release))
        .route("/inventory/{isbn}/restock", post(inventory::restock))
}
